//! Logger status and its observers

use parking_lot::Mutex;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Point-in-time view of the logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerStatus {
    pub enabled: bool,
    /// Number of exports written since start
    pub saved_event_count: u64,
    pub dataset_root: PathBuf,
    /// File of the burst in progress, if any
    pub pending_file: Option<PathBuf>,
    pub history_len: usize,
}

type StatusCallback = Arc<dyn Fn(&LoggerStatus) + Send + Sync>;

/// Registered status-change callbacks
#[derive(Clone, Default)]
pub struct StatusObservers {
    callbacks: Arc<Mutex<Vec<StatusCallback>>>,
}

impl StatusObservers {
    pub fn register<F>(&self, callback: F)
    where
        F: Fn(&LoggerStatus) + Send + Sync + 'static,
    {
        self.callbacks.lock().push(Arc::new(callback));
    }

    pub fn len(&self) -> usize {
        self.callbacks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every callback; the list is copied first so callbacks may register more
    pub(super) fn notify(&self, status: &LoggerStatus) {
        let callbacks: Vec<StatusCallback> = self.callbacks.lock().clone();
        for callback in &callbacks {
            callback(status);
        }
    }
}

impl std::fmt::Debug for StatusObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusObservers")
            .field("count", &self.len())
            .finish()
    }
}
