//! Per-file burst aggregation
//!
//! [`BurstAggregator`] is the synchronous half of the debounce state
//! machine: it decides which burst an event belongs to and hands back bursts
//! that must be flushed. Timing lives in the logger task.

mod burst;

pub use burst::PendingBurst;

use crate::events::EditEvent;
use std::path::Path;
use tracing::debug;

/// Idle or buffering exactly one file's burst
#[derive(Debug, Default)]
pub struct BurstAggregator {
    pending: Option<PendingBurst>,
}

impl BurstAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a burst is in progress
    pub fn is_buffering(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingBurst> {
        self.pending.as_ref()
    }

    pub fn pending_file(&self) -> Option<&Path> {
        self.pending.as_ref().map(PendingBurst::file_path)
    }

    /// Add events for `file_path`
    ///
    /// Starting a burst calls `snapshot` for the file's content before these
    /// events. When a burst for another file is in progress it is closed
    /// first and returned so the caller can flush it before anything else
    /// happens; a closed burst without events is dropped instead.
    pub fn record<F>(
        &mut self,
        file_path: &Path,
        snapshot: F,
        events: Vec<EditEvent>,
    ) -> Option<PendingBurst>
    where
        F: FnOnce() -> String,
    {
        let displaced = match self.pending.take() {
            Some(burst) if burst.file_path() == file_path => {
                self.pending = Some(burst);
                None
            }
            Some(burst) => {
                debug!(
                    "Switching from {} to {}",
                    burst.file_name(),
                    file_path.display()
                );
                Some(burst)
            }
            None => None,
        };

        let burst = self
            .pending
            .get_or_insert_with(|| PendingBurst::new(file_path, snapshot()));
        for event in events {
            burst.push(event);
        }

        displaced.filter(|burst| !burst.is_empty())
    }

    /// Close the current burst
    ///
    /// Returns `None` when idle or when the burst recorded no events.
    pub fn take(&mut self) -> Option<PendingBurst> {
        self.pending.take().filter(|burst| !burst.is_empty())
    }
}
