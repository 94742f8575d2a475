//! The edit logger controller
//!
//! [`EditLogger`] is a cheap, cloneable handle to a background task that owns
//! the aggregator, the history store and the exporter. Commands are handled
//! strictly in the order they are sent, and the debounce timer is a deadline
//! inside the task's loop, so it can never fire against a burst that has
//! already been flushed.
//!
//! ```no_run
//! use editlog_core::{
//!     ChangeNotification, ContentChange, DatasetExporter, EditLogger, LoggerConfig,
//!     MemoryDocuments, Position,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> editlog_core::EditLogResult<()> {
//! let docs = Arc::new(MemoryDocuments::new());
//! docs.open("/work/app/main.rs", "fn main() {}\n");
//!
//! let logger = EditLogger::spawn(LoggerConfig::default(), docs.clone(), DatasetExporter::local())?;
//! logger.set_enabled(true).await?;
//!
//! let mut change = ChangeNotification::new(
//!     "/work/app/main.rs",
//!     vec![ContentChange::insert(Position::new(0, 11), " ")],
//! );
//! docs.apply(&mut change)?;
//! logger.notify_change(change).await?;
//!
//! logger.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod command;
mod status;
mod task;

pub use status::{LoggerStatus, StatusObservers};

use crate::config::LoggerConfig;
use crate::document::{DocumentProvider, revert_changes};
use crate::error::{EditLogError, EditLogResult};
use crate::events::{ChangeNotification, SaveNotification};
use crate::export::DatasetExporter;
use crate::history::HistoryEntry;
use chrono::Utc;
use command::LoggerCommand;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use task::LoggerTask;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

const COMMAND_BUFFER: usize = 256;

/// Handle to a running edit logger
#[derive(Clone)]
pub struct EditLogger {
    commands: mpsc::Sender<LoggerCommand>,
    docs: Arc<dyn DocumentProvider>,
    observers: StatusObservers,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl std::fmt::Debug for EditLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditLogger")
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl EditLogger {
    /// Validate `config` and start the logger task
    ///
    /// Logging starts disabled. Must be called from within a tokio runtime.
    pub fn spawn(
        config: LoggerConfig,
        docs: Arc<dyn DocumentProvider>,
        exporter: DatasetExporter,
    ) -> EditLogResult<Self> {
        config.validate()?;

        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let observers = StatusObservers::default();
        let task = LoggerTask::new(config, docs.clone(), exporter, observers.clone());
        let worker = tokio::spawn(task.run(receiver));

        Ok(Self {
            commands,
            docs,
            observers,
            worker: Arc::new(Mutex::new(Some(worker))),
        })
    }

    /// Report changes that were just applied to a document
    ///
    /// The pre-edit content is reconstructed from the document right away,
    /// so call this before applying further changes.
    pub async fn notify_change(&self, notification: ChangeNotification) -> EditLogResult<()> {
        let snapshot = self
            .docs
            .current_text(&notification.file_path)
            .and_then(|text| match revert_changes(&text, &notification.changes) {
                Ok(before) => Some(before),
                Err(e) => {
                    debug!("Cannot rebuild pre-edit text: {}", e);
                    None
                }
            });

        self.send(LoggerCommand::Change {
            notification,
            snapshot,
            received_at: Utc::now(),
        })
        .await
    }

    /// Report a save; saves are logged, not exported
    pub async fn notify_save(&self, save: SaveNotification) -> EditLogResult<()> {
        self.send(LoggerCommand::Save(save)).await
    }

    /// Flush the pending burst now
    ///
    /// Returns the written file, or `None` when there was nothing to flush.
    pub async fn flush(&self) -> EditLogResult<Option<PathBuf>> {
        self.request(LoggerCommand::Flush).await?
    }

    /// Turn logging on or off, returning the new state
    pub async fn set_enabled(&self, enabled: bool) -> EditLogResult<bool> {
        self.request(|reply| LoggerCommand::SetEnabled {
            enabled: Some(enabled),
            reply,
        })
        .await
    }

    /// Flip the enabled flag, returning the new state
    pub async fn toggle(&self) -> EditLogResult<bool> {
        self.request(|reply| LoggerCommand::SetEnabled {
            enabled: None,
            reply,
        })
        .await
    }

    /// Replace the configuration; the history is resized immediately
    pub async fn update_config(&self, config: LoggerConfig) -> EditLogResult<()> {
        self.request(|reply| LoggerCommand::UpdateConfig {
            config: Box::new(config),
            reply,
        })
        .await?
    }

    pub async fn status(&self) -> EditLogResult<LoggerStatus> {
        self.request(LoggerCommand::Status).await
    }

    /// Snapshot of the history, oldest first
    pub async fn history(&self) -> EditLogResult<Vec<HistoryEntry>> {
        self.request(LoggerCommand::History).await
    }

    /// Register a callback run after toggles, config updates and exports
    pub fn on_status_change<F>(&self, callback: F)
    where
        F: Fn(&LoggerStatus) + Send + Sync + 'static,
    {
        self.observers.register(callback);
    }

    /// Flush whatever is pending and stop the task
    ///
    /// Returns once the task has exited. Other handles fail afterwards.
    pub async fn shutdown(&self) -> EditLogResult<()> {
        let (reply, rx) = oneshot::channel();
        if self.commands.send(LoggerCommand::Shutdown(reply)).await.is_ok() {
            let _ = rx.await;
        }

        let worker = self.worker.lock().take();
        if let Some(worker) = worker {
            worker
                .await
                .map_err(|e| EditLogError::event_processing(format!("logger task failed: {}", e)))?;
        }
        Ok(())
    }

    async fn send(&self, command: LoggerCommand) -> EditLogResult<()> {
        self.commands.send(command).await.map_err(|_| stopped())
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> LoggerCommand,
    ) -> EditLogResult<T> {
        let (reply, rx) = oneshot::channel();
        self.send(command(reply)).await?;
        rx.await.map_err(|_| stopped())
    }
}

fn stopped() -> EditLogError {
    EditLogError::event_processing("edit logger has shut down")
}

#[cfg(test)]
mod tests;
