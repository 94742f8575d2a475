//! The task that owns all logger state

use crate::aggregator::{BurstAggregator, PendingBurst};
use crate::config::LoggerConfig;
use crate::document::DocumentProvider;
use crate::error::EditLogResult;
use crate::events::{ChangeNotification, SaveNotification, classify_all};
use crate::export::DatasetExporter;
use crate::filter::TrackingFilter;
use crate::history::HistoryStore;
use crate::masking::MaskingEngine;
use chrono::{DateTime, Utc};
use std::future::pending;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, info, warn};

use super::command::LoggerCommand;
use super::status::{LoggerStatus, StatusObservers};

pub(super) struct LoggerTask {
    config: LoggerConfig,
    filter: TrackingFilter,
    masking: MaskingEngine,
    aggregator: BurstAggregator,
    history: HistoryStore,
    exporter: DatasetExporter,
    docs: Arc<dyn DocumentProvider>,
    observers: StatusObservers,
    enabled: bool,
    saved_event_count: u64,
    deadline: Option<Instant>,
}

impl LoggerTask {
    pub(super) fn new(
        config: LoggerConfig,
        docs: Arc<dyn DocumentProvider>,
        exporter: DatasetExporter,
        observers: StatusObservers,
    ) -> Self {
        Self {
            filter: TrackingFilter::from_config(&config),
            masking: MaskingEngine::from_config(&config),
            history: HistoryStore::new(config.history_size),
            aggregator: BurstAggregator::new(),
            config,
            exporter,
            docs,
            observers,
            enabled: false,
            saved_event_count: 0,
            deadline: None,
        }
    }

    pub(super) async fn run(mut self, mut commands: mpsc::Receiver<LoggerCommand>) {
        loop {
            let deadline = self.deadline;
            tokio::select! {
                biased;

                _ = async move {
                    match deadline {
                        Some(at) => sleep_until(at).await,
                        None => pending::<()>().await,
                    }
                } => {
                    self.deadline = None;
                    debug!("Debounce interval elapsed");
                    let _ = self.flush_pending().await;
                }

                command = commands.recv() => {
                    match command {
                        Some(LoggerCommand::Shutdown(reply)) => {
                            self.teardown().await;
                            let _ = reply.send(());
                            break;
                        }
                        Some(command) => self.handle(command).await,
                        None => {
                            self.teardown().await;
                            break;
                        }
                    }
                }
            }
        }
    }

    async fn handle(&mut self, command: LoggerCommand) {
        match command {
            LoggerCommand::Change {
                notification,
                snapshot,
                received_at,
            } => self.on_change(notification, snapshot, received_at).await,
            LoggerCommand::Save(save) => self.on_save(&save),
            LoggerCommand::Flush(reply) => {
                self.deadline = None;
                let _ = reply.send(self.flush_pending().await);
            }
            LoggerCommand::SetEnabled { enabled, reply } => {
                self.enabled = enabled.unwrap_or(!self.enabled);
                info!(
                    "Edit logging {}",
                    if self.enabled { "enabled" } else { "disabled" }
                );
                self.notify_status();
                let _ = reply.send(self.enabled);
            }
            LoggerCommand::UpdateConfig { config, reply } => {
                let _ = reply.send(self.update_config(*config));
            }
            LoggerCommand::Status(reply) => {
                let _ = reply.send(self.status());
            }
            LoggerCommand::History(reply) => {
                let _ = reply.send(self.history.all());
            }
            // Handled by the run loop
            LoggerCommand::Shutdown(reply) => {
                let _ = reply.send(());
            }
        }
    }

    async fn on_change(
        &mut self,
        notification: ChangeNotification,
        snapshot: Option<String>,
        received_at: DateTime<Utc>,
    ) {
        if !self.enabled
            || !self
                .filter
                .should_track(&notification.scheme, &notification.file_path)
        {
            return;
        }

        let events = classify_all(&notification, received_at);
        debug!(
            "{} change(s) on {}, {} recorded",
            notification.changes.len(),
            notification.file_path.display(),
            events.len()
        );

        let docs = &self.docs;
        let path = &notification.file_path;
        let displaced = self.aggregator.record(
            path,
            || {
                snapshot
                    .or_else(|| docs.current_text(path))
                    .unwrap_or_default()
            },
            events,
        );

        if let Some(burst) = displaced {
            let _ = self.flush_burst(burst).await;
        }

        self.deadline = Some(Instant::now() + Duration::from_millis(self.config.debounce_ms));
    }

    fn on_save(&self, save: &SaveNotification) {
        if !self.enabled || !self.filter.matches_path(&save.file_path) {
            return;
        }

        let file_name = save
            .file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(
            "File saved: {} (line {}, {} lines)",
            file_name,
            save.cursor_line.map_or(1, |line| line + 1),
            save.line_count
        );
    }

    async fn flush_pending(&mut self) -> EditLogResult<Option<PathBuf>> {
        match self.aggregator.take() {
            Some(burst) => self.flush_burst(burst).await,
            None => Ok(None),
        }
    }

    /// Turn a closed burst into a history entry and export it
    ///
    /// The entry stays in history even when the export fails.
    async fn flush_burst(&mut self, burst: PendingBurst) -> EditLogResult<Option<PathBuf>> {
        let path = burst.file_path().to_path_buf();
        let Some(current) = self.docs.current_text(&path) else {
            warn!(
                "Discarding burst for {}: document is no longer available",
                path.display()
            );
            return Ok(None);
        };
        let cursor_line = self.docs.cursor_line(&path);

        let event_count = burst.events().len();
        let entry = burst
            .into_entry(&current, cursor_line, &self.masking)
            .inspect_err(|e| error!("Failed to build history entry: {}", e))?;
        info!(
            "Flushing {} event(s) for {} ({} hunk(s))",
            event_count,
            entry.file_name,
            entry.hunks.len()
        );

        self.history.add(entry.clone());
        let history = self.history.all();

        match self.exporter.export(&entry, &history, &self.config).await {
            Ok(written) => {
                self.saved_event_count += 1;
                self.notify_status();
                Ok(Some(written))
            }
            Err(e) => {
                error!("Failed to export {}: {}", entry.file_name, e);
                Err(e)
            }
        }
    }

    fn update_config(&mut self, config: LoggerConfig) -> EditLogResult<()> {
        config.validate()?;

        self.filter = TrackingFilter::from_config(&config);
        self.masking = MaskingEngine::from_config(&config);
        self.history.set_capacity(config.history_size);
        self.config = config;

        info!("Configuration updated");
        self.notify_status();
        Ok(())
    }

    async fn teardown(&mut self) {
        self.deadline = None;
        if let Err(e) = self.flush_pending().await {
            warn!("Final flush failed: {}", e);
        }
        debug!("Edit logger stopped");
    }

    fn status(&self) -> LoggerStatus {
        LoggerStatus {
            enabled: self.enabled,
            saved_event_count: self.saved_event_count,
            dataset_root: self.config.dataset_root.clone(),
            pending_file: self.aggregator.pending_file().map(|p| p.to_path_buf()),
            history_len: self.history.len(),
        }
    }

    fn notify_status(&self) {
        if !self.observers.is_empty() {
            self.observers.notify(&self.status());
        }
    }
}
