//! Messages sent from [`EditLogger`](super::EditLogger) handles to the task

use crate::config::LoggerConfig;
use crate::error::EditLogResult;
use crate::events::{ChangeNotification, SaveNotification};
use crate::history::HistoryEntry;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::sync::oneshot;

use super::status::LoggerStatus;

pub(super) enum LoggerCommand {
    /// Content changed; `snapshot` is the document before these changes
    Change {
        notification: ChangeNotification,
        snapshot: Option<String>,
        received_at: DateTime<Utc>,
    },
    Save(SaveNotification),
    Flush(oneshot::Sender<EditLogResult<Option<PathBuf>>>),
    SetEnabled {
        enabled: Option<bool>,
        reply: oneshot::Sender<bool>,
    },
    UpdateConfig {
        config: Box<LoggerConfig>,
        reply: oneshot::Sender<EditLogResult<()>>,
    },
    Status(oneshot::Sender<LoggerStatus>),
    History(oneshot::Sender<Vec<HistoryEntry>>),
    Shutdown(oneshot::Sender<()>),
}
