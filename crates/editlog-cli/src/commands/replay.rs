//! `editlog replay`

use crate::console::CliConsole;
use crate::session::{self, SessionRecord};
use anyhow::Context;
use editlog_core::{
    ChangeNotification, DatasetExporter, DocumentProvider, EditLogger, LoggerConfig,
    MemoryDocuments, SaveNotification,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub async fn execute(
    file: &Path,
    workspaces: Vec<PathBuf>,
    mut config: LoggerConfig,
) -> anyhow::Result<()> {
    let console = CliConsole::new();
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read recording {}", file.display()))?;
    let records = session::parse(&content)?;

    if !workspaces.is_empty() {
        config.workspace_roots = workspaces;
    }

    let docs = Arc::new(MemoryDocuments::new());
    let logger = EditLogger::spawn(config, docs.clone(), DatasetExporter::local())?;
    logger.set_enabled(true).await?;

    for record in records {
        if let Err(e) = play(&logger, &docs, record).await {
            warn!("Skipping record: {:#}", e);
        }
    }

    logger.flush().await?;
    let status = logger.status().await?;
    logger.shutdown().await?;

    console.success(&format!(
        "Replayed {}: {} event(s) exported to {}",
        file.display(),
        status.saved_event_count,
        status.dataset_root.display()
    ));
    Ok(())
}

async fn play(
    logger: &EditLogger,
    docs: &MemoryDocuments,
    record: SessionRecord,
) -> anyhow::Result<()> {
    match record {
        SessionRecord::Open { path, text } => {
            let text = match text {
                Some(text) => text,
                None => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to open {}", path.display()))?,
            };
            debug!("Opened {}", path.display());
            docs.open(path, text);
        }
        SessionRecord::Change {
            path,
            changes,
            scheme,
        } => {
            let mut notification = ChangeNotification::new(path, changes).with_scheme(scheme);
            docs.apply(&mut notification)?;
            logger.notify_change(notification).await?;
        }
        SessionRecord::Cursor { path, line } => docs.set_cursor(&path, line)?,
        SessionRecord::Save { path } => {
            let line_count = docs.line_count(&path).unwrap_or_default();
            let cursor_line = docs.cursor_line(&path);
            logger
                .notify_save(SaveNotification {
                    file_path: path,
                    cursor_line,
                    line_count,
                })
                .await?;
        }
        SessionRecord::Close { path } => {
            docs.close(&path);
        }
        SessionRecord::Wait { ms } => tokio::time::sleep(Duration::from_millis(ms)).await,
    }
    Ok(())
}
