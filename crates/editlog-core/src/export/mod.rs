//! Dataset export
//!
//! Each flushed burst becomes one pretty-printed JSON file holding the
//! masked file content, the configured context files and the recent history:
//!
//! ```text
//! <datasetRoot>/<workspace-folder>/<YYYYMMDD-HHMMSS-mmm>.json
//! ```

mod fs;
mod layout;

pub use fs::{DatasetFs, LocalFs, MemoryFs};
pub use layout::{UNKNOWN_WORKSPACE, output_path, workspace_folder_name};

use crate::config::LoggerConfig;
use crate::diff::{DiffHunk, LineRange};
use crate::error::EditLogResult;
use crate::events::EditKind;
use crate::history::HistoryEntry;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One exported file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub file_content: String,
    pub file_content_with_lines: String,
    pub context: BTreeMap<String, String>,
    pub history: Vec<ExportedEntry>,
}

/// A history entry as it appears in an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedEntry {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub event_type: EditKind,
    pub event_text: Option<String>,
    pub file_name: String,
    pub line_numbers: LineRange,
    pub hunks: Vec<DiffHunk>,
}

impl From<&HistoryEntry> for ExportedEntry {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            timestamp: entry.timestamp.timestamp_millis(),
            event_type: entry.event_kind,
            event_text: (!entry.event_text.is_empty()).then(|| entry.event_text.clone()),
            file_name: entry.file_name.clone(),
            line_numbers: entry.line_range,
            hunks: entry.hunks.clone(),
        }
    }
}

impl ExportRecord {
    pub fn new(
        entry: &HistoryEntry,
        history: &[HistoryEntry],
        context: BTreeMap<String, String>,
    ) -> Self {
        Self {
            file_content: entry.masked_content.clone(),
            file_content_with_lines: entry.line_numbered_content.clone(),
            context,
            history: history.iter().map(ExportedEntry::from).collect(),
        }
    }
}

/// Writes export records through a [`DatasetFs`]
#[derive(Clone)]
pub struct DatasetExporter {
    fs: Arc<dyn DatasetFs>,
}

impl std::fmt::Debug for DatasetExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetExporter").finish_non_exhaustive()
    }
}

impl DatasetExporter {
    pub fn new(fs: Arc<dyn DatasetFs>) -> Self {
        Self { fs }
    }

    /// Exporter backed by the real filesystem
    pub fn local() -> Self {
        Self::new(Arc::new(LocalFs::new()))
    }

    /// Load the configured context files
    ///
    /// Each name is looked up in the workspace roots in order and the first
    /// root that has it wins. Files that are missing or unreadable are left
    /// out.
    pub async fn load_context_files(&self, config: &LoggerConfig) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();

        for name in &config.context_files {
            let mut found = None;
            for root in &config.workspace_roots {
                let candidate = root.join(name);
                if self.fs.exists(&candidate).await {
                    found = Some(candidate);
                    break;
                }
            }

            let Some(path) = found else {
                debug!("Context file {} not found in any workspace root", name);
                continue;
            };

            match self.fs.read_file(&path).await {
                Ok(Some(content)) => {
                    context.insert(name.clone(), content);
                }
                Ok(None) => debug!("Context file {} disappeared", path.display()),
                Err(e) => warn!("Failed to load context file {}: {}", name, e),
            }
        }

        context
    }

    /// Write one export for `entry` and return its path
    ///
    /// `history` is the store snapshot, oldest first, normally ending with
    /// `entry` itself.
    pub async fn export(
        &self,
        entry: &HistoryEntry,
        history: &[HistoryEntry],
        config: &LoggerConfig,
    ) -> EditLogResult<PathBuf> {
        let folder = workspace_folder_name(&config.workspace_roots);
        let path = output_path(&config.dataset_root, &folder, &Local::now());

        let context = self.load_context_files(config).await;
        let record = ExportRecord::new(entry, history, context);
        let json = serde_json::to_string_pretty(&record)?;

        if let Some(dir) = path.parent() {
            self.fs.ensure_dir(dir).await?;
        }
        self.fs.write_file(&path, json.as_bytes()).await?;

        info!(
            "Exported {} ({} history entries) to {}",
            entry.file_name,
            record.history.len(),
            path.display()
        );
        Ok(path)
    }
}
