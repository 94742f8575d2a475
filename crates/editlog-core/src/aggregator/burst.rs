//! The in-flight burst and its conversion into a history entry

use crate::diff::{generate_unified_diff, line_range};
use crate::error::{EditLogError, EditLogResult};
use crate::events::EditEvent;
use crate::history::HistoryEntry;
use crate::masking::MaskingEngine;
use crate::render::add_line_numbers;
use std::path::{Path, PathBuf};

/// Edits accumulated for one file since its burst started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBurst {
    file_path: PathBuf,
    file_name: String,
    initial_content: String,
    events: Vec<EditEvent>,
}

impl PendingBurst {
    pub fn new(file_path: impl Into<PathBuf>, initial_content: impl Into<String>) -> Self {
        let file_path = file_path.into();
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.to_string_lossy().into_owned());

        Self {
            file_path,
            file_name,
            initial_content: initial_content.into(),
            events: Vec::new(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn initial_content(&self) -> &str {
        &self.initial_content
    }

    pub fn events(&self) -> &[EditEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push(&mut self, event: EditEvent) {
        self.events.push(event);
    }

    /// Condense the burst into a history entry
    ///
    /// `current_text` is the document at flush time. Both snapshots are
    /// masked before diffing so hunks never carry unredacted text.
    pub fn into_entry(
        self,
        current_text: &str,
        cursor_line: Option<usize>,
        masking: &MaskingEngine,
    ) -> EditLogResult<HistoryEntry> {
        let last = self.events.last().ok_or_else(|| {
            EditLogError::event_processing(format!("burst for {} has no events", self.file_name))
        })?;

        let masked_content = masking.mask(current_text);
        let masked_initial = masking.mask(&self.initial_content);
        let hunks = generate_unified_diff(&masked_initial, &masked_content);
        let document_lines = current_text.split('\n').count();

        Ok(HistoryEntry {
            timestamp: last.timestamp,
            file_name: self.file_name.clone(),
            line_numbered_content: add_line_numbers(&masked_content),
            event_kind: last.kind,
            event_text: masking.mask(last.event_text()),
            line_range: line_range(&self.events, document_lines, cursor_line),
            hunks,
            masked_content,
        })
    }
}
