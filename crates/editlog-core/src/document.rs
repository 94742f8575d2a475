//! Document access for the logger
//!
//! The editor owns the live documents; the engine only needs the current text
//! and cursor of a file. [`MemoryDocuments`] is a self-contained store that
//! applies change notifications itself, used for replays and tests.

use crate::error::{EditLogError, EditLogResult};
use crate::events::{ChangeNotification, ContentChange, Position, TextRange};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Read access to open documents
pub trait DocumentProvider: Send + Sync {
    /// Full current text, or `None` when the document is not open
    fn current_text(&self, path: &Path) -> Option<String>;

    /// 0-based line of the active cursor in this document
    fn cursor_line(&self, path: &Path) -> Option<usize>;

    /// Text currently occupying `range`
    fn text_in_range(&self, path: &Path, range: &TextRange) -> Option<String> {
        let text = self.current_text(path)?;
        let start = offset_of(&text, range.start).ok()?;
        let end = offset_of(&text, range.end).ok()?;
        text.get(start..end).map(str::to_string)
    }

    fn line_count(&self, path: &Path) -> Option<usize> {
        self.current_text(path).map(|text| text.split('\n').count())
    }
}

#[derive(Debug, Clone, Default)]
struct DocumentState {
    text: String,
    cursor_line: Option<usize>,
}

/// In-memory document store
#[derive(Debug, Default)]
pub struct MemoryDocuments {
    docs: RwLock<HashMap<PathBuf, DocumentState>>,
}

impl MemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or reset) a document
    pub fn open(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.docs.write().insert(
            path.into(),
            DocumentState {
                text: text.into(),
                cursor_line: None,
            },
        );
    }

    pub fn close(&self, path: &Path) -> bool {
        self.docs.write().remove(path).is_some()
    }

    pub fn is_open(&self, path: &Path) -> bool {
        self.docs.read().contains_key(path)
    }

    pub fn set_cursor(&self, path: &Path, line: usize) -> EditLogResult<()> {
        let mut docs = self.docs.write();
        let doc = docs.get_mut(path).ok_or_else(|| not_open(path))?;
        doc.cursor_line = Some(line);
        Ok(())
    }

    /// Apply every change of `notification` in order
    ///
    /// Each change is positioned against the text left by the previous one.
    /// The replaced text is recorded on each change, and the cursor moves to
    /// the end of the last inserted text. Nothing is modified when any change
    /// is out of range.
    pub fn apply(&self, notification: &mut ChangeNotification) -> EditLogResult<()> {
        let mut docs = self.docs.write();
        let doc = docs
            .get_mut(&notification.file_path)
            .ok_or_else(|| not_open(&notification.file_path))?;

        let mut text = doc.text.clone();
        for change in notification.changes.iter_mut() {
            text = apply_change(&text, change)?;
        }

        if let Some(last) = notification.changes.last() {
            let inserted_lines = last.text.matches('\n').count();
            doc.cursor_line = Some(last.range.start.line + inserted_lines);
        }
        doc.text = text;
        Ok(())
    }
}

impl DocumentProvider for MemoryDocuments {
    fn current_text(&self, path: &Path) -> Option<String> {
        self.docs.read().get(path).map(|doc| doc.text.clone())
    }

    fn cursor_line(&self, path: &Path) -> Option<usize> {
        self.docs.read().get(path).and_then(|doc| doc.cursor_line)
    }
}

fn not_open(path: &Path) -> EditLogError {
    EditLogError::event_processing(format!("document is not open: {}", path.display()))
}

/// Byte offset of a line/character position
///
/// `character` counts chars and may point one past the last char of a line.
pub fn offset_of(text: &str, position: Position) -> EditLogResult<usize> {
    let mut line_start = 0;
    for _ in 0..position.line {
        let newline = text[line_start..].find('\n').ok_or_else(|| {
            EditLogError::event_processing(format!("line {} is out of range", position.line))
        })?;
        line_start += newline + 1;
    }

    let line = text[line_start..].split('\n').next().unwrap_or_default();
    if position.character == 0 {
        return Ok(line_start);
    }

    match line.char_indices().nth(position.character) {
        Some((idx, _)) => Ok(line_start + idx),
        None if line.chars().count() == position.character => Ok(line_start + line.len()),
        None => Err(EditLogError::event_processing(format!(
            "character {} is out of range on line {}",
            position.character, position.line
        ))),
    }
}

fn apply_change(text: &str, change: &mut ContentChange) -> EditLogResult<String> {
    let start = offset_of(text, change.range.start)?;
    let end = offset_of(text, change.range.end)?;
    if end < start {
        return Err(EditLogError::event_processing("change range ends before it starts"));
    }

    change.replaced_text = text[start..end].to_string();

    let mut out = String::with_capacity(text.len() - (end - start) + change.text.len());
    out.push_str(&text[..start]);
    out.push_str(&change.text);
    out.push_str(&text[end..]);
    Ok(out)
}

/// Rebuild the text as it was before `changes` were applied
///
/// `text` is the document after the changes. Each change must carry the
/// text it replaced.
pub fn revert_changes(text: &str, changes: &[ContentChange]) -> EditLogResult<String> {
    let mut text = text.to_string();

    for change in changes.iter().rev() {
        let start = offset_of(&text, change.range.start)?;
        let end = start + change.text.len();
        if text.get(start..end) != Some(change.text.as_str()) {
            return Err(EditLogError::event_processing(
                "document does not contain the inserted text of a change",
            ));
        }
        text.replace_range(start..end, &change.replaced_text);
    }

    Ok(text)
}
