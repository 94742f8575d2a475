//! Change notifications and their classification into edit events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 0-based line/character position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// Half-open span between two positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at `position`
    pub fn empty(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One content change inside a notification
///
/// `range` and `range_length` describe the span before the edit.
/// `replaced_text` is the text that occupied it; the document provider
/// fills it in before the edit is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentChange {
    pub range: TextRange,
    pub range_length: usize,
    pub text: String,
    #[serde(default)]
    pub replaced_text: String,
}

impl ContentChange {
    /// Insert `text` at `position`
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        Self {
            range: TextRange::empty(position),
            range_length: 0,
            text: text.into(),
            replaced_text: String::new(),
        }
    }

    /// Replace `range` (spanning `range_length` characters) with `text`
    pub fn replace(range: TextRange, range_length: usize, text: impl Into<String>) -> Self {
        Self {
            range,
            range_length,
            text: text.into(),
            replaced_text: String::new(),
        }
    }

    /// Remove `range` (spanning `range_length` characters)
    pub fn delete(range: TextRange, range_length: usize) -> Self {
        Self::replace(range, range_length, "")
    }
}

/// Ordered batch of changes to one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub file_path: PathBuf,
    /// URI scheme of the document; only `file` documents are tracked
    pub scheme: String,
    pub changes: Vec<ContentChange>,
}

impl ChangeNotification {
    pub fn new(file_path: impl Into<PathBuf>, changes: Vec<ContentChange>) -> Self {
        Self {
            file_path: file_path.into(),
            scheme: FILE_SCHEME.to_string(),
            changes,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }
}

/// Scheme of documents backed by a real file on disk
pub const FILE_SCHEME: &str = "file";

/// A save of a tracked document; logged, never exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveNotification {
    pub file_path: PathBuf,
    pub cursor_line: Option<usize>,
    pub line_count: usize,
}

/// Kind of an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditKind {
    #[serde(rename = "text_input")]
    Insert,
    #[serde(rename = "text_delete")]
    Delete,
    #[serde(rename = "text_replace")]
    Replace,
}

impl EditKind {
    /// Name used in the exported dataset
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "text_input",
            Self::Delete => "text_delete",
            Self::Replace => "text_replace",
        }
    }
}

impl std::fmt::Display for EditKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified change within a burst
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: EditKind,
    pub inserted_text: String,
    pub position: Position,
    pub before_text: String,
    pub after_text: String,
}

impl EditEvent {
    /// Representative text of the event
    ///
    /// The inserted text for inserts and replacements, the removed text for
    /// deletions.
    pub fn event_text(&self) -> &str {
        match self.kind {
            EditKind::Delete => &self.before_text,
            EditKind::Insert | EditKind::Replace => &self.inserted_text,
        }
    }
}

/// Classify a single change, or `None` for a no-op
pub fn classify(change: &ContentChange, timestamp: DateTime<Utc>) -> Option<EditEvent> {
    let kind = match (change.range_length > 0, change.text.is_empty()) {
        (true, true) => EditKind::Delete,
        (true, false) => EditKind::Replace,
        (false, false) => EditKind::Insert,
        (false, true) => return None,
    };

    Some(EditEvent {
        timestamp,
        kind,
        inserted_text: change.text.clone(),
        position: change.range.start,
        before_text: change.replaced_text.clone(),
        after_text: change.text.clone(),
    })
}

/// Classify every change of a notification, dropping no-ops
pub fn classify_all(notification: &ChangeNotification, timestamp: DateTime<Utc>) -> Vec<EditEvent> {
    notification
        .changes
        .iter()
        .filter_map(|change| classify(change, timestamp))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, character: usize) -> Position {
        Position::new(line, character)
    }

    #[test]
    fn test_insert() {
        let event = classify(&ContentChange::insert(at(2, 4), "x"), Utc::now()).unwrap();
        assert_eq!(event.kind, EditKind::Insert);
        assert_eq!(event.inserted_text, "x");
        assert_eq!(event.position, at(2, 4));
        assert_eq!(event.before_text, "");
        assert_eq!(event.event_text(), "x");
    }

    #[test]
    fn test_delete() {
        let mut change = ContentChange::delete(TextRange::new(at(0, 1), at(0, 3)), 2);
        change.replaced_text = "ab".to_string();

        let event = classify(&change, Utc::now()).unwrap();
        assert_eq!(event.kind, EditKind::Delete);
        assert_eq!(event.inserted_text, "");
        assert_eq!(event.before_text, "ab");
        assert_eq!(event.after_text, "");
        assert_eq!(event.event_text(), "ab");
    }

    #[test]
    fn test_replace() {
        let mut change = ContentChange::replace(TextRange::new(at(1, 0), at(1, 3)), 3, "let");
        change.replaced_text = "var".to_string();

        let event = classify(&change, Utc::now()).unwrap();
        assert_eq!(event.kind, EditKind::Replace);
        assert_eq!(event.before_text, "var");
        assert_eq!(event.after_text, "let");
    }

    #[test]
    fn test_noop_is_skipped() {
        assert!(classify(&ContentChange::insert(at(0, 0), ""), Utc::now()).is_none());

        let notification = ChangeNotification::new(
            "a.ts",
            vec![
                ContentChange::insert(at(0, 0), ""),
                ContentChange::insert(at(0, 0), "a"),
            ],
        );
        assert_eq!(classify_all(&notification, Utc::now()).len(), 1);
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(serde_json::to_value(EditKind::Insert).unwrap(), "text_input");
        assert_eq!(serde_json::to_value(EditKind::Delete).unwrap(), "text_delete");
        assert_eq!(EditKind::Replace.to_string(), "text_replace");
    }

    #[test]
    fn test_change_json_shape() {
        let change: ContentChange = serde_json::from_str(
            r#"{"range":{"start":{"line":0,"character":0},"end":{"line":0,"character":0}},"rangeLength":0,"text":"hi"}"#,
        )
        .unwrap();
        assert_eq!(change, ContentChange::insert(at(0, 0), "hi"));
    }
}
