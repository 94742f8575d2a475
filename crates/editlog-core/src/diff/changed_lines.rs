//! Range of lines touched by a burst

use super::text_diff::normalize_line_endings;
use crate::events::EditEvent;
use serde::{Deserialize, Serialize};

/// 1-based line span of a burst plus the cursor line at flush time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
    pub current: usize,
}

/// Compute the touched span of `events`
///
/// `start` is the first line any event began on. `end` is the last line
/// covered by any replaced text, widened to the document's line count.
/// `cursor_line` is 0-based; without one the current line is reported as 1.
pub fn line_range(
    events: &[EditEvent],
    document_line_count: usize,
    cursor_line: Option<usize>,
) -> LineRange {
    let start = events
        .iter()
        .map(|event| event.position.line + 1)
        .min()
        .unwrap_or(1);

    let max_line = events
        .iter()
        .map(|event| {
            let before = normalize_line_endings(&event.before_text);
            event.position.line + before.split('\n').count()
        })
        .max()
        .unwrap_or(0);

    LineRange {
        start,
        end: max_line.max(document_line_count),
        current: cursor_line.map_or(1, |line| line + 1),
    }
}
