//! Greedy two-pointer unified diff
//!
//! This is not a minimal-edit diff. When the current old and new lines
//! disagree the old line is always emitted as a deletion before any new line
//! is considered for insertion; hunk boundaries depend on that tie-break and
//! must stay stable across versions.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Unchanged lines kept around a change before a hunk is closed
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Kind of a diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffOp {
    Context,
    Delete,
    Insert,
}

/// One line of a hunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub op: DiffOp,
    pub text: String,
}

impl DiffLine {
    pub fn context(text: impl Into<String>) -> Self {
        Self {
            op: DiffOp::Context,
            text: text.into(),
        }
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self {
            op: DiffOp::Delete,
            text: text.into(),
        }
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self {
            op: DiffOp::Insert,
            text: text.into(),
        }
    }
}

/// A contiguous region of change with surrounding context
///
/// Line numbers are 1-based. The counts are derived from `lines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    pub old_start: usize,
    pub old_lines: usize,
    pub new_start: usize,
    pub new_lines: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_before: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_after: Option<usize>,
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    /// Build a hunk, deriving counts from its lines
    pub fn new(old_start: usize, new_start: usize, lines: Vec<DiffLine>) -> Self {
        let old_lines = lines.iter().filter(|l| l.op != DiffOp::Insert).count();
        let new_lines = lines.iter().filter(|l| l.op != DiffOp::Delete).count();
        let before = lines
            .iter()
            .take_while(|l| l.op == DiffOp::Context)
            .count();
        let after = lines
            .iter()
            .rev()
            .take_while(|l| l.op == DiffOp::Context)
            .count();

        Self {
            old_start,
            old_lines,
            new_start,
            new_lines,
            context_before: (before > 0).then_some(before),
            context_after: (after > 0).then_some(after),
            lines,
        }
    }

    /// Number of inserted lines
    pub fn added_count(&self) -> usize {
        self.lines.iter().filter(|l| l.op == DiffOp::Insert).count()
    }

    /// Number of deleted lines
    pub fn removed_count(&self) -> usize {
        self.lines.iter().filter(|l| l.op == DiffOp::Delete).count()
    }

    /// Render as `@@ -a,b +c,d @@` followed by prefixed lines
    pub fn format_unified(&self) -> String {
        let mut output = format!(
            "@@ -{},{} +{},{} @@\n",
            self.old_start, self.old_lines, self.new_start, self.new_lines
        );

        for line in &self.lines {
            let prefix = match line.op {
                DiffOp::Context => ' ',
                DiffOp::Delete => '-',
                DiffOp::Insert => '+',
            };
            output.push(prefix);
            output.push_str(&line.text);
            output.push('\n');
        }

        output
    }
}

/// Render a list of hunks
pub fn format_hunks(hunks: &[DiffHunk]) -> String {
    hunks.iter().map(DiffHunk::format_unified).collect()
}

/// Convert `\r\n` and lone `\r` to `\n`
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Diff with the default context window
pub fn generate_unified_diff(old: &str, new: &str) -> Vec<DiffHunk> {
    UnifiedDiff::default().compute(old, new)
}

/// Diff generator with a configurable context window
#[derive(Debug, Clone, Copy)]
pub struct UnifiedDiff {
    context_lines: usize,
}

impl Default for UnifiedDiff {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

struct OpenHunk {
    old_start: usize,
    new_start: usize,
    lines: Vec<DiffLine>,
}

impl UnifiedDiff {
    pub fn new(context_lines: usize) -> Self {
        Self { context_lines }
    }

    pub fn context_lines(&self) -> usize {
        self.context_lines
    }

    /// Compute the hunks turning `old` into `new`
    pub fn compute(&self, old: &str, new: &str) -> Vec<DiffHunk> {
        let old = normalize_line_endings(old);
        let new = normalize_line_endings(new);
        let old_lines: Vec<&str> = old.split('\n').collect();
        let new_lines: Vec<&str> = new.split('\n').collect();

        self.compute_lines(&old_lines, &new_lines)
    }

    fn compute_lines(&self, old: &[&str], new: &[&str]) -> Vec<DiffHunk> {
        let window = self.context_lines;
        let mut hunks = Vec::new();
        let mut open: Option<OpenHunk> = None;
        // Unchanged lines seen since the last change (or the last closed hunk)
        let mut context: VecDeque<&str> = VecDeque::new();

        let (mut i, mut j) = (0, 0);

        while i < old.len() || j < new.len() {
            if i < old.len() && j < new.len() && old[i] == new[j] {
                context.push_back(old[i]);
                i += 1;
                j += 1;

                match open.take() {
                    Some(mut hunk) if context.len() >= window => {
                        hunk.lines
                            .extend(context.drain(..window).map(DiffLine::context));
                        context.clear();
                        hunks.push(DiffHunk::new(hunk.old_start, hunk.new_start, hunk.lines));
                    }
                    Some(hunk) => open = Some(hunk),
                    None => {
                        if context.len() > window {
                            context.pop_front();
                        }
                    }
                }
                continue;
            }

            let hunk = open.get_or_insert_with(|| {
                let lead = context.len().min(window);
                let skip = context.len() - lead;
                let lines = context.drain(..).skip(skip).map(DiffLine::context).collect();
                OpenHunk {
                    old_start: (i + 1).saturating_sub(lead).max(1),
                    new_start: (j + 1).saturating_sub(lead).max(1),
                    lines,
                }
            });
            // Unchanged lines shorter than the window stay inside the hunk
            hunk.lines.extend(context.drain(..).map(DiffLine::context));

            if i < old.len() && (j >= new.len() || old[i] != new[j]) {
                hunk.lines.push(DiffLine::delete(old[i]));
                i += 1;
            } else {
                hunk.lines.push(DiffLine::insert(new[j]));
                j += 1;
            }
        }

        if let Some(mut hunk) = open {
            hunk.lines.extend(context.drain(..).map(DiffLine::context));
            hunks.push(DiffHunk::new(hunk.old_start, hunk.new_start, hunk.lines));
        }

        hunks
    }
}
