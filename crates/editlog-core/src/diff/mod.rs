//! Line-level diffs between burst snapshots
//!
//! [`generate_unified_diff`] turns the content a burst started from and the
//! content it ended with into unified-diff style hunks. [`line_range`]
//! summarises which lines a burst touched.

mod changed_lines;
mod text_diff;


pub use changed_lines::{LineRange, line_range};
pub use text_diff::{
    DEFAULT_CONTEXT_LINES, DiffHunk, DiffLine, DiffOp, UnifiedDiff, format_hunks,
    generate_unified_diff, normalize_line_endings,
};
