//! Editlog Core Library
//!
//! This crate turns a stream of editor change notifications into dataset
//! records: edits are grouped into per-file bursts, each burst is condensed
//! into a masked snapshot with a line-level diff, and every flush is written
//! out as one JSON file together with the recent history.

pub mod aggregator;
pub mod config;
pub mod diff;
pub mod document;
pub mod error;
pub mod events;
pub mod export;
pub mod filter;
pub mod history;
pub mod logger;
pub mod masking;
pub mod render;

// Re-export commonly used types
pub use aggregator::{BurstAggregator, PendingBurst};
pub use config::{LoggerConfig, LoggingConfig};
pub use diff::{DiffHunk, DiffLine, DiffOp, LineRange, UnifiedDiff, generate_unified_diff};
pub use document::{DocumentProvider, MemoryDocuments};
pub use error::{EditLogError, EditLogResult};
pub use events::{
    ChangeNotification, ContentChange, EditEvent, EditKind, Position, SaveNotification, TextRange,
};
pub use export::{DatasetExporter, DatasetFs, ExportRecord, LocalFs, MemoryFs};
pub use filter::TrackingFilter;
pub use history::{HistoryEntry, HistoryStore};
pub use logger::{EditLogger, LoggerStatus};
pub use masking::{MaskingEngine, REDACTED_TEXT, mask_sensitive};
pub use render::add_line_numbers;
