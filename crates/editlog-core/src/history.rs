//! Completed bursts and the bounded window of recent ones

use crate::diff::{DiffHunk, LineRange};
use crate::events::EditKind;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Immutable record of one flushed burst
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Timestamp of the burst's last event
    pub timestamp: DateTime<Utc>,
    pub file_name: String,
    pub masked_content: String,
    pub line_numbered_content: String,
    /// Kind of the burst's last event
    pub event_kind: EditKind,
    pub event_text: String,
    pub line_range: LineRange,
    pub hunks: Vec<DiffHunk>,
}

/// Most-recent-N window of history entries, oldest first
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryStore {
    /// Create a store holding at most `capacity` entries (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append, evicting the oldest entries beyond capacity
    pub fn add(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        self.evict();
    }

    /// Change the capacity, evicting immediately if the store is now too long
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.evict();
    }

    /// Snapshot of all entries, oldest to newest
    pub fn all(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn evict(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(crate::config::defaults::HISTORY_SIZE)
    }
}
