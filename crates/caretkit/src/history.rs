//! # History management
//!
//! ## Overview
//!
//! This module contains the bounded undo/redo stack of region snapshots. The
//! stack is index-addressed: undo and redo only move the index, and a push
//! while the index sits before the last entry abandons the redo branch
//! (last-write-wins, no tree history). At capacity, a push evicts the oldest
//! entry instead.
//!
//! Debounced snapshot scheduling is handled by the owning controller, not
//! here; see [RegionEditor](crate::editor::RegionEditor).

/// A full snapshot of a region: its plain-text content and the caret offset
/// at capture time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    /// The region's plain-text content.
    pub content: String,

    /// The caret offset into the content sequence.
    pub pos: usize,
}

impl HistoryEntry {
    /// Create a new snapshot.
    pub fn new(content: impl Into<String>, pos: usize) -> Self {
        HistoryEntry { content: content.into(), pos }
    }
}

/// A bounded, index-addressed sequence of [HistoryEntry] snapshots.
#[derive(Clone, Debug)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    index: Option<usize>,
    depth: usize,
}

impl HistoryStack {
    /// Create a new stack holding at most `depth` entries.
    pub fn new(depth: usize) -> Self {
        HistoryStack { entries: Vec::new(), index: None, depth: depth.max(1) }
    }

    /// The number of entries currently held (not the capacity).
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// The index of the currently displayed entry, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The currently displayed entry, if any.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.index.map(|i| &self.entries[i])
    }

    /// The entries currently held, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Record a new snapshot and point the index at it.
    ///
    /// Entries after the current index are discarded first; when the stack is
    /// at capacity, the oldest entry is evicted instead.
    pub fn push(&mut self, entry: HistoryEntry) {
        let next = self.index.map_or(0, |i| i + 1);

        if next == self.depth {
            self.entries.remove(0);
        } else {
            self.entries.truncate(next);
        }

        self.entries.push(entry);
        self.index = Some(self.entries.len() - 1);

        log::trace!("history push; {} entries, index {:?}", self.entries.len(), self.index);
    }

    /// Record the one-time pristine snapshot captured on first focus.
    ///
    /// Identical to [HistoryStack::push]; it exists so that call sites
    /// bypassing the debounce read as intended.
    pub fn push_initial(&mut self, entry: HistoryEntry) {
        self.push(entry);
    }

    /// Step back to the previous entry and return it, or `None` when already
    /// at the oldest entry (or empty).
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);

                return Some(&self.entries[i - 1]);
            },
            _ => {
                return None;
            },
        }
    }

    /// Step forward to the next entry and return it, or `None` when already
    /// at the newest entry (or empty).
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        match self.index {
            Some(i) if i + 1 < self.entries.len() => {
                self.index = Some(i + 1);

                return Some(&self.entries[i + 1]);
            },
            _ => {
                return None;
            },
        }
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        HistoryStack::new(20)
    }
}
