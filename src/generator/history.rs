//! Bounded FIFO of completed exchanges.
//!
//! The buffer is the only mutable, long-lived state in the engine. Each
//! successful `generate` call appends one entry; once the bound is
//! exceeded the oldest entry is evicted immediately, so the length never
//! observes a value above the bound between calls.

use std::collections::VecDeque;

use crate::types::messages::{ChatMessage, HistoryEntry};

/// Bounded FIFO of [`HistoryEntry`] pairs.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer holding at most `max_entries` exchanges.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Append an entry, evicting the oldest while over the bound.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Ordered message sequence for prompt assembly: each entry expands
    /// to its user turn followed by its assistant turn.
    pub fn flatten(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.entries.len() * 2);
        for entry in &self.entries {
            messages.push(entry.user.clone());
            messages.push(entry.assistant.clone());
        }
        messages
    }

    /// Number of buffered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the buffered entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
