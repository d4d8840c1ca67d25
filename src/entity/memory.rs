//! Bounded narrative memory log
//!
//! Oldest entries are evicted once capacity is reached.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// A short line of narrative the player's character remembers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub tick: Tick,
    pub text: String,
}

/// Bounded log of memories; the oldest entry is evicted when full
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLog {
    entries: VecDeque<MemoryEntry>,
    capacity: usize,
}

impl MemoryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, tick: Tick, text: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(MemoryEntry {
            tick,
            text: text.into(),
        });
    }

    /// Up to `n` most recent entries, newest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &MemoryEntry> {
        self.entries.iter().rev().take(n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_is_newest_first() {
        let mut log = MemoryLog::new(10);
        log.record(1, "first");
        log.record(2, "second");
        log.record(3, "third");
        let texts: Vec<&str> = log.recent(2).map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["third", "second"]);
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut log = MemoryLog::new(2);
        log.record(1, "a");
        log.record(2, "b");
        log.record(3, "c");
        assert_eq!(log.len(), 2);
        let texts: Vec<&str> = log.recent(5).map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["c", "b"]);
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut log = MemoryLog::new(0);
        log.record(1, "lost");
        assert!(log.is_empty());
    }
}
