//! What the director has already shown the player

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::core::types::{StoryletId, Tick};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryHistory {
    /// Most recently finished storylets, oldest first
    recent: VecDeque<StoryletId>,
    capacity: usize,
    /// Tick of the latest resolution per storylet
    last_resolved: BTreeMap<StoryletId, Tick>,
    resolved_count: u64,
}

impl StoryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
            last_resolved: BTreeMap::new(),
            resolved_count: 0,
        }
    }

    fn push_recent(&mut self, id: &StoryletId) {
        if self.capacity == 0 {
            return;
        }
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(id.clone());
    }

    /// A choice was made
    pub fn record_resolved(&mut self, id: &StoryletId, tick: Tick) {
        self.push_recent(id);
        self.last_resolved.insert(id.clone(), tick);
        self.resolved_count += 1;
    }

    /// The event lapsed without a choice. Excluded for a while, but not
    /// counted as resolved.
    pub fn record_expired(&mut self, id: &StoryletId) {
        self.push_recent(id);
    }

    pub fn is_recent(&self, id: &StoryletId) -> bool {
        self.recent.contains(id)
    }

    pub fn was_resolved(&self, id: &StoryletId) -> bool {
        self.last_resolved.contains_key(id)
    }

    pub fn last_resolved_at(&self, id: &StoryletId) -> Option<Tick> {
        self.last_resolved.get(id).copied()
    }

    pub fn recent(&self) -> impl Iterator<Item = &StoryletId> {
        self.recent.iter()
    }

    pub fn resolved_count(&self) -> u64 {
        self.resolved_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_window_slides() {
        let mut history = StoryHistory::new(2);
        let (a, b, c) = (StoryletId::from("a"), StoryletId::from("b"), StoryletId::from("c"));
        history.record_resolved(&a, 1);
        history.record_resolved(&b, 2);
        history.record_resolved(&c, 3);
        assert!(!history.is_recent(&a));
        assert!(history.is_recent(&b));
        assert!(history.is_recent(&c));
        assert!(history.was_resolved(&a));
        assert_eq!(history.resolved_count(), 3);
    }

    #[test]
    fn test_expired_is_recent_but_not_resolved() {
        let mut history = StoryHistory::new(4);
        let id = StoryletId::from("lapsed");
        history.record_expired(&id);
        assert!(history.is_recent(&id));
        assert!(!history.was_resolved(&id));
        assert_eq!(history.last_resolved_at(&id), None);
    }

    #[test]
    fn test_last_resolved_tracks_latest() {
        let mut history = StoryHistory::new(4);
        let id = StoryletId::from("x");
        history.record_resolved(&id, 10);
        history.record_resolved(&id, 50);
        assert_eq!(history.last_resolved_at(&id), Some(50));
    }
}
