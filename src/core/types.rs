//! Core type definitions used throughout the codebase

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Simulation time unit: one tick is one simulated hour
pub type Tick = u64;

/// Stable identifier for a non-player character
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NpcId(pub String);

/// Unique identifier for a storylet in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryletId(pub String);

/// Identifier of a choice, unique within its storylet
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(pub String);

impl NpcId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StoryletId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ChoiceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NpcId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for StoryletId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for ChoiceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Handle into a multi-session host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct SessionHandle(pub Uuid);

impl SessionHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_equality_and_display() {
        let a = StoryletId::from("first_day");
        let b = StoryletId::from(String::from("first_day"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "first_day");
        assert_eq!(a.as_str(), "first_day");
    }

    #[test]
    fn test_ids_order_lexically() {
        let mut ids = vec![StoryletId::from("b"), StoryletId::from("a"), StoryletId::from("c")];
        ids.sort();
        assert_eq!(ids, vec![StoryletId::from("a"), StoryletId::from("b"), StoryletId::from("c")]);
    }

    #[test]
    fn test_npc_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&NpcId::from("mira")).unwrap();
        assert_eq!(json, "\"mira\"");
    }

    #[test]
    fn test_session_handles_are_unique() {
        assert_ne!(SessionHandle::new(), SessionHandle::new());
    }
}
