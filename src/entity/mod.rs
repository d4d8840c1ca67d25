//! Player-side state: stats, relationships, memories and configuration

pub mod memory;
pub mod player;
pub mod relationships;
pub mod stats;

pub use memory::{MemoryEntry, MemoryLog};
pub use player::{Archetype, Difficulty, PlayerConfig, RawPlayerConfig};
pub use relationships::{
    derive_role_label, AxisBands, Band, RelationshipAxis, RelationshipGraph, RelationshipRecord,
    RoleLabel,
};
pub use stats::{MoodBand, StatBlock, StatKind, StatLedger};
