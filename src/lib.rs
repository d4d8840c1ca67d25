//! Lifesim - Deterministic life-simulation core
//!
//! A seed-driven state machine that tracks a character's stats,
//! relationships, karma and narrative heat over time, and that selects and
//! resolves storylets in response to a ticking clock.

pub mod bridge;
pub mod core;
pub mod entity;
pub mod narrative;
pub mod session;

pub use crate::bridge::{Engine, SessionTable};
pub use crate::core::error::{ErrorKind, Result, SimError};
pub use crate::core::SimulationConfig;
pub use crate::entity::{PlayerConfig, RawPlayerConfig};
pub use crate::narrative::StoryletCatalog;
pub use crate::session::{FullSnapshot, GameSession, SessionJournal, Snapshot};
