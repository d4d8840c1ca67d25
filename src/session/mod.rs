//! Game session aggregate, its snapshots and its journal

pub mod game;
pub mod journal;
pub mod snapshot;

pub use game::GameSession;
pub use journal::{JournalEntry, SessionJournal, JOURNAL_VERSION};
pub use snapshot::{
    ChoiceView, EventView, FullSnapshot, HeatView, KarmaView, RelationshipDetail,
    RelationshipSummary, Snapshot,
};
