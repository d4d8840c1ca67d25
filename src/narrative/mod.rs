//! Storylet content, selection and the karma/heat pressure it responds to

pub mod catalog;
pub mod director;
pub mod history;
pub mod pressure;
pub mod storylet;

pub use catalog::{NpcDefinition, StoryletCatalog};
pub use director::{ActiveEvent, Director, DirectorState, Outcome, Situation};
pub use history::StoryHistory;
pub use pressure::{HeatLevel, HeatTrend, KarmaBand, Pressure, HEAT_MAX, HEAT_MIN};
pub use storylet::{Choice, Condition, RelationshipDelta, StatDelta, StateView, Storylet};
