pub mod calendar;
pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use calendar::{Clock, DisplayFlags, LifeStage, LifeStageThresholds, TimePeriod};
pub use config::SimulationConfig;
pub use error::{ErrorKind, Result, SimError};
pub use random::RandomStream;
