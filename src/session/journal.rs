//! Session journal: seed, player and the ordered list of successful operations
//!
//! A session is a pure function of its seed, configuration, catalog and the
//! operations applied to it, so the journal is all that needs saving.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{ChoiceId, StoryletId};
use crate::entity::player::PlayerConfig;

pub const JOURNAL_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum JournalEntry {
    Step {
        ticks: u64,
    },
    Choose {
        storylet_id: StoryletId,
        choice_id: ChoiceId,
        ticks_after: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionJournal {
    pub version: u32,
    pub seed: u64,
    pub player: PlayerConfig,
    pub config: SimulationConfig,
    pub entries: Vec<JournalEntry>,
}

impl SessionJournal {
    pub fn new(seed: u64, player: PlayerConfig, config: SimulationConfig) -> Self {
        Self {
            version: JOURNAL_VERSION,
            seed,
            player,
            config,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Total ticks advanced by all entries
    pub fn total_ticks(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| match e {
                JournalEntry::Step { ticks } => *ticks,
                JournalEntry::Choose { ticks_after, .. } => *ticks_after,
            })
            .fold(0u64, u64::saturating_add)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let journal: SessionJournal = serde_json::from_str(json)?;
        if journal.version != JOURNAL_VERSION {
            return Err(SimError::InvalidArgument(format!(
                "unsupported journal version {} (expected {})",
                journal.version, JOURNAL_VERSION
            )));
        }
        Ok(journal)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
