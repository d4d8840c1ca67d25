//! Player configuration supplied at new game

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::entity::stats::{StatKind, StatLedger};

pub const MAX_NAME_LEN: usize = 40;

/// Starting temperament; nudges the initial stat spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Archetype {
    /// Social and curious
    Storyteller,
    /// Book smart, socially awkward
    Analyst,
    /// Imaginative, a little fragile
    Dreamer,
    /// Physical and stubborn
    Challenger,
}

impl Archetype {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "STORYTELLER" => Some(Archetype::Storyteller),
            "ANALYST" => Some(Archetype::Analyst),
            "DREAMER" => Some(Archetype::Dreamer),
            "CHALLENGER" => Some(Archetype::Challenger),
            _ => None,
        }
    }

    /// Stat adjustments applied on top of the ledger defaults.
    /// Health and wealth are never adjusted.
    pub fn starting_nudges(&self) -> &'static [(StatKind, i32)] {
        match self {
            Archetype::Storyteller => &[(StatKind::Charisma, 5), (StatKind::Curiosity, 5)],
            Archetype::Analyst => &[(StatKind::Intelligence, 8), (StatKind::Charisma, -3)],
            Archetype::Dreamer => &[(StatKind::Curiosity, 8), (StatKind::Stability, -3)],
            Archetype::Challenger => &[(StatKind::Strength, 6), (StatKind::Stability, 2), (StatKind::Wisdom, -3)],
        }
    }
}

/// Scales how hard negative outcomes land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Relaxed,
    Balanced,
    Harsh,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "RELAXED" => Some(Difficulty::Relaxed),
            "BALANCED" => Some(Difficulty::Balanced),
            "HARSH" => Some(Difficulty::Harsh),
            _ => None,
        }
    }

    /// Scale a stat delta. Positive deltas are never changed.
    pub fn scale_stat_delta(&self, amount: i32) -> i32 {
        if amount >= 0 {
            return amount;
        }
        match self {
            Difficulty::Relaxed => amount / 2,
            Difficulty::Balanced => amount,
            Difficulty::Harsh => amount.saturating_sub(amount.saturating_neg().saturating_add(1) / 2),
        }
    }
}

/// Validated player configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub pronouns: Option<String>,
    pub archetype: Archetype,
    pub difficulty: Difficulty,
    /// Enables storylets marked mature
    pub content_mode: bool,
}

impl PlayerConfig {
    pub fn new(
        name: impl Into<String>,
        archetype: Archetype,
        difficulty: Difficulty,
        content_mode: bool,
    ) -> Self {
        Self {
            name: name.into(),
            pronouns: None,
            archetype,
            difficulty,
            content_mode,
        }
    }

    pub fn with_pronouns(mut self, pronouns: impl Into<String>) -> Self {
        self.pronouns = Some(pronouns.into());
        self
    }

    /// Validate and parse configuration as it arrives across the bridge
    pub fn from_raw(raw: RawPlayerConfig) -> Result<Self> {
        let name = raw
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| SimError::InvalidConfig("name is required".into()))?;

        let archetype_raw = raw
            .archetype
            .ok_or_else(|| SimError::InvalidConfig("archetype is required".into()))?;
        let archetype = Archetype::parse(&archetype_raw).ok_or_else(|| {
            SimError::InvalidConfig(format!("unknown archetype '{}'", archetype_raw))
        })?;

        let difficulty_raw = raw
            .difficulty
            .ok_or_else(|| SimError::InvalidConfig("difficulty is required".into()))?;
        let difficulty = Difficulty::parse(&difficulty_raw).ok_or_else(|| {
            SimError::InvalidConfig(format!("unknown difficulty '{}'", difficulty_raw))
        })?;

        let pronouns = raw
            .pronouns
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let config = Self {
            name,
            pronouns,
            archetype,
            difficulty,
            content_mode: raw.content_mode.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SimError::InvalidConfig("name must not be empty".into()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(SimError::InvalidConfig(format!(
                "name longer than {} characters",
                MAX_NAME_LEN
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(SimError::InvalidConfig("name contains control characters".into()));
        }
        Ok(())
    }

    /// Ledger at session start: defaults plus archetype nudges
    pub fn starting_stats(&self) -> StatLedger {
        let mut ledger = StatLedger::new();
        for &(kind, amount) in self.archetype.starting_nudges() {
            ledger.apply_delta(kind, amount);
        }
        ledger
    }
}

/// Unvalidated configuration, field-for-field as a bridge host receives it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayerConfig {
    pub name: Option<String>,
    pub pronouns: Option<String>,
    pub archetype: Option<String>,
    pub difficulty: Option<String>,
    pub content_mode: Option<bool>,
}

impl RawPlayerConfig {
    pub fn new(name: &str, archetype: &str, difficulty: &str, content_mode: bool) -> Self {
        Self {
            name: Some(name.to_string()),
            pronouns: None,
            archetype: Some(archetype.to_string()),
            difficulty: Some(difficulty.to_string()),
            content_mode: Some(content_mode),
        }
    }
}
