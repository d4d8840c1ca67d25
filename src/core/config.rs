//! Simulation configuration with documented constants
//!
//! All tuning numbers for the clock, narrative director and accumulators are
//! collected here. A session owns its own copy; there is no process-wide
//! config. Partial TOML files are accepted, missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::calendar::LifeStageThresholds;
use crate::core::error::{Result, SimError};

/// Configuration for a simulation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === CLOCK ===
    /// Ticks in one simulated day. One tick is one hour.
    pub ticks_per_day: u64,

    /// Days in one simulated year, used to derive age
    pub days_per_year: u64,

    /// Age in years at tick 0
    pub starting_age: u32,

    /// Ages at which Teen, Adult and Elder begin
    pub life_stages: LifeStageThresholds,


    // === KARMA & HEAT ===
    /// Heat removed per elapsed simulated day
    pub heat_decay_per_day: f32,

    /// Heat added when a storylet resolves, per point of storylet intensity
    ///
    /// Stacks with the resolved choice's own heat delta.
    pub heat_per_intensity: f32,

    // === NARRATIVE DIRECTOR ===
    /// Probability that an evaluation with eligible storylets activates one
    pub activation_chance: f64,

    /// Extra activation probability at maximum heat (scaled linearly)
    pub heat_activation_bonus: f64,

    /// How strongly heat tilts selection toward high-intensity storylets
    ///
    /// The weight multiplier is `1 + heat_bias * (heat/200 - 0.5) * intensity`,
    /// so below half heat intense storylets are damped and above it favoured.
    pub heat_bias: f64,

    /// Floor for the heat multiplier so no eligible storylet reaches zero weight
    pub min_weight_factor: f64,

    /// How many recently finished storylets are excluded from selection
    pub history_len: usize,

    /// Validity window for an active event when the storylet sets none
    pub default_event_hours: u64,

    // === DAILY DRIFT ===
    /// Mood points regressed toward 0 per simulated day
    pub mood_regression_per_day: i32,

    /// Energy points recovered toward its default per simulated day
    pub energy_recovery_per_day: i32,

    // === MEMORY ===
    /// Maximum memory entries retained
    pub memory_capacity: usize,

    /// Memory entries included in the simple snapshot
    pub snapshot_memory_count: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks_per_day: 24,
            days_per_year: 365,
            starting_age: 6,
            life_stages: LifeStageThresholds::default(),

            heat_decay_per_day: 5.0,
            heat_per_intensity: 4.0,

            activation_chance: 0.5,
            heat_activation_bonus: 0.3,
            heat_bias: 1.0,
            min_weight_factor: 0.1,
            history_len: 4,
            default_event_hours: 72,

            mood_regression_per_day: 1,
            energy_recovery_per_day: 5,

            memory_capacity: 32,
            snapshot_memory_count: 5,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML config and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate().map_err(SimError::Config)?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.ticks_per_day == 0 || self.days_per_year == 0 {
            return Err("ticks_per_day and days_per_year must be positive".into());
        }

        if self.ticks_per_day.checked_mul(self.days_per_year).is_none() {
            return Err(format!(
                "ticks_per_day ({}) * days_per_year ({}) overflows a tick count",
                self.ticks_per_day, self.days_per_year
            ));
        }

        let rates = [
            ("heat_decay_per_day", f64::from(self.heat_decay_per_day)),
            ("heat_per_intensity", f64::from(self.heat_per_intensity)),
            ("activation_chance", self.activation_chance),
            ("heat_activation_bonus", self.heat_activation_bonus),
            ("heat_bias", self.heat_bias),
            ("min_weight_factor", self.min_weight_factor),
        ];
        if let Some((name, value)) = rates.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} ({value}) must be finite"));
        }

        let stages = &self.life_stages;
        if !(stages.teen_at < stages.adult_at && stages.adult_at < stages.elder_at) {
            return Err(format!(
                "life stage thresholds must increase (teen {}, adult {}, elder {})",
                stages.teen_at, stages.adult_at, stages.elder_at
            ));
        }

        if !(0.0..=1.0).contains(&self.activation_chance) {
            return Err(format!(
                "activation_chance ({}) must be within [0, 1]",
                self.activation_chance
            ));
        }

        if self.heat_activation_bonus < 0.0 || self.heat_bias < 0.0 {
            return Err("heat_activation_bonus and heat_bias must be non-negative".into());
        }

        if self.min_weight_factor <= 0.0 {
            return Err(format!(
                "min_weight_factor ({}) must be positive",
                self.min_weight_factor
            ));
        }

        if self.heat_decay_per_day < 0.0 || self.heat_per_intensity < 0.0 {
            return Err("heat rates must be non-negative".into());
        }

        if self.mood_regression_per_day < 0 || self.energy_recovery_per_day < 0 {
            return Err("daily drift rates must be non-negative".into());
        }

        if self.default_event_hours == 0 {
            return Err("default_event_hours must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            activation_chance = 1.0
            starting_age = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.activation_chance, 1.0);
        assert_eq!(config.starting_age, 10);
        assert_eq!(config.ticks_per_day, 24);
        assert_eq!(config.life_stages.adult_at, 20);
    }

    #[test]
    fn test_nested_life_stage_table() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [life_stages]
            teen_at = 13
            adult_at = 18
            elder_at = 70
            "#,
        )
        .unwrap();
        assert_eq!(config.life_stages.teen_at, 13);
        assert_eq!(config.life_stages.elder_at, 70);
    }

    #[test]
    fn test_unordered_stages_rejected() {
        let mut config = SimulationConfig::default();
        config.life_stages.adult_at = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_activation_chance_out_of_range() {
        let result = SimulationConfig::from_toml_str("activation_chance = 1.5");
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn test_year_length_overflow_rejected() {
        let mut config = SimulationConfig::default();
        config.ticks_per_day = u64::MAX / 2;
        config.days_per_year = 3;
        let err = config.validate().unwrap_err();
        assert!(err.contains("overflows"));

        config.days_per_year = 2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_finite_rates_rejected() {
        let mut config = SimulationConfig::default();
        config.heat_bias = f64::NAN;
        assert!(config.validate().unwrap_err().contains("heat_bias"));

        let mut config = SimulationConfig::default();
        config.min_weight_factor = f64::INFINITY;
        assert!(config.validate().unwrap_err().contains("min_weight_factor"));

        let mut config = SimulationConfig::default();
        config.heat_decay_per_day = f32::NAN;
        assert!(config.validate().unwrap_err().contains("heat_decay_per_day"));

        let result = SimulationConfig::from_toml_str("heat_activation_bonus = inf");
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = SimulationConfig::from_toml_str("activation_chance = \"often\"");
        assert!(matches!(result, Err(SimError::TomlError(_))));
    }
}
