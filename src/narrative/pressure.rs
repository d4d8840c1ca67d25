//! Karma and narrative heat accumulators

use serde::{Deserialize, Serialize};

pub const HEAT_MIN: f32 = 0.0;
pub const HEAT_MAX: f32 = 200.0;

/// Heat movement smaller than this reads as Steady
const TREND_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pressure {
    karma: i64,
    heat: f32,
    /// Heat when the last mutating operation began
    heat_baseline: f32,
}

impl Default for Pressure {
    fn default() -> Self {
        Self::new()
    }
}

impl Pressure {
    pub fn new() -> Self {
        Self {
            karma: 0,
            heat: HEAT_MIN,
            heat_baseline: HEAT_MIN,
        }
    }

    pub fn karma(&self) -> i64 {
        self.karma
    }

    pub fn heat(&self) -> f32 {
        self.heat
    }

    /// Karma is unbounded; only the integer limits saturate
    pub fn add_karma(&mut self, amount: i64) -> i64 {
        self.karma = self.karma.saturating_add(amount);
        self.karma
    }

    pub fn add_heat(&mut self, amount: f32) -> f32 {
        if !amount.is_nan() {
            self.heat = (self.heat + amount).clamp(HEAT_MIN, HEAT_MAX);
        }
        self.heat
    }

    /// Passive decay for `days` elapsed simulated days
    pub fn decay_heat(&mut self, days: u64, rate_per_day: f32) -> f32 {
        if days > 0 {
            self.add_heat(-(rate_per_day * days as f32));
        }
        self.heat
    }

    /// Remember the current heat so the next read can report a trend
    pub fn begin_operation(&mut self) {
        self.heat_baseline = self.heat;
    }

    pub fn trend(&self) -> HeatTrend {
        let delta = self.heat - self.heat_baseline;
        if delta > TREND_EPSILON {
            HeatTrend::Rising
        } else if delta < -TREND_EPSILON {
            HeatTrend::Falling
        } else {
            HeatTrend::Steady
        }
    }

    pub fn karma_band(&self) -> KarmaBand {
        KarmaBand::from_karma(self.karma)
    }

    pub fn heat_level(&self) -> HeatLevel {
        HeatLevel::from_heat(self.heat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KarmaBand {
    Villainous, // <= -50
    Shady,      // <= -15
    Neutral,
    Kind,       // >= 15
    Saintly,    // >= 50
}

impl KarmaBand {
    pub fn from_karma(karma: i64) -> Self {
        match karma {
            k if k <= -50 => KarmaBand::Villainous,
            k if k <= -15 => KarmaBand::Shady,
            k if k < 15 => KarmaBand::Neutral,
            k if k < 50 => KarmaBand::Kind,
            _ => KarmaBand::Saintly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KarmaBand::Villainous => "Villainous",
            KarmaBand::Shady => "Shady",
            KarmaBand::Neutral => "Neutral",
            KarmaBand::Kind => "Kind",
            KarmaBand::Saintly => "Saintly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatLevel {
    Calm,
    Simmering,
    Heated,
    Boiling,
    Explosive,
}

impl HeatLevel {
    pub fn from_heat(heat: f32) -> Self {
        match heat {
            h if h < 40.0 => HeatLevel::Calm,
            h if h < 80.0 => HeatLevel::Simmering,
            h if h < 130.0 => HeatLevel::Heated,
            h if h < 170.0 => HeatLevel::Boiling,
            _ => HeatLevel::Explosive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeatLevel::Calm => "Calm",
            HeatLevel::Simmering => "Simmering",
            HeatLevel::Heated => "Heated",
            HeatLevel::Boiling => "Boiling",
            HeatLevel::Explosive => "Explosive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatTrend {
    Rising,
    Falling,
    Steady,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let p = Pressure::new();
        assert_eq!(p.karma(), 0);
        assert_eq!(p.heat(), 0.0);
        assert_eq!(p.trend(), HeatTrend::Steady);
    }

    #[test]
    fn test_karma_accumulates_without_clamp() {
        let mut p = Pressure::new();
        for _ in 0..100 {
            p.add_karma(7);
        }
        assert_eq!(p.karma(), 700);
        p.add_karma(-1000);
        assert_eq!(p.karma(), -300);
        assert_eq!(p.karma_band(), KarmaBand::Villainous);
    }

    #[test]
    fn test_karma_saturates_at_integer_limits() {
        let mut p = Pressure::new();
        p.add_karma(i64::MAX);
        p.add_karma(10);
        assert_eq!(p.karma(), i64::MAX);
    }

    #[test]
    fn test_heat_clamped() {
        let mut p = Pressure::new();
        assert_eq!(p.add_heat(500.0), HEAT_MAX);
        assert_eq!(p.add_heat(-1000.0), HEAT_MIN);
        assert_eq!(p.add_heat(f32::NAN), HEAT_MIN);
        assert_eq!(p.add_heat(f32::INFINITY), HEAT_MAX);
    }

    #[test]
    fn test_heat_decay_per_day() {
        let mut p = Pressure::new();
        p.add_heat(30.0);
        assert_eq!(p.decay_heat(2, 5.0), 20.0);
        assert_eq!(p.decay_heat(0, 5.0), 20.0);
        assert_eq!(p.decay_heat(100, 5.0), 0.0);
    }

    #[test]
    fn test_trend_relative_to_operation_start() {
        let mut p = Pressure::new();
        p.begin_operation();
        p.add_heat(10.0);
        assert_eq!(p.trend(), HeatTrend::Rising);
        p.begin_operation();
        p.decay_heat(1, 5.0);
        assert_eq!(p.trend(), HeatTrend::Falling);
        p.begin_operation();
        assert_eq!(p.trend(), HeatTrend::Steady);
    }

    #[test]
    fn test_bands_and_levels() {
        assert_eq!(KarmaBand::from_karma(0), KarmaBand::Neutral);
        assert_eq!(KarmaBand::from_karma(-15), KarmaBand::Shady);
        assert_eq!(KarmaBand::from_karma(15), KarmaBand::Kind);
        assert_eq!(KarmaBand::from_karma(50), KarmaBand::Saintly);
        assert_eq!(HeatLevel::from_heat(0.0), HeatLevel::Calm);
        assert_eq!(HeatLevel::from_heat(100.0), HeatLevel::Heated);
        assert_eq!(HeatLevel::from_heat(200.0), HeatLevel::Explosive);
    }
}
