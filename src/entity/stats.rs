//! Player attributes and their clamped ranges

use serde::{Deserialize, Serialize};

/// The fixed set of tracked player attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Health,
    Mood,
    Wealth,
    Charisma,
    Intelligence,
    Wisdom,
    Strength,
    Stability,
    Appearance,
    Reputation,
    Curiosity,
    Energy,
    Libido,
}

impl StatKind {
    pub const ALL: [StatKind; 13] = [
        StatKind::Health,
        StatKind::Mood,
        StatKind::Wealth,
        StatKind::Charisma,
        StatKind::Intelligence,
        StatKind::Wisdom,
        StatKind::Strength,
        StatKind::Stability,
        StatKind::Appearance,
        StatKind::Reputation,
        StatKind::Curiosity,
        StatKind::Energy,
        StatKind::Libido,
    ];

    /// Inclusive (min, max) range for this stat
    pub fn range(self) -> (i32, i32) {
        match self {
            StatKind::Mood => (-10, 10),
            _ => (0, 100),
        }
    }

    /// Value at session creation, before archetype adjustments
    pub fn default_value(self) -> i32 {
        match self {
            StatKind::Health | StatKind::Energy => 75,
            StatKind::Mood => 0,
            _ => 50,
        }
    }

    pub fn clamp(self, value: i32) -> i32 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Health => "health",
            StatKind::Mood => "mood",
            StatKind::Wealth => "wealth",
            StatKind::Charisma => "charisma",
            StatKind::Intelligence => "intelligence",
            StatKind::Wisdom => "wisdom",
            StatKind::Strength => "strength",
            StatKind::Stability => "stability",
            StatKind::Appearance => "appearance",
            StatKind::Reputation => "reputation",
            StatKind::Curiosity => "curiosity",
            StatKind::Energy => "energy",
            StatKind::Libido => "libido",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.to_lowercase();
        StatKind::ALL.into_iter().find(|k| k.as_str() == lowered)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Owns every stat value; all writes clamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLedger {
    values: [i32; 13],
}

impl Default for StatLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl StatLedger {
    pub fn new() -> Self {
        let mut values = [0; 13];
        for kind in StatKind::ALL {
            values[kind.index()] = kind.default_value();
        }
        Self { values }
    }

    /// Add `amount`, saturating at the stat's range. Returns the new value.
    pub fn apply_delta(&mut self, kind: StatKind, amount: i32) -> i32 {
        let slot = &mut self.values[kind.index()];
        *slot = kind.clamp(slot.saturating_add(amount));
        *slot
    }

    pub fn read(&self, kind: StatKind) -> i32 {
        self.values[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, i32)> + '_ {
        StatKind::ALL.into_iter().map(move |k| (k, self.read(k)))
    }

    /// Once-per-day drift: mood eases toward 0, energy recovers toward its default
    pub fn apply_daily_drift(&mut self, mood_regression: i32, energy_recovery: i32) {
        self.apply_drift_for_days(1, mood_regression, energy_recovery);
    }

    /// Drift for `days` elapsed days in one pass. Each day moves a stat by at
    /// most its rate and never past its resting value, so the total movement
    /// is `min(rate * days, gap)`.
    pub fn apply_drift_for_days(&mut self, days: u64, mood_regression: i32, energy_recovery: i32) {
        let mood = self.read(StatKind::Mood);
        let mood_step = drift_amount(days, mood_regression, mood.abs());
        if mood > 0 {
            self.apply_delta(StatKind::Mood, -mood_step);
        } else if mood < 0 {
            self.apply_delta(StatKind::Mood, mood_step);
        }

        let energy = self.read(StatKind::Energy);
        let rest_level = StatKind::Energy.default_value();
        if energy < rest_level {
            let energy_step = drift_amount(days, energy_recovery, rest_level - energy);
            self.apply_delta(StatKind::Energy, energy_step);
        }
    }

    pub fn block(&self) -> StatBlock {
        StatBlock {
            health: self.read(StatKind::Health),
            mood: self.read(StatKind::Mood),
            wealth: self.read(StatKind::Wealth),
            charisma: self.read(StatKind::Charisma),
            intelligence: self.read(StatKind::Intelligence),
            wisdom: self.read(StatKind::Wisdom),
            strength: self.read(StatKind::Strength),
            stability: self.read(StatKind::Stability),
            appearance: self.read(StatKind::Appearance),
            reputation: self.read(StatKind::Reputation),
            curiosity: self.read(StatKind::Curiosity),
            energy: self.read(StatKind::Energy),
            libido: self.read(StatKind::Libido),
        }
    }
}

fn drift_amount(days: u64, rate_per_day: i32, gap: i32) -> i32 {
    let days = i64::try_from(days).unwrap_or(i64::MAX);
    let total = i64::from(rate_per_day.max(0)).saturating_mul(days);
    // gap fits in i32, so the min does too
    total.min(i64::from(gap)) as i32
}

/// Named per-stat values as handed to snapshot consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub health: i32,
    pub mood: i32,
    pub wealth: i32,
    pub charisma: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub strength: i32,
    pub stability: i32,
    pub appearance: i32,
    pub reputation: i32,
    pub curiosity: i32,
    pub energy: i32,
    pub libido: i32,
}

impl StatBlock {
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Mood => self.mood,
            StatKind::Wealth => self.wealth,
            StatKind::Charisma => self.charisma,
            StatKind::Intelligence => self.intelligence,
            StatKind::Wisdom => self.wisdom,
            StatKind::Strength => self.strength,
            StatKind::Stability => self.stability,
            StatKind::Appearance => self.appearance,
            StatKind::Reputation => self.reputation,
            StatKind::Curiosity => self.curiosity,
            StatKind::Energy => self.energy,
            StatKind::Libido => self.libido,
        }
    }
}

/// Read-time classification of mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodBand {
    Miserable, // mood <= -6
    Low,       // -6 < mood <= -2
    Steady,    // -2 < mood < 2
    Good,      // 2 <= mood < 6
    Elated,    // mood >= 6
}

impl MoodBand {
    pub fn from_mood(mood: i32) -> Self {
        match mood {
            m if m <= -6 => MoodBand::Miserable,
            m if m <= -2 => MoodBand::Low,
            m if m < 2 => MoodBand::Steady,
            m if m < 6 => MoodBand::Good,
            _ => MoodBand::Elated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodBand::Miserable => "Miserable",
            MoodBand::Low => "Low",
            MoodBand::Steady => "Steady",
            MoodBand::Good => "Good",
            MoodBand::Elated => "Elated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ledger = StatLedger::new();
        assert_eq!(ledger.read(StatKind::Health), 75);
        assert_eq!(ledger.read(StatKind::Energy), 75);
        assert_eq!(ledger.read(StatKind::Wealth), 50);
        assert_eq!(ledger.read(StatKind::Mood), 0);
        assert_eq!(ledger.read(StatKind::Libido), 50);
    }

    #[test]
    fn test_apply_delta_returns_new_value() {
        let mut ledger = StatLedger::new();
        assert_eq!(ledger.apply_delta(StatKind::Health, -2), 73);
        assert_eq!(ledger.read(StatKind::Health), 73);
    }

    #[test]
    fn test_clamps_saturate() {
        let mut ledger = StatLedger::new();
        assert_eq!(ledger.apply_delta(StatKind::Wealth, 1000), 100);
        assert_eq!(ledger.apply_delta(StatKind::Wealth, -1000), 0);
        assert_eq!(ledger.apply_delta(StatKind::Mood, 50), 10);
        assert_eq!(ledger.apply_delta(StatKind::Mood, -50), -10);
        assert_eq!(ledger.apply_delta(StatKind::Health, i32::MIN), 0);
        assert_eq!(ledger.apply_delta(StatKind::Health, i32::MAX), 100);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for kind in StatKind::ALL {
            assert_eq!(StatKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(StatKind::parse("HEALTH"), Some(StatKind::Health));
        assert_eq!(StatKind::parse("luck"), None);
    }

    #[test]
    fn test_daily_drift() {
        let mut ledger = StatLedger::new();
        ledger.apply_delta(StatKind::Mood, 3);
        ledger.apply_delta(StatKind::Energy, -20);
        ledger.apply_daily_drift(1, 5);
        assert_eq!(ledger.read(StatKind::Mood), 2);
        assert_eq!(ledger.read(StatKind::Energy), 60);

        ledger.apply_delta(StatKind::Mood, -10);
        ledger.apply_daily_drift(1, 5);
        assert_eq!(ledger.read(StatKind::Mood), -7);
    }

    #[test]
    fn test_drift_does_not_overshoot() {
        let mut ledger = StatLedger::new();
        ledger.apply_delta(StatKind::Mood, 1);
        ledger.apply_delta(StatKind::Energy, -2);
        ledger.apply_daily_drift(3, 10);
        assert_eq!(ledger.read(StatKind::Mood), 0);
        assert_eq!(ledger.read(StatKind::Energy), 75);
    }

    #[test]
    fn test_multi_day_drift_matches_daily_drift() {
        let mut daily = StatLedger::new();
        daily.apply_delta(StatKind::Mood, -9);
        daily.apply_delta(StatKind::Energy, -60);
        let mut batched = daily.clone();

        for _ in 0..7 {
            daily.apply_daily_drift(1, 5);
        }
        batched.apply_drift_for_days(7, 1, 5);
        assert_eq!(batched, daily);
        assert_eq!(batched.read(StatKind::Mood), -2);
        assert_eq!(batched.read(StatKind::Energy), 50);
    }

    #[test]
    fn test_drift_over_huge_spans_settles() {
        let mut ledger = StatLedger::new();
        ledger.apply_delta(StatKind::Mood, 10);
        ledger.apply_delta(StatKind::Energy, -75);
        ledger.apply_drift_for_days(u64::MAX, 1, 5);
        assert_eq!(ledger.read(StatKind::Mood), 0);
        assert_eq!(ledger.read(StatKind::Energy), 75);

        ledger.apply_delta(StatKind::Mood, -4);
        ledger.apply_drift_for_days(3, 0, 0);
        assert_eq!(ledger.read(StatKind::Mood), -4);
    }

    #[test]
    fn test_block_matches_reads() {
        let mut ledger = StatLedger::new();
        ledger.apply_delta(StatKind::Curiosity, 7);
        let block = ledger.block();
        for (kind, value) in ledger.iter() {
            assert_eq!(block.get(kind), value);
        }
    }

    #[test]
    fn test_mood_bands() {
        assert_eq!(MoodBand::from_mood(-10), MoodBand::Miserable);
        assert_eq!(MoodBand::from_mood(-6), MoodBand::Miserable);
        assert_eq!(MoodBand::from_mood(-3), MoodBand::Low);
        assert_eq!(MoodBand::from_mood(0), MoodBand::Steady);
        assert_eq!(MoodBand::from_mood(2), MoodBand::Good);
        assert_eq!(MoodBand::from_mood(10), MoodBand::Elated);
    }
}
