//! Clock and life-stage tracking
//!
//! One tick is one simulated hour. Day, hour, age and life stage are all
//! derived from the tick counter on read; nothing derived is cached.

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Time of day periods, usable as storylet gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    Morning,    // 06:00-12:00
    Afternoon,  // 12:00-18:00
    Evening,    // 18:00-22:00
    Night,      // 22:00-06:00
}

impl TimePeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimePeriod::Morning,
            12..=17 => TimePeriod::Afternoon,
            18..=21 => TimePeriod::Evening,
            _ => TimePeriod::Night, // 22-23, 0-5
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "morning" => Some(TimePeriod::Morning),
            "afternoon" => Some(TimePeriod::Afternoon),
            "evening" => Some(TimePeriod::Evening),
            "night" => Some(TimePeriod::Night),
            _ => None,
        }
    }
}

/// Coarse age category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifeStage {
    Child,
    Teen,
    Adult,
    Elder,
}

/// Age cutoffs (in years) at which each later stage begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeStageThresholds {
    pub teen_at: u32,
    pub adult_at: u32,
    pub elder_at: u32,
}

impl Default for LifeStageThresholds {
    fn default() -> Self {
        Self {
            teen_at: 12,
            adult_at: 20,
            elder_at: 65,
        }
    }
}

/// Which stat panels the UI should show for a life stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFlags {
    pub show_wealth: bool,
    pub show_reputation: bool,
    pub show_wisdom: bool,
    pub show_karma: bool,
}

impl LifeStage {
    pub fn from_age(age_years: u32, thresholds: &LifeStageThresholds) -> Self {
        if age_years < thresholds.teen_at {
            LifeStage::Child
        } else if age_years < thresholds.adult_at {
            LifeStage::Teen
        } else if age_years < thresholds.elder_at {
            LifeStage::Adult
        } else {
            LifeStage::Elder
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifeStage::Child => "Child",
            LifeStage::Teen => "Teen",
            LifeStage::Adult => "Adult",
            LifeStage::Elder => "Elder",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "child" => Some(LifeStage::Child),
            "teen" => Some(LifeStage::Teen),
            "adult" => Some(LifeStage::Adult),
            "elder" => Some(LifeStage::Elder),
            _ => None,
        }
    }

    pub fn display_flags(&self) -> DisplayFlags {
        match self {
            LifeStage::Child => DisplayFlags {
                show_wealth: false,
                show_reputation: false,
                show_wisdom: false,
                show_karma: false,
            },
            LifeStage::Teen => DisplayFlags {
                show_wealth: false,
                show_reputation: true,
                show_wisdom: false,
                show_karma: true,
            },
            LifeStage::Adult | LifeStage::Elder => DisplayFlags {
                show_wealth: true,
                show_reputation: true,
                show_wisdom: true,
                show_karma: true,
            },
        }
    }
}

/// Monotonic simulation clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    tick: Tick,
    ticks_per_day: u64,
    days_per_year: u64,
    starting_age: u32,
}

impl Clock {
    pub fn new(ticks_per_day: u64, days_per_year: u64, starting_age: u32) -> Self {
        Self {
            tick: 0,
            ticks_per_day: ticks_per_day.max(1),
            days_per_year: days_per_year.max(1),
            starting_age,
        }
    }

    /// Advance by `ticks`, returning how many day boundaries were crossed
    pub fn advance(&mut self, ticks: u64) -> u64 {
        let day_before = self.current_day();
        self.tick = self.tick.saturating_add(ticks);
        self.current_day() - day_before
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn current_day(&self) -> u64 {
        self.tick / self.ticks_per_day
    }

    pub fn current_hour(&self) -> u32 {
        let tick_in_day = self.tick % self.ticks_per_day;
        ((tick_in_day * 24) / self.ticks_per_day) as u32
    }

    pub fn current_time_period(&self) -> TimePeriod {
        TimePeriod::from_hour(self.current_hour())
    }

    pub fn ticks_per_day(&self) -> u64 {
        self.ticks_per_day
    }

    pub fn ticks_per_year(&self) -> u64 {
        self.ticks_per_day * self.days_per_year
    }

    pub fn age_years(&self) -> u32 {
        let elapsed_years = self.tick / self.ticks_per_year();
        self.starting_age
            .saturating_add(u32::try_from(elapsed_years).unwrap_or(u32::MAX))
    }

    pub fn life_stage(&self, thresholds: &LifeStageThresholds) -> LifeStage {
        LifeStage::from_age(self.age_years(), thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_period_from_hour() {
        assert_eq!(TimePeriod::from_hour(6), TimePeriod::Morning);
        assert_eq!(TimePeriod::from_hour(11), TimePeriod::Morning);
        assert_eq!(TimePeriod::from_hour(12), TimePeriod::Afternoon);
        assert_eq!(TimePeriod::from_hour(17), TimePeriod::Afternoon);
        assert_eq!(TimePeriod::from_hour(18), TimePeriod::Evening);
        assert_eq!(TimePeriod::from_hour(21), TimePeriod::Evening);
        assert_eq!(TimePeriod::from_hour(22), TimePeriod::Night);
        assert_eq!(TimePeriod::from_hour(5), TimePeriod::Night);
    }

    #[test]
    fn test_clock_advance_counts_day_boundaries() {
        let mut clock = Clock::new(24, 365, 6);
        assert_eq!(clock.advance(23), 0);
        assert_eq!(clock.advance(1), 1);
        assert_eq!(clock.current_day(), 1);
        assert_eq!(clock.advance(72), 3);
        assert_eq!(clock.current_tick(), 96);
        assert_eq!(clock.advance(0), 0);
    }

    #[test]
    fn test_clock_hour_and_period() {
        let mut clock = Clock::new(24, 365, 6);
        assert_eq!(clock.current_time_period(), TimePeriod::Night);
        clock.advance(8);
        assert_eq!(clock.current_hour(), 8);
        assert_eq!(clock.current_time_period(), TimePeriod::Morning);
    }

    #[test]
    fn test_age_from_elapsed_ticks() {
        let mut clock = Clock::new(24, 365, 6);
        assert_eq!(clock.age_years(), 6);
        clock.advance(24 * 365 - 1);
        assert_eq!(clock.age_years(), 6);
        clock.advance(1);
        assert_eq!(clock.age_years(), 7);
    }

    #[test]
    fn test_life_stage_thresholds() {
        let t = LifeStageThresholds::default();
        assert_eq!(LifeStage::from_age(0, &t), LifeStage::Child);
        assert_eq!(LifeStage::from_age(11, &t), LifeStage::Child);
        assert_eq!(LifeStage::from_age(12, &t), LifeStage::Teen);
        assert_eq!(LifeStage::from_age(19, &t), LifeStage::Teen);
        assert_eq!(LifeStage::from_age(20, &t), LifeStage::Adult);
        assert_eq!(LifeStage::from_age(64, &t), LifeStage::Adult);
        assert_eq!(LifeStage::from_age(65, &t), LifeStage::Elder);
    }

    #[test]
    fn test_life_stage_recomputed_on_read() {
        let t = LifeStageThresholds::default();
        let mut clock = Clock::new(24, 365, 11);
        assert_eq!(clock.life_stage(&t), LifeStage::Child);
        clock.advance(24 * 365);
        assert_eq!(clock.life_stage(&t), LifeStage::Teen);
    }

    #[test]
    fn test_display_flags_by_stage() {
        assert!(!LifeStage::Child.display_flags().show_karma);
        assert!(LifeStage::Teen.display_flags().show_reputation);
        assert!(!LifeStage::Teen.display_flags().show_wealth);
        assert!(LifeStage::Adult.display_flags().show_wisdom);
        assert_eq!(LifeStage::Elder.display_flags(), LifeStage::Adult.display_flags());
    }
}
