//! Storylet content definitions and eligibility predicates
//!
//! Storylets are immutable once loaded. Eligibility is expressed as a list of
//! small `Condition`s, each a pure function of a borrowed `StateView`.

use serde::{Deserialize, Serialize};

use crate::core::calendar::{LifeStage, TimePeriod};
use crate::core::types::{ChoiceId, NpcId, StoryletId};
use crate::entity::relationships::{RelationshipAxis, RelationshipGraph};
use crate::entity::stats::{StatKind, StatLedger};
use crate::narrative::history::StoryHistory;

/// Highest storylet intensity
pub const MAX_INTENSITY: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDelta {
    pub stat: StatKind,
    pub amount: i32,
    /// Uniform ±jitter added on resolution, drawn from the session stream
    pub jitter: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDelta {
    pub npc: NpcId,
    pub axis: RelationshipAxis,
    pub amount: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub label: String,
    /// Choice is only offered if every condition holds at activation
    pub conditions: Vec<Condition>,
    pub stats: Vec<StatDelta>,
    pub relationships: Vec<RelationshipDelta>,
    pub karma: i64,
    pub heat: f32,
    pub memory: Option<String>,
}

impl Choice {
    pub fn new(id: impl Into<ChoiceId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            conditions: Vec::new(),
            stats: Vec::new(),
            relationships: Vec::new(),
            karma: 0,
            heat: 0.0,
            memory: None,
        }
    }

    pub fn with_stat(mut self, stat: StatKind, amount: i32) -> Self {
        self.stats.push(StatDelta {
            stat,
            amount,
            jitter: 0,
        });
        self
    }

    pub fn with_relationship(
        mut self,
        npc: impl Into<NpcId>,
        axis: RelationshipAxis,
        amount: f32,
    ) -> Self {
        self.relationships.push(RelationshipDelta {
            npc: npc.into(),
            axis,
            amount,
        });
        self
    }

    pub fn with_karma(mut self, karma: i64) -> Self {
        self.karma = karma;
        self
    }

    pub fn with_heat(mut self, heat: f32) -> Self {
        self.heat = heat;
        self
    }

    pub fn with_memory(mut self, text: impl Into<String>) -> Self {
        self.memory = Some(text.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storylet {
    pub id: StoryletId,
    pub title: String,
    pub body: String,
    /// 0 (quiet) ..= 3 (dramatic); heat favours higher values
    pub intensity: u8,
    /// Base selection weight, > 0
    pub weight: f64,
    pub conditions: Vec<Condition>,
    pub cooldown_days: u32,
    /// Never offered again once resolved
    pub once: bool,
    /// Only offered when the player enabled content mode
    pub mature: bool,
    /// Validity window of the active event; falls back to the config default
    pub duration_hours: Option<u64>,
    pub choices: Vec<Choice>,
}

impl Storylet {
    pub fn new(id: impl Into<StoryletId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: String::new(),
            intensity: 0,
            weight: 1.0,
            conditions: Vec::new(),
            cooldown_days: 0,
            once: false,
            mature: false,
            duration_hours: None,
            choices: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_cooldown_days(mut self, days: u32) -> Self {
        self.cooldown_days = days;
        self
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn mature(mut self) -> Self {
        self.mature = true;
        self
    }

    pub fn with_duration_hours(mut self, hours: u64) -> Self {
        self.duration_hours = Some(hours);
        self
    }

    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id.as_str() == id)
    }
}

/// Read-only view of session state that predicates are evaluated against
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    pub stats: &'a StatLedger,
    pub relationships: &'a RelationshipGraph,
    pub history: &'a StoryHistory,
    pub age_years: u32,
    pub life_stage: LifeStage,
    pub time_period: TimePeriod,
    pub karma: i64,
    pub heat: f32,
}

/// A single eligibility gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    StatAtLeast { stat: StatKind, value: i32 },
    StatAtMost { stat: StatKind, value: i32 },
    RelationshipAtLeast { npc: NpcId, axis: RelationshipAxis, value: f32 },
    RelationshipAtMost { npc: NpcId, axis: RelationshipAxis, value: f32 },
    KnowsNpc(NpcId),
    LifeStageIn(Vec<LifeStage>),
    AgeAtLeast(u32),
    AgeAtMost(u32),
    KarmaAtLeast(i64),
    KarmaAtMost(i64),
    HeatAtLeast(f32),
    HeatAtMost(f32),
    TimeOfDay(Vec<TimePeriod>),
    Resolved(StoryletId),
    NotResolved(StoryletId),
}

impl Condition {
    pub fn holds(&self, view: &StateView<'_>) -> bool {
        match self {
            Condition::StatAtLeast { stat, value } => view.stats.read(*stat) >= *value,
            Condition::StatAtMost { stat, value } => view.stats.read(*stat) <= *value,
            Condition::RelationshipAtLeast { npc, axis, value } => {
                view.relationships.axis_value(npc, *axis) >= *value
            }
            Condition::RelationshipAtMost { npc, axis, value } => {
                view.relationships.axis_value(npc, *axis) <= *value
            }
            Condition::KnowsNpc(npc) => view.relationships.contains(npc),
            Condition::LifeStageIn(stages) => stages.contains(&view.life_stage),
            Condition::AgeAtLeast(age) => view.age_years >= *age,
            Condition::AgeAtMost(age) => view.age_years <= *age,
            Condition::KarmaAtLeast(k) => view.karma >= *k,
            Condition::KarmaAtMost(k) => view.karma <= *k,
            Condition::HeatAtLeast(h) => view.heat >= *h,
            Condition::HeatAtMost(h) => view.heat <= *h,
            Condition::TimeOfDay(periods) => periods.contains(&view.time_period),
            Condition::Resolved(id) => view.history.was_resolved(id),
            Condition::NotResolved(id) => !view.history.was_resolved(id),
        }
    }
}

pub fn all_hold(conditions: &[Condition], view: &StateView<'_>) -> bool {
    conditions.iter().all(|c| c.holds(view))
}
