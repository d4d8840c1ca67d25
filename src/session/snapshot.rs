//! Owned, read-only views of a session
//!
//! Everything here is captured by value; nothing holds a reference back into
//! the session, so snapshots can cross a bridge or outlive the session.

use serde::{Deserialize, Serialize};

use crate::core::calendar::{DisplayFlags, LifeStage};
use crate::core::types::{ChoiceId, NpcId, StoryletId, Tick};
use crate::entity::relationships::{AxisBands, RelationshipRecord, RoleLabel};
use crate::entity::stats::{MoodBand, StatBlock, StatKind};
use crate::narrative::catalog::StoryletCatalog;
use crate::narrative::director::{ActiveEvent, DirectorState};
use crate::narrative::pressure::{HeatLevel, HeatTrend, KarmaBand};
use crate::session::game::GameSession;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub id: ChoiceId,
    pub label: String,
}

/// The active event as presented to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    pub storylet_id: StoryletId,
    pub title: String,
    pub body: String,
    pub intensity: u8,
    pub expires_at_tick: Tick,
    pub choices: Vec<ChoiceView>,
}

impl EventView {
    pub fn capture(active: &ActiveEvent, catalog: &StoryletCatalog) -> Option<Self> {
        let storylet = catalog.get(&active.storylet_id)?;
        let choices = active
            .offered
            .iter()
            .filter_map(|id| storylet.choice(id.as_str()))
            .map(|c| ChoiceView {
                id: c.id.clone(),
                label: c.label.clone(),
            })
            .collect();

        Some(Self {
            storylet_id: storylet.id.clone(),
            title: storylet.title.clone(),
            body: storylet.body.clone(),
            intensity: storylet.intensity,
            expires_at_tick: active.expires_at,
            choices,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipSummary {
    pub npc_id: NpcId,
    pub name: String,
    /// (affection + trust - resentment) / 3, in -10..=10
    pub strength: f32,
    pub state: RoleLabel,
}

/// Compact state for the main screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: Tick,
    pub day: u64,
    pub age_years: u32,
    pub life_stage: LifeStage,
    pub stats: StatBlock,
    pub mood_band: MoodBand,
    pub karma: i64,
    pub current_event: Option<EventView>,
    /// Ranked by affection + trust, strongest first
    pub relationships: Vec<RelationshipSummary>,
    /// Newest first
    pub memories: Vec<String>,
}

impl Snapshot {
    pub fn capture(session: &GameSession) -> Self {
        let clock = session.clock();
        let stats = session.stats();

        let relationships = session
            .relationships()
            .ranked()
            .into_iter()
            .map(|r| RelationshipSummary {
                npc_id: r.npc_id.clone(),
                name: r.name.clone(),
                strength: r.strength(),
                state: r.role(),
            })
            .collect();

        let memories = session
            .memories()
            .recent(session.config().snapshot_memory_count)
            .map(|m| m.text.clone())
            .collect();

        Self {
            tick: clock.current_tick(),
            day: clock.current_day(),
            age_years: clock.age_years(),
            life_stage: session.life_stage(),
            stats: stats.block(),
            mood_band: MoodBand::from_mood(stats.read(StatKind::Mood)),
            karma: session.pressure().karma(),
            current_event: session.current_event(),
            relationships,
            memories,
        }
    }
}

/// One relationship with every axis, band and the derived role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDetail {
    pub npc_id: NpcId,
    pub name: String,
    pub affection: f32,
    pub trust: f32,
    pub attraction: f32,
    pub familiarity: f32,
    pub resentment: f32,
    pub bands: AxisBands,
    pub role: RoleLabel,
}

impl From<&RelationshipRecord> for RelationshipDetail {
    fn from(record: &RelationshipRecord) -> Self {
        Self {
            npc_id: record.npc_id.clone(),
            name: record.name.clone(),
            affection: record.affection,
            trust: record.trust,
            attraction: record.attraction,
            familiarity: record.familiarity,
            resentment: record.resentment,
            bands: record.bands(),
            role: record.role(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatView {
    pub value: f32,
    pub level: HeatLevel,
    pub trend: HeatTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KarmaView {
    pub value: i64,
    pub band: KarmaBand,
}

/// Detailed state for the character sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullSnapshot {
    pub tick: Tick,
    pub day: u64,
    pub age_years: u32,
    pub life_stage: LifeStage,
    pub display: DisplayFlags,
    pub stats: StatBlock,
    /// First-touch order
    pub relationships: Vec<RelationshipDetail>,
    pub heat: HeatView,
    pub karma: KarmaView,
    pub current_event: Option<EventView>,
    pub director_state: DirectorState,
}

impl FullSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        let clock = session.clock();
        let pressure = session.pressure();
        let life_stage = session.life_stage();

        Self {
            tick: clock.current_tick(),
            day: clock.current_day(),
            age_years: clock.age_years(),
            life_stage,
            display: life_stage.display_flags(),
            stats: session.stats().block(),
            relationships: session
                .relationships()
                .list()
                .iter()
                .map(RelationshipDetail::from)
                .collect(),
            heat: HeatView {
                value: pressure.heat(),
                level: pressure.heat_level(),
                trend: pressure.trend(),
            },
            karma: KarmaView {
                value: pressure.karma(),
                band: pressure.karma_band(),
            },
            current_event: session.current_event(),
            director_state: session.director().state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::storylet::{Choice, Storylet};

    #[test]
    fn test_event_view_lists_offered_choices_only() {
        let catalog = StoryletCatalog::new(
            vec![Storylet::new("fork", "A Fork")
                .with_body("Two paths.")
                .with_intensity(2)
                .with_choice(Choice::new("left", "Go left"))
                .with_choice(Choice::new("right", "Go right"))],
            vec![],
        )
        .unwrap();
        let active = ActiveEvent {
            storylet_id: StoryletId::from("fork"),
            offered: vec![ChoiceId::from("right")],
            activated_at: 0,
            expires_at: 72,
        };

        let view = EventView::capture(&active, &catalog).unwrap();
        assert_eq!(view.title, "A Fork");
        assert_eq!(view.intensity, 2);
        assert_eq!(view.expires_at_tick, 72);
        assert_eq!(
            view.choices,
            vec![ChoiceView {
                id: ChoiceId::from("right"),
                label: "Go right".into()
            }]
        );
    }

    #[test]
    fn test_event_view_unknown_storylet() {
        let active = ActiveEvent {
            storylet_id: StoryletId::from("ghost"),
            offered: vec![],
            activated_at: 0,
            expires_at: 1,
        };
        assert!(EventView::capture(&active, &StoryletCatalog::empty()).is_none());
    }

    #[test]
    fn test_relationship_detail_from_record() {
        let mut record = RelationshipRecord::new(NpcId::from("theo"), "Theo");
        record.affection = 10.0;
        record.resentment = 10.0;
        let detail = RelationshipDetail::from(&record);
        assert_eq!(detail.role, RoleLabel::Conflicted);
        assert_eq!(detail.bands.resentment, "Seething");
    }
}
