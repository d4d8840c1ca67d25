//! Relationship graph: one five-axis record per NPC
//!
//! Role and band labels are computed from the current axis values on every
//! read. Nothing derived is stored.

use std::cmp::Reverse;

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::NpcId;

/// The five relationship axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipAxis {
    Affection,
    Trust,
    Attraction,
    Familiarity,
    Resentment,
}

impl RelationshipAxis {
    pub const ALL: [RelationshipAxis; 5] = [
        RelationshipAxis::Affection,
        RelationshipAxis::Trust,
        RelationshipAxis::Attraction,
        RelationshipAxis::Familiarity,
        RelationshipAxis::Resentment,
    ];

    /// Inclusive (min, max) range for this axis
    pub fn range(self) -> (f32, f32) {
        match self {
            RelationshipAxis::Familiarity => (0.0, 10.0),
            _ => (-10.0, 10.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipAxis::Affection => "affection",
            RelationshipAxis::Trust => "trust",
            RelationshipAxis::Attraction => "attraction",
            RelationshipAxis::Familiarity => "familiarity",
            RelationshipAxis::Resentment => "resentment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.to_lowercase();
        RelationshipAxis::ALL
            .into_iter()
            .find(|a| a.as_str() == lowered)
    }
}

// Role thresholds, evaluated top to bottom. Negative conditions come first so
// that a record which is both loved and resented never reads as a friend.
pub const CONFLICTED_RESENTMENT: f32 = 7.0;
pub const CONFLICTED_AFFECTION: f32 = 5.0;
pub const ENEMY_RESENTMENT: f32 = 7.0;
pub const RIVAL_RESENTMENT: f32 = 4.0;
pub const DISTRUST_TRUST: f32 = -5.0;
pub const ROMANCE_ATTRACTION: f32 = 6.0;
pub const ROMANCE_AFFECTION: f32 = 4.0;
pub const PARTNER_TRUST: f32 = 5.0;
pub const PARTNER_FAMILIARITY: f32 = 6.0;
pub const CLOSE_FRIEND_AFFECTION: f32 = 7.0;
pub const CLOSE_FRIEND_TRUST: f32 = 6.0;
pub const FRIEND_AFFECTION: f32 = 4.0;
pub const FRIEND_TRUST: f32 = 2.0;
pub const ACQUAINTANCE_FAMILIARITY: f32 = 3.0;

/// Derived social role of an NPC relative to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleLabel {
    Stranger,
    Acquaintance,
    Friend,
    CloseFriend,
    Crush,
    Partner,
    Distrusted,
    Rival,
    Enemy,
    Conflicted,
}

impl RoleLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleLabel::Stranger => "Stranger",
            RoleLabel::Acquaintance => "Acquaintance",
            RoleLabel::Friend => "Friend",
            RoleLabel::CloseFriend => "Close Friend",
            RoleLabel::Crush => "Crush",
            RoleLabel::Partner => "Partner",
            RoleLabel::Distrusted => "Distrusted",
            RoleLabel::Rival => "Rival",
            RoleLabel::Enemy => "Enemy",
            RoleLabel::Conflicted => "Conflicted",
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            RoleLabel::Distrusted | RoleLabel::Rival | RoleLabel::Enemy | RoleLabel::Conflicted
        )
    }
}

/// Five-step band for a single axis value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    VeryLow,
    Low,
    Neutral,
    High,
    VeryHigh,
}

impl Band {
    pub fn for_axis(axis: RelationshipAxis, value: f32) -> Self {
        let cuts: [f32; 4] = match axis {
            RelationshipAxis::Familiarity => [2.0, 4.0, 6.0, 8.0],
            _ => [-6.0, -2.0, 2.0, 6.0],
        };
        if value <= cuts[0] {
            Band::VeryLow
        } else if value <= cuts[1] {
            Band::Low
        } else if value < cuts[2] {
            Band::Neutral
        } else if value < cuts[3] {
            Band::High
        } else {
            Band::VeryHigh
        }
    }
}

/// Human-facing name of a band on a given axis
pub fn band_label(axis: RelationshipAxis, band: Band) -> &'static str {
    use Band::*;
    use RelationshipAxis::*;
    match (axis, band) {
        (Affection, VeryLow) => "Loathing",
        (Affection, Low) => "Cold",
        (Affection, Neutral) => "Indifferent",
        (Affection, High) => "Warm",
        (Affection, VeryHigh) => "Devoted",
        (Trust, VeryLow) => "Betrayed",
        (Trust, Low) => "Wary",
        (Trust, Neutral) => "Unsure",
        (Trust, High) => "Trusting",
        (Trust, VeryHigh) => "Unshakable",
        (Attraction, VeryLow) => "Repelled",
        (Attraction, Low) => "Uninterested",
        (Attraction, Neutral) => "Neutral",
        (Attraction, High) => "Drawn",
        (Attraction, VeryHigh) => "Smitten",
        (Familiarity, VeryLow) => "Unknown",
        (Familiarity, Low) => "Familiar Face",
        (Familiarity, Neutral) => "Known",
        (Familiarity, High) => "Close",
        (Familiarity, VeryHigh) => "Inseparable",
        (Resentment, VeryLow) => "Forgiving",
        (Resentment, Low) => "Easygoing",
        (Resentment, Neutral) => "Unbothered",
        (Resentment, High) => "Bitter",
        (Resentment, VeryHigh) => "Seething",
    }
}

/// Band labels for every axis of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisBands {
    pub affection: String,
    pub trust: String,
    pub attraction: String,
    pub familiarity: String,
    pub resentment: String,
}

/// Relationship with one NPC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub npc_id: NpcId,
    pub name: String,
    pub affection: f32,
    pub trust: f32,
    pub attraction: f32,
    pub familiarity: f32,
    pub resentment: f32,
}

impl RelationshipRecord {
    pub fn new(npc_id: NpcId, name: impl Into<String>) -> Self {
        Self {
            npc_id,
            name: name.into(),
            affection: 0.0,
            trust: 0.0,
            attraction: 0.0,
            familiarity: 0.0,
            resentment: 0.0,
        }
    }

    pub fn get(&self, axis: RelationshipAxis) -> f32 {
        match axis {
            RelationshipAxis::Affection => self.affection,
            RelationshipAxis::Trust => self.trust,
            RelationshipAxis::Attraction => self.attraction,
            RelationshipAxis::Familiarity => self.familiarity,
            RelationshipAxis::Resentment => self.resentment,
        }
    }

    /// Add to an axis and clamp. Returns the new value.
    pub fn apply(&mut self, axis: RelationshipAxis, amount: f32) -> f32 {
        let (min, max) = axis.range();
        let slot = match axis {
            RelationshipAxis::Affection => &mut self.affection,
            RelationshipAxis::Trust => &mut self.trust,
            RelationshipAxis::Attraction => &mut self.attraction,
            RelationshipAxis::Familiarity => &mut self.familiarity,
            RelationshipAxis::Resentment => &mut self.resentment,
        };
        let next = *slot + amount;
        // NaN deltas leave the axis untouched
        if !next.is_nan() {
            *slot = next.clamp(min, max);
        }
        *slot
    }

    pub fn role(&self) -> RoleLabel {
        derive_role_label(self)
    }

    pub fn bands(&self) -> AxisBands {
        let label = |axis: RelationshipAxis| band_label(axis, Band::for_axis(axis, self.get(axis))).to_string();
        AxisBands {
            affection: label(RelationshipAxis::Affection),
            trust: label(RelationshipAxis::Trust),
            attraction: label(RelationshipAxis::Attraction),
            familiarity: label(RelationshipAxis::Familiarity),
            resentment: label(RelationshipAxis::Resentment),
        }
    }

    /// Ranking key for "top N" views: affection + trust
    pub fn rank_key(&self) -> f32 {
        self.affection + self.trust
    }

    /// Single -10..=10 summary used by the simple snapshot
    pub fn strength(&self) -> f32 {
        ((self.affection + self.trust - self.resentment) / 3.0).clamp(-10.0, 10.0)
    }
}

/// Compute the role label from the five axes
pub fn derive_role_label(record: &RelationshipRecord) -> RoleLabel {
    let r = record;

    if r.resentment >= CONFLICTED_RESENTMENT && r.affection >= CONFLICTED_AFFECTION {
        return RoleLabel::Conflicted;
    }
    if r.resentment >= ENEMY_RESENTMENT {
        return RoleLabel::Enemy;
    }
    if r.resentment >= RIVAL_RESENTMENT {
        return RoleLabel::Rival;
    }
    if r.trust <= DISTRUST_TRUST {
        return RoleLabel::Distrusted;
    }

    if r.attraction >= ROMANCE_ATTRACTION && r.affection >= ROMANCE_AFFECTION {
        if r.trust >= PARTNER_TRUST && r.familiarity >= PARTNER_FAMILIARITY {
            return RoleLabel::Partner;
        }
        return RoleLabel::Crush;
    }
    if r.affection >= CLOSE_FRIEND_AFFECTION && r.trust >= CLOSE_FRIEND_TRUST {
        return RoleLabel::CloseFriend;
    }
    if r.affection >= FRIEND_AFFECTION && r.trust >= FRIEND_TRUST {
        return RoleLabel::Friend;
    }
    if r.familiarity >= ACQUAINTANCE_FAMILIARITY {
        return RoleLabel::Acquaintance;
    }
    RoleLabel::Stranger
}

/// All relationship records, in first-touch order
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    records: Vec<RelationshipRecord>,
    index: AHashMap<NpcId, usize>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the record for `npc_id`, creating a zeroed one named `name` if absent
    pub fn ensure(&mut self, npc_id: &NpcId, name: &str) -> &mut RelationshipRecord {
        let idx = match self.index.get(npc_id) {
            Some(&idx) => idx,
            None => {
                self.records
                    .push(RelationshipRecord::new(npc_id.clone(), name));
                let idx = self.records.len() - 1;
                self.index.insert(npc_id.clone(), idx);
                idx
            }
        };
        &mut self.records[idx]
    }

    /// Add to one axis, creating the record on first touch. Returns the new value.
    pub fn apply_delta(&mut self, npc_id: &NpcId, axis: RelationshipAxis, amount: f32) -> f32 {
        let name = npc_id.to_string();
        self.ensure(npc_id, &name).apply(axis, amount)
    }

    pub fn get(&self, npc_id: &NpcId) -> Option<&RelationshipRecord> {
        self.index.get(npc_id).map(|&idx| &self.records[idx])
    }

    pub fn contains(&self, npc_id: &NpcId) -> bool {
        self.index.contains_key(npc_id)
    }

    /// Axis value, treating unknown NPCs as all-zero records
    pub fn axis_value(&self, npc_id: &NpcId, axis: RelationshipAxis) -> f32 {
        self.get(npc_id).map(|r| r.get(axis)).unwrap_or(0.0)
    }

    /// Records in insertion order
    pub fn list(&self) -> &[RelationshipRecord] {
        &self.records
    }

    /// Records sorted by affection + trust, descending; ties keep insertion order
    pub fn ranked(&self) -> Vec<&RelationshipRecord> {
        let mut ranked: Vec<&RelationshipRecord> = self.records.iter().collect();
        ranked.sort_by_key(|r| Reverse(OrderedFloat(r.rank_key())));
        ranked
    }

    pub fn top(&self, n: usize) -> Vec<&RelationshipRecord> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PartialEq for RelationshipGraph {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}
