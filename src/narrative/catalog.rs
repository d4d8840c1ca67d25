//! Immutable storylet catalog and its TOML loader

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::core::calendar::{LifeStage, TimePeriod};
use crate::core::error::{Result, SimError};
use crate::core::types::{ChoiceId, NpcId, StoryletId};
use crate::entity::relationships::RelationshipAxis;
use crate::entity::stats::StatKind;
use crate::narrative::storylet::{
    Choice, Condition, RelationshipDelta, StatDelta, Storylet, MAX_INTENSITY,
};

/// Content shipped with the crate
const BUILTIN_STORYLETS: &str = include_str!("../../data/storylets.toml");

/// A named NPC that content can refer to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpcDefinition {
    pub id: NpcId,
    pub name: String,
}

/// Storylets sorted by id, validated once at load
#[derive(Debug, Clone, Default)]
pub struct StoryletCatalog {
    storylets: Vec<Storylet>,
    index: AHashMap<StoryletId, usize>,
    npcs: Vec<NpcDefinition>,
}

impl StoryletCatalog {
    /// Build and validate a catalog
    pub fn new(mut storylets: Vec<Storylet>, npcs: Vec<NpcDefinition>) -> Result<Self> {
        storylets.sort_by(|a, b| a.id.cmp(&b.id));

        let mut index = AHashMap::new();
        for (idx, storylet) in storylets.iter().enumerate() {
            validate_storylet(storylet)?;
            if index.insert(storylet.id.clone(), idx).is_some() {
                return Err(SimError::Content(format!(
                    "duplicate storylet id '{}'",
                    storylet.id
                )));
            }
        }

        let mut seen_npcs = HashSet::new();
        for npc in &npcs {
            if npc.id.as_str().is_empty() {
                return Err(SimError::Content("npc with empty id".into()));
            }
            if !seen_npcs.insert(npc.id.clone()) {
                return Err(SimError::Content(format!("duplicate npc id '{}'", npc.id)));
            }
        }

        Ok(Self {
            storylets,
            index,
            npcs,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in content set
    pub fn builtin() -> Result<Self> {
        Self::parse_toml(BUILTIN_STORYLETS)
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlCatalog = toml::from_str(content)?;

        let npcs = toml_data
            .npcs
            .into_iter()
            .map(|n| NpcDefinition {
                id: NpcId(n.id),
                name: n.name,
            })
            .collect();

        let storylets = toml_data
            .storylets
            .into_iter()
            .map(TomlStorylet::into_storylet)
            .collect::<Result<Vec<_>>>()?;

        let catalog = Self::new(storylets, npcs)?;
        tracing::debug!(
            storylets = catalog.len(),
            npcs = catalog.npcs.len(),
            "Loaded storylet catalog"
        );
        Ok(catalog)
    }

    pub fn get(&self, id: &StoryletId) -> Option<&Storylet> {
        self.index.get(id).map(|&idx| &self.storylets[idx])
    }

    /// All storylets, ordered by id
    pub fn all(&self) -> &[Storylet] {
        &self.storylets
    }

    pub fn npcs(&self) -> &[NpcDefinition] {
        &self.npcs
    }

    pub fn npc_name(&self, id: &NpcId) -> Option<&str> {
        self.npcs
            .iter()
            .find(|n| &n.id == id)
            .map(|n| n.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.storylets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storylets.is_empty()
    }
}

fn validate_storylet(storylet: &Storylet) -> Result<()> {
    let id = &storylet.id;
    if id.as_str().is_empty() {
        return Err(SimError::Content("storylet with empty id".into()));
    }
    if storylet.choices.is_empty() {
        return Err(SimError::Content(format!("storylet '{}' has no choices", id)));
    }
    if !(storylet.weight.is_finite() && storylet.weight > 0.0) {
        return Err(SimError::Content(format!(
            "storylet '{}' weight must be positive, got {}",
            id, storylet.weight
        )));
    }
    if storylet.intensity > MAX_INTENSITY {
        return Err(SimError::Content(format!(
            "storylet '{}' intensity {} exceeds {}",
            id, storylet.intensity, MAX_INTENSITY
        )));
    }
    if storylet.duration_hours == Some(0) {
        return Err(SimError::Content(format!(
            "storylet '{}' duration_hours must be positive",
            id
        )));
    }

    let mut choice_ids = HashSet::new();
    for choice in &storylet.choices {
        if choice.id.as_str().is_empty() {
            return Err(SimError::Content(format!(
                "storylet '{}' has a choice with empty id",
                id
            )));
        }
        if !choice_ids.insert(&choice.id) {
            return Err(SimError::Content(format!(
                "storylet '{}' has duplicate choice id '{}'",
                id, choice.id
            )));
        }
        if !choice.heat.is_finite() {
            return Err(SimError::Content(format!(
                "choice '{}' in '{}' has a non-finite heat delta",
                choice.id, id
            )));
        }
        if choice.stats.iter().any(|d| d.jitter < 0) {
            return Err(SimError::Content(format!(
                "choice '{}' in '{}' has negative jitter",
                choice.id, id
            )));
        }
        if choice.relationships.iter().any(|d| !d.amount.is_finite()) {
            return Err(SimError::Content(format!(
                "choice '{}' in '{}' has a non-finite relationship delta",
                choice.id, id
            )));
        }
    }
    Ok(())
}

/// TOML representation of a catalog file
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    npcs: Vec<TomlNpc>,
    #[serde(default)]
    storylets: Vec<TomlStorylet>,
}

#[derive(Debug, Deserialize)]
struct TomlNpc {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TomlStorylet {
    id: String,
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    intensity: u8,
    #[serde(default = "default_weight")]
    weight: f64,
    #[serde(default)]
    life_stages: Vec<String>,
    #[serde(default)]
    conditions: Vec<TomlCondition>,
    #[serde(default)]
    cooldown_days: u32,
    #[serde(default)]
    once: bool,
    #[serde(default)]
    mature: bool,
    duration_hours: Option<u64>,
    #[serde(default)]
    choices: Vec<TomlChoice>,
}

fn default_weight() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct TomlChoice {
    id: String,
    label: String,
    #[serde(default)]
    conditions: Vec<TomlCondition>,
    #[serde(default)]
    stats: BTreeMap<String, i32>,
    #[serde(default)]
    jitter: BTreeMap<String, i32>,
    #[serde(default)]
    relationships: Vec<TomlRelationshipDelta>,
    #[serde(default)]
    karma: i64,
    #[serde(default)]
    heat: f32,
    memory: Option<String>,
}

/// Per-NPC deltas; each present axis becomes one `RelationshipDelta`
#[derive(Debug, Deserialize)]
struct TomlRelationshipDelta {
    npc: String,
    affection: Option<f32>,
    trust: Option<f32>,
    attraction: Option<f32>,
    familiarity: Option<f32>,
    resentment: Option<f32>,
}

/// One table may carry several gates; every gate present must hold
#[derive(Debug, Default, Deserialize)]
struct TomlCondition {
    stat: Option<String>,
    npc: Option<String>,
    axis: Option<String>,
    at_least: Option<f64>,
    at_most: Option<f64>,
    knows: Option<String>,
    life_stages: Option<Vec<String>>,
    min_age: Option<u32>,
    max_age: Option<u32>,
    karma_at_least: Option<i64>,
    karma_at_most: Option<i64>,
    heat_at_least: Option<f32>,
    heat_at_most: Option<f32>,
    time_of_day: Option<Vec<String>>,
    resolved: Option<String>,
    not_resolved: Option<String>,
}

fn parse_stat(name: &str, context: &str) -> Result<StatKind> {
    StatKind::parse(name)
        .ok_or_else(|| SimError::Content(format!("{}: unknown stat '{}'", context, name)))
}

fn parse_life_stages(names: &[String], context: &str) -> Result<Vec<LifeStage>> {
    names
        .iter()
        .map(|s| {
            LifeStage::parse(s).ok_or_else(|| {
                SimError::Content(format!("{}: unknown life stage '{}'", context, s))
            })
        })
        .collect()
}

impl TomlCondition {
    fn into_conditions(self, context: &str) -> Result<Vec<Condition>> {
        let mut out = Vec::new();

        match (&self.stat, &self.npc) {
            (Some(_), Some(_)) => {
                return Err(SimError::Content(format!(
                    "{}: a condition cannot name both a stat and an npc",
                    context
                )))
            }
            (Some(stat_name), None) => {
                let stat = parse_stat(stat_name, context)?;
                if self.at_least.is_none() && self.at_most.is_none() {
                    return Err(SimError::Content(format!(
                        "{}: stat condition on '{}' needs at_least or at_most",
                        context, stat_name
                    )));
                }
                if let Some(v) = self.at_least {
                    out.push(Condition::StatAtLeast { stat, value: v.round() as i32 });
                }
                if let Some(v) = self.at_most {
                    out.push(Condition::StatAtMost { stat, value: v.round() as i32 });
                }
            }
            (None, Some(npc_name)) => {
                let axis_name = self.axis.as_deref().ok_or_else(|| {
                    SimError::Content(format!(
                        "{}: relationship condition on '{}' needs an axis",
                        context, npc_name
                    ))
                })?;
                let axis = RelationshipAxis::parse(axis_name).ok_or_else(|| {
                    SimError::Content(format!("{}: unknown axis '{}'", context, axis_name))
                })?;
                if self.at_least.is_none() && self.at_most.is_none() {
                    return Err(SimError::Content(format!(
                        "{}: relationship condition on '{}' needs at_least or at_most",
                        context, npc_name
                    )));
                }
                let npc = NpcId(npc_name.clone());
                if let Some(v) = self.at_least {
                    out.push(Condition::RelationshipAtLeast {
                        npc: npc.clone(),
                        axis,
                        value: v as f32,
                    });
                }
                if let Some(v) = self.at_most {
                    out.push(Condition::RelationshipAtMost {
                        npc,
                        axis,
                        value: v as f32,
                    });
                }
            }
            (None, None) => {
                if self.at_least.is_some() || self.at_most.is_some() || self.axis.is_some() {
                    return Err(SimError::Content(format!(
                        "{}: threshold given without a stat or npc",
                        context
                    )));
                }
            }
        }

        if let Some(npc) = self.knows {
            out.push(Condition::KnowsNpc(NpcId(npc)));
        }
        if let Some(stages) = self.life_stages {
            out.push(Condition::LifeStageIn(parse_life_stages(&stages, context)?));
        }
        if let Some(age) = self.min_age {
            out.push(Condition::AgeAtLeast(age));
        }
        if let Some(age) = self.max_age {
            out.push(Condition::AgeAtMost(age));
        }
        if let Some(k) = self.karma_at_least {
            out.push(Condition::KarmaAtLeast(k));
        }
        if let Some(k) = self.karma_at_most {
            out.push(Condition::KarmaAtMost(k));
        }
        if let Some(h) = self.heat_at_least {
            out.push(Condition::HeatAtLeast(h));
        }
        if let Some(h) = self.heat_at_most {
            out.push(Condition::HeatAtMost(h));
        }
        if let Some(periods) = self.time_of_day {
            let periods = periods
                .iter()
                .map(|p| {
                    TimePeriod::parse(p).ok_or_else(|| {
                        SimError::Content(format!("{}: unknown time of day '{}'", context, p))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            out.push(Condition::TimeOfDay(periods));
        }
        if let Some(id) = self.resolved {
            out.push(Condition::Resolved(StoryletId(id)));
        }
        if let Some(id) = self.not_resolved {
            out.push(Condition::NotResolved(StoryletId(id)));
        }

        if out.is_empty() {
            return Err(SimError::Content(format!("{}: empty condition", context)));
        }
        Ok(out)
    }
}

fn convert_conditions(conditions: Vec<TomlCondition>, context: &str) -> Result<Vec<Condition>> {
    let mut out = Vec::new();
    for condition in conditions {
        out.extend(condition.into_conditions(context)?);
    }
    Ok(out)
}

impl TomlChoice {
    fn into_choice(self, storylet_id: &str) -> Result<Choice> {
        let context = format!("choice '{}' in '{}'", self.id, storylet_id);

        for name in self.jitter.keys() {
            if !self.stats.contains_key(name) {
                return Err(SimError::Content(format!(
                    "{}: jitter on '{}' without a matching stat delta",
                    context, name
                )));
            }
        }

        let stats = self
            .stats
            .iter()
            .map(|(name, &amount)| {
                Ok(StatDelta {
                    stat: parse_stat(name, &context)?,
                    amount,
                    jitter: self.jitter.get(name).copied().unwrap_or(0),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut relationships = Vec::new();
        for delta in self.relationships {
            let npc = NpcId(delta.npc);
            let axes = [
                (RelationshipAxis::Affection, delta.affection),
                (RelationshipAxis::Trust, delta.trust),
                (RelationshipAxis::Attraction, delta.attraction),
                (RelationshipAxis::Familiarity, delta.familiarity),
                (RelationshipAxis::Resentment, delta.resentment),
            ];
            let before = relationships.len();
            for (axis, amount) in axes {
                if let Some(amount) = amount {
                    relationships.push(RelationshipDelta {
                        npc: npc.clone(),
                        axis,
                        amount,
                    });
                }
            }
            if relationships.len() == before {
                return Err(SimError::Content(format!(
                    "{}: relationship delta for '{}' changes no axis",
                    context, npc
                )));
            }
        }

        Ok(Choice {
            conditions: convert_conditions(self.conditions, &context)?,
            id: ChoiceId(self.id),
            label: self.label,
            stats,
            relationships,
            karma: self.karma,
            heat: self.heat,
            memory: self.memory,
        })
    }
}

impl TomlStorylet {
    fn into_storylet(self) -> Result<Storylet> {
        let context = format!("storylet '{}'", self.id);

        let mut conditions = Vec::new();
        if !self.life_stages.is_empty() {
            conditions.push(Condition::LifeStageIn(parse_life_stages(
                &self.life_stages,
                &context,
            )?));
        }
        conditions.extend(convert_conditions(self.conditions, &context)?);

        let choices = self
            .choices
            .into_iter()
            .map(|c| c.into_choice(&self.id))
            .collect::<Result<Vec<_>>>()?;

        Ok(Storylet {
            id: StoryletId(self.id),
            title: self.title,
            body: self.body,
            intensity: self.intensity,
            weight: self.weight,
            conditions,
            cooldown_days: self.cooldown_days,
            once: self.once,
            mature: self.mature,
            duration_hours: self.duration_hours,
            choices,
        })
    }
}
