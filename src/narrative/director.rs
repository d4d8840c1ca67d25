//! Narrative director: picks, activates, resolves and expires storylets
//!
//! The director is `Idle` or holds exactly one `ActiveEvent`. Selection is a
//! pure function of the session state plus the next draws from the session's
//! random stream:
//!
//! 1. Filter the catalog (ordered by id) down to eligible storylets.
//! 2. If any are eligible, roll once against the activation chance, which
//!    rises with heat.
//! 3. On success, draw once more and walk the cumulative heat-biased weights.

use serde::{Deserialize, Serialize};

use crate::core::calendar::{LifeStage, TimePeriod};
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::random::RandomStream;
use crate::core::types::{ChoiceId, StoryletId, Tick};
use crate::entity::memory::MemoryLog;
use crate::entity::player::Difficulty;
use crate::entity::relationships::RelationshipGraph;
use crate::entity::stats::StatLedger;
use crate::narrative::catalog::StoryletCatalog;
use crate::narrative::history::StoryHistory;
use crate::narrative::pressure::{Pressure, HEAT_MAX};
use crate::narrative::storylet::{all_hold, StateView, Storylet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorState {
    Idle,
    EventActive,
}

/// The storylet currently put to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub storylet_id: StoryletId,
    /// Choices whose gates held at activation, in content order
    pub offered: Vec<ChoiceId>,
    pub activated_at: Tick,
    pub expires_at: Tick,
}

impl ActiveEvent {
    pub fn offers(&self, choice_id: &str) -> bool {
        self.offered.iter().any(|c| c.as_str() == choice_id)
    }
}

/// Everything selection reads, apart from the director's own history
#[derive(Debug, Clone, Copy)]
pub struct Situation<'a> {
    pub stats: &'a StatLedger,
    pub relationships: &'a RelationshipGraph,
    pub pressure: &'a Pressure,
    pub age_years: u32,
    pub life_stage: LifeStage,
    pub time_period: TimePeriod,
    pub now: Tick,
    pub ticks_per_day: u64,
    pub content_mode: bool,
    /// Storylet that expired during the current advance; skipped this pass
    pub lapsed: Option<&'a StoryletId>,
}

impl<'a> Situation<'a> {
    pub fn view<'b>(&'b self, history: &'b StoryHistory) -> StateView<'b> {
        StateView {
            stats: self.stats,
            relationships: self.relationships,
            history,
            age_years: self.age_years,
            life_stage: self.life_stage,
            time_period: self.time_period,
            karma: self.pressure.karma(),
            heat: self.pressure.heat(),
        }
    }
}

/// Mutable session state a resolution writes to
#[derive(Debug)]
pub struct Outcome<'a> {
    pub stats: &'a mut StatLedger,
    pub relationships: &'a mut RelationshipGraph,
    pub pressure: &'a mut Pressure,
    pub memories: &'a mut MemoryLog,
}

/// A storylet that passed every gate, with the choices it would offer
#[derive(Debug, Clone)]
pub struct Candidate<'c> {
    pub storylet: &'c Storylet,
    pub offered: Vec<ChoiceId>,
}

/// Heat-biased selection weight.
///
/// At heat 100 every storylet keeps its base weight. Hotter sessions favour
/// intense storylets, cooler ones favour quiet storylets; the factor never
/// drops below `min_weight_factor`.
pub fn selection_weight(storylet: &Storylet, heat: f32, config: &SimulationConfig) -> f64 {
    let heat_norm = f64::from(heat) / f64::from(HEAT_MAX);
    let factor = 1.0 + config.heat_bias * (heat_norm - 0.5) * f64::from(storylet.intensity);
    storylet.weight * factor.max(config.min_weight_factor)
}

/// Probability that an eligible storylet activates on this evaluation
pub fn activation_probability(heat: f32, config: &SimulationConfig) -> f64 {
    let heat_norm = f64::from(heat) / f64::from(HEAT_MAX);
    (config.activation_chance + config.heat_activation_bonus * heat_norm).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Director {
    active: Option<ActiveEvent>,
    history: StoryHistory,
}

impl Director {
    pub fn new(history_len: usize) -> Self {
        Self {
            active: None,
            history: StoryHistory::new(history_len),
        }
    }

    pub fn state(&self) -> DirectorState {
        if self.active.is_some() {
            DirectorState::EventActive
        } else {
            DirectorState::Idle
        }
    }

    pub fn active(&self) -> Option<&ActiveEvent> {
        self.active.as_ref()
    }

    pub fn history(&self) -> &StoryHistory {
        &self.history
    }

    fn on_cooldown(&self, storylet: &Storylet, now: Tick, ticks_per_day: u64) -> bool {
        match self.history.last_resolved_at(&storylet.id) {
            Some(at) => {
                let cooldown = u64::from(storylet.cooldown_days).saturating_mul(ticks_per_day);
                at.saturating_add(cooldown) > now
            }
            None => false,
        }
    }

    /// Storylets that could activate right now, in id order
    pub fn eligible<'c>(
        &self,
        catalog: &'c StoryletCatalog,
        situation: &Situation<'_>,
    ) -> Vec<Candidate<'c>> {
        let view = situation.view(&self.history);

        catalog
            .all()
            .iter()
            .filter(|s| !s.mature || situation.content_mode)
            .filter(|s| !(s.once && self.history.was_resolved(&s.id)))
            .filter(|s| !self.history.is_recent(&s.id))
            .filter(|s| situation.lapsed != Some(&s.id))
            .filter(|s| !self.on_cooldown(s, situation.now, situation.ticks_per_day))
            .filter(|s| all_hold(&s.conditions, &view))
            .filter_map(|s| {
                let offered: Vec<ChoiceId> = s
                    .choices
                    .iter()
                    .filter(|c| all_hold(&c.conditions, &view))
                    .map(|c| c.id.clone())
                    .collect();
                if offered.is_empty() {
                    None
                } else {
                    Some(Candidate {
                        storylet: s,
                        offered,
                    })
                }
            })
            .collect()
    }

    /// Activate a storylet if idle and the dice allow. Returns true if one was activated.
    pub fn maybe_activate(
        &mut self,
        catalog: &StoryletCatalog,
        situation: &Situation<'_>,
        rng: &mut RandomStream,
        config: &SimulationConfig,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }

        let heat = situation.pressure.heat();
        let picked = {
            let candidates = self.eligible(catalog, situation);
            if candidates.is_empty() {
                tracing::trace!(tick = situation.now, "No eligible storylets");
                return false;
            }

            let roll = rng.next_f64();
            let chance = activation_probability(heat, config);
            if roll >= chance {
                tracing::debug!(
                    tick = situation.now,
                    eligible = candidates.len(),
                    roll,
                    chance,
                    "Activation roll failed"
                );
                return false;
            }

            let weights: Vec<f64> = candidates
                .iter()
                .map(|c| selection_weight(c.storylet, heat, config))
                .collect();
            let total: f64 = weights.iter().sum();
            let target = rng.next_f64() * total;

            let mut cumulative = 0.0;
            let mut chosen = candidates.len() - 1;
            for (idx, weight) in weights.iter().enumerate() {
                cumulative += weight;
                if target < cumulative {
                    chosen = idx;
                    break;
                }
            }

            let candidate = &candidates[chosen];
            let duration = candidate
                .storylet
                .duration_hours
                .unwrap_or(config.default_event_hours);
            ActiveEvent {
                storylet_id: candidate.storylet.id.clone(),
                offered: candidate.offered.clone(),
                activated_at: situation.now,
                expires_at: situation.now.saturating_add(duration),
            }
        };

        tracing::debug!(
            tick = situation.now,
            storylet = %picked.storylet_id,
            expires_at = picked.expires_at,
            "Storylet activated"
        );
        self.active = Some(picked);
        true
    }

    /// Check a choice against the active event without touching anything
    pub fn validate_choice(&self, storylet_id: &str, choice_id: &str) -> Result<&ActiveEvent> {
        let active = self.active.as_ref().ok_or(SimError::NoActiveEvent)?;
        if active.storylet_id.as_str() != storylet_id {
            return Err(SimError::EventMismatch {
                active: active.storylet_id.clone(),
                requested: storylet_id.to_string(),
            });
        }
        if !active.offers(choice_id) {
            return Err(SimError::InvalidChoice {
                storylet: active.storylet_id.clone(),
                choice: choice_id.to_string(),
            });
        }
        Ok(active)
    }

    /// Apply the chosen outcome and return to `Idle`
    #[allow(clippy::too_many_arguments)]
    pub fn resolve_choice(
        &mut self,
        catalog: &StoryletCatalog,
        storylet_id: &str,
        choice_id: &str,
        mut outcome: Outcome<'_>,
        rng: &mut RandomStream,
        config: &SimulationConfig,
        difficulty: Difficulty,
        now: Tick,
    ) -> Result<()> {
        let active_id = self.validate_choice(storylet_id, choice_id)?.storylet_id.clone();
        let storylet = catalog
            .get(&active_id)
            .ok_or_else(|| SimError::Content(format!("active storylet '{}' missing", active_id)))?;
        let choice = storylet.choice(choice_id).ok_or_else(|| SimError::InvalidChoice {
            storylet: active_id.clone(),
            choice: choice_id.to_string(),
        })?;

        for delta in &choice.stats {
            let jitter = if delta.jitter > 0 {
                rng.range_inclusive(-delta.jitter, delta.jitter)
            } else {
                0
            };
            let amount = difficulty.scale_stat_delta(delta.amount.saturating_add(jitter));
            outcome.stats.apply_delta(delta.stat, amount);
        }

        for delta in &choice.relationships {
            let name = catalog.npc_name(&delta.npc).unwrap_or(delta.npc.as_str());
            outcome
                .relationships
                .ensure(&delta.npc, name)
                .apply(delta.axis, delta.amount);
        }

        outcome.pressure.add_karma(choice.karma);
        outcome
            .pressure
            .add_heat(choice.heat + f32::from(storylet.intensity) * config.heat_per_intensity);

        if let Some(text) = &choice.memory {
            outcome.memories.record(now, text.clone());
        }

        self.history.record_resolved(&active_id, now);
        self.active = None;

        tracing::debug!(
            tick = now,
            storylet = %active_id,
            choice = choice_id,
            karma = outcome.pressure.karma(),
            heat = outcome.pressure.heat(),
            "Storylet resolved"
        );
        Ok(())
    }

    /// Clear the active event if its window has closed. Returns the lapsed id.
    pub fn expire_if_due(
        &mut self,
        catalog: &StoryletCatalog,
        memories: &mut MemoryLog,
        now: Tick,
    ) -> Option<StoryletId> {
        let due = matches!(&self.active, Some(active) if now >= active.expires_at);
        if !due {
            return None;
        }
        let lapsed = self.active.take()?;

        let title = catalog
            .get(&lapsed.storylet_id)
            .map(|s| s.title.as_str())
            .unwrap_or(lapsed.storylet_id.as_str());
        memories.record(now, format!("You let \"{}\" pass.", title));
        self.history.record_expired(&lapsed.storylet_id);

        tracing::debug!(tick = now, storylet = %lapsed.storylet_id, "Storylet expired");
        Some(lapsed.storylet_id)
    }
}
