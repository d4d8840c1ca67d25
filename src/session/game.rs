//! Game session: the aggregate root and the only path that mutates state
//!
//! Every mutating operation validates its input before touching anything, so
//! a failed call leaves the session exactly as it was (including the random
//! stream). Successful operations are appended to the session journal.

use std::sync::Arc;

use crate::core::calendar::{Clock, LifeStage};
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::random::RandomStream;
use crate::core::types::{ChoiceId, StoryletId, Tick};
use crate::entity::memory::MemoryLog;
use crate::entity::player::PlayerConfig;
use crate::entity::relationships::RelationshipGraph;
use crate::entity::stats::StatLedger;
use crate::narrative::catalog::StoryletCatalog;
use crate::narrative::director::{Director, Outcome, Situation};
use crate::narrative::pressure::Pressure;
use crate::session::journal::{JournalEntry, SessionJournal};
use crate::session::snapshot::{ChoiceView, EventView, FullSnapshot, Snapshot};

#[derive(Debug, Clone)]
pub struct GameSession {
    config: SimulationConfig,
    catalog: Arc<StoryletCatalog>,
    player: PlayerConfig,
    rng: RandomStream,
    clock: Clock,
    stats: StatLedger,
    relationships: RelationshipGraph,
    pressure: Pressure,
    director: Director,
    memories: MemoryLog,
    journal: SessionJournal,
}

/// Reject negative tick counts
fn checked_ticks(ticks: i64, what: &str) -> Result<u64> {
    u64::try_from(ticks)
        .map_err(|_| SimError::InvalidArgument(format!("{} must be >= 0, got {}", what, ticks)))
}

impl GameSession {
    /// Start a fresh life. The director gets one chance to open an event at tick 0.
    pub fn new_game(
        seed: u64,
        player: PlayerConfig,
        catalog: Arc<StoryletCatalog>,
        config: SimulationConfig,
    ) -> Result<Self> {
        config.validate().map_err(SimError::Config)?;
        player.validate()?;

        let mut session = Self {
            rng: RandomStream::new(seed),
            clock: Clock::new(config.ticks_per_day, config.days_per_year, config.starting_age),
            stats: player.starting_stats(),
            relationships: RelationshipGraph::new(),
            pressure: Pressure::new(),
            director: Director::new(config.history_len),
            memories: MemoryLog::new(config.memory_capacity),
            journal: SessionJournal::new(seed, player.clone(), config.clone()),
            config,
            catalog,
            player,
        };
        session.evaluate_director(None);

        tracing::info!(
            seed,
            name = %session.player.name,
            archetype = ?session.player.archetype,
            difficulty = ?session.player.difficulty,
            storylets = session.catalog.len(),
            "New game started"
        );
        Ok(session)
    }

    /// Rebuild a session by re-applying every journal entry to a fresh game
    pub fn replay(journal: &SessionJournal, catalog: Arc<StoryletCatalog>) -> Result<Self> {
        let mut session = Self::new_game(
            journal.seed,
            journal.player.clone(),
            catalog,
            journal.config.clone(),
        )?;

        for entry in &journal.entries {
            match entry {
                JournalEntry::Step { ticks } => {
                    session.step(to_signed(*ticks)?)?;
                }
                JournalEntry::Choose {
                    storylet_id,
                    choice_id,
                    ticks_after,
                } => {
                    session.choose_option(
                        storylet_id.as_str(),
                        choice_id.as_str(),
                        to_signed(*ticks_after)?,
                    )?;
                }
            }
        }

        tracing::info!(
            seed = journal.seed,
            entries = journal.entries.len(),
            tick = session.clock.current_tick(),
            "Session replayed from journal"
        );
        Ok(session)
    }

    /// Advance time by `ticks` hours
    pub fn step(&mut self, ticks: i64) -> Result<Snapshot> {
        let ticks = checked_ticks(ticks, "ticks")?;

        self.pressure.begin_operation();
        self.advance(ticks);
        self.journal.record(JournalEntry::Step { ticks });
        Ok(self.snapshot())
    }

    /// Resolve a choice on the active event, then advance by `ticks_after`.
    /// With `ticks_after == 0` the returned snapshot is always idle.
    pub fn choose_option(
        &mut self,
        storylet_id: &str,
        choice_id: &str,
        ticks_after: i64,
    ) -> Result<Snapshot> {
        if let Err(err) = self.director.validate_choice(storylet_id, choice_id) {
            tracing::warn!(storylet = storylet_id, choice = choice_id, %err, "Choice rejected");
            return Err(err);
        }
        let ticks_after = checked_ticks(ticks_after, "ticks_after")?;

        self.pressure.begin_operation();
        let now = self.clock.current_tick();
        self.director.resolve_choice(
            &self.catalog,
            storylet_id,
            choice_id,
            Outcome {
                stats: &mut self.stats,
                relationships: &mut self.relationships,
                pressure: &mut self.pressure,
                memories: &mut self.memories,
            },
            &mut self.rng,
            &self.config,
            self.player.difficulty,
            now,
        )?;
        // A zero-tick follow-up leaves the director idle until time moves
        if ticks_after > 0 {
            self.advance(ticks_after);
        }

        self.journal.record(JournalEntry::Choose {
            storylet_id: StoryletId::from(storylet_id),
            choice_id: ChoiceId::from(choice_id),
            ticks_after,
        });
        Ok(self.snapshot())
    }

    /// Clock, then per-day decay and drift, then expiry, then one director pass
    fn advance(&mut self, ticks: u64) {
        let days = self.clock.advance(ticks);
        if days > 0 {
            self.pressure.decay_heat(days, self.config.heat_decay_per_day);
            self.stats.apply_drift_for_days(
                days,
                self.config.mood_regression_per_day,
                self.config.energy_recovery_per_day,
            );
        }

        let now = self.clock.current_tick();
        let lapsed = self
            .director
            .expire_if_due(&self.catalog, &mut self.memories, now);
        self.evaluate_director(lapsed.as_ref());
    }

    /// One activation attempt. A storylet that lapsed during this advance sits
    /// the pass out.
    fn evaluate_director(&mut self, lapsed: Option<&StoryletId>) {
        let situation = Situation {
            stats: &self.stats,
            relationships: &self.relationships,
            pressure: &self.pressure,
            age_years: self.clock.age_years(),
            life_stage: self.clock.life_stage(&self.config.life_stages),
            time_period: self.clock.current_time_period(),
            now: self.clock.current_tick(),
            ticks_per_day: self.clock.ticks_per_day(),
            content_mode: self.player.content_mode,
            lapsed,
        };
        self.director
            .maybe_activate(&self.catalog, &situation, &mut self.rng, &self.config);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    pub fn full_snapshot(&self) -> FullSnapshot {
        FullSnapshot::capture(self)
    }

    pub fn current_event(&self) -> Option<EventView> {
        self.director
            .active()
            .and_then(|active| EventView::capture(active, &self.catalog))
    }

    /// Offered choices of the active event, in content order; empty when idle
    pub fn available_choices(&self) -> Vec<ChoiceView> {
        self.current_event()
            .map(|event| event.choices)
            .unwrap_or_default()
    }

    pub fn journal(&self) -> &SessionJournal {
        &self.journal
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Values drawn from the random stream so far
    pub fn draws(&self) -> u64 {
        self.rng.draws()
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }

    pub fn life_stage(&self) -> LifeStage {
        self.clock.life_stage(&self.config.life_stages)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<StoryletCatalog> {
        &self.catalog
    }

    pub fn player(&self) -> &PlayerConfig {
        &self.player
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn stats(&self) -> &StatLedger {
        &self.stats
    }

    pub fn relationships(&self) -> &RelationshipGraph {
        &self.relationships
    }

    pub fn pressure(&self) -> &Pressure {
        &self.pressure
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    pub fn memories(&self) -> &MemoryLog {
        &self.memories
    }
}

fn to_signed(ticks: u64) -> Result<i64> {
    i64::try_from(ticks)
        .map_err(|_| SimError::InvalidArgument(format!("journal tick count {} too large", ticks)))
}
