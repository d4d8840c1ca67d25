//! Single-session host exposing the bridge operations
//!
//! Holds zero or one `GameSession`. Every operation other than `new_game` and
//! `load_journal` fails with `UninitializedSession` until a game exists.

use std::path::Path;
use std::sync::Arc;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::entity::player::{PlayerConfig, RawPlayerConfig};
use crate::narrative::catalog::StoryletCatalog;
use crate::session::game::GameSession;
use crate::session::journal::SessionJournal;
use crate::session::snapshot::{ChoiceView, EventView, FullSnapshot, Snapshot};

#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Arc<StoryletCatalog>,
    config: SimulationConfig,
    session: Option<GameSession>,
}

impl Engine {
    pub fn new(catalog: Arc<StoryletCatalog>, config: SimulationConfig) -> Self {
        Self {
            catalog,
            config,
            session: None,
        }
    }

    /// Engine over the built-in storylets and default config
    pub fn with_builtin_content() -> Result<Self> {
        Ok(Self::new(
            Arc::new(StoryletCatalog::builtin()?),
            SimulationConfig::default(),
        ))
    }

    fn session(&self) -> Result<&GameSession> {
        self.session.as_ref().ok_or(SimError::UninitializedSession)
    }

    fn session_mut(&mut self) -> Result<&mut GameSession> {
        self.session.as_mut().ok_or(SimError::UninitializedSession)
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Start a new game, replacing any existing session only on success
    pub fn new_game(&mut self, seed: u64, raw: RawPlayerConfig) -> Result<Snapshot> {
        let player = PlayerConfig::from_raw(raw)?;
        let session =
            GameSession::new_game(seed, player, Arc::clone(&self.catalog), self.config.clone())?;
        let snapshot = session.snapshot();
        self.session = Some(session);
        Ok(snapshot)
    }

    pub fn step(&mut self, ticks: i64) -> Result<Snapshot> {
        self.session_mut()?.step(ticks)
    }

    /// Advance one hour
    ///
    /// Each call is its own advance with its own director pass, so it is
    /// journaled as a separate `Step { ticks: 1 }`. Use [`Engine::tick_many`]
    /// to cover long spans with a single entry.
    pub fn tick(&mut self) -> Result<()> {
        self.session_mut()?.step(1).map(|_| ())
    }

    pub fn tick_many(&mut self, count: i64) -> Result<()> {
        self.session_mut()?.step(count).map(|_| ())
    }

    pub fn choose_option(
        &mut self,
        storylet_id: &str,
        choice_id: &str,
        ticks_after: i64,
    ) -> Result<Snapshot> {
        self.session_mut()?
            .choose_option(storylet_id, choice_id, ticks_after)
    }

    pub fn current_storylet(&self) -> Result<Option<EventView>> {
        Ok(self.session()?.current_event())
    }

    pub fn available_choices(&self) -> Result<Vec<ChoiceView>> {
        Ok(self.session()?.available_choices())
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.session()?.snapshot())
    }

    pub fn full_snapshot(&self) -> Result<FullSnapshot> {
        Ok(self.session()?.full_snapshot())
    }

    pub fn save_journal(&self, path: &Path) -> Result<()> {
        self.session()?.journal().save(path)
    }

    /// Replace the session with one replayed from a saved journal
    pub fn load_journal(&mut self, path: &Path) -> Result<Snapshot> {
        let journal = SessionJournal::load(path)?;
        let session = GameSession::replay(&journal, Arc::clone(&self.catalog))?;
        let snapshot = session.snapshot();
        self.session = Some(session);
        Ok(snapshot)
    }
}
