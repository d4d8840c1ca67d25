//! Multi-session host
//!
//! Each session sits behind its own `RwLock`: mutations take the writer side,
//! snapshot reads the reader side. The table lock only guards the handle map
//! and is released before any simulation work starts.

use std::sync::{Arc, PoisonError, RwLock};

use ahash::AHashMap;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::SessionHandle;
use crate::entity::player::{PlayerConfig, RawPlayerConfig};
use crate::narrative::catalog::StoryletCatalog;
use crate::session::game::GameSession;
use crate::session::snapshot::{FullSnapshot, Snapshot};

type SharedSession = Arc<RwLock<GameSession>>;

#[derive(Debug)]
pub struct SessionTable {
    catalog: Arc<StoryletCatalog>,
    config: SimulationConfig,
    sessions: RwLock<AHashMap<SessionHandle, SharedSession>>,
}

impl SessionTable {
    pub fn new(catalog: Arc<StoryletCatalog>, config: SimulationConfig) -> Self {
        Self {
            catalog,
            config,
            sessions: RwLock::new(AHashMap::new()),
        }
    }

    /// Start a session and register it under a fresh handle
    pub fn create(&self, seed: u64, raw: RawPlayerConfig) -> Result<(SessionHandle, Snapshot)> {
        let player = PlayerConfig::from_raw(raw)?;
        let session =
            GameSession::new_game(seed, player, Arc::clone(&self.catalog), self.config.clone())?;
        let snapshot = session.snapshot();

        let handle = SessionHandle::new();
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle, Arc::new(RwLock::new(session)));

        tracing::debug!(%handle, seed, "Session registered");
        Ok((handle, snapshot))
    }

    fn lookup(&self, handle: SessionHandle) -> Result<SharedSession> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&handle)
            .cloned()
            .ok_or(SimError::UnknownSession(handle))
    }

    fn with_write<T>(
        &self,
        handle: SessionHandle,
        op: impl FnOnce(&mut GameSession) -> Result<T>,
    ) -> Result<T> {
        let shared = self.lookup(handle)?;
        let mut session = shared
            .write()
            .map_err(|_| SimError::SessionPoisoned(handle))?;
        op(&mut *session)
    }

    fn with_read<T>(&self, handle: SessionHandle, op: impl FnOnce(&GameSession) -> T) -> Result<T> {
        let shared = self.lookup(handle)?;
        let session = shared
            .read()
            .map_err(|_| SimError::SessionPoisoned(handle))?;
        Ok(op(&*session))
    }

    pub fn step(&self, handle: SessionHandle, ticks: i64) -> Result<Snapshot> {
        self.with_write(handle, |s| s.step(ticks))
    }

    pub fn choose_option(
        &self,
        handle: SessionHandle,
        storylet_id: &str,
        choice_id: &str,
        ticks_after: i64,
    ) -> Result<Snapshot> {
        self.with_write(handle, |s| s.choose_option(storylet_id, choice_id, ticks_after))
    }

    pub fn snapshot(&self, handle: SessionHandle) -> Result<Snapshot> {
        self.with_read(handle, GameSession::snapshot)
    }

    pub fn full_snapshot(&self, handle: SessionHandle) -> Result<FullSnapshot> {
        self.with_read(handle, GameSession::full_snapshot)
    }

    pub fn remove(&self, handle: SessionHandle) -> Result<()> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&handle)
            .map(|_| ())
            .ok_or(SimError::UnknownSession(handle))
    }

    pub fn handles(&self) -> Vec<SessionHandle> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
