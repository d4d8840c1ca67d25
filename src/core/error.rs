use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{SessionHandle, StoryletId};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid player config: {0}")]
    InvalidConfig(String),

    #[error("No active event to resolve")]
    NoActiveEvent,

    #[error("Event mismatch: active event is {active}, caller referenced {requested}")]
    EventMismatch {
        active: StoryletId,
        requested: String,
    },

    #[error("Choice {choice} is not offered by event {storylet}")]
    InvalidChoice { storylet: StoryletId, choice: String },

    #[error("No game session has been started")]
    UninitializedSession,

    #[error("Unknown session: {0}")]
    UnknownSession(SessionHandle),

    #[error("Session lock poisoned: {0}")]
    SessionPoisoned(SessionHandle),

    #[error("Invalid storylet content: {0}")]
    Content(String),

    #[error("Invalid simulation config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Stable error codes surfaced across the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidArgument,
    InvalidConfig,
    NoActiveEvent,
    EventMismatch,
    InvalidChoice,
    UninitializedSession,
    UnknownSession,
    Internal,
}

impl SimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SimError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            SimError::NoActiveEvent => ErrorKind::NoActiveEvent,
            SimError::EventMismatch { .. } => ErrorKind::EventMismatch,
            SimError::InvalidChoice { .. } => ErrorKind::InvalidChoice,
            SimError::UninitializedSession => ErrorKind::UninitializedSession,
            SimError::UnknownSession(_) => ErrorKind::UnknownSession,
            SimError::SessionPoisoned(_)
            | SimError::Content(_)
            | SimError::Config(_)
            | SimError::IoError(_)
            | SimError::SerdeError(_)
            | SimError::TomlError(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
