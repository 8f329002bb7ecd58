//! Error types for the guessing engine.

use entity_catalog::{OracleError, ParseAnswerError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`GameEngine`](crate::GameEngine) operations.
#[derive(Error, Debug)]
pub enum GameError {
    /// Unknown session id. Client-visible "not found".
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Missing or unrecognized answer. Client-visible "bad request".
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The oracle failed; the session was left untouched and the call may be retried.
    #[error("oracle query failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("catalog has no candidates to play with")]
    EmptyCatalog,

    #[error("session state lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<ParseAnswerError> for GameError {
    fn from(e: ParseAnswerError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

pub type GameResult<T> = Result<T, GameError>;

/// Errors raised while loading or validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
