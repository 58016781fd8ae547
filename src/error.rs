//! Error taxonomy
//!
//! - `GuessError`: the raw guess was rejected. Nothing changed, no attempt used.
//! - `GameError`: anything an engine operation can fail with, guess errors
//!   included. Closed boards and missing sessions are usage errors.
//! - `ConfigError`: a target or configuration is unusable. Fatal for the session
//!   being created, which is never registered.

use crate::core::EquationError;
use crate::game::{BoardStatus, GameMode, LengthRule};
use crate::registry::OwnerKey;
use thiserror::Error;

/// A guess that never reached the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("character {ch:?} at position {position} is not allowed")]
    InvalidToken { position: usize, ch: char },

    #[error("guess is {actual} characters long, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{word:?} is not in the word list")]
    NotInDictionary { word: String },

    #[error("malformed equation: {0}")]
    MalformedEquation(EquationError),
}

/// A target or configuration that cannot start a session
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("target {target:?} is invalid: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: GuessError,
    },

    #[error("target {target:?} is {actual} characters long, {mode} needs {expected}")]
    TargetLength {
        target: String,
        mode: GameMode,
        expected: LengthRule,
        actual: usize,
    },

    #[error("target equation {target:?} is invalid: {source}")]
    InvalidEquation {
        target: String,
        #[source]
        source: EquationError,
    },

    #[error("{mode} boards must share one target length, got {lengths:?}")]
    MismatchedTargets { mode: GameMode, lengths: Vec<usize> },

    #[error("{mode} boards need distinct targets, {target:?} is repeated")]
    DuplicateTarget { mode: GameMode, target: String },

    #[error("{mode} needs {expected} boards and targets, got {actual}")]
    BoardCount {
        mode: GameMode,
        expected: usize,
        actual: usize,
    },

    #[error("{mode} attempt limit must be at least 1")]
    ZeroAttemptLimit { mode: GameMode },

    #[error("no {mode} targets available")]
    EmptyCatalog { mode: GameMode },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by boards, sessions and the registry
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Guess(#[from] GuessError),

    #[error("board {board} is already {status}")]
    BoardClosed { board: usize, status: BoardStatus },

    #[error("no {mode} session for {owner}")]
    SessionNotFound { owner: OwnerKey, mode: GameMode },

    #[error("{owner} already has a {mode} game in progress")]
    ActiveSessionExists { owner: OwnerKey, mode: GameMode },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// How a caller should treat a `GameError`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The player's input was rejected; show the message and keep playing
    Validation,
    /// The caller asked for something the session state does not allow
    Usage,
    /// The session could not be created at all
    Fatal,
}

impl ErrorSeverity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Usage => "usage",
            Self::Fatal => "fatal",
        }
    }

    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Fatal)
    }
}

impl GameError {
    #[must_use]
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Guess(_) => ErrorSeverity::Validation,
            Self::BoardClosed { .. }
            | Self::SessionNotFound { .. }
            | Self::ActiveSessionExists { .. } => ErrorSeverity::Usage,
            Self::Config(_) => ErrorSeverity::Fatal,
        }
    }
}

impl From<EquationError> for GuessError {
    fn from(error: EquationError) -> Self {
        Self::MalformedEquation(error)
    }
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
