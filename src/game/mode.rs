//! Game modes and their rules
//!
//! Every mode runs the same evaluator and board state machine. What differs is
//! captured in a `ModeConfig` value picked by the `GameMode` tag.

use crate::core::Grammar;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Guess a five-letter word
    Wordle,
    /// Guess the word missing from a sentence
    Feudle,
    /// Two Wordle boards, one shared stream of guesses
    Duordle,
    /// Guess a balanced equation
    Mathle,
}

impl GameMode {
    pub const ALL: [Self; 4] = [Self::Wordle, Self::Feudle, Self::Duordle, Self::Mathle];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wordle => "Wordle",
            Self::Feudle => "Feudle",
            Self::Duordle => "Duordle",
            Self::Mathle => "Mathle",
        }
    }

    /// Case-insensitive lookup by name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name.trim()))
    }

    #[must_use]
    pub const fn grammar(self) -> Grammar {
        match self {
            Self::Mathle => Grammar::Equation,
            _ => Grammar::Alphabetic,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("Unknown game mode: {s}"))
    }
}

/// Allowed target lengths for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthRule {
    Exactly(usize),
    AtLeast(usize),
}

impl LengthRule {
    #[must_use]
    pub const fn allows(self, len: usize) -> bool {
        match self {
            Self::Exactly(n) => len == n,
            Self::AtLeast(n) => len >= n,
        }
    }
}

impl fmt::Display for LengthRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Rules for one mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeConfig {
    pub mode: GameMode,
    /// Number of boards sharing the guess stream
    pub boards: usize,
    /// Shared attempt budget; `None` means unlimited
    pub attempt_limit: Option<usize>,
    /// Require guesses to be dictionary words (alphabetic modes only)
    pub check_dictionary: bool,
    pub target_length: LengthRule,
}

impl ModeConfig {
    /// Canonical rules for `mode`
    #[must_use]
    pub const fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Wordle => Self {
                mode,
                boards: 1,
                attempt_limit: Some(6),
                check_dictionary: true,
                target_length: LengthRule::Exactly(5),
            },
            GameMode::Feudle => Self {
                mode,
                boards: 1,
                attempt_limit: Some(6),
                check_dictionary: false,
                target_length: LengthRule::AtLeast(1),
            },
            GameMode::Duordle => Self {
                mode,
                boards: 2,
                attempt_limit: Some(7),
                check_dictionary: true,
                target_length: LengthRule::Exactly(5),
            },
            GameMode::Mathle => Self {
                mode,
                boards: 1,
                attempt_limit: Some(6),
                check_dictionary: false,
                // Shortest balanced equation is `1=1`
                target_length: LengthRule::AtLeast(3),
            },
        }
    }

    #[must_use]
    pub const fn with_attempt_limit(mut self, attempt_limit: Option<usize>) -> Self {
        self.attempt_limit = attempt_limit;
        self
    }

    #[must_use]
    pub const fn with_dictionary(mut self, check_dictionary: bool) -> Self {
        self.check_dictionary = check_dictionary;
        self
    }

    #[inline]
    #[must_use]
    pub const fn grammar(&self) -> Grammar {
        self.mode.grammar()
    }

    /// Reject rules no session could be played under
    ///
    /// # Errors
    /// Returns `ZeroAttemptLimit` for `Some(0)` and `BoardCount` when the
    /// board count differs from the mode's fixed count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.attempt_limit, Some(0)) {
            return Err(ConfigError::ZeroAttemptLimit { mode: self.mode });
        }
        let expected = Self::for_mode(self.mode).boards;
        if self.boards != expected {
            return Err(ConfigError::BoardCount {
                mode: self.mode,
                expected,
                actual: self.boards,
            });
        }
        Ok(())
    }
}
