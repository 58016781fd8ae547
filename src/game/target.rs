//! Target sequences
//!
//! A target is validated once, when a session is built. Anything that fails
//! here is a configuration error and no session is created.

use super::mode::ModeConfig;
use crate::core::{Equation, Grammar, Token, render};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// The hidden sequence a board exists to reveal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSequence {
    text: String,
    tokens: Vec<Token>,
}

impl TargetSequence {
    /// Validate `raw` against the mode's grammar, length rule and, for Mathle,
    /// the balance constraint
    ///
    /// # Errors
    /// Returns `InvalidTarget`, `TargetLength` or `InvalidEquation`.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::game::{GameMode, ModeConfig, TargetSequence};
    ///
    /// let mathle = ModeConfig::for_mode(GameMode::Mathle);
    /// assert!(TargetSequence::new("12+7=19", &mathle).is_ok());
    /// assert!(TargetSequence::new("2+2=5", &mathle).is_err());
    /// ```
    pub fn new(raw: &str, config: &ModeConfig) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let tokens = config
            .grammar()
            .tokenize(trimmed)
            .map_err(|source| ConfigError::InvalidTarget {
                target: trimmed.to_string(),
                source,
            })?;

        if !config.target_length.allows(tokens.len()) {
            return Err(ConfigError::TargetLength {
                target: trimmed.to_string(),
                mode: config.mode,
                expected: config.target_length,
                actual: tokens.len(),
            });
        }

        if config.grammar() == Grammar::Equation {
            Equation::parse(&tokens)
                .and_then(|equation| equation.ensure_balanced())
                .map_err(|source| ConfigError::InvalidEquation {
                    target: trimmed.to_string(),
                    source,
                })?;
        }

        Ok(Self {
            text: render(&tokens),
            tokens,
        })
    }

    /// Canonical text (lowercase for words)
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
