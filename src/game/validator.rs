//! Guess validation
//!
//! Turns raw player input into a `Guess` or explains exactly which check it
//! failed. Nothing here touches a board, so a rejected guess costs nothing.

use super::mode::ModeConfig;
use crate::core::{Equation, Grammar, Token, render};
use crate::error::GuessError;
use crate::lexicon::Dictionary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated guess, stored verbatim in board history
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guess {
    text: String,
    tokens: Vec<Token>,
}

impl Guess {
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

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Mode-aware guess checker
///
/// Checks run in a fixed order and stop at the first failure:
/// 1. every character maps to a token (`InvalidToken`)
/// 2. Mathle only: the equation is syntactically well formed (`MalformedEquation`)
/// 3. the length matches the target (`LengthMismatch`)
/// 4. word modes with the dictionary enabled: the word is known (`NotInDictionary`)
pub struct GuessValidator<'a> {
    config: &'a ModeConfig,
    dictionary: &'a dyn Dictionary,
}

impl<'a> GuessValidator<'a> {
    #[must_use]
    pub fn new(config: &'a ModeConfig, dictionary: &'a dyn Dictionary) -> Self {
        Self { config, dictionary }
    }

    /// Validate `raw` against a target of `target_len` tokens
    ///
    /// # Errors
    /// Returns the `GuessError` for the first check that failed.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::error::GuessError;
    /// use wordle_engine::game::{GameMode, GuessValidator, ModeConfig};
    /// use wordle_engine::lexicon::Lexicon;
    ///
    /// let config = ModeConfig::for_mode(GameMode::Wordle);
    /// let lexicon = Lexicon::embedded();
    /// let validator = GuessValidator::new(&config, &lexicon);
    ///
    /// assert_eq!(validator.validate("CRANE", 5).unwrap().text(), "crane");
    /// assert!(matches!(
    ///     validator.validate("he11o", 5),
    ///     Err(GuessError::InvalidToken { position: 2, ch: '1' })
    /// ));
    /// ```
    pub fn validate(&self, raw: &str, target_len: usize) -> Result<Guess, GuessError> {
        let grammar = self.config.grammar();
        let tokens = grammar.tokenize(raw.trim())?;

        if grammar == Grammar::Equation {
            Equation::parse(&tokens)?;
        }

        if tokens.len() != target_len {
            return Err(GuessError::LengthMismatch {
                expected: target_len,
                actual: tokens.len(),
            });
        }

        let text = render(&tokens);
        if grammar == Grammar::Alphabetic
            && self.config.check_dictionary
            && !self.dictionary.is_valid_word(&text)
        {
            return Err(GuessError::NotInDictionary { word: text });
        }

        Ok(Guess { text, tokens })
    }
}
