//! Keyboard hints
//!
//! Tracks the strongest verdict seen for each token across a board's guesses,
//! which is what a front end shows on its on-screen keyboard. Tokens never
//! guessed have no entry.

use super::feedback::{Feedback, Verdict};
use super::token::Token;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterHints {
    best: FxHashMap<Token, Verdict>,
}

impl LetterHints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one scored guess into the hints
    pub fn record(&mut self, guess: &[Token], feedback: &Feedback) {
        for (&token, &verdict) in guess.iter().zip(feedback.verdicts()) {
            self.best
                .entry(token)
                .and_modify(|best| *best = (*best).max(verdict))
                .or_insert(verdict);
        }
    }

    /// Strongest verdict seen for `token`, `None` if it was never guessed
    #[must_use]
    pub fn get(&self, token: Token) -> Option<Verdict> {
        self.best.get(&token).copied()
    }

    /// Tokens from `alphabet` that have not been ruled out
    #[must_use]
    pub fn candidates<'a>(&'a self, alphabet: &'a [Token]) -> impl Iterator<Item = Token> + 'a {
        alphabet
            .iter()
            .copied()
            .filter(|&token| self.get(token) != Some(Verdict::Absent))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}
