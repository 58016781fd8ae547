//! Feedback calculation and representation
//!
//! Feedback is one verdict per position:
//! - Absent (⬜): token not in the target, or every copy already accounted for
//! - Present (🟨): token is in the target at another position
//! - Exact (🟩): token is in the correct position

use super::token::Token;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-position verdict
///
/// Ordered by strength, so `max` of two verdicts for the same token is the
/// more informative one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verdict {
    Absent,
    Present,
    Exact,
}

impl Verdict {
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Exact => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Exact => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }

    /// Accepts `G`/`g`/🟩, `Y`/`y`/🟨 and `-`/`_`/⬜
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'G' | 'g' | '🟩' => Some(Self::Exact),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            '-' | '_' | '⬜' => Some(Self::Absent),
            _ => None,
        }
    }
}

/// Feedback for one guess against one target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feedback(Vec<Verdict>);

impl Feedback {
    /// Calculate the feedback when `guess` is played against `target`
    ///
    /// This implements Wordle's exact feedback rules, including proper handling
    /// of duplicate tokens. Mathle runs the same rules over digits and operators.
    ///
    /// # Algorithm
    /// 1. First pass: mark all exact matches and remove them from the available pool
    /// 2. Second pass: left to right, mark present-but-misplaced from what remains
    ///
    /// Both sequences must have the same length; the validator guarantees this
    /// before a guess reaches a board.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::{Feedback, Grammar, Verdict};
    ///
    /// let target = Grammar::Alphabetic.tokenize("speed").unwrap();
    /// let guess = Grammar::Alphabetic.tokenize("erase").unwrap();
    /// let feedback = Feedback::evaluate(&target, &guess);
    ///
    /// // E(yellow) R(gray) A(gray) S(yellow) E(yellow)
    /// assert_eq!(feedback.to_code(), "Y--YY");
    /// assert_eq!(feedback.count(Verdict::Exact), 0);
    /// ```
    #[must_use]
    pub fn evaluate(target: &[Token], guess: &[Token]) -> Self {
        debug_assert_eq!(target.len(), guess.len(), "guess length must match target");

        let mut verdicts = vec![Verdict::Absent; guess.len()];
        let mut available: FxHashMap<Token, usize> = FxHashMap::default();
        for &token in target {
            *available.entry(token).or_insert(0) += 1;
        }

        // First pass: exact matches
        for ((verdict, guessed), expected) in verdicts.iter_mut().zip(guess).zip(target) {
            if guessed == expected {
                *verdict = Verdict::Exact;
                if let Some(count) = available.get_mut(guessed) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: misplaced tokens, budgeted by what the first pass left over
        for (verdict, guessed) in verdicts.iter_mut().zip(guess) {
            if *verdict == Verdict::Exact {
                continue;
            }
            if let Some(count) = available.get_mut(guessed)
                && *count > 0
            {
                *verdict = Verdict::Present;
                *count -= 1;
            }
        }

        Self(verdicts)
    }

    /// All-exact feedback of the given length
    #[must_use]
    pub fn solved(len: usize) -> Self {
        Self(vec![Verdict::Exact; len])
    }

    #[inline]
    #[must_use]
    pub fn verdicts(&self) -> &[Verdict] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if every position is an exact match
    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&v| v == Verdict::Exact)
    }

    /// Count positions with the given verdict
    #[must_use]
    pub fn count(&self, verdict: Verdict) -> usize {
        self.0.iter().filter(|&&v| v == verdict).count()
    }

    /// Convert to an emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|v| v.emoji()).collect()
    }

    /// Convert to a plain string like "GY-GY"
    #[must_use]
    pub fn to_code(&self) -> String {
        self.0.iter().map(|v| v.code()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji())
    }
}

impl std::str::FromStr for Feedback {
    type Err = String;

    /// Parse a feedback string like "GY-GY" or "🟩🟨⬜🟩🟨"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("Feedback string is empty".to_string());
        }
        s.chars()
            .map(|ch| Verdict::from_char(ch).ok_or_else(|| format!("Invalid feedback string: {s}")))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
