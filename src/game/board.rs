//! Board state machine
//!
//! `InProgress -> Solved` on an all-exact guess, `InProgress -> Exhausted` once
//! the attempt limit is used up. Both are terminal.

use super::target::TargetSequence;
use super::validator::Guess;
use crate::core::{Feedback, LetterHints};
use crate::error::{GameError, GuessError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardStatus {
    InProgress,
    Solved,
    Exhausted,
}

impl BoardStatus {
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InProgress => "in progress",
            Self::Solved => "solved",
            Self::Exhausted => "exhausted",
        })
    }
}

/// One scored guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: Guess,
    pub feedback: Feedback,
}

/// One target with its guess history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    index: usize,
    target: TargetSequence,
    history: Vec<GuessRecord>,
    attempt_limit: Option<usize>,
    status: BoardStatus,
}

impl Board {
    #[must_use]
    pub const fn new(index: usize, target: TargetSequence, attempt_limit: Option<usize>) -> Self {
        Self {
            index,
            target,
            history: Vec::new(),
            attempt_limit,
            status: BoardStatus::InProgress,
        }
    }

    /// Score `guess` and append it to the history
    ///
    /// Either the record is appended and the status updated together, or the
    /// board is left untouched.
    ///
    /// # Errors
    /// Returns `BoardClosed` on a terminal board and `LengthMismatch` if the
    /// guess does not fit the target.
    pub fn apply(&mut self, guess: &Guess) -> Result<&GuessRecord> {
        self.ensure_open()?;
        if guess.len() != self.target.len() {
            return Err(GuessError::LengthMismatch {
                expected: self.target.len(),
                actual: guess.len(),
            }
            .into());
        }

        let feedback = Feedback::evaluate(self.target.tokens(), guess.tokens());
        self.status = if feedback.is_solved() {
            BoardStatus::Solved
        } else if self
            .attempt_limit
            .is_some_and(|limit| self.history.len() + 1 >= limit)
        {
            BoardStatus::Exhausted
        } else {
            BoardStatus::InProgress
        };

        let index = self.history.len();
        self.history.push(GuessRecord {
            guess: guess.clone(),
            feedback,
        });
        Ok(&self.history[index])
    }

    /// # Errors
    /// Returns `BoardClosed` if the board is solved or exhausted.
    pub fn ensure_open(&self) -> Result<()> {
        if self.status.is_terminal() {
            return Err(GameError::BoardClosed {
                board: self.index,
                status: self.status,
            });
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> BoardStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub const fn target(&self) -> &TargetSequence {
        &self.target
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    #[inline]
    #[must_use]
    pub const fn attempt_limit(&self) -> Option<usize> {
        self.attempt_limit
    }

    /// `None` when attempts are unlimited
    #[must_use]
    pub fn remaining_attempts(&self) -> Option<usize> {
        self.attempt_limit
            .map(|limit| limit.saturating_sub(self.history.len()))
    }

    /// Best verdict per token over the whole history
    #[must_use]
    pub fn hints(&self) -> LetterHints {
        let mut hints = LetterHints::new();
        for record in &self.history {
            hints.record(record.guess.tokens(), &record.feedback);
        }
        hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Token, Verdict};
    use crate::game::{GameMode, GuessValidator, ModeConfig};
    use crate::lexicon::AcceptAll;

    fn board(target: &str, limit: Option<usize>) -> Board {
        let config = ModeConfig::for_mode(GameMode::Wordle);
        Board::new(0, TargetSequence::new(target, &config).unwrap(), limit)
    }

    fn guess(text: &str) -> Guess {
        let config = ModeConfig::for_mode(GameMode::Wordle);
        GuessValidator::new(&config, &AcceptAll)
            .validate(text, 5)
            .unwrap()
    }

    #[test]
    fn new_board_is_in_progress() {
        let board = board("crane", Some(6));
        assert_eq!(board.status(), BoardStatus::InProgress);
        assert!(board.history().is_empty());
        assert_eq!(board.remaining_attempts(), Some(6));
    }

    #[test]
    fn exact_guess_solves() {
        let mut board = board("crane", Some(6));
        let record = board.apply(&guess("slate")).unwrap();
        assert_eq!(record.feedback.to_code(), "--G-G");
        assert_eq!(board.status(), BoardStatus::InProgress);

        let record = board.apply(&guess("crane")).unwrap();
        assert!(record.feedback.is_solved());
        assert_eq!(board.status(), BoardStatus::Solved);
        assert_eq!(board.history().len(), 2);
    }

    #[test]
    fn limit_exhausts_board() {
        let mut board = board("crane", Some(2));
        board.apply(&guess("slate")).unwrap();
        board.apply(&guess("least")).unwrap();
        assert_eq!(board.status(), BoardStatus::Exhausted);
        assert_eq!(board.remaining_attempts(), Some(0));
    }

    #[test]
    fn solving_on_last_attempt_is_solved_not_exhausted() {
        let mut board = board("crane", Some(1));
        board.apply(&guess("crane")).unwrap();
        assert_eq!(board.status(), BoardStatus::Solved);
    }

    #[test]
    fn terminal_board_rejects_guesses_unchanged() {
        let mut board = board("crane", Some(6));
        board.apply(&guess("crane")).unwrap();
        let err = board.apply(&guess("slate")).unwrap_err();
        assert!(matches!(
            err,
            GameError::BoardClosed {
                board: 0,
                status: BoardStatus::Solved
            }
        ));
        assert_eq!(board.history().len(), 1);
    }

    #[test]
    fn unlimited_board_never_exhausts() {
        let mut board = board("crane", None);
        for _ in 0..20 {
            board.apply(&guess("slate")).unwrap();
        }
        assert_eq!(board.status(), BoardStatus::InProgress);
        assert_eq!(board.remaining_attempts(), None);
    }

    #[test]
    fn mismatched_guess_leaves_board_untouched() {
        let config = ModeConfig::for_mode(GameMode::Feudle);
        let mut board = Board::new(0, TargetSequence::new("anchor", &config).unwrap(), None);
        let short = GuessValidator::new(&config, &AcceptAll)
            .validate("crane", 5)
            .unwrap();
        assert!(matches!(
            board.apply(&short),
            Err(GameError::Guess(GuessError::LengthMismatch {
                expected: 6,
                actual: 5
            }))
        ));
        assert!(board.history().is_empty());
    }

    #[test]
    fn hints_follow_history() {
        let mut board = board("crane", Some(6));
        board.apply(&guess("slate")).unwrap();
        let hints = board.hints();
        assert_eq!(hints.get(Token::Letter(b'a')), Some(Verdict::Exact));
        assert_eq!(hints.get(Token::Letter(b's')), Some(Verdict::Absent));
        assert_eq!(hints.get(Token::Letter(b'z')), None);
    }

    #[test]
    fn status_display() {
        assert_eq!(BoardStatus::InProgress.to_string(), "in progress");
        assert_eq!(BoardStatus::Exhausted.to_string(), "exhausted");
    }
}
