//! Session coordinator
//!
//! A session owns one board per target and drives them all from a single
//! stream of guesses. Every accepted guess costs exactly one attempt, however
//! many boards it lands on. Single-board modes are just the `N = 1` case.

use super::board::{Board, BoardStatus};
use super::mode::ModeConfig;
use super::source::TargetDraw;
use super::target::TargetSequence;
use super::validator::{Guess, GuessValidator};
use crate::core::Feedback;
use crate::error::{ConfigError, GameError, Result};
use crate::lexicon::Dictionary;
use chrono::{DateTime, Duration, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

/// Sessions share the board state machine's statuses
pub type SessionStatus = BoardStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What one guess did to one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardOutcome {
    pub index: usize,
    /// `None` if the board was already closed and the guess skipped it
    pub feedback: Option<Feedback>,
    pub status: BoardStatus,
}

/// Result of one accepted guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGuessResult {
    /// 1-based attempt number this guess used
    pub attempt: usize,
    pub guess: Guess,
    pub boards: Vec<BoardOutcome>,
    pub status: SessionStatus,
    /// `None` when attempts are unlimited
    pub remaining_attempts: Option<usize>,
}

impl SessionGuessResult {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// One logical game for one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    config: ModeConfig,
    boards: Vec<Board>,
    attempts: usize,
    guess_length: usize,
    status: SessionStatus,
    display: Option<String>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    last_activity_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from drawn targets, starting the clock now
    ///
    /// # Errors
    /// See [`Session::start_at`].
    pub fn new(id: SessionId, config: ModeConfig, draw: TargetDraw) -> Result<Self, ConfigError> {
        Self::start_at(id, config, draw, Utc::now())
    }

    /// Build a session from drawn targets
    ///
    /// Every target is validated before any board exists.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the rules are unusable, the number of targets
    /// does not match the board count, a target is invalid for the mode, two
    /// boards share a target, or the targets differ in length.
    pub fn start_at(
        id: SessionId,
        config: ModeConfig,
        draw: TargetDraw,
        now: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if draw.targets.len() != config.boards {
            return Err(ConfigError::BoardCount {
                mode: config.mode,
                expected: config.boards,
                actual: draw.targets.len(),
            });
        }

        let targets = draw
            .targets
            .iter()
            .map(|raw| TargetSequence::new(raw, &config))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = FxHashSet::default();
        if let Some(repeated) = targets.iter().find(|target| !seen.insert(target.text())) {
            return Err(ConfigError::DuplicateTarget {
                mode: config.mode,
                target: repeated.text().to_string(),
            });
        }

        let guess_length = targets.first().map_or(0, TargetSequence::len);
        if targets.iter().any(|target| target.len() != guess_length) {
            return Err(ConfigError::MismatchedTargets {
                mode: config.mode,
                lengths: targets.iter().map(TargetSequence::len).collect(),
            });
        }

        let boards = targets
            .into_iter()
            .enumerate()
            .map(|(index, target)| Board::new(index, target, config.attempt_limit))
            .collect();

        debug!(session_id = %id, mode = %config.mode, guess_length, "session started");

        Ok(Self {
            id,
            config,
            boards,
            attempts: 0,
            guess_length,
            status: SessionStatus::InProgress,
            display: draw.display,
            started_at: now,
            finished_at: None,
            last_activity_at: now,
        })
    }

    /// Validate `raw` once and apply it to every open board
    ///
    /// # Errors
    /// Returns a guess error if validation fails, or `BoardClosed` if the
    /// session is already over. In both cases nothing changes.
    pub fn submit_guess(
        &mut self,
        raw: &str,
        dictionary: &dyn Dictionary,
    ) -> Result<SessionGuessResult> {
        self.submit_guess_at(raw, dictionary, Utc::now())
    }

    /// [`Session::submit_guess`] with an explicit clock
    ///
    /// # Errors
    /// See [`Session::submit_guess`].
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::game::{FixedTargets, GameMode, ModeConfig, Session, SessionId, TargetSource};
    /// use wordle_engine::lexicon::Lexicon;
    ///
    /// let config = ModeConfig::for_mode(GameMode::Duordle);
    /// let draw = FixedTargets::new(["crane", "slate"]).draw(GameMode::Duordle, 2).unwrap();
    /// let mut session = Session::new(SessionId::new(1), config, draw).unwrap();
    ///
    /// let result = session.submit_guess("crane", &Lexicon::embedded()).unwrap();
    /// assert_eq!(result.attempt, 1);
    /// assert!(result.boards[0].feedback.as_ref().unwrap().is_solved());
    /// assert!(!result.is_terminal());
    /// ```
    #[instrument(skip(self, dictionary), fields(session_id = %self.id, mode = %self.config.mode))]
    pub fn submit_guess_at(
        &mut self,
        raw: &str,
        dictionary: &dyn Dictionary,
        now: DateTime<Utc>,
    ) -> Result<SessionGuessResult> {
        self.ensure_open()?;
        let guess = GuessValidator::new(&self.config, dictionary).validate(raw, self.guess_length)?;

        // Boards only fail on a closed state or a length mismatch, both ruled
        // out above, so either every open board takes the guess or none does
        let mut boards = Vec::with_capacity(self.boards.len());
        for board in &mut self.boards {
            let feedback = if board.status().is_terminal() {
                None
            } else {
                Some(board.apply(&guess)?.feedback.clone())
            };
            boards.push(BoardOutcome {
                index: board.index(),
                feedback,
                status: board.status(),
            });
        }

        self.attempts += 1;
        self.last_activity_at = now;
        self.status = self.derive_status();
        debug!(attempt = self.attempts, guess = %guess, status = %self.status, "guess applied");

        if self.status.is_terminal() {
            self.finished_at = Some(now);
            info!(attempts = self.attempts, status = %self.status, "session finished");
        }

        Ok(SessionGuessResult {
            attempt: self.attempts,
            guess,
            boards,
            status: self.status,
            remaining_attempts: self.remaining_attempts(),
        })
    }

    fn derive_status(&self) -> SessionStatus {
        if self
            .boards
            .iter()
            .all(|board| board.status() == BoardStatus::Solved)
        {
            SessionStatus::Solved
        } else if self
            .config
            .attempt_limit
            .is_some_and(|limit| self.attempts >= limit)
        {
            SessionStatus::Exhausted
        } else {
            SessionStatus::InProgress
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if !self.status.is_terminal() {
            return Ok(());
        }
        let board = self
            .boards
            .iter()
            .find(|board| board.status() == self.status)
            .map_or(0, Board::index);
        Err(GameError::BoardClosed {
            board,
            status: self.status,
        })
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ModeConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Shared attempt counter
    #[inline]
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    #[inline]
    #[must_use]
    pub const fn guess_length(&self) -> usize {
        self.guess_length
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// `None` when attempts are unlimited
    #[must_use]
    pub fn remaining_attempts(&self) -> Option<usize> {
        self.config
            .attempt_limit
            .map(|limit| limit.saturating_sub(self.attempts))
    }

    /// Prompt shown with the game, e.g. Feudle's blanked sentence
    #[must_use]
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Target text per board, only once the game is over
    #[must_use]
    pub fn targets(&self) -> Option<Vec<&str>> {
        self.is_terminal()
            .then(|| self.boards.iter().map(|board| board.target().text()).collect())
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub const fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    #[must_use]
    pub const fn last_activity_at(&self) -> DateTime<Utc> {
        self.last_activity_at
    }

    /// Play time so far, frozen once the game finishes
    #[must_use]
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        self.finished_at.unwrap_or(now) - self.started_at
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Utc::now())
    }
}
