//! One-shot feedback check
//!
//! Scores a single guess against a target without creating a session.

use crate::core::Feedback;
use crate::error::Result;
use crate::game::{GameMode, Guess, GuessValidator, ModeConfig, TargetSequence};
use crate::lexicon::Dictionary;

/// Configuration for checking a guess
pub struct CheckConfig {
    pub mode: GameMode,
    pub target: String,
    pub guess: String,
    pub check_dictionary: bool,
}

impl CheckConfig {
    #[must_use]
    pub const fn new(mode: GameMode, target: String, guess: String) -> Self {
        Self {
            mode,
            target,
            guess,
            check_dictionary: false,
        }
    }
}

/// Result of checking a guess
pub struct CheckResult {
    pub mode: GameMode,
    pub target: TargetSequence,
    pub guess: Guess,
    pub feedback: Feedback,
}

/// Validate both sides under `config.mode` and score the guess
///
/// # Errors
///
/// Returns a `Config` error if the target is unusable for the mode, or a
/// guess error if the guess fails validation.
pub fn check_guess(config: &CheckConfig, dictionary: &dyn Dictionary) -> Result<CheckResult> {
    let rules = ModeConfig::for_mode(config.mode).with_dictionary(config.check_dictionary);
    let target = TargetSequence::new(&config.target, &rules)?;
    let guess = GuessValidator::new(&rules, dictionary).validate(&config.guess, target.len())?;
    let feedback = Feedback::evaluate(target.tokens(), guess.tokens());

    Ok(CheckResult {
        mode: config.mode,
        target,
        guess,
        feedback,
    })
}
