//! Target providers
//!
//! A `TargetSource` hands out raw targets for a new session. The session
//! re-validates every target against its mode before any board exists, so a
//! provider bug surfaces as a `ConfigError` and never as a broken game.

use super::mode::GameMode;
use crate::error::ConfigError;
use crate::lexicon::{ANSWERS, EQUATIONS, FEUDLE_SENTENCES};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;

/// Replacement text for the hidden Feudle word
pub const BLANK: &str = "**[blank]**";

/// Raw targets for one session, one per board, plus display data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetDraw {
    pub targets: Vec<String>,
    /// Feudle: the sentence with its word blanked out
    pub display: Option<String>,
}

pub trait TargetSource: Send + Sync {
    /// Draw targets for a `mode` session with `boards` boards
    ///
    /// # Errors
    /// Returns `EmptyCatalog` when the source cannot supply enough targets.
    fn draw(&self, mode: GameMode, boards: usize) -> Result<TargetDraw, ConfigError>;
}

/// Caller-chosen targets, returned as-is for every mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTargets {
    draw: TargetDraw,
}

impl FixedTargets {
    #[must_use]
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            draw: TargetDraw {
                targets: targets.into_iter().map(Into::into).collect(),
                display: None,
            },
        }
    }

    /// A single target
    #[must_use]
    pub fn single(target: &str) -> Self {
        Self::new([target])
    }

    /// A Feudle prompt: `word` is hidden in `sentence`
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::game::{FixedTargets, GameMode, TargetSource};
    ///
    /// let source = FixedTargets::feudle("moon", "The Moon rose early.");
    /// let draw = source.draw(GameMode::Feudle, 1).unwrap();
    /// assert_eq!(draw.display.as_deref(), Some("The **[blank]** rose early."));
    /// ```
    #[must_use]
    pub fn feudle(word: &str, sentence: &str) -> Self {
        let mut source = Self::single(word);
        source.draw.display = Some(blank_out(sentence, word));
        source
    }
}

impl TargetSource for FixedTargets {
    fn draw(&self, _mode: GameMode, _boards: usize) -> Result<TargetDraw, ConfigError> {
        Ok(self.draw.clone())
    }
}

/// Random targets from word lists, a sentence corpus and an equation list
pub struct Catalog {
    answers: Vec<String>,
    sentences: Vec<(String, String)>,
    equations: Vec<String>,
    rng: Mutex<StdRng>,
}

impl Catalog {
    #[must_use]
    pub fn new(
        answers: Vec<String>,
        sentences: Vec<(String, String)>,
        equations: Vec<String>,
    ) -> Self {
        Self {
            answers,
            sentences,
            equations,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Catalog over the lists compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(
            ANSWERS.iter().map(|&word| word.to_string()).collect(),
            FEUDLE_SENTENCES
                .iter()
                .map(|&(word, sentence)| (word.to_string(), sentence.to_string()))
                .collect(),
            EQUATIONS.iter().map(|&equation| equation.to_string()).collect(),
        )
    }

    /// Reseed for reproducible draws
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// Pick `count` distinct entries
    fn pick<'a, T>(
        &self,
        pool: &'a [T],
        count: usize,
        mode: GameMode,
    ) -> Result<Vec<&'a T>, ConfigError> {
        if count == 0 || pool.len() < count {
            return Err(ConfigError::EmptyCatalog { mode });
        }
        let mut rng = self.rng.lock();
        Ok(pool.choose_multiple(&mut *rng, count).collect())
    }
}

impl TargetSource for Catalog {
    fn draw(&self, mode: GameMode, boards: usize) -> Result<TargetDraw, ConfigError> {
        let draw = match mode {
            GameMode::Wordle | GameMode::Duordle => TargetDraw {
                targets: self
                    .pick(&self.answers, boards, mode)?
                    .into_iter()
                    .cloned()
                    .collect(),
                display: None,
            },
            GameMode::Mathle => TargetDraw {
                targets: self
                    .pick(&self.equations, boards, mode)?
                    .into_iter()
                    .cloned()
                    .collect(),
                display: None,
            },
            GameMode::Feudle => {
                let picked = self.pick(&self.sentences, boards, mode)?;
                let display = picked
                    .iter()
                    .map(|(word, sentence)| blank_out(sentence, word))
                    .collect::<Vec<_>>()
                    .join("\n");
                TargetDraw {
                    targets: picked.into_iter().map(|(word, _)| word.clone()).collect(),
                    display: Some(display),
                }
            }
        };
        tracing::debug!(%mode, boards, "drew targets from catalog");
        Ok(draw)
    }
}

/// Replace every whole-word, case-insensitive occurrence of `word` with `BLANK`
#[must_use]
pub fn blank_out(sentence: &str, word: &str) -> String {
    let needle = word.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return sentence.to_string();
    }
    // ASCII lowercasing keeps byte offsets identical
    let haystack = sentence.to_ascii_lowercase();
    let bytes = haystack.as_bytes();
    let is_word_byte = |b: u8| b.is_ascii_alphanumeric() || b == b'_' || !b.is_ascii();

    let mut out = String::with_capacity(sentence.len());
    let mut last = 0;
    for (start, matched) in haystack.match_indices(&needle) {
        let end = start + matched.len();
        let bounded_left = start == 0 || !is_word_byte(bytes[start - 1]);
        let bounded_right = end == bytes.len() || !is_word_byte(bytes[end]);
        if start >= last && bounded_left && bounded_right {
            out.push_str(&sentence[last..start]);
            out.push_str(BLANK);
            last = end;
        }
    }
    out.push_str(&sentence[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_case_insensitive() {
        assert_eq!(
            blank_out("Winter is long. winter is cold.", "WINTER"),
            "**[blank]** is long. **[blank]** is cold."
        );
    }

    #[test]
    fn blank_respects_word_boundaries() {
        assert_eq!(
            blank_out("The cat sat on a catalog, cat.", "cat"),
            "The **[blank]** sat on a catalog, **[blank]**."
        );
    }

    #[test]
    fn blank_without_match_is_unchanged() {
        assert_eq!(blank_out("Nothing here.", "moon"), "Nothing here.");
        assert_eq!(blank_out("Nothing here.", ""), "Nothing here.");
    }

    #[test]
    fn fixed_targets_are_returned_verbatim() {
        let source = FixedTargets::new(["crane", "slate"]);
        let draw = source.draw(GameMode::Duordle, 2).unwrap();
        assert_eq!(draw.targets, vec!["crane", "slate"]);
        assert_eq!(draw.display, None);
    }

    #[test]
    fn catalog_draws_distinct_duordle_targets() {
        let catalog = Catalog::embedded().with_seed(7);
        for _ in 0..50 {
            let draw = catalog.draw(GameMode::Duordle, 2).unwrap();
            assert_eq!(draw.targets.len(), 2);
            assert_ne!(draw.targets[0], draw.targets[1]);
        }
    }

    #[test]
    fn catalog_feudle_hides_the_word() {
        let catalog = Catalog::embedded().with_seed(1);
        let draw = catalog.draw(GameMode::Feudle, 1).unwrap();
        let display = draw.display.unwrap();
        assert!(display.contains(BLANK));
        assert!(!display.to_lowercase().contains(&format!(" {} ", draw.targets[0])));
    }

    #[test]
    fn catalog_mathle_draws_equations() {
        let catalog = Catalog::embedded().with_seed(3);
        let draw = catalog.draw(GameMode::Mathle, 1).unwrap();
        assert!(draw.targets[0].contains('='));
    }

    #[test]
    fn seeded_catalogs_agree() {
        let a = Catalog::embedded().with_seed(42);
        let b = Catalog::embedded().with_seed(42);
        assert_eq!(
            a.draw(GameMode::Wordle, 1).unwrap(),
            b.draw(GameMode::Wordle, 1).unwrap()
        );
    }

    #[test]
    fn empty_catalog_is_a_config_error() {
        let catalog = Catalog::new(vec!["crane".into()], Vec::new(), Vec::new());
        assert!(matches!(
            catalog.draw(GameMode::Duordle, 2),
            Err(ConfigError::EmptyCatalog {
                mode: GameMode::Duordle
            })
        ));
        assert!(catalog.draw(GameMode::Mathle, 1).is_err());
        assert!(catalog.draw(GameMode::Wordle, 1).is_ok());
    }
}
