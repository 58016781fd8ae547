//! Dictionary lookup
//!
//! The engine only needs a yes/no answer for "is this a word". `Lexicon` is the
//! built-in implementation; front ends can plug in their own `Dictionary`.

mod embedded;
pub mod loader;

pub use embedded::{
    ALLOWED, ALLOWED_COUNT, ANSWERS, ANSWERS_COUNT, EQUATIONS, EQUATIONS_COUNT, FEUDLE_SENTENCES,
};

use std::collections::BTreeSet;

/// Word legality check used by the guess validator
///
/// Called synchronously once per guess. Anything other than `true` rejects the
/// guess.
pub trait Dictionary: Send + Sync {
    fn is_valid_word(&self, word: &str) -> bool;
}

/// Dictionary that accepts every word
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Dictionary for AcceptAll {
    fn is_valid_word(&self, _word: &str) -> bool {
        true
    }
}

/// A case-insensitive set of words
///
/// Words are stored lowercase and kept sorted, so prefix suggestions are a
/// range scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: BTreeSet<String>,
}

impl Lexicon {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every embedded guessable word: Wordle answers, extra allowed words and
    /// Feudle blanks
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::lexicon::{Dictionary, Lexicon};
    ///
    /// let lexicon = Lexicon::embedded();
    /// assert!(lexicon.is_valid_word("CRANE"));
    /// assert!(!lexicon.is_valid_word("xqzvw"));
    /// ```
    #[must_use]
    pub fn embedded() -> Self {
        ANSWERS
            .iter()
            .chain(ALLOWED)
            .copied()
            .chain(FEUDLE_SENTENCES.iter().map(|&(word, _)| word))
            .collect()
    }

    /// Add a word; returns `false` if it was already present
    pub fn insert(&mut self, word: &str) -> bool {
        let word = normalize(word);
        !word.is_empty() && self.words.insert(word)
    }

    /// Remove a word; returns `false` if it was not present
    pub fn remove(&mut self, word: &str) -> bool {
        self.words.remove(&normalize(word))
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&normalize(word))
    }

    /// Words starting with `prefix`, in alphabetical order
    #[must_use]
    pub fn suggest(&self, prefix: &str) -> Vec<&str> {
        let prefix = normalize(prefix);
        self.words
            .range(prefix.clone()..)
            .take_while(|word| word.starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl Dictionary for Lexicon {
    fn is_valid_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Lexicon {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut lexicon = Self::new();
        for word in iter {
            lexicon.insert(word.as_ref());
        }
        lexicon
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}
