//! Word list loading utilities
//!
//! Builds a `Lexicon` from a file or slice, and parses Feudle sentence files.

use super::Lexicon;
use std::fs;
use std::io;
use std::path::Path;

/// Load a lexicon from a file with one word per line
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use wordle_engine::lexicon::loader::load_from_file;
///
/// let lexicon = load_from_file("data/allowed.txt").unwrap();
/// println!("Loaded {} words", lexicon.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Lexicon> {
    let content = fs::read_to_string(path)?;
    Ok(words_from_str(&content))
}

/// Parse newline-separated words
#[must_use]
pub fn words_from_str(content: &str) -> Lexicon {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Build a lexicon from a static slice
///
/// # Examples
/// ```
/// use wordle_engine::lexicon::loader::from_slice;
/// use wordle_engine::lexicon::ANSWERS;
///
/// let lexicon = from_slice(ANSWERS);
/// assert_eq!(lexicon.len(), ANSWERS.len());
/// ```
#[must_use]
pub fn from_slice(slice: &[&str]) -> Lexicon {
    slice.iter().copied().collect()
}

/// Parse `word|sentence` lines into Feudle prompts
///
/// Lines without a separator, or whose sentence does not mention the word, are
/// skipped.
#[must_use]
pub fn sentences_from_str(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let (word, sentence) = line.trim().split_once('|')?;
            let word = word.trim().to_lowercase();
            let sentence = sentence.trim();
            (!word.is_empty() && sentence.to_lowercase().contains(&word))
                .then(|| (word, sentence.to_string()))
        })
        .collect()
}
