//! Token grammar
//!
//! A token is the atomic unit feedback is computed on: a letter in the word
//! modes, a digit or operator in Mathle. Tokens compare by value only; letters
//! are normalised to lowercase on the way in.

use crate::error::GuessError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mathle operators, `=` included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
}

impl Operator {
    /// Every operator, in keyboard order
    pub const ALL: [Self; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Eq];

    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '=' => Some(Self::Eq),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Eq => '=',
        }
    }

    /// `true` for `+ - * /`, `false` for `=`
    #[inline]
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        !matches!(self, Self::Eq)
    }
}

/// An atomic comparable unit of a guess or target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Token {
    /// Lowercase ASCII letter
    Letter(u8),
    /// Decimal digit value (0-9)
    Digit(u8),
    Operator(Operator),
}

impl Token {
    /// Map a character to a letter token, folding case
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::Token;
    ///
    /// assert_eq!(Token::letter('Q'), Token::letter('q'));
    /// assert!(Token::letter('7').is_none());
    /// ```
    #[must_use]
    pub const fn letter(ch: char) -> Option<Self> {
        if ch.is_ascii_alphabetic() {
            Some(Self::Letter(ch.to_ascii_lowercase() as u8))
        } else {
            None
        }
    }

    /// Map a character to a digit or operator token
    #[must_use]
    pub const fn symbol(ch: char) -> Option<Self> {
        if let Some(value) = ch.to_digit(10) {
            return Some(Self::Digit(value as u8));
        }
        match Operator::from_char(ch) {
            Some(op) => Some(Self::Operator(op)),
            None => None,
        }
    }

    /// The canonical character for this token
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Letter(byte) => byte as char,
            Self::Digit(value) => (b'0' + value) as char,
            Self::Operator(op) => op.as_char(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The alphabet a mode draws its tokens from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    /// Case-insensitive ASCII letters (Wordle, Feudle, Duordle)
    Alphabetic,
    /// Digits and `+ - * / =` (Mathle)
    Equation,
}

impl Grammar {
    /// Map one character under this grammar
    #[must_use]
    pub const fn token(self, ch: char) -> Option<Token> {
        match self {
            Self::Alphabetic => Token::letter(ch),
            Self::Equation => Token::symbol(ch),
        }
    }

    /// Split `text` into tokens
    ///
    /// # Errors
    /// Returns `GuessError::InvalidToken` naming the first character that has
    /// no token under this grammar.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::Grammar;
    ///
    /// assert_eq!(Grammar::Equation.tokenize("12+7=19").unwrap().len(), 7);
    /// assert!(Grammar::Alphabetic.tokenize("he11o").is_err());
    /// ```
    pub fn tokenize(self, text: &str) -> Result<Vec<Token>, GuessError> {
        text.chars()
            .enumerate()
            .map(|(position, ch)| {
                self.token(ch)
                    .ok_or(GuessError::InvalidToken { position, ch })
            })
            .collect()
    }

    /// Every token a player can type under this grammar
    #[must_use]
    pub fn alphabet(self) -> Vec<Token> {
        match self {
            Self::Alphabetic => (b'a'..=b'z').map(Token::Letter).collect(),
            Self::Equation => (0..=9)
                .map(Token::Digit)
                .chain(Operator::ALL.into_iter().map(Token::Operator))
                .collect(),
        }
    }
}

/// Render tokens back to their canonical text
#[must_use]
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.as_char()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_case_folded() {
        assert_eq!(Token::letter('A'), Some(Token::Letter(b'a')));
        assert_eq!(Token::letter('a'), Token::letter('A'));
        assert_eq!(Token::letter('é'), None);
        assert_eq!(Token::letter(' '), None);
    }

    #[test]
    fn symbols_cover_digits_and_operators() {
        assert_eq!(Token::symbol('0'), Some(Token::Digit(0)));
        assert_eq!(Token::symbol('9'), Some(Token::Digit(9)));
        assert_eq!(Token::symbol('='), Some(Token::Operator(Operator::Eq)));
        assert_eq!(Token::symbol('x'), None);
        assert_eq!(Token::symbol('('), None);
    }

    #[test]
    fn tokenize_alphabetic() {
        let tokens = Grammar::Alphabetic.tokenize("CrAnE").unwrap();
        assert_eq!(render(&tokens), "crane");
    }

    #[test]
    fn tokenize_reports_first_bad_character() {
        assert_eq!(
            Grammar::Alphabetic.tokenize("HE11O"),
            Err(GuessError::InvalidToken {
                position: 2,
                ch: '1'
            })
        );
        assert_eq!(
            Grammar::Equation.tokenize("1+a=2"),
            Err(GuessError::InvalidToken {
                position: 2,
                ch: 'a'
            })
        );
    }

    #[test]
    fn tokenize_equation_round_trips_text() {
        let tokens = Grammar::Equation.tokenize("96/8=12").unwrap();
        assert_eq!(render(&tokens), "96/8=12");
        assert_eq!(tokens[2], Token::Operator(Operator::Div));
    }

    #[test]
    fn alphabet_sizes() {
        assert_eq!(Grammar::Alphabetic.alphabet().len(), 26);
        assert_eq!(Grammar::Equation.alphabet().len(), 15);
    }

    #[test]
    fn operator_chars_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_char(op.as_char()), Some(op));
        }
        assert!(!Operator::Eq.is_arithmetic());
        assert!(Operator::Div.is_arithmetic());
    }
}
