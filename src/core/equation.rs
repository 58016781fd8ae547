//! Mathle equation grammar
//!
//! `equation := expr '=' expr`, `expr := number (op number)*`. Numbers are
//! unsigned, and a multi-digit number may not start with `0`. Evaluation uses
//! the usual precedence (`*` and `/` bind tighter than `+` and `-`, otherwise
//! left to right) over exact rationals, so `7/2*2=7` balances.
//!
//! Guesses only need to parse. Targets must also balance.

use super::token::{Operator, Token};
use std::fmt;
use thiserror::Error;

/// Which side of the `=` a problem was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Why a token sequence is not a usable equation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquationError {
    #[error("equation has no '=' sign")]
    MissingEquals,

    #[error("equation has more than one '=' sign")]
    MultipleEquals,

    #[error("{side} side of the equation is empty")]
    EmptySide { side: Side },

    #[error("operator at position {position} is missing a number")]
    MisplacedOperator { position: usize },

    #[error("number at position {position} has a leading zero")]
    LeadingZero { position: usize },

    #[error("token at position {position} is not a digit or operator")]
    UnexpectedToken { position: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("left side is {left} but right side is {right}")]
    Unbalanced { left: Ratio, right: Ratio },
}

/// An exact rational number, always in lowest terms with a positive denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    numer: i64,
    denom: i64,
}

impl Ratio {
    pub const ZERO: Self = Self { numer: 0, denom: 1 };

    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self {
            numer: value,
            denom: 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn numer(self) -> i64 {
        self.numer
    }

    #[inline]
    #[must_use]
    pub const fn denom(self) -> i64 {
        self.denom
    }

    fn reduced(numer: i64, denom: i64) -> Result<Self, EquationError> {
        if denom == 0 {
            return Err(EquationError::DivisionByZero);
        }
        let divisor = gcd(numer.unsigned_abs(), denom.unsigned_abs()).max(1);
        let divisor = i64::try_from(divisor).map_err(|_| EquationError::Overflow)?;
        let (mut numer, mut denom) = (numer / divisor, denom / divisor);
        if denom < 0 {
            numer = numer.checked_neg().ok_or(EquationError::Overflow)?;
            denom = denom.checked_neg().ok_or(EquationError::Overflow)?;
        }
        Ok(Self { numer, denom })
    }

    fn apply(self, op: Operator, rhs: Self) -> Result<Self, EquationError> {
        let overflow = || EquationError::Overflow;
        match op {
            Operator::Add | Operator::Sub => {
                let left = self.numer.checked_mul(rhs.denom).ok_or_else(overflow)?;
                let right = rhs.numer.checked_mul(self.denom).ok_or_else(overflow)?;
                let numer = if op == Operator::Add {
                    left.checked_add(right)
                } else {
                    left.checked_sub(right)
                }
                .ok_or_else(overflow)?;
                let denom = self.denom.checked_mul(rhs.denom).ok_or_else(overflow)?;
                Self::reduced(numer, denom)
            }
            Operator::Mul => Self::reduced(
                self.numer.checked_mul(rhs.numer).ok_or_else(overflow)?,
                self.denom.checked_mul(rhs.denom).ok_or_else(overflow)?,
            ),
            Operator::Div => Self::reduced(
                self.numer.checked_mul(rhs.denom).ok_or_else(overflow)?,
                self.denom.checked_mul(rhs.numer).ok_or_else(overflow)?,
            ),
            Operator::Eq => Err(EquationError::MultipleEquals),
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Digits of one number, converted to a value only when evaluated
#[derive(Debug, Clone, PartialEq, Eq)]
struct Literal(Vec<u8>);

impl Literal {
    fn value(&self) -> Result<Ratio, EquationError> {
        self.0
            .iter()
            .try_fold(0_i64, |value, &digit| {
                value.checked_mul(10)?.checked_add(i64::from(digit))
            })
            .map(Ratio::integer)
            .ok_or(EquationError::Overflow)
    }
}

/// One side of an equation: `numbers.len() == ops.len() + 1`
#[derive(Debug, Clone, PartialEq, Eq)]
struct Expr {
    numbers: Vec<Literal>,
    ops: Vec<Operator>,
}

impl Expr {
    fn parse(tokens: &[Token], offset: usize, side: Side) -> Result<Self, EquationError> {
        if tokens.is_empty() {
            return Err(EquationError::EmptySide { side });
        }

        let mut numbers = Vec::new();
        let mut ops = Vec::new();
        // (digits so far, position of first digit)
        let mut current: Option<(Vec<u8>, usize)> = None;
        let mut last_op_position = offset;

        for (i, &token) in tokens.iter().enumerate() {
            let position = offset + i;
            match token {
                Token::Digit(digit) => {
                    let (digits, start) = current.get_or_insert_with(|| (Vec::new(), position));
                    if *digits == [0] {
                        return Err(EquationError::LeadingZero { position: *start });
                    }
                    digits.push(digit);
                }
                Token::Operator(op) if op.is_arithmetic() => {
                    let Some((digits, _)) = current.take() else {
                        return Err(EquationError::MisplacedOperator { position });
                    };
                    numbers.push(Literal(digits));
                    ops.push(op);
                    last_op_position = position;
                }
                Token::Operator(_) => return Err(EquationError::MultipleEquals),
                Token::Letter(_) => return Err(EquationError::UnexpectedToken { position }),
            }
        }

        let Some((digits, _)) = current else {
            return Err(EquationError::MisplacedOperator {
                position: last_op_position,
            });
        };
        numbers.push(Literal(digits));

        Ok(Self { numbers, ops })
    }

    fn evaluate(&self) -> Result<Ratio, EquationError> {
        let mut total = Ratio::ZERO;
        let mut pending = Operator::Add;
        let mut term = self.numbers[0].value()?;

        for (&op, number) in self.ops.iter().zip(&self.numbers[1..]) {
            let number = number.value()?;
            match op {
                Operator::Mul | Operator::Div => term = term.apply(op, number)?,
                _ => {
                    total = total.apply(pending, term)?;
                    pending = op;
                    term = number;
                }
            }
        }

        total.apply(pending, term)
    }
}

/// A syntactically valid equation
///
/// # Examples
/// ```
/// use wordle_engine::core::{Equation, Grammar};
///
/// let tokens = Grammar::Equation.tokenize("2*3+4=10").unwrap();
/// let equation = Equation::parse(&tokens).unwrap();
/// assert!(equation.ensure_balanced().is_ok());
///
/// let tokens = Grammar::Equation.tokenize("2+2=5").unwrap();
/// assert!(Equation::parse(&tokens).unwrap().ensure_balanced().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    left: Expr,
    right: Expr,
}

impl Equation {
    /// Check the grammar without evaluating anything
    ///
    /// # Errors
    /// Returns the first structural problem found, scanning left to right.
    pub fn parse(tokens: &[Token]) -> Result<Self, EquationError> {
        let mut equals = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| **token == Token::Operator(Operator::Eq))
            .map(|(i, _)| i);

        let split = equals.next().ok_or(EquationError::MissingEquals)?;
        if equals.next().is_some() {
            return Err(EquationError::MultipleEquals);
        }

        let left = Expr::parse(&tokens[..split], 0, Side::Left)?;
        let right = Expr::parse(&tokens[split + 1..], split + 1, Side::Right)?;

        Ok(Self { left, right })
    }

    /// Evaluate both sides
    ///
    /// # Errors
    /// Returns `DivisionByZero` or `Overflow` if either side cannot be computed.
    pub fn evaluate(&self) -> Result<(Ratio, Ratio), EquationError> {
        Ok((self.left.evaluate()?, self.right.evaluate()?))
    }

    /// Require both sides to have the same value
    ///
    /// # Errors
    /// Returns `Unbalanced` with both values when they differ.
    pub fn ensure_balanced(&self) -> Result<(), EquationError> {
        let (left, right) = self.evaluate()?;
        if left == right {
            Ok(())
        } else {
            Err(EquationError::Unbalanced { left, right })
        }
    }
}
