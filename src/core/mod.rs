//! Core puzzle types
//!
//! Tokens, the Mathle equation grammar and the feedback evaluator. Everything
//! here is pure: no I/O, no clocks, no locks.

mod equation;
mod feedback;
mod hints;
mod token;

pub use equation::{Equation, EquationError, Ratio, Side};
pub use feedback::{Feedback, Verdict};
pub use hints::LetterHints;
pub use token::{Grammar, Operator, Token, render};
