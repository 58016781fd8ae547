//! Command implementations

pub mod check;
pub mod play;
pub mod validate;

pub use check::{CheckConfig, CheckResult, check_guess};
pub use play::{PlayCommand, PlayConfig, parse_command, run_play};
pub use validate::{EquationReport, validate_equation};
