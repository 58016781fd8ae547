//! Game rules, boards and sessions

mod board;
mod mode;
mod session;
mod source;
mod target;
mod validator;

pub use board::{Board, BoardStatus, GuessRecord};
pub use mode::{GameMode, LengthRule, ModeConfig};
pub use session::{BoardOutcome, Session, SessionGuessResult, SessionId, SessionStatus};
pub use source::{BLANK, Catalog, FixedTargets, TargetDraw, TargetSource, blank_out};
pub use target::TargetSequence;
pub use validator::{Guess, GuessValidator};
