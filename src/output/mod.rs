//! Terminal output formatting
//!
//! Colored tiles, keyboard hints and result printing for the CLI.

pub mod display;
pub mod formatters;

pub use display::{
    print_check_result, print_equation_report, print_error, print_game_over, print_session,
};
