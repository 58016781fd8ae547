//! Display functions for command results

use super::formatters::{attempts_label, create_progress_bar, format_duration, keyboard_line, tile_row};
use crate::commands::{CheckResult, EquationReport};
use crate::error::{ErrorSeverity, GameError};
use crate::game::{BoardStatus, Session, SessionStatus};
use colored::Colorize;

/// Print the result of checking one guess against one target
pub fn print_check_result(result: &CheckResult) {
    println!(
        "\n{} {} → {}",
        result.mode.name().bright_cyan().bold(),
        result.guess.text().to_uppercase().bright_white().bold(),
        tile_row(result.guess.tokens(), &result.feedback)
    );
    println!("   Code:  {}", result.feedback.to_code());
    println!("   Emoji: {}", result.feedback.to_emoji());
    if result.feedback.is_solved() {
        println!("{}", "✅ Exact match".green().bold());
    }
}

/// Print whether an equation is usable as a Mathle target
pub fn print_equation_report(report: &EquationReport) {
    println!("\n{} {}", "Equation:".bright_cyan().bold(), report.input.bright_white().bold());
    println!("   Length: {}", report.length);
    if let Some((left, right)) = report.values {
        println!("   Left:   {left}");
        println!("   Right:  {right}");
    }
    match &report.error {
        None => println!("{}", "✅ Valid Mathle target".green().bold()),
        Some(error) => println!("{} {error}", "❌ Invalid:".red().bold()),
    }
}

/// Print every board of a session with its keyboard hints
pub fn print_session(session: &Session) {
    let config = session.config();
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "{} {}  [{}] {}",
        session.id().to_string().bright_black(),
        config.mode.name().bright_cyan().bold(),
        create_progress_bar(session.attempts(), config.attempt_limit.unwrap_or(0), 12),
        attempts_label(session.attempts(), config.attempt_limit)
    );
    if let Some(display) = session.display() {
        println!("\n  {}", display.italic());
    }

    for board in session.boards() {
        if session.boards().len() > 1 {
            println!("\n  Board {} ({})", board.index() + 1, board.status());
        } else {
            println!();
        }
        for record in board.history() {
            println!("  {}", tile_row(record.guess.tokens(), &record.feedback));
        }
    }

    // Keyboard hints only make sense per board; show the first open one
    if let Some(board) = session
        .boards()
        .iter()
        .find(|board| !board.status().is_terminal())
    {
        println!("\n  {}", keyboard_line(&board.hints(), config.grammar()));
    }
    println!("{}", "─".repeat(60).cyan());
}

/// Print the end-of-game banner and reveal the targets
pub fn print_game_over(session: &Session) {
    let attempts = session.attempts();
    match session.status() {
        SessionStatus::Solved => {
            println!("\n{}", "═".repeat(60).bright_cyan());
            println!(
                "{}",
                format!(
                    "🎉 Solved in {attempts} {}!",
                    if attempts == 1 { "guess" } else { "guesses" }
                )
                .bright_green()
                .bold()
            );
        }
        SessionStatus::Exhausted => {
            println!("\n{}", "═".repeat(60).bright_cyan());
            println!("{}", format!("❌ Out of attempts after {attempts}").red().bold());
        }
        SessionStatus::InProgress => return,
    }

    if let Some(targets) = session.targets() {
        for (board, target) in session.boards().iter().zip(targets) {
            let marker = if board.status() == BoardStatus::Solved { "✓" } else { "✗" };
            println!("   {marker} {}", target.to_uppercase().bright_yellow().bold());
        }
    }
    println!("   Time: {}", format_duration(session.elapsed()));
    println!("{}", "═".repeat(60).bright_cyan());
}

/// Print an engine error, colored by how the player should treat it
pub fn print_error(error: &GameError) {
    match error.severity() {
        ErrorSeverity::Validation => println!("{} {error}", "⚠".yellow().bold()),
        ErrorSeverity::Usage => println!("{} {error}", "ℹ".bright_blue().bold()),
        ErrorSeverity::Fatal => println!("{} {error}", "❌".red().bold()),
    }
}
