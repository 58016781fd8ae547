//! Formatting utilities for terminal output

use crate::core::{Feedback, Grammar, LetterHints, Token, Verdict};
use chrono::Duration;
use colored::{ColoredString, Colorize};

/// One token as a colored tile
#[must_use]
pub fn tile(token: Token, verdict: Option<Verdict>) -> ColoredString {
    let text = format!(" {} ", token.as_char().to_ascii_uppercase());
    match verdict {
        Some(Verdict::Exact) => text.black().on_green().bold(),
        Some(Verdict::Present) => text.black().on_yellow().bold(),
        Some(Verdict::Absent) => text.white().on_bright_black(),
        None => text.normal(),
    }
}

/// A scored guess as a row of colored tiles
#[must_use]
pub fn tile_row(tokens: &[Token], feedback: &Feedback) -> String {
    tokens
        .iter()
        .zip(feedback.verdicts())
        .map(|(&token, &verdict)| tile(token, Some(verdict)).to_string())
        .collect()
}

/// The grammar's alphabet colored by the best verdict seen so far
#[must_use]
pub fn keyboard_line(hints: &LetterHints, grammar: Grammar) -> String {
    grammar
        .alphabet()
        .into_iter()
        .map(|token| {
            let key = token.as_char().to_ascii_uppercase().to_string();
            match hints.get(token) {
                Some(Verdict::Exact) => key.green().bold().to_string(),
                Some(Verdict::Present) => key.yellow().bold().to_string(),
                Some(Verdict::Absent) => key.bright_black().strikethrough().to_string(),
                None => key,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value.min(max) * width) / max
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Attempts used, as `3/6` or `3/∞`
#[must_use]
pub fn attempts_label(used: usize, limit: Option<usize>) -> String {
    match limit {
        Some(limit) => format!("{used}/{limit}"),
        None => format!("{used}/∞"),
    }
}

/// Compact play time, e.g. `1m 05s`
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);
    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0, 6, 6), "░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(create_progress_bar(6, 6, 6), "██████");
        assert_eq!(create_progress_bar(9, 6, 6), "██████");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(3, 6, 10), "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3, 0, 4), "░░░░");
    }

    #[test]
    fn attempts_label_limits() {
        assert_eq!(attempts_label(3, Some(6)), "3/6");
        assert_eq!(attempts_label(12, None), "12/∞");
    }

    #[test]
    fn duration_formats() {
        assert_eq!(format_duration(Duration::seconds(9)), "9s");
        assert_eq!(format_duration(Duration::seconds(65)), "1m 05s");
        assert_eq!(format_duration(Duration::seconds(3723)), "1h 02m 03s");
        assert_eq!(format_duration(Duration::seconds(-4)), "0s");
    }
}
