//! Interactive terminal game
//!
//! A minimal front end over the session registry: one owner, one mode, guesses
//! typed on stdin.

use crate::game::{GameMode, ModeConfig, TargetSource};
use crate::output::{print_error, print_game_over, print_session};
use crate::registry::{OwnerKey, SessionRegistry};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};

/// A line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Quit,
    New,
    Help,
    Guess(String),
}

/// Interpret one line of input; anything that is not a command is a guess
#[must_use]
pub fn parse_command(input: &str) -> PlayCommand {
    let trimmed = input.trim();
    match trimmed.to_lowercase().as_str() {
        "quit" | "q" | "exit" => PlayCommand::Quit,
        "new" | "n" => PlayCommand::New,
        "help" | "?" => PlayCommand::Help,
        _ => PlayCommand::Guess(trimmed.to_string()),
    }
}

/// Settings for an interactive game
pub struct PlayConfig {
    pub owner: OwnerKey,
    pub rules: ModeConfig,
}

impl PlayConfig {
    #[must_use]
    pub fn new(rules: ModeConfig) -> Self {
        Self {
            owner: OwnerKey::from("player"),
            rules,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.rules.mode
    }
}

/// Run the interactive game loop until the player quits or stdin closes
///
/// # Errors
///
/// Returns an error if reading from stdin fails or a game cannot be started
/// from `source`.
pub fn run_play(
    registry: &SessionRegistry,
    config: &PlayConfig,
    source: &dyn TargetSource,
) -> Result<()> {
    let mode = config.mode();
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", format!("{} - Interactive Mode", mode.name()));
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help(mode);

    start_game(registry, config, source)?;

    loop {
        let Some(input) = get_user_input("Guess")? else {
            finish(registry, config);
            return Ok(());
        };

        match parse_command(&input) {
            PlayCommand::Quit => {
                finish(registry, config);
                return Ok(());
            }
            PlayCommand::New => {
                reveal_and_abandon(registry, config);
                println!("\n🔄 New game started!\n");
                start_game(registry, config, source)?;
            }
            PlayCommand::Help => print_help(mode),
            PlayCommand::Guess(raw) if raw.is_empty() => {}
            PlayCommand::Guess(raw) => match registry.submit_guess(&config.owner, mode, &raw) {
                Ok(result) => {
                    let handle = registry.get(&config.owner, mode)?;
                    let session = handle.lock();
                    print_session(&session);
                    if result.is_terminal() {
                        print_game_over(&session);
                        drop(session);
                        if !ask_play_again()? {
                            finish(registry, config);
                            return Ok(());
                        }
                        println!("\n🔄 New game started!\n");
                        start_game(registry, config, source)?;
                    }
                }
                Err(error) => print_error(&error),
            },
        }
    }
}

/// Start a game, replacing a finished one if present
fn start_game(
    registry: &SessionRegistry,
    config: &PlayConfig,
    source: &dyn TargetSource,
) -> Result<()> {
    let handle = registry
        .create(&config.owner, config.rules.clone(), source)
        .context("could not start a game")?;
    print_session(&handle.lock());
    Ok(())
}

fn reveal_and_abandon(registry: &SessionRegistry, config: &PlayConfig) {
    if let Ok(session) = registry.abandon(&config.owner, config.mode())
        && !session.is_terminal()
    {
        let targets: Vec<String> = session
            .boards()
            .iter()
            .map(|board| board.target().text().to_uppercase())
            .collect();
        println!("The answer was {}", targets.join(" / ").bright_yellow().bold());
    }
}

fn finish(registry: &SessionRegistry, config: &PlayConfig) {
    reveal_and_abandon(registry, config);
    println!("\n👋 Thanks for playing!\n");
}

fn print_help(mode: GameMode) {
    match mode {
        GameMode::Mathle => {
            println!("Guess the hidden equation, e.g. 12+7=19. Use digits and + - * / =.");
        }
        GameMode::Feudle => println!("Guess the word missing from the sentence."),
        GameMode::Duordle => println!("Solve both words with one shared set of guesses."),
        GameMode::Wordle => println!("Guess the five-letter word."),
    }
    println!(
        "  {} right spot   {} elsewhere   {} not in the answer",
        " G ".black().on_green(),
        " Y ".black().on_yellow(),
        " - ".white().on_bright_black()
    );
    println!("Commands: 'quit' to exit, 'new' for new game, 'help' for this text\n");
}

fn ask_play_again() -> Result<bool> {
    Ok(get_user_input("Play again? (yes/no)")?
        .is_some_and(|answer| matches!(answer.to_lowercase().as_str(), "yes" | "y")))
}

/// Get user input with a prompt; `None` once stdin is closed
fn get_user_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}
