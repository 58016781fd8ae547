//! Wordle Engine - CLI
//!
//! Play Wordle, Feudle, Duordle and Mathle in the terminal, or check single
//! guesses and equations.

use anyhow::{Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use wordle_engine::{
    commands::{CheckConfig, PlayConfig, check_guess, run_play, validate_equation},
    config::EngineConfig,
    game::{Catalog, FixedTargets, GameMode, TargetSource},
    lexicon::{Dictionary, Lexicon, loader::load_from_file},
    output::{print_check_result, print_equation_report},
    registry::{OwnerKey, SessionRegistry},
};

#[derive(Parser)]
#[command(
    name = "wordle_engine",
    about = "Multi-mode word and number puzzle engine",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON engine config (attempt limits, dictionary checks, idle timeout)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Extra word list file, one word per line, added to the built-in dictionary
    #[arg(short = 'w', long, global = true)]
    wordlist: Option<PathBuf>,

    /// Log verbosity: -v for info, -vv for debug (RUST_LOG overrides)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive game (default)
    Play {
        /// wordle, feudle, duordle or mathle
        #[arg(short, long, default_value = "wordle")]
        mode: GameMode,

        /// Fixed target, repeat once per board; drawn at random otherwise
        #[arg(short, long)]
        target: Vec<String>,

        /// Sentence to blank the Feudle target out of
        #[arg(long, requires = "target")]
        sentence: Option<String>,

        /// Override the attempt limit
        #[arg(short, long, conflicts_with = "unlimited")]
        attempts: Option<usize>,

        /// No attempt limit
        #[arg(long)]
        unlimited: bool,

        /// Accept any well-formed word
        #[arg(long)]
        no_dictionary: bool,

        /// Seed for reproducible random targets
        #[arg(long)]
        seed: Option<u64>,

        /// Session owner name
        #[arg(long, default_value = "player")]
        owner: String,
    },

    /// Score one guess against one target
    Check {
        target: String,
        guess: String,

        #[arg(short, long, default_value = "wordle")]
        mode: GameMode,

        /// Reject guesses missing from the dictionary
        #[arg(long)]
        dictionary: bool,
    },

    /// Check whether an equation is a valid Mathle target
    Validate { equation: String },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_dictionary(wordlist: Option<&PathBuf>) -> Result<Lexicon> {
    let mut lexicon = Lexicon::embedded();
    if let Some(path) = wordlist {
        let extra = load_from_file(path)?;
        tracing::info!(words = extra.len(), path = %path.display(), "loaded word list");
        for word in extra.iter() {
            lexicon.insert(word);
        }
    }
    Ok(lexicon)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut engine = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let dictionary = load_dictionary(cli.wordlist.as_ref())?;

    let command = cli.command.unwrap_or(Commands::Play {
        mode: GameMode::Wordle,
        target: Vec::new(),
        sentence: None,
        attempts: None,
        unlimited: false,
        no_dictionary: false,
        seed: None,
        owner: "player".to_string(),
    });

    match command {
        Commands::Play {
            mode,
            target,
            sentence,
            attempts,
            unlimited,
            no_dictionary,
            seed,
            owner,
        } => {
            let settings = engine.settings_mut(mode);
            if unlimited {
                settings.unlimited = true;
            } else if attempts.is_some() {
                settings.attempt_limit = attempts;
            }
            if no_dictionary {
                settings.check_dictionary = Some(false);
            }
            engine.validate()?;

            let source = target_source(mode, target, sentence, seed)?;
            run_play_command(&engine, Arc::new(dictionary), owner, mode, source.as_ref())
        }
        Commands::Check {
            target,
            guess,
            mode,
            dictionary: check_dictionary,
        } => run_check_command(mode, target, guess, check_dictionary, &dictionary),
        Commands::Validate { equation } => {
            let report = validate_equation(&equation, &engine.mode(GameMode::Mathle));
            print_equation_report(&report);
            if !report.is_valid() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn target_source(
    mode: GameMode,
    target: Vec<String>,
    sentence: Option<String>,
    seed: Option<u64>,
) -> Result<Box<dyn TargetSource>> {
    if let Some(sentence) = sentence {
        let [word] = target.as_slice() else {
            bail!("--sentence needs exactly one --target");
        };
        if mode != GameMode::Feudle {
            bail!("--sentence only applies to Feudle");
        }
        return Ok(Box::new(FixedTargets::feudle(word, &sentence)));
    }
    if !target.is_empty() {
        return Ok(Box::new(FixedTargets::new(target)));
    }

    let catalog = Catalog::embedded();
    Ok(Box::new(match seed {
        Some(seed) => catalog.with_seed(seed),
        None => catalog,
    }))
}

fn run_play_command(
    engine: &EngineConfig,
    dictionary: Arc<dyn Dictionary>,
    owner: String,
    mode: GameMode,
    source: &dyn TargetSource,
) -> Result<()> {
    let registry = SessionRegistry::new(engine.registry.clone(), dictionary);
    let config = PlayConfig {
        owner: OwnerKey::from(owner),
        rules: engine.mode(mode),
    };
    run_play(&registry, &config, source)
}

fn run_check_command(
    mode: GameMode,
    target: String,
    guess: String,
    check_dictionary: bool,
    dictionary: &Lexicon,
) -> Result<()> {
    let mut config = CheckConfig::new(mode, target, guess);
    config.check_dictionary = check_dictionary;
    let result = check_guess(&config, dictionary)?;
    print_check_result(&result);
    Ok(())
}
