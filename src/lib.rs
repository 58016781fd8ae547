//! Wordle Engine
//!
//! Puzzle evaluation and session core for Wordle, Feudle, Duordle and Mathle:
//! duplicate-aware feedback, mode-specific guess validation, multi-board
//! sessions and a thread-safe session registry.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use wordle_engine::config::EngineConfig;
//! use wordle_engine::game::{FixedTargets, GameMode};
//! use wordle_engine::lexicon::Lexicon;
//! use wordle_engine::registry::{OwnerKey, SessionRegistry};
//!
//! let config = EngineConfig::default();
//! let registry = SessionRegistry::new(config.registry.clone(), Arc::new(Lexicon::embedded()));
//! let owner = OwnerKey::from("channel-42");
//!
//! registry
//!     .create(&owner, config.mode(GameMode::Wordle), &FixedTargets::single("speed"))
//!     .unwrap();
//!
//! let result = registry.submit_guess(&owner, GameMode::Wordle, "erase").unwrap();
//! assert_eq!(result.boards[0].feedback.as_ref().unwrap().to_code(), "Y--YY");
//! assert_eq!(result.remaining_attempts, Some(5));
//! ```

// Core domain types
pub mod core;

// Error taxonomy
pub mod error;

// Modes, boards and sessions
pub mod game;

// Session lifecycle
pub mod registry;

// Dictionary and embedded data
pub mod lexicon;

// JSON configuration
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
