//! Engine configuration
//!
//! Loaded from JSON. Every field is optional; anything left out keeps the
//! canonical rules from [`ModeConfig::for_mode`].
//!
//! ```json
//! {
//!   "registry": { "idle_timeout_secs": 600 },
//!   "modes": {
//!     "feudle": { "check_dictionary": true },
//!     "mathle": { "unlimited": true }
//!   }
//! }
//! ```

use crate::error::ConfigError;
use crate::game::{GameMode, ModeConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default inactivity window before a session is reaped (30 minutes)
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Sessions untouched for this long are dropped by `reap_idle`
    pub idle_timeout_secs: u64,
}

impl RegistryConfig {
    #[must_use]
    pub fn idle_timeout(&self) -> chrono::Duration {
        i64::try_from(self.idle_timeout_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
        }
    }
}

/// Per-mode overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeSettings {
    pub attempt_limit: Option<usize>,
    /// Remove the attempt limit entirely; wins over `attempt_limit`
    pub unlimited: bool,
    pub check_dictionary: Option<bool>,
}

impl ModeSettings {
    #[must_use]
    pub fn apply(&self, mut config: ModeConfig) -> ModeConfig {
        if self.unlimited {
            config.attempt_limit = None;
        } else if let Some(limit) = self.attempt_limit {
            config.attempt_limit = Some(limit);
        }
        if let Some(check) = self.check_dictionary {
            config.check_dictionary = check;
        }
        config
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub registry: RegistryConfig,
    pub modes: BTreeMap<GameMode, ModeSettings>,
}

impl EngineConfig {
    /// Read and validate a JSON config file
    ///
    /// # Errors
    /// Returns `Io` or `Json` if the file cannot be read or parsed, and any
    /// rule error from [`EngineConfig::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// # Errors
    /// Same as [`EngineConfig::from_file`], minus I/O.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Effective rules for `mode`
    #[must_use]
    pub fn mode(&self, mode: GameMode) -> ModeConfig {
        let base = ModeConfig::for_mode(mode);
        match self.modes.get(&mode) {
            Some(settings) => settings.apply(base),
            None => base,
        }
    }

    /// Mutable overrides for `mode`, created on first use
    pub fn settings_mut(&mut self, mode: GameMode) -> &mut ModeSettings {
        self.modes.entry(mode).or_default()
    }

    /// # Errors
    /// Returns the first mode whose effective rules are unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        GameMode::ALL
            .into_iter()
            .try_for_each(|mode| self.mode(mode).validate())
    }
}
