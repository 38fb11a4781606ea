//! Configuration loading and typed config structures.
//!
//! The configuration lives in `tanaman-config.yaml` at the project root.
//! Every field has a default, so an empty file (or no file) yields a
//! playable setup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable that overrides `storage.save_dir`.
pub const SAVE_DIR_ENV: &str = "TANAMAN_SAVE_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Timing and randomness.
    #[serde(default)]
    pub game: GameSection,

    /// Where snapshots are kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file.
    ///
    /// `TANAMAN_SAVE_DIR` overrides `storage.save_dir`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.storage.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the session runner cannot work with.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.game.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "game.tick_interval_ms",
                reason: "must be positive",
            });
        }
        if self.game.autosave_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "game.autosave_interval_ms",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

/// Timing and randomness settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameSection {
    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Milliseconds between autosaves.
    #[serde(default = "default_autosave_interval_ms")]
    pub autosave_interval_ms: u64,

    /// Offline gaps longer than this get a "welcome back" notice.
    #[serde(default = "default_offline_threshold_ms")]
    pub offline_threshold_ms: i64,

    /// Fixed random seed; entropy when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            autosave_interval_ms: default_autosave_interval_ms(),
            offline_threshold_ms: default_offline_threshold_ms(),
            rng_seed: None,
        }
    }
}

/// Snapshot storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `<state_key>.json`.
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,

    /// Key the snapshot is stored under.
    #[serde(default = "default_state_key")]
    pub state_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            state_key: default_state_key(),
        }
    }
}

impl StorageConfig {
    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(SAVE_DIR_ENV) {
            if !val.trim().is_empty() {
                self.save_dir = PathBuf::from(val);
            }
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_tick_interval_ms() -> u64 {
    1_000
}

const fn default_autosave_interval_ms() -> u64 {
    5_000
}

const fn default_offline_threshold_ms() -> i64 {
    tanaman_types::catalog::LONG_ABSENCE_MS
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("saves")
}

fn default_state_key() -> String {
    "tanamanTycoonState".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}
