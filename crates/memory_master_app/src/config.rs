//! Game configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use memory_master::{
    GameMode, MATCH_DELAY, MISMATCH_DELAY, MemoryGame, PREVIEW_SECONDS, Timings, deck_rng,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "MEMORY_MASTER_CONFIG";

/// Config file looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "memory_master.toml";

/// Settings for new game sessions.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Mode of the game dealt at startup.
    #[serde(default)]
    default_mode: GameMode,

    /// Seconds the Remember preview lasts.
    #[serde(default = "default_preview_seconds")]
    preview_seconds: u32,

    /// Milliseconds a matched pair stays up before locking in.
    #[serde(default = "default_match_delay_ms")]
    match_delay_ms: u64,

    /// Milliseconds a mismatched pair stays up before turning back down.
    #[serde(default = "default_mismatch_delay_ms")]
    mismatch_delay_ms: u64,

    /// Seed for reproducible shuffles.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_preview_seconds() -> u32 {
    PREVIEW_SECONDS
}

fn default_match_delay_ms() -> u64 {
    MATCH_DELAY.as_millis() as u64
}

fn default_mismatch_delay_ms() -> u64 {
    MISMATCH_DELAY.as_millis() as u64
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_mode: GameMode::default(),
            preview_seconds: default_preview_seconds(),
            match_delay_ms: default_match_delay_ms(),
            mismatch_delay_ms: default_mismatch_delay_ms(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(mode = %config.default_mode, seeded = config.seed.is_some(), "Config loaded");
        Ok(config)
    }

    /// Resolves the config source.
    ///
    /// An explicit path wins and must exist. Otherwise the file named by
    /// `MEMORY_MASTER_CONFIG`, or `memory_master.toml` in the working
    /// directory, is read if present; when it isn't the defaults are used.
    #[instrument(skip(explicit))]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let implicit = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if implicit.exists() {
            return Self::from_file(implicit);
        }
        debug!(path = %implicit.display(), "No config file found, using defaults");
        Ok(Self::default())
    }

    /// Overrides the shuffle seed when one is given.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Overrides the startup mode when one is given.
    pub fn with_default_mode(mut self, mode: Option<GameMode>) -> Self {
        if let Some(mode) = mode {
            self.default_mode = mode;
        }
        self
    }

    /// Game pacing described by this config.
    pub fn timings(&self) -> Timings {
        Timings::new(
            self.preview_seconds,
            Duration::from_millis(self.match_delay_ms),
            Duration::from_millis(self.mismatch_delay_ms),
        )
    }

    /// Builds an idle game with this config's pacing and seed.
    pub fn new_game(&self) -> MemoryGame {
        MemoryGame::new(self.timings(), deck_rng(self.seed))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
