//! Game configuration loaded from an optional TOML file.

use derive_getters::Getters;
use derive_more::{Display, Error};
use generals_rules::{Player, RuleOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "GENERALS_CONFIG";

/// Config file used when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "generals.toml";

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Setup file replayed by the `loadsample` command.
    #[serde(default = "default_setup_file")]
    setup_file: PathBuf,

    /// Whether pieces may step diagonally.
    #[serde(default = "default_diagonal_moves")]
    diagonal_moves: bool,

    /// Player who moves first (`"W"` or `"B"`).
    #[serde(default = "default_first_player")]
    first_player: Player,
}

fn default_setup_file() -> PathBuf {
    PathBuf::from("sample.gggn")
}

fn default_diagonal_moves() -> bool {
    true
}

fn default_first_player() -> Player {
    Player::White
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            setup_file: default_setup_file(),
            diagonal_moves: default_diagonal_moves(),
            first_player: default_first_player(),
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

        info!(setup_file = %config.setup_file.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads `path` like [`Self::load_or_default`], falling back to the
    /// defaults when the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_or_fallback(path: &Path) -> Self {
        Self::load_or_default(path).unwrap_or_else(|error| {
            warn!(%error, "Ignoring unusable config, using defaults");
            Self::default()
        })
    }

    /// Rules derived from this configuration.
    pub fn rule_options(&self) -> RuleOptions {
        RuleOptions {
            diagonal_moves: self.diagonal_moves,
            first_player: self.first_player,
        }
    }
}

/// Path of the config file: `$GENERALS_CONFIG` or `generals.toml`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
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
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
