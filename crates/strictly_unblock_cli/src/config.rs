//! Host configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_unblock::ExitRule;
use tracing::{debug, info, instrument};

/// Configuration for the unblock host.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct HostConfig {
    /// How vehicles leave the grid.
    #[serde(default)]
    exit_rule: ExitRule,

    /// Print the board after every move.
    #[serde(default = "default_show_board")]
    show_board: bool,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_show_board() -> bool {
    true
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            exit_rule: ExitRule::default(),
            show_board: default_show_board(),
            log_filter: default_log_filter(),
        }
    }
}

impl HostConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(path, format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(path, format!("Failed to parse config: {}", e)))?;

        info!(exit_rule = %config.exit_rule, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if a path is given, otherwise returns defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Error loading the host configuration file.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error in {}: {} at {}:{}", path.display(), message, file, line)]
pub struct ConfigError {
    /// Config file being loaded.
    pub path: PathBuf,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates an error for the given config file at the caller's location.
    #[track_caller]
    pub fn new(path: impl Into<PathBuf>, message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            path: path.into(),
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
