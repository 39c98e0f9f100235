//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the game works out of the box.
//! The cue delay window is fixed and deliberately absent from this file.

use chrono::format::{Item, StrftimeItems};
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid hold_key {0:?}: expected a single character or \"space\"")]
    InvalidHoldKey(String),
    #[error("invalid logging level {0:?}: expected error, warn, info, debug or trace")]
    InvalidLogLevel(String),
    #[error("invalid timestamp_format {0:?}: not a valid strftime pattern")]
    InvalidTimestampFormat(String),
}

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Check the fields that are stored as free-form strings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ui.check_timestamp_format()?;
        self.input.hold_key_code()?;
        self.logging.level()?;
        Ok(())
    }
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// chrono strftime pattern for the scores list.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default)]
    pub bell_on_too_soon: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            bell_on_too_soon: false,
        }
    }
}

impl UiConfig {
    /// Formatting with an unknown specifier fails at render time, so reject it on load.
    pub fn check_timestamp_format(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidTimestampFormat(
                self.timestamp_format.clone(),
            ));
        }
        Ok(())
    }
}

/// How press and release are generated from terminal input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_hold_key")]
    pub hold_key: String,
    #[serde(default = "default_true")]
    pub mouse: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            hold_key: default_hold_key(),
            mouse: true,
        }
    }
}

impl InputConfig {
    pub fn hold_key_code(&self) -> Result<KeyCode, ConfigError> {
        if self.hold_key == " " || self.hold_key.trim().eq_ignore_ascii_case("space") {
            return Ok(KeyCode::Char(' '));
        }
        let mut chars = self.hold_key.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(KeyCode::Char(c.to_ascii_lowercase())),
            _ => Err(ConfigError::InvalidHoldKey(self.hold_key.clone())),
        }
    }
}

/// Diagnostic log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        self.level
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.level.clone()))
    }
}

fn default_true() -> bool {
    true
}
fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S%.3f".to_string()
}
fn default_hold_key() -> String {
    "space".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    match dirs::data_dir() {
        Some(dir) => dir.join("reaction-time").join("logs").display().to_string(),
        None => "~/.local/share/reaction-time/logs".to_string(),
    }
}
