//! Diagnostic logging to disk.
//!
//! The terminal owns stdout while the game runs, so `tracing` output goes to a
//! daily file named `reaction-time_<date>.log` in the configured log directory
//! (default: `~/.local/share/reaction-time/logs/`). Nothing is installed when
//! logging is disabled, and the `tracing` macros become no-ops.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Install the global subscriber. Returns the log file path when logging is on.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let level = config.level()?;
    let log_dir = expand_home(&config.log_dir, dirs::home_dir().as_deref());
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let path = log_dir.join(log_file_name(&date));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(Some(path))
}

fn log_file_name(date: &str) -> String {
    format!("reaction-time_{}.log", date)
}

// Expand a leading ~ in log_dir
fn expand_home(dir: &str, home: Option<&Path>) -> PathBuf {
    match (dir.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if dir == "~" => home.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(dir)),
        _ => PathBuf::from(dir),
    }
}
