//! Configuration loading and management
//!
//! This module defines the application configuration sections and a loader
//! that resolves them from an optional config file plus environment
//! overrides.

pub mod loader;

use std::path::PathBuf;

use fieldlog_domain::constants::{TIMER_FLUSH_INTERVAL_MS, TIMER_TICK_INTERVAL_MS};
use fieldlog_domain::{FieldLogError, Result};
use serde::{Deserialize, Serialize};

// Re-export commonly used items
pub use loader::{load, load_from_file, probe_config_paths};

/// Application configuration.
///
/// Every section has working defaults so a config file is optional and may
/// set only the fields it cares about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub timer: TimerSection,
    pub export: ExportSection,
    pub user: UserSection,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Path of the SQLite file.
    pub path: PathBuf,
    /// Connection pool size.
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self { path: default_data_dir().join("fieldlog.db"), max_connections: 4 }
    }
}

/// Stopwatch cadence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSection {
    /// Display refresh cadence in milliseconds.
    pub tick_interval_ms: u64,
    /// Snapshot flush cadence in milliseconds.
    pub flush_interval_ms: u64,
}

impl Default for TimerSection {
    fn default() -> Self {
        Self {
            tick_interval_ms: TIMER_TICK_INTERVAL_MS,
            flush_interval_ms: TIMER_FLUSH_INTERVAL_MS,
        }
    }
}

/// Report export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Directory exported report files are written into.
    pub output_dir: PathBuf,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self { output_dir: PathBuf::from(".") }
    }
}

/// Acting-user configuration.
///
/// The app is single-user; the id exists so stored rows stay portable if a
/// real account system ever fronts this data again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSection {
    pub id: String,
}

impl Default for UserSection {
    fn default() -> Self {
        Self { id: "local".to_string() }
    }
}

impl AppConfig {
    /// Check invariants that would otherwise surface as runtime failures.
    ///
    /// # Errors
    /// Returns `FieldLogError::Config` when an interval is zero or the user
    /// id is blank.
    pub fn validate(&self) -> Result<()> {
        if self.timer.tick_interval_ms == 0 {
            return Err(FieldLogError::Config("timer.tick_interval_ms must be > 0".into()));
        }
        if self.timer.flush_interval_ms == 0 {
            return Err(FieldLogError::Config("timer.flush_interval_ms must be > 0".into()));
        }
        if self.user.id.trim().is_empty() {
            return Err(FieldLogError::Config("user.id must not be empty".into()));
        }
        Ok(())
    }
}

/// Default data directory: `$XDG_DATA_HOME/fieldlog`, falling back to
/// `~/.local/share/fieldlog`, falling back to the working directory when no
/// home is resolvable.
fn default_data_dir() -> PathBuf {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return PathBuf::from(value).join("fieldlog");
        }
    }
    match std::env::var("HOME") {
        Ok(home) if !home.trim().is_empty() => {
            PathBuf::from(home).join(".local").join("share").join("fieldlog")
        }
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timer.tick_interval_ms, 250);
        assert_eq!(config.timer.flush_interval_ms, 5_000);
        assert_eq!(config.user.id, "local");
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let mut config = AppConfig::default();
        config.timer.tick_interval_ms = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, FieldLogError::Config(_)));
    }

    #[test]
    fn blank_user_id_is_rejected() {
        let mut config = AppConfig::default();
        config.user.id = "   ".into();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, FieldLogError::Config(_)));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_sections() {
        let config: AppConfig = toml::from_str("[user]\nid = \"maria\"\n").expect("parses");

        assert_eq!(config.user.id, "maria");
        assert_eq!(config.timer.tick_interval_ms, 250);
        assert_eq!(config.database.max_connections, 4);
    }
}
