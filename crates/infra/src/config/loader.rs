//! Configuration loader
//!
//! Resolves the application configuration in three layers:
//! 1. A config file: `FIELDLOG_CONFIG_PATH` if set, otherwise the working
//!    directory is probed for `fieldlog.config.json` / `fieldlog.config.toml`
//! 2. Built-in defaults when no file exists
//! 3. Environment overrides applied on top of whatever was loaded
//!
//! ## Environment Variables
//! - `FIELDLOG_CONFIG_PATH`: explicit config file path
//! - `FIELDLOG_DB_PATH`: database file path
//! - `FIELDLOG_USER_ID`: acting user id
//! - `FIELDLOG_OUTPUT_DIR`: export output directory
//! - `FIELDLOG_TICK_MS`: stopwatch display cadence in milliseconds
//! - `FIELDLOG_FLUSH_MS`: snapshot flush cadence in milliseconds

use std::path::{Path, PathBuf};

use fieldlog_domain::{FieldLogError, Result};
use tracing::{debug, info};

use super::AppConfig;

const CONFIG_PATH_VAR: &str = "FIELDLOG_CONFIG_PATH";

/// Load the configuration with the full fallback chain.
///
/// A missing config file is fine (defaults apply); a file that exists but
/// cannot be parsed is a hard error, as is an invalid final configuration.
///
/// # Errors
/// Returns `FieldLogError::Config` if an explicitly named file is missing,
/// a found file fails to parse, an override has an invalid value, or the
/// merged result fails validation.
pub fn load() -> Result<AppConfig> {
    let explicit = std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);

    let mut config = match explicit {
        Some(path) => load_from_file(Some(path))?,
        None => match probe_config_paths() {
            Some(path) => load_from_file(Some(path))?,
            None => {
                debug!("No config file found, using defaults");
                AppConfig::default()
            }
        },
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the working directory via
/// [`probe_config_paths`]. Format is detected by extension (`.json` or
/// `.toml`).
///
/// # Errors
/// Returns `FieldLogError::Config` if the file is missing (when named), no
/// file is found (when probing), or the contents fail to parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FieldLogError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            FieldLogError::Config("No config file found in the working directory".to_string())
        })?,
    };

    info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| FieldLogError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format chosen by extension.
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FieldLogError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FieldLogError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(FieldLogError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the working directory for a configuration file.
///
/// # Returns
/// The first of `fieldlog.config.json` / `fieldlog.config.toml` that
/// exists, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let candidates = [cwd.join("fieldlog.config.json"), cwd.join("fieldlog.config.toml")];

    candidates.into_iter().find(|path| path.exists())
}

/// Apply `FIELDLOG_*` environment overrides on top of a loaded config.
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Some(path) = env_path("FIELDLOG_DB_PATH") {
        config.database.path = path;
    }
    if let Some(dir) = env_path("FIELDLOG_OUTPUT_DIR") {
        config.export.output_dir = dir;
    }
    if let Ok(id) = std::env::var("FIELDLOG_USER_ID") {
        config.user.id = id;
    }
    if let Some(ms) = env_u64("FIELDLOG_TICK_MS")? {
        config.timer.tick_interval_ms = ms;
    }
    if let Some(ms) = env_u64("FIELDLOG_FLUSH_MS")? {
        config.timer.flush_interval_ms = ms;
    }
    Ok(())
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from)
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| FieldLogError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}
