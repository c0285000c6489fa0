//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `HAVEN_DB_PATH`: Database file path (required)
//! - `HAVEN_DB_POOL_SIZE`: Connection pool size (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./haven.json` or `./haven.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)

use std::path::{Path, PathBuf};

use haven_domain::constants::DEFAULT_POOL_SIZE;
use haven_domain::{Config, DatabaseConfig, HavenError, Result};
use tracing::{debug, info};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `HavenError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(err) => {
            debug!(error = ?err, "failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `HAVEN_DB_PATH` must be present; `HAVEN_DB_POOL_SIZE` defaults when
/// absent.
///
/// # Errors
/// Returns `HavenError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<Config> {
    let path = env_var("HAVEN_DB_PATH")?;
    let pool_size = match std::env::var("HAVEN_DB_POOL_SIZE") {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|err| HavenError::Config(format!("invalid pool size: {err}")))?,
        Err(_) => DEFAULT_POOL_SIZE,
    };

    Ok(Config { database: DatabaseConfig { path, pool_size } })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `HavenError::Config` if the file is missing, unreadable, has an
/// unsupported extension, or fails to parse.
pub fn load_from_file(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(explicit) => explicit.to_path_buf(),
        None => probe_config_paths()
            .into_iter()
            .find(|candidate| candidate.exists())
            .ok_or_else(|| HavenError::Config("no config file found".into()))?,
    };

    let contents = std::fs::read_to_string(&path).map_err(|err| {
        HavenError::Config(format!("failed to read {}: {err}", path.display()))
    })?;

    let config = parse_config(&path, &contents)?;
    info!(path = %path.display(), "configuration loaded from file");
    Ok(config)
}

fn parse_config(path: &Path, contents: &str) -> Result<Config> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(contents)
            .map_err(|err| HavenError::Config(format!("invalid JSON config: {err}"))),
        Some("toml") => toml::from_str(contents)
            .map_err(|err| HavenError::Config(format!("invalid TOML config: {err}"))),
        other => Err(HavenError::Config(format!(
            "unsupported config format: {}",
            other.unwrap_or("none")
        ))),
    }
}

fn probe_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for dir in [".", "..", "../.."] {
        for name in ["config", "haven"] {
            for ext in ["json", "toml"] {
                paths.push(PathBuf::from(format!("{dir}/{name}.{ext}")));
            }
        }
    }
    paths
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| HavenError::Config(format!("missing environment variable: {name}")))
}
