//! Configuration structures
//!
//! Plain data carriers; loading strategy lives in the infrastructure layer.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DB_FILE, DEFAULT_POOL_SIZE};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database settings
    pub database: DatabaseConfig,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,

    /// Connection pool size
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: DEFAULT_DB_FILE.to_string(),
                pool_size: DEFAULT_POOL_SIZE,
            },
        }
    }
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}
