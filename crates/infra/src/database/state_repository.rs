//! SQLite-backed engagement state repository.
//!
//! Stores the whole engagement state as one named, versioned JSON blob —
//! the same shape the client persists: a single row keyed by store name.
//! A version mismatch on load is treated as no stored state; there is no
//! migration path beyond the version tag.

use std::sync::Arc;

use chrono::Utc;
use haven_core::engagement::ports::StateRepository;
use haven_domain::constants::{STORE_NAME, STORE_VERSION};
use haven_domain::{EngagementState, HavenError, Result};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, warn};

use super::manager::DbManager;
use crate::errors::InfraError;

const UPSERT_STATE_SQL: &str = "INSERT INTO engagement_store (name, version, state_json, updated_at)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(name) DO UPDATE SET
        version = excluded.version,
        state_json = excluded.state_json,
        updated_at = excluded.updated_at";

const SELECT_STATE_SQL: &str =
    "SELECT version, state_json FROM engagement_store WHERE name = ?1";

/// Engagement state repository backed by the shared database manager.
pub struct SqliteStateRepository {
    db: Arc<DbManager>,
}

impl SqliteStateRepository {
    /// Construct a repository backed by the shared database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

impl StateRepository for SqliteStateRepository {
    fn load(&self) -> Result<Option<EngagementState>> {
        let conn = self.db.get_connection()?;
        let row: Option<(u32, String)> = conn
            .query_row(SELECT_STATE_SQL, params![STORE_NAME], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .map_err(map_sql_error)?;

        let Some((version, state_json)) = row else {
            debug!(store = STORE_NAME, "no persisted engagement state");
            return Ok(None);
        };

        if version != STORE_VERSION {
            warn!(
                stored = version,
                current = STORE_VERSION,
                "discarding engagement state with mismatched schema version"
            );
            return Ok(None);
        }

        let state = serde_json::from_str(&state_json)
            .map_err(|err| HavenError::from(InfraError::from(err)))?;
        Ok(Some(state))
    }

    fn save(&self, state: &EngagementState) -> Result<()> {
        let state_json = serde_json::to_string(state)
            .map_err(|err| HavenError::from(InfraError::from(err)))?;

        let conn = self.db.get_connection()?;
        conn.execute(
            UPSERT_STATE_SQL,
            params![STORE_NAME, STORE_VERSION, state_json, Utc::now().timestamp()],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }
}

fn map_sql_error(err: rusqlite::Error) -> HavenError {
    HavenError::from(InfraError::from(err))
}
