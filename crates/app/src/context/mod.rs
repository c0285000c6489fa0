//! Application context - dependency injection container

use std::sync::Arc;

use haven_core::engagement::ports::StateRepository;
use haven_core::EngagementService;
use haven_domain::{Config, Result};
use haven_infra::database::{DbManager, SqliteStateRepository};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    /// Loaded configuration
    pub config: Config,
    /// Shared database manager
    pub db: Arc<DbManager>,
    /// Engagement tracking service
    pub engagement: Arc<EngagementService>,
}

impl AppContext {
    /// Build the full dependency graph from configuration.
    ///
    /// Order: database pool, schema migrations, health check, state
    /// repository, engagement service primed from persisted state.
    pub fn init(config: Config) -> Result<Arc<Self>> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;
        db.health_check()?;

        let repository: Arc<dyn StateRepository> =
            Arc::new(SqliteStateRepository::new(Arc::clone(&db)));
        let engagement = Arc::new(EngagementService::load(repository)?);

        info!(db_path = %config.database.path, "application context initialised");
        Ok(Arc::new(Self { config, db, engagement }))
    }
}
