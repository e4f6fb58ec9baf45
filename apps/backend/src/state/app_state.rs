use sea_orm::DatabaseConnection;

use crate::config::engine::EngineConfig;

/// Shared resources handed to the engine services
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: EngineConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: EngineConfig) -> Self {
        Self { db, config }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
