use crate::config::db::DbKind;
use crate::config::engine::EngineConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used by tests and embedding hosts)
pub struct StateBuilder {
    db_kind: DbKind,
    config: Option<EngineConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_kind: DbKind::SqliteMemory,
            config: None,
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = kind;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connects, migrates and resolves config (explicit, else environment).
    pub async fn build(self) -> Result<AppState, AppError> {
        let config = match self.config {
            Some(config) => config,
            None => EngineConfig::from_env()?,
        };
        let db = bootstrap_db(self.db_kind).await?;
        Ok(AppState::new(db, config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
