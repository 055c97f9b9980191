/// Shared application state
use crate::config::ServerConfig;
use muse_extractor::VideoProvider;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub provider: Arc<dyn VideoProvider>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        provider: Arc<dyn VideoProvider>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            pool,
            provider,
            config,
        }
    }
}
