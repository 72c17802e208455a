use std::sync::Arc;

use sqlx::sqlite::SqlitePool;

use crate::config::Config;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Shared by every handler; built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Result<Self, UpstreamError> {
        Ok(Self {
            pool,
            upstream: Arc::new(UpstreamClient::new(config)?),
        })
    }
}
