use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;

/// The shared application state.
///
/// Holds everything handlers need: the database pool, the configuration
/// (explicit struct, handed to handlers at construction time rather than
/// read from process-global state), and the operational counters. Cloneable
/// for use with Axum's state extraction.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: sqlx::SqlitePool,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// The application metrics.
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        Self { db, config: Arc::new(config), metrics: Metrics::new() }
    }
}
