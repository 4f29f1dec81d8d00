//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor. The record store is SQLite itself — there are no
//! in-memory stores to keep in sync.

use std::sync::Arc;

use sqlx::SqlitePool;

/// Runtime configuration, read from the environment in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the server binds to.
    pub port: u16,
    /// SQLite database URL (e.g. `sqlite:atelier.db`).
    pub database_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: "sqlite:atelier.db".to_string(),
        }
    }
}

/// Shared application state. Cheap to clone — the pool is internally
/// reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool.
    pub pool: SqlitePool,
    /// Runtime configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Assemble state from a connected pool and configuration.
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
