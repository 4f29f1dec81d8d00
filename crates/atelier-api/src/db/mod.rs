//! # Persistence Layer
//!
//! SQLite persistence via SQLx. One module per table, each exposing async
//! functions over `&SqlitePool` (or a transaction connection for the
//! multi-statement paths). Migrations are embedded and run at pool
//! initialization.
//!
//! ## Status columns
//!
//! Status and priority columns hold the snake_case strings defined in
//! `atelier-core`. Reads are tolerant: an unknown value in the database is
//! logged and mapped to the column's default rather than failing the whole
//! query. Writes are strict — unrecognized values are rejected at the API
//! boundary and never reach this layer.

pub mod dashboard;
pub mod operations;
pub mod orders;
pub mod production_logs;
pub mod products;
pub mod settings;
pub mod supplies;
pub mod team;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use atelier_core::{OrderStatus, Priority, WorkStatus};

/// Initialize the SQLite connection pool and run embedded migrations.
///
/// The database file is created when missing and foreign keys are enforced
/// so that deleting an order, product, operator, or operation cascades to
/// the records referencing it.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // An in-memory database exists per connection; with more than one pooled
    // connection every checkout would see a different empty database.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    tracing::info!(url = database_url, "connected to SQLite");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    Ok(pool)
}

pub(crate) fn parse_work_status(s: &str) -> WorkStatus {
    WorkStatus::parse(s).unwrap_or_else(|_| {
        tracing::warn!(status = s, "unknown work status in database, defaulting to waiting");
        WorkStatus::Waiting
    })
}

pub(crate) fn parse_order_status(s: &str) -> OrderStatus {
    OrderStatus::parse(s).unwrap_or_else(|_| {
        tracing::warn!(status = s, "unknown order status in database, defaulting to planned");
        OrderStatus::Planned
    })
}

pub(crate) fn parse_priority(s: &str) -> Priority {
    Priority::parse(s).unwrap_or_else(|_| {
        tracing::warn!(priority = s, "unknown priority in database, defaulting to medium");
        Priority::default()
    })
}
