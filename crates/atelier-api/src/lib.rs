//! # atelier-api — Axum API for the Atelier Production Backend
//!
//! Production-management backend for a garment workshop: raw-material
//! stock, product catalog, team roster, manufacturing operations,
//! production orders, and time-tracked production logs, persisted in
//! SQLite and presented to the dashboard and kanban-board frontends.
//!
//! ## API Surface
//!
//! | Prefix                  | Module                        | Domain              |
//! |-------------------------|-------------------------------|---------------------|
//! | `/v1/dashboard`         | [`routes::dashboard`]         | Aggregated figures  |
//! | `/v1/settings/*`        | [`routes::settings`]          | Company & profile   |
//! | `/v1/supplies/*`        | [`routes::supplies`]          | Raw-material stock  |
//! | `/v1/products/*`        | [`routes::products`]          | Product catalog     |
//! | `/v1/team/*`            | [`routes::team`]              | Shop-floor roster   |
//! | `/v1/operations/*`      | [`routes::operations`]        | Manufacturing steps |
//! | `/v1/orders/*`          | [`routes::orders`]            | Production orders   |
//! | `/v1/production-logs/*` | [`routes::production_logs`]   | Work records & transitions |
//!
//! Health probes (`/health/*`) and `/openapi.json` round out the surface.
//!
//! ## Layering
//!
//! Handlers validate requests and delegate to [`db`], which owns all SQL.
//! The status-transition rules live in `atelier-state` as pure functions;
//! the persistence layer applies them inside read-decide-write
//! transactions so a transition and its order cascade commit atomically.

pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod records;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::dashboard::router())
        .merge(routes::settings::router())
        .merge(routes::supplies::router())
        .merge(routes::products::router())
        .merge(routes::team::router())
        .merge(routes::operations::router())
        .merge(routes::orders::router())
        .merge(routes::production_logs::router())
        .merge(openapi::router())
        // Body size limit: 1 MiB. The API carries catalog rows and status
        // changes, never file uploads.
        .layer(DefaultBodyLimit::max(1024 * 1024));

    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the database answers a trivial query.
///
/// Returns 200 "ready" or 503 with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, "ready").into_response(),
        Err(e) => {
            tracing::warn!("database health check failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response()
        }
    }
}
