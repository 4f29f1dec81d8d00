//! # Dashboard API
//!
//! Aggregated figures for the dashboard header cards.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::db;
use crate::error::AppError;
use crate::records::DashboardSummary;
use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/dashboard", get(summary))
}

/// GET /v1/dashboard — Aggregated production figures.
#[utoipa::path(
    get,
    path = "/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary),
    ),
    tag = "dashboard"
)]
pub(crate) async fn summary(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = db::dashboard::summary(&state.pool).await?;
    Ok(Json(summary))
}
