//! # Production Logs API
//!
//! The kanban board's write path. Queuing and editing are plain CRUD; the
//! status endpoints run the transition engine inside the persistence
//! layer's read-decide-write transaction and return the mutated record.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use atelier_core::WorkStatus;

use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, require_id, Validate};
use crate::records::{LogWithDetails, ProductionLog};
use crate::state::AppState;

/// Request to queue (or directly start) work against an order.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLogRequest {
    pub order_id: i64,
    pub operator_id: i64,
    pub operation_id: i64,
}

impl Validate for CreateLogRequest {
    fn validate(&self) -> Result<(), String> {
        require_id(self.order_id, "order_id")?;
        require_id(self.operator_id, "operator_id")?;
        require_id(self.operation_id, "operation_id")
    }
}

/// Request for a full edit of a log. Timestamps are written verbatim —
/// this is the edit-screen path, not a transition.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLogRequest {
    pub order_id: i64,
    pub operator_id: i64,
    pub operation_id: i64,
    #[schema(value_type = String, example = "waiting")]
    pub status: WorkStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Validate for UpdateLogRequest {
    fn validate(&self) -> Result<(), String> {
        require_id(self.order_id, "order_id")?;
        require_id(self.operator_id, "operator_id")?;
        require_id(self.operation_id, "operation_id")
    }
}

/// Request to transition a log's status. Serde already enforces the status
/// vocabulary, so there are no further rules to validate.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetLogStatusRequest {
    #[schema(value_type = String, example = "in_production")]
    pub status: WorkStatus,
}

/// Build the production-logs router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/production-logs", get(list_logs).post(create_log))
        .route("/v1/production-logs/start", post(start_log))
        .route("/v1/production-logs/:id", put(update_log).delete(delete_log))
        .route("/v1/production-logs/:id/status", patch(set_log_status))
        .route("/v1/production-logs/:id/finish", post(finish_log))
}

/// GET /v1/production-logs — List logs with board display names.
#[utoipa::path(
    get,
    path = "/v1/production-logs",
    responses(
        (status = 200, description = "All production logs", body = [LogWithDetails]),
    ),
    tag = "production_logs"
)]
pub(crate) async fn list_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<LogWithDetails>>, AppError> {
    Ok(Json(db::production_logs::list_with_details(&state.pool).await?))
}

/// POST /v1/production-logs — Queue work (status `waiting`).
#[utoipa::path(
    post,
    path = "/v1/production-logs",
    request_body = CreateLogRequest,
    responses(
        (status = 201, description = "Log queued", body = ProductionLog),
        (status = 422, description = "Invalid request or unknown reference", body = crate::error::ErrorBody),
    ),
    tag = "production_logs"
)]
pub(crate) async fn create_log(
    State(state): State<AppState>,
    body: Result<Json<CreateLogRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductionLog>), AppError> {
    let req = extract_validated_json(body)?;
    let log = db::production_logs::insert_queued(
        &state.pool,
        req.order_id,
        req.operator_id,
        req.operation_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// POST /v1/production-logs/start — Start work immediately: the log is
/// created `in_production` with `start_time` stamped, and a `planned`
/// parent order is pulled into production.
#[utoipa::path(
    post,
    path = "/v1/production-logs/start",
    request_body = CreateLogRequest,
    responses(
        (status = 201, description = "Log started", body = ProductionLog),
        (status = 422, description = "Invalid request or unknown reference", body = crate::error::ErrorBody),
    ),
    tag = "production_logs"
)]
pub(crate) async fn start_log(
    State(state): State<AppState>,
    body: Result<Json<CreateLogRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductionLog>), AppError> {
    let req = extract_validated_json(body)?;
    let log = db::production_logs::insert_started(
        &state.pool,
        req.order_id,
        req.operator_id,
        req.operation_id,
        Utc::now(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// PUT /v1/production-logs/:id — Full edit of a log.
#[utoipa::path(
    put,
    path = "/v1/production-logs/{id}",
    params(("id" = i64, Path, description = "Log id")),
    request_body = UpdateLogRequest,
    responses(
        (status = 200, description = "Log updated", body = ProductionLog),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "production_logs"
)]
pub(crate) async fn update_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateLogRequest>, JsonRejection>,
) -> Result<Json<ProductionLog>, AppError> {
    let req = extract_validated_json(body)?;
    let log = db::production_logs::update(
        &state.pool,
        id,
        req.order_id,
        req.operator_id,
        req.operation_id,
        req.status,
        req.start_time,
        req.end_time,
    )
    .await?
    .ok_or_else(|| AppError::record_not_found("production log", id))?;
    Ok(Json(log))
}

/// PATCH /v1/production-logs/:id/status — Transition a log.
///
/// Runs the transition engine: timestamp side effects are applied and a
/// `planned` parent order is pulled into production when work starts.
#[utoipa::path(
    patch,
    path = "/v1/production-logs/{id}/status",
    params(("id" = i64, Path, description = "Log id")),
    request_body = SetLogStatusRequest,
    responses(
        (status = 200, description = "Transition applied", body = ProductionLog),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 422, description = "Unrecognized status", body = crate::error::ErrorBody),
    ),
    tag = "production_logs"
)]
pub(crate) async fn set_log_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<SetLogStatusRequest>, JsonRejection>,
) -> Result<Json<ProductionLog>, AppError> {
    let req = extract_json(body)?;
    let log = db::production_logs::transition(&state.pool, id, req.status, Utc::now())
        .await?
        .ok_or_else(|| AppError::record_not_found("production log", id))?;
    Ok(Json(log))
}

/// POST /v1/production-logs/:id/finish — Finish shortcut.
///
/// Equivalent to PATCH `/status` with `{"status": "finished"}`.
#[utoipa::path(
    post,
    path = "/v1/production-logs/{id}/finish",
    params(("id" = i64, Path, description = "Log id")),
    responses(
        (status = 200, description = "Log finished", body = ProductionLog),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "production_logs"
)]
pub(crate) async fn finish_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductionLog>, AppError> {
    let log = db::production_logs::transition(&state.pool, id, WorkStatus::Finished, Utc::now())
        .await?
        .ok_or_else(|| AppError::record_not_found("production log", id))?;
    Ok(Json(log))
}

/// DELETE /v1/production-logs/:id — Remove a log.
#[utoipa::path(
    delete,
    path = "/v1/production-logs/{id}",
    params(("id" = i64, Path, description = "Log id")),
    responses(
        (status = 204, description = "Log deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "production_logs"
)]
pub(crate) async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !db::production_logs::delete(&state.pool, id).await? {
        return Err(AppError::record_not_found("production log", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_rejects_non_positive_ids() {
        let req: CreateLogRequest =
            serde_json::from_str(r#"{"order_id": 0, "operator_id": 1, "operation_id": 1}"#)
                .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_log_status_fails_deserialization() {
        let result = serde_json::from_str::<SetLogStatusRequest>(r#"{"status": "paused"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn status_request_accepts_the_three_statuses() {
        for status in ["waiting", "in_production", "finished"] {
            let body = format!(r#"{{"status": "{status}"}}"#);
            assert!(serde_json::from_str::<SetLogStatusRequest>(&body).is_ok());
        }
    }
}
