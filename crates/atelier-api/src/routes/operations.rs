//! # Operations API
//!
//! CRUD for manufacturing steps (cutting, sewing, finishing, ...).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use atelier_core::WorkStatus;

use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, require_name, Validate};
use crate::records::Operation;
use crate::state::AppState;

/// Request to create an operation. Status defaults to `waiting`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOperationRequest {
    pub code: Option<String>,
    pub description: String,
    #[schema(value_type = Option<String>, example = "waiting")]
    pub status: Option<WorkStatus>,
}

impl Validate for CreateOperationRequest {
    fn validate(&self) -> Result<(), String> {
        require_name(&self.description, "description")
    }
}

/// Request to update an operation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOperationRequest {
    pub code: Option<String>,
    pub description: String,
    #[schema(value_type = String, example = "waiting")]
    pub status: WorkStatus,
}

impl Validate for UpdateOperationRequest {
    fn validate(&self) -> Result<(), String> {
        require_name(&self.description, "description")
    }
}

/// Build the operations router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/operations", get(list_operations).post(create_operation))
        .route("/v1/operations/:id", put(update_operation).delete(delete_operation))
}

/// GET /v1/operations — List manufacturing steps.
#[utoipa::path(
    get,
    path = "/v1/operations",
    responses(
        (status = 200, description = "All operations", body = [Operation]),
    ),
    tag = "operations"
)]
pub(crate) async fn list_operations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Operation>>, AppError> {
    Ok(Json(db::operations::list(&state.pool).await?))
}

/// POST /v1/operations — Create a manufacturing step.
#[utoipa::path(
    post,
    path = "/v1/operations",
    request_body = CreateOperationRequest,
    responses(
        (status = 201, description = "Operation created", body = Operation),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "operations"
)]
pub(crate) async fn create_operation(
    State(state): State<AppState>,
    body: Result<Json<CreateOperationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Operation>), AppError> {
    let req = extract_validated_json(body)?;
    let status = req.status.unwrap_or(WorkStatus::Waiting);
    let operation =
        db::operations::insert(&state.pool, req.code.as_deref(), &req.description, status).await?;
    Ok((StatusCode::CREATED, Json(operation)))
}

/// PUT /v1/operations/:id — Update a manufacturing step.
#[utoipa::path(
    put,
    path = "/v1/operations/{id}",
    params(("id" = i64, Path, description = "Operation id")),
    request_body = UpdateOperationRequest,
    responses(
        (status = 200, description = "Operation updated", body = Operation),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "operations"
)]
pub(crate) async fn update_operation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateOperationRequest>, JsonRejection>,
) -> Result<Json<Operation>, AppError> {
    let req = extract_validated_json(body)?;
    let operation =
        db::operations::update(&state.pool, id, req.code.as_deref(), &req.description, req.status)
            .await?
            .ok_or_else(|| AppError::record_not_found("operation", id))?;
    Ok(Json(operation))
}

/// DELETE /v1/operations/:id — Remove a manufacturing step and, by cascade,
/// the production logs that reference it.
#[utoipa::path(
    delete,
    path = "/v1/operations/{id}",
    params(("id" = i64, Path, description = "Operation id")),
    responses(
        (status = 204, description = "Operation deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "operations"
)]
pub(crate) async fn delete_operation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !db::operations::delete(&state.pool, id).await? {
        return Err(AppError::record_not_found("operation", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_fails_deserialization() {
        let result =
            serde_json::from_str::<CreateOperationRequest>(r#"{"description": "Cut", "status": "paused"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn status_defaults_to_waiting_when_absent() {
        let req: CreateOperationRequest =
            serde_json::from_str(r#"{"description": "Cut"}"#).unwrap();
        assert_eq!(req.status, None);
    }
}
