//! # Supplies API
//!
//! CRUD for raw-material stock items. The dashboard's low-stock alert
//! counts items whose quantity has fallen to `min_stock` or below.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, require_name, require_non_negative, Validate};
use crate::records::Supply;
use crate::state::AppState;

fn default_unit() -> String {
    "pcs".to_string()
}

/// Request to create a supply.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSupplyRequest {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub min_stock: f64,
    #[serde(default)]
    pub initial_quantity: f64,
}

impl Validate for CreateSupplyRequest {
    fn validate(&self) -> Result<(), String> {
        require_name(&self.name, "name")?;
        require_non_negative(self.quantity, "quantity")?;
        require_non_negative(self.min_stock, "min_stock")?;
        require_non_negative(self.initial_quantity, "initial_quantity")
    }
}

/// Request to update a supply. `initial_quantity` is fixed at creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSupplyRequest {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub min_stock: f64,
}

impl Validate for UpdateSupplyRequest {
    fn validate(&self) -> Result<(), String> {
        require_name(&self.name, "name")?;
        require_non_negative(self.quantity, "quantity")?;
        require_non_negative(self.min_stock, "min_stock")
    }
}

/// Build the supplies router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/supplies", get(list_supplies).post(create_supply))
        .route("/v1/supplies/:id", put(update_supply).delete(delete_supply))
}

/// GET /v1/supplies — List stock items.
#[utoipa::path(
    get,
    path = "/v1/supplies",
    responses(
        (status = 200, description = "All supplies", body = [Supply]),
    ),
    tag = "supplies"
)]
pub(crate) async fn list_supplies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Supply>>, AppError> {
    Ok(Json(db::supplies::list(&state.pool).await?))
}

/// POST /v1/supplies — Create a stock item.
#[utoipa::path(
    post,
    path = "/v1/supplies",
    request_body = CreateSupplyRequest,
    responses(
        (status = 201, description = "Supply created", body = Supply),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "supplies"
)]
pub(crate) async fn create_supply(
    State(state): State<AppState>,
    body: Result<Json<CreateSupplyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Supply>), AppError> {
    let req = extract_validated_json(body)?;
    let supply = db::supplies::insert(
        &state.pool,
        &req.name,
        req.quantity,
        &req.unit,
        req.min_stock,
        req.initial_quantity,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(supply)))
}

/// PUT /v1/supplies/:id — Update a stock item.
#[utoipa::path(
    put,
    path = "/v1/supplies/{id}",
    params(("id" = i64, Path, description = "Supply id")),
    request_body = UpdateSupplyRequest,
    responses(
        (status = 200, description = "Supply updated", body = Supply),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "supplies"
)]
pub(crate) async fn update_supply(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateSupplyRequest>, JsonRejection>,
) -> Result<Json<Supply>, AppError> {
    let req = extract_validated_json(body)?;
    let supply = db::supplies::update(
        &state.pool,
        id,
        &req.name,
        req.quantity,
        &req.unit,
        req.min_stock,
    )
    .await?
    .ok_or_else(|| AppError::record_not_found("supply", id))?;
    Ok(Json(supply))
}

/// DELETE /v1/supplies/:id — Remove a stock item.
#[utoipa::path(
    delete,
    path = "/v1/supplies/{id}",
    params(("id" = i64, Path, description = "Supply id")),
    responses(
        (status = 204, description = "Supply deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "supplies"
)]
pub(crate) async fn delete_supply(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !db::supplies::delete(&state.pool, id).await? {
        return Err(AppError::record_not_found("supply", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
