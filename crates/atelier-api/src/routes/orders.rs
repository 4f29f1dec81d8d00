//! # Production Orders API
//!
//! Order CRUD plus the explicit status-set path. Status changes made here
//! never involve the transition engine — only log transitions cascade.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use atelier_core::{OrderStatus, Priority};

use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, require_id, Validate};
use crate::records::{OrderWithProduct, ProductionOrder};
use crate::state::AppState;

/// Request to create a production order.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub code: Option<String>,
    pub product_id: i64,
    pub quantity: i64,
    pub entry_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = String, example = "medium")]
    pub priority: Priority,
}

impl Validate for CreateOrderRequest {
    fn validate(&self) -> Result<(), String> {
        require_id(self.product_id, "product_id")?;
        if self.quantity < 1 {
            return Err("quantity must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Request to update a production order. `entry_date` is not editable.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub code: Option<String>,
    pub product_id: i64,
    pub quantity: i64,
    pub delivery_date: Option<NaiveDate>,
    #[schema(value_type = String, example = "medium")]
    pub priority: Priority,
    #[schema(value_type = String, example = "planned")]
    pub status: OrderStatus,
}

impl Validate for UpdateOrderRequest {
    fn validate(&self) -> Result<(), String> {
        require_id(self.product_id, "product_id")?;
        if self.quantity < 1 {
            return Err("quantity must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Request to set an order's status directly. Serde already enforces the
/// status vocabulary, so there are no further rules to validate.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetOrderStatusRequest {
    #[schema(value_type = String, example = "in_production")]
    pub status: OrderStatus,
}

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/orders", get(list_orders).post(create_order))
        .route("/v1/orders/:id", put(update_order).delete(delete_order))
        .route("/v1/orders/:id/status", patch(set_order_status))
}

/// GET /v1/orders — List orders with their product names.
#[utoipa::path(
    get,
    path = "/v1/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderWithProduct]),
    ),
    tag = "orders"
)]
pub(crate) async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderWithProduct>>, AppError> {
    Ok(Json(db::orders::list_with_product(&state.pool).await?))
}

/// POST /v1/orders — Create an order (status starts `planned`).
#[utoipa::path(
    post,
    path = "/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ProductionOrder),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
pub(crate) async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductionOrder>), AppError> {
    let req = extract_validated_json(body)?;
    let order = db::orders::insert(
        &state.pool,
        req.code.as_deref(),
        req.product_id,
        req.quantity,
        req.entry_date,
        req.delivery_date,
        req.priority,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /v1/orders/:id — Update an order.
#[utoipa::path(
    put,
    path = "/v1/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = ProductionOrder),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
pub(crate) async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Json<ProductionOrder>, AppError> {
    let req = extract_validated_json(body)?;
    let order = db::orders::update(
        &state.pool,
        id,
        req.code.as_deref(),
        req.product_id,
        req.quantity,
        req.delivery_date,
        req.priority,
        req.status,
    )
    .await?
    .ok_or_else(|| AppError::record_not_found("order", id))?;
    Ok(Json(order))
}

/// PATCH /v1/orders/:id/status — Set an order's status directly.
#[utoipa::path(
    patch,
    path = "/v1/orders/{id}/status",
    params(("id" = i64, Path, description = "Order id")),
    request_body = SetOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ProductionOrder),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 422, description = "Unrecognized status", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
pub(crate) async fn set_order_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<SetOrderStatusRequest>, JsonRejection>,
) -> Result<Json<ProductionOrder>, AppError> {
    let req = extract_json(body)?;
    if !db::orders::set_status(&state.pool, id, req.status).await? {
        return Err(AppError::record_not_found("order", id));
    }
    let order = db::orders::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::record_not_found("order", id))?;
    Ok(Json(order))
}

/// DELETE /v1/orders/:id — Remove an order and, by cascade, its logs.
#[utoipa::path(
    delete,
    path = "/v1/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "orders"
)]
pub(crate) async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !db::orders::delete(&state.pool, id).await? {
        return Err(AppError::record_not_found("order", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
