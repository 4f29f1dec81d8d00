//! # Products API
//!
//! CRUD for the product catalog.

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
use crate::records::Product;
use crate::state::AppState;

/// Request to create or update a product.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub code: Option<String>,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub unit_cost: f64,
    pub color: Option<String>,
}

impl Validate for ProductRequest {
    fn validate(&self) -> Result<(), String> {
        require_name(&self.name, "name")?;
        require_non_negative(self.unit_cost, "unit_cost")
    }
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/products", get(list_products).post(create_product))
        .route("/v1/products/:id", put(update_product).delete(delete_product))
}

/// GET /v1/products — List catalog products.
#[utoipa::path(
    get,
    path = "/v1/products",
    responses(
        (status = 200, description = "All products", body = [Product]),
    ),
    tag = "products"
)]
pub(crate) async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(db::products::list(&state.pool).await?))
}

/// POST /v1/products — Create a product.
#[utoipa::path(
    post,
    path = "/v1/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "products"
)]
pub(crate) async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let req = extract_validated_json(body)?;
    let product = db::products::insert(
        &state.pool,
        req.code.as_deref(),
        &req.name,
        req.description.as_deref(),
        req.unit_cost,
        req.color.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /v1/products/:id — Update a product.
#[utoipa::path(
    put,
    path = "/v1/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "products"
)]
pub(crate) async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let req = extract_validated_json(body)?;
    let product = db::products::update(
        &state.pool,
        id,
        req.code.as_deref(),
        &req.name,
        req.description.as_deref(),
        req.unit_cost,
        req.color.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::record_not_found("product", id))?;
    Ok(Json(product))
}

/// DELETE /v1/products/:id — Remove a product and, by cascade, the orders
/// and logs that reference it.
#[utoipa::path(
    delete,
    path = "/v1/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "products"
)]
pub(crate) async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !db::products::delete(&state.pool, id).await? {
        return Err(AppError::record_not_found("product", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
