//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Atelier API — Production Management Backend",
        version = "0.1.0",
        description = "Production-management backend for a garment workshop.\n\nProvides:\n- **Dashboard** aggregation (active orders, low-stock alerts, total produced)\n- **Settings** — company information and manager profile\n- **Catalog CRUD** — supplies, products, team roster, manufacturing operations\n- **Production orders** with priorities and an explicit status-set path\n- **Production logs** — time-tracked work records driven by the kanban board, with transition side effects and the planned-order cascade",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Dashboard ────────────────────────────────────────────────
        crate::routes::dashboard::summary,
        // ── Settings ─────────────────────────────────────────────────
        crate::routes::settings::get_settings,
        crate::routes::settings::update_company,
        crate::routes::settings::update_profile,
        // ── Supplies ─────────────────────────────────────────────────
        crate::routes::supplies::list_supplies,
        crate::routes::supplies::create_supply,
        crate::routes::supplies::update_supply,
        crate::routes::supplies::delete_supply,
        // ── Products ─────────────────────────────────────────────────
        crate::routes::products::list_products,
        crate::routes::products::create_product,
        crate::routes::products::update_product,
        crate::routes::products::delete_product,
        // ── Team ─────────────────────────────────────────────────────
        crate::routes::team::list_team,
        crate::routes::team::create_team_member,
        crate::routes::team::update_team_member,
        crate::routes::team::delete_team_member,
        // ── Operations ───────────────────────────────────────────────
        crate::routes::operations::list_operations,
        crate::routes::operations::create_operation,
        crate::routes::operations::update_operation,
        crate::routes::operations::delete_operation,
        // ── Orders ───────────────────────────────────────────────────
        crate::routes::orders::list_orders,
        crate::routes::orders::create_order,
        crate::routes::orders::update_order,
        crate::routes::orders::set_order_status,
        crate::routes::orders::delete_order,
        // ── Production logs ──────────────────────────────────────────
        crate::routes::production_logs::list_logs,
        crate::routes::production_logs::create_log,
        crate::routes::production_logs::start_log,
        crate::routes::production_logs::update_log,
        crate::routes::production_logs::set_log_status,
        crate::routes::production_logs::finish_log,
        crate::routes::production_logs::delete_log,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            crate::records::CompanyInfo,
            crate::records::UserProfile,
            crate::records::Settings,
            crate::records::Supply,
            crate::records::Product,
            crate::records::Operation,
            crate::records::TeamMember,
            crate::records::ProductionOrder,
            crate::records::OrderWithProduct,
            crate::records::ProductionLog,
            crate::records::LogWithDetails,
            crate::records::DashboardSummary,
            crate::routes::settings::UpdateCompanyRequest,
            crate::routes::settings::UpdateProfileRequest,
            crate::routes::supplies::CreateSupplyRequest,
            crate::routes::supplies::UpdateSupplyRequest,
            crate::routes::products::ProductRequest,
            crate::routes::team::TeamMemberRequest,
            crate::routes::operations::CreateOperationRequest,
            crate::routes::operations::UpdateOperationRequest,
            crate::routes::orders::CreateOrderRequest,
            crate::routes::orders::UpdateOrderRequest,
            crate::routes::orders::SetOrderStatusRequest,
            crate::routes::production_logs::CreateLogRequest,
            crate::routes::production_logs::UpdateLogRequest,
            crate::routes::production_logs::SetLogStatusRequest,
        )
    ),
    tags(
        (name = "dashboard", description = "Aggregated production figures"),
        (name = "settings", description = "Company information and manager profile"),
        (name = "supplies", description = "Raw-material stock"),
        (name = "products", description = "Product catalog"),
        (name = "team", description = "Shop-floor roster"),
        (name = "operations", description = "Manufacturing steps"),
        (name = "orders", description = "Production orders"),
        (name = "production_logs", description = "Time-tracked work records and transitions"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi))
}

/// GET /openapi.json — The assembled spec.
async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
