//! # Domain Records
//!
//! The persisted record types returned by the API. Tables whose columns map
//! directly onto Rust types derive `sqlx::FromRow` here; tables carrying
//! status/priority vocabularies are decoded through raw row types in the
//! [`crate::db`] modules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use atelier_core::{OrderStatus, Priority, WorkStatus};

/// Company information shown on the settings screen (singleton row).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct CompanyInfo {
    pub id: i64,
    pub name: String,
    pub cnpj: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// The workshop manager's profile (singleton row).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Company and profile bundled for the settings screen.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Settings {
    pub company: CompanyInfo,
    pub profile: UserProfile,
}

/// A raw-material stock item.
///
/// `initial_quantity` is fixed at creation so consumption can be read off
/// the difference; routine edits only touch the other columns.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Supply {
    pub id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub min_stock: f64,
    pub initial_quantity: f64,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub code: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub unit_cost: f64,
    pub color: Option<String>,
}

/// A named manufacturing step (cutting, sewing, finishing, ...).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Operation {
    pub id: i64,
    pub code: Option<String>,
    pub description: String,
    #[schema(value_type = String, example = "waiting")]
    pub status: WorkStatus,
}

/// A member of the shop-floor team.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub role: String,
}

/// A unit of planned manufacturing work for a product and quantity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductionOrder {
    pub id: i64,
    pub code: Option<String>,
    pub product_id: i64,
    pub quantity: i64,
    pub entry_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    #[schema(value_type = String, example = "medium")]
    pub priority: Priority,
    #[schema(value_type = String, example = "planned")]
    pub status: OrderStatus,
}

/// A production order joined with its product's name, as listed on the
/// orders screen.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderWithProduct {
    pub id: i64,
    pub code: Option<String>,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub entry_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    #[schema(value_type = String, example = "medium")]
    pub priority: Priority,
    #[schema(value_type = String, example = "planned")]
    pub status: OrderStatus,
}

/// A time-tracked record of one operator performing one operation against
/// one production order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductionLog {
    pub id: i64,
    pub order_id: i64,
    pub operator_id: i64,
    pub operation_id: i64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[schema(value_type = String, example = "waiting")]
    pub status: WorkStatus,
}

/// A production log joined with the names shown on the kanban board.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogWithDetails {
    pub id: i64,
    pub order_id: i64,
    pub order_code: Option<String>,
    pub product_name: String,
    pub operator_id: i64,
    pub operator_name: String,
    pub operation_id: i64,
    pub operation_description: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[schema(value_type = String, example = "waiting")]
    pub status: WorkStatus,
}

/// Aggregated figures for the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    /// Orders not yet finished.
    pub active_orders: i64,
    /// Supplies at or below their minimum stock level.
    pub low_stock_alerts: i64,
    /// Sum of quantities across finished orders.
    pub total_produced: i64,
    /// Shop-floor efficiency percentage.
    pub efficiency: f64,
}
