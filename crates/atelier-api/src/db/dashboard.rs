//! Dashboard aggregation queries. Reads store state only — no transition
//! logic lives here.

use sqlx::SqlitePool;

use atelier_core::OrderStatus;

use crate::records::DashboardSummary;

// TODO: derive efficiency from log durations once per-operation time
// standards are recorded; until then the dashboard shows a fixed figure.
const EFFICIENCY_PLACEHOLDER: f64 = 85.0;

/// Compute the dashboard header figures.
pub async fn summary(pool: &SqlitePool) -> Result<DashboardSummary, sqlx::Error> {
    let active_orders: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM production_orders WHERE status != ?")
            .bind(OrderStatus::Finished.as_str())
            .fetch_one(pool)
            .await?;

    let low_stock_alerts: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM supplies WHERE quantity <= min_stock")
            .fetch_one(pool)
            .await?;

    let total_produced: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(quantity), 0) FROM production_orders WHERE status = ?",
    )
    .bind(OrderStatus::Finished.as_str())
    .fetch_one(pool)
    .await?;

    Ok(DashboardSummary {
        active_orders,
        low_stock_alerts,
        total_produced,
        efficiency: EFFICIENCY_PLACEHOLDER,
    })
}
