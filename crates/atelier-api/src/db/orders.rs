//! Production-order persistence operations.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};

use atelier_core::{OrderStatus, Priority};

use crate::records::{OrderWithProduct, ProductionOrder};

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    code: Option<String>,
    product_id: i64,
    quantity: i64,
    entry_date: Option<NaiveDate>,
    delivery_date: Option<NaiveDate>,
    priority: String,
    status: String,
}

impl OrderRow {
    fn into_record(self) -> ProductionOrder {
        ProductionOrder {
            id: self.id,
            code: self.code,
            product_id: self.product_id,
            quantity: self.quantity,
            entry_date: self.entry_date,
            delivery_date: self.delivery_date,
            priority: super::parse_priority(&self.priority),
            status: super::parse_order_status(&self.status),
        }
    }
}

/// Internal row type for the orders-with-product listing.
#[derive(sqlx::FromRow)]
struct OrderWithProductRow {
    id: i64,
    code: Option<String>,
    product_id: i64,
    product_name: String,
    quantity: i64,
    entry_date: Option<NaiveDate>,
    delivery_date: Option<NaiveDate>,
    priority: String,
    status: String,
}

impl OrderWithProductRow {
    fn into_record(self) -> OrderWithProduct {
        OrderWithProduct {
            id: self.id,
            code: self.code,
            product_id: self.product_id,
            product_name: self.product_name,
            quantity: self.quantity,
            entry_date: self.entry_date,
            delivery_date: self.delivery_date,
            priority: super::parse_priority(&self.priority),
            status: super::parse_order_status(&self.status),
        }
    }
}

const COLUMNS: &str = "id, code, product_id, quantity, entry_date, delivery_date, priority, status";

/// List all orders joined with their product's name.
pub async fn list_with_product(pool: &SqlitePool) -> Result<Vec<OrderWithProduct>, sqlx::Error> {
    let rows = sqlx::query_as::<_, OrderWithProductRow>(
        "SELECT po.id, po.code, po.product_id, p.name AS product_name, po.quantity,
                po.entry_date, po.delivery_date, po.priority, po.status
         FROM production_orders po
         JOIN products p ON po.product_id = p.id
         ORDER BY po.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(OrderWithProductRow::into_record).collect())
}

/// Fetch an order by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<ProductionOrder>, sqlx::Error> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {COLUMNS} FROM production_orders WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(OrderRow::into_record))
}

/// Insert a new order (status starts `planned`) and return the stored record.
#[allow(clippy::too_many_arguments)]
pub async fn insert(
    pool: &SqlitePool,
    code: Option<&str>,
    product_id: i64,
    quantity: i64,
    entry_date: Option<NaiveDate>,
    delivery_date: Option<NaiveDate>,
    priority: Priority,
) -> Result<ProductionOrder, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO production_orders (code, product_id, quantity, entry_date, delivery_date, priority)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(code)
    .bind(product_id)
    .bind(quantity)
    .bind(entry_date)
    .bind(delivery_date)
    .bind(priority.as_str())
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {COLUMNS} FROM production_orders WHERE id = ?"
    ))
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;
    Ok(row.into_record())
}

/// Update an order's editable columns. `entry_date` is set at creation and
/// not editable. Returns the updated record, or `None` if the id is absent.
#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    code: Option<&str>,
    product_id: i64,
    quantity: i64,
    delivery_date: Option<NaiveDate>,
    priority: Priority,
    status: OrderStatus,
) -> Result<Option<ProductionOrder>, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE production_orders
         SET code = ?, product_id = ?, quantity = ?, delivery_date = ?, priority = ?, status = ?
         WHERE id = ?",
    )
    .bind(code)
    .bind(product_id)
    .bind(quantity)
    .bind(delivery_date)
    .bind(priority.as_str())
    .bind(status.as_str())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_by_id(pool, id).await
}

/// Set an order's status directly (the explicit status-set path, distinct
/// from the log-transition cascade). Returns whether a row was updated.
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    status: OrderStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE production_orders SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Read an order's current status inside a transaction (the read half of
/// the cascade's read-decide-write sequence).
pub(crate) async fn get_status(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<OrderStatus>, sqlx::Error> {
    let status: Option<String> =
        sqlx::query_scalar("SELECT status FROM production_orders WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(status.map(|s| super::parse_order_status(&s)))
}

/// Write an order's status inside a transaction (the write half of the
/// cascade).
pub(crate) async fn set_status_in_tx(
    conn: &mut SqliteConnection,
    id: i64,
    status: OrderStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE production_orders SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Delete an order. Its production logs cascade away.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM production_orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
