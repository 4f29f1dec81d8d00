//! Raw-material stock persistence operations.

use sqlx::SqlitePool;

use crate::records::Supply;

const COLUMNS: &str = "id, name, quantity, unit, min_stock, initial_quantity";

/// List all supplies.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Supply>, sqlx::Error> {
    sqlx::query_as::<_, Supply>(&format!("SELECT {COLUMNS} FROM supplies ORDER BY id"))
        .fetch_all(pool)
        .await
}

/// Fetch a supply by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Supply>, sqlx::Error> {
    sqlx::query_as::<_, Supply>(&format!("SELECT {COLUMNS} FROM supplies WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a new supply and return the stored record.
pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    quantity: f64,
    unit: &str,
    min_stock: f64,
    initial_quantity: f64,
) -> Result<Supply, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO supplies (name, quantity, unit, min_stock, initial_quantity)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(quantity)
    .bind(unit)
    .bind(min_stock)
    .bind(initial_quantity)
    .execute(pool)
    .await?;

    sqlx::query_as::<_, Supply>(&format!("SELECT {COLUMNS} FROM supplies WHERE id = ?"))
        .bind(result.last_insert_rowid())
        .fetch_one(pool)
        .await
}

/// Update a supply's editable columns. `initial_quantity` is fixed at
/// creation. Returns the updated record, or `None` if the id is absent.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    quantity: f64,
    unit: &str,
    min_stock: f64,
) -> Result<Option<Supply>, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE supplies SET name = ?, quantity = ?, unit = ?, min_stock = ? WHERE id = ?",
    )
    .bind(name)
    .bind(quantity)
    .bind(unit)
    .bind(min_stock)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_by_id(pool, id).await
}

/// Delete a supply. Returns whether a row was removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM supplies WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
