//! Product catalog persistence operations.

use sqlx::SqlitePool;

use crate::records::Product;

const COLUMNS: &str = "id, code, name, description, unit_cost, color";

/// List all products.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products ORDER BY id"))
        .fetch_all(pool)
        .await
}

/// Fetch a product by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a new product and return the stored record.
pub async fn insert(
    pool: &SqlitePool,
    code: Option<&str>,
    name: &str,
    description: Option<&str>,
    unit_cost: f64,
    color: Option<&str>,
) -> Result<Product, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO products (code, name, description, unit_cost, color)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(code)
    .bind(name)
    .bind(description)
    .bind(unit_cost)
    .bind(color)
    .execute(pool)
    .await?;

    sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = ?"))
        .bind(result.last_insert_rowid())
        .fetch_one(pool)
        .await
}

/// Update a product. Returns the updated record, or `None` if the id is absent.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    code: Option<&str>,
    name: &str,
    description: Option<&str>,
    unit_cost: f64,
    color: Option<&str>,
) -> Result<Option<Product>, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE products SET code = ?, name = ?, description = ?, unit_cost = ?, color = ?
         WHERE id = ?",
    )
    .bind(code)
    .bind(name)
    .bind(description)
    .bind(unit_cost)
    .bind(color)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_by_id(pool, id).await
}

/// Delete a product. Orders referencing it (and their logs) cascade away.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
