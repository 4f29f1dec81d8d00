//! Manufacturing-operation persistence operations.

use sqlx::SqlitePool;

use atelier_core::WorkStatus;

use crate::records::Operation;

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct OperationRow {
    id: i64,
    code: Option<String>,
    description: String,
    status: String,
}

impl OperationRow {
    fn into_record(self) -> Operation {
        Operation {
            id: self.id,
            code: self.code,
            description: self.description,
            status: super::parse_work_status(&self.status),
        }
    }
}

const COLUMNS: &str = "id, code, description, status";

/// List all operations.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Operation>, sqlx::Error> {
    let rows = sqlx::query_as::<_, OperationRow>(&format!(
        "SELECT {COLUMNS} FROM operations ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(OperationRow::into_record).collect())
}

/// Fetch an operation by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Operation>, sqlx::Error> {
    let row = sqlx::query_as::<_, OperationRow>(&format!(
        "SELECT {COLUMNS} FROM operations WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(OperationRow::into_record))
}

/// Insert a new operation and return the stored record.
pub async fn insert(
    pool: &SqlitePool,
    code: Option<&str>,
    description: &str,
    status: WorkStatus,
) -> Result<Operation, sqlx::Error> {
    let result = sqlx::query("INSERT INTO operations (code, description, status) VALUES (?, ?, ?)")
        .bind(code)
        .bind(description)
        .bind(status.as_str())
        .execute(pool)
        .await?;

    let row = sqlx::query_as::<_, OperationRow>(&format!(
        "SELECT {COLUMNS} FROM operations WHERE id = ?"
    ))
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;
    Ok(row.into_record())
}

/// Update an operation. Returns the updated record, or `None` if absent.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    code: Option<&str>,
    description: &str,
    status: WorkStatus,
) -> Result<Option<Operation>, sqlx::Error> {
    let result =
        sqlx::query("UPDATE operations SET code = ?, description = ?, status = ? WHERE id = ?")
            .bind(code)
            .bind(description)
            .bind(status.as_str())
            .bind(id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_by_id(pool, id).await
}

/// Delete an operation. Production logs referencing it cascade away.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM operations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
