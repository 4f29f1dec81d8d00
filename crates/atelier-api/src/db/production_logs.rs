//! Production-log persistence operations, including the status-transition
//! path that drives the kanban board.
//!
//! The transition is an explicit read-decide-write sequence inside one
//! transaction: read the log, apply the pure engine, write the log fields,
//! then read the parent order's status and apply the cascade decision. The
//! guard condition (only a `planned` order is pulled into production) lives
//! in `atelier-state`, not in a WHERE clause, so it is testable without a
//! database.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use atelier_core::WorkStatus;
use atelier_state::{apply_log_status, order_cascade, LogSnapshot};

use crate::records::{LogWithDetails, ProductionLog};

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct LogRow {
    id: i64,
    order_id: i64,
    operator_id: i64,
    operation_id: i64,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    status: String,
}

impl LogRow {
    fn into_record(self) -> ProductionLog {
        ProductionLog {
            id: self.id,
            order_id: self.order_id,
            operator_id: self.operator_id,
            operation_id: self.operation_id,
            start_time: self.start_time,
            end_time: self.end_time,
            status: super::parse_work_status(&self.status),
        }
    }
}

/// Internal row type for the board listing.
#[derive(sqlx::FromRow)]
struct LogWithDetailsRow {
    id: i64,
    order_id: i64,
    order_code: Option<String>,
    product_name: String,
    operator_id: i64,
    operator_name: String,
    operation_id: i64,
    operation_description: String,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    status: String,
}

impl LogWithDetailsRow {
    fn into_record(self) -> LogWithDetails {
        LogWithDetails {
            id: self.id,
            order_id: self.order_id,
            order_code: self.order_code,
            product_name: self.product_name,
            operator_id: self.operator_id,
            operator_name: self.operator_name,
            operation_id: self.operation_id,
            operation_description: self.operation_description,
            start_time: self.start_time,
            end_time: self.end_time,
            status: super::parse_work_status(&self.status),
        }
    }
}

const COLUMNS: &str = "id, order_id, operator_id, operation_id, start_time, end_time, status";

/// List all logs joined with the names shown on the board.
pub async fn list_with_details(pool: &SqlitePool) -> Result<Vec<LogWithDetails>, sqlx::Error> {
    let rows = sqlx::query_as::<_, LogWithDetailsRow>(
        "SELECT pl.id, pl.order_id, po.code AS order_code, p.name AS product_name,
                pl.operator_id, t.name AS operator_name,
                pl.operation_id, o.description AS operation_description,
                pl.start_time, pl.end_time, pl.status
         FROM production_logs pl
         JOIN production_orders po ON pl.order_id = po.id
         JOIN products p ON po.product_id = p.id
         JOIN team t ON pl.operator_id = t.id
         JOIN operations o ON pl.operation_id = o.id
         ORDER BY pl.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(LogWithDetailsRow::into_record).collect())
}

/// Fetch a log by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<ProductionLog>, sqlx::Error> {
    let row = sqlx::query_as::<_, LogRow>(&format!(
        "SELECT {COLUMNS} FROM production_logs WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(LogRow::into_record))
}

async fn get_by_id_in_tx(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<ProductionLog>, sqlx::Error> {
    let row = sqlx::query_as::<_, LogRow>(&format!(
        "SELECT {COLUMNS} FROM production_logs WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(row.map(LogRow::into_record))
}

/// Queue work against an order: status `waiting`, no timestamps.
pub async fn insert_queued(
    pool: &SqlitePool,
    order_id: i64,
    operator_id: i64,
    operation_id: i64,
) -> Result<ProductionLog, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO production_logs (order_id, operator_id, operation_id, status)
         VALUES (?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(operator_id)
    .bind(operation_id)
    .bind(WorkStatus::Waiting.as_str())
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, LogRow>(&format!(
        "SELECT {COLUMNS} FROM production_logs WHERE id = ?"
    ))
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;
    Ok(row.into_record())
}

/// Start work directly: insert the log already `in_production` with
/// `start_time = now`, and pull a `planned` parent order into production.
/// Both writes commit atomically.
pub async fn insert_started(
    pool: &SqlitePool,
    order_id: i64,
    operator_id: i64,
    operation_id: i64,
    now: DateTime<Utc>,
) -> Result<ProductionLog, sqlx::Error> {
    let update = apply_log_status(&LogSnapshot::queued(), WorkStatus::InProduction, now);

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO production_logs (order_id, operator_id, operation_id, start_time, end_time, status)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(operator_id)
    .bind(operation_id)
    .bind(update.start_time)
    .bind(update.end_time)
    .bind(update.status.as_str())
    .execute(&mut *tx)
    .await?;
    let id = result.last_insert_rowid();

    cascade_to_order(&mut tx, order_id, WorkStatus::InProduction).await?;

    let log = get_by_id_in_tx(&mut tx, id).await?;
    tx.commit().await?;

    // The row was inserted in this transaction; absence would be a bug.
    log.ok_or(sqlx::Error::RowNotFound)
}

/// Full edit of a log (the edit-screen path): references, status, and
/// timestamps are written verbatim. Returns the updated record, or `None`
/// if the id is absent.
#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    order_id: i64,
    operator_id: i64,
    operation_id: i64,
    status: WorkStatus,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
) -> Result<Option<ProductionLog>, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE production_logs
         SET order_id = ?, operator_id = ?, operation_id = ?, status = ?, start_time = ?, end_time = ?
         WHERE id = ?",
    )
    .bind(order_id)
    .bind(operator_id)
    .bind(operation_id)
    .bind(status.as_str())
    .bind(start_time)
    .bind(end_time)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_by_id(pool, id).await
}

/// Apply a status transition to a log and cascade to its parent order,
/// atomically. Returns the mutated log, or `None` if the id is absent.
pub async fn transition(
    pool: &SqlitePool,
    id: i64,
    target: WorkStatus,
    now: DateTime<Utc>,
) -> Result<Option<ProductionLog>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(log) = get_by_id_in_tx(&mut tx, id).await? else {
        return Ok(None);
    };

    let snapshot = LogSnapshot {
        status: log.status,
        start_time: log.start_time,
        end_time: log.end_time,
    };
    let update = apply_log_status(&snapshot, target, now);

    sqlx::query("UPDATE production_logs SET status = ?, start_time = ?, end_time = ? WHERE id = ?")
        .bind(update.status.as_str())
        .bind(update.start_time)
        .bind(update.end_time)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    cascade_to_order(&mut tx, log.order_id, target).await?;

    tx.commit().await?;

    tracing::debug!(log_id = id, status = %update.status, "production log transitioned");

    Ok(Some(ProductionLog {
        status: update.status,
        start_time: update.start_time,
        end_time: update.end_time,
        ..log
    }))
}

/// Read the parent order's status, ask the engine whether the transition
/// cascades, and write the new order status when it does.
async fn cascade_to_order(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order_id: i64,
    target: WorkStatus,
) -> Result<(), sqlx::Error> {
    if let Some(order_status) = super::orders::get_status(&mut *tx, order_id).await? {
        if let Some(next) = order_cascade(target, order_status) {
            super::orders::set_status_in_tx(&mut *tx, order_id, next).await?;
            tracing::debug!(order_id, status = %next, "order status cascaded");
        }
    }
    Ok(())
}

/// Delete a log. Returns whether a row was removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM production_logs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
