//! Team roster persistence operations.

use sqlx::SqlitePool;

use crate::records::TeamMember;

/// List all team members.
pub async fn list(pool: &SqlitePool) -> Result<Vec<TeamMember>, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>("SELECT id, name, role FROM team ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Fetch a team member by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<TeamMember>, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>("SELECT id, name, role FROM team WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a new team member and return the stored record.
pub async fn insert(pool: &SqlitePool, name: &str, role: &str) -> Result<TeamMember, sqlx::Error> {
    let result = sqlx::query("INSERT INTO team (name, role) VALUES (?, ?)")
        .bind(name)
        .bind(role)
        .execute(pool)
        .await?;

    sqlx::query_as::<_, TeamMember>("SELECT id, name, role FROM team WHERE id = ?")
        .bind(result.last_insert_rowid())
        .fetch_one(pool)
        .await
}

/// Update a team member. Returns the updated record, or `None` if absent.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    role: &str,
) -> Result<Option<TeamMember>, sqlx::Error> {
    let result = sqlx::query("UPDATE team SET name = ?, role = ? WHERE id = ?")
        .bind(name)
        .bind(role)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_by_id(pool, id).await
}

/// Delete a team member. Their production logs cascade away.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM team WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
