//! Settings persistence: the singleton company-info and user-profile rows.
//!
//! Both rows are seeded by the initial migration, but the read path still
//! creates them when absent so a hand-edited database keeps working.

use sqlx::SqlitePool;

use crate::records::{CompanyInfo, UserProfile};

const DEFAULT_COMPANY_NAME: &str = "My Atelier";
const DEFAULT_PROFILE_NAME: &str = "Administrator";
const DEFAULT_PROFILE_ROLE: &str = "Manager";

const COMPANY_COLUMNS: &str = "id, name, cnpj, address, phone, email";
const PROFILE_COLUMNS: &str = "id, name, email, role";

/// Fetch the company row, creating the default one when absent.
pub async fn get_or_create_company(pool: &SqlitePool) -> Result<CompanyInfo, sqlx::Error> {
    let existing = sqlx::query_as::<_, CompanyInfo>(&format!(
        "SELECT {COMPANY_COLUMNS} FROM company_info ORDER BY id LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;

    if let Some(company) = existing {
        return Ok(company);
    }

    let result = sqlx::query("INSERT INTO company_info (name) VALUES (?)")
        .bind(DEFAULT_COMPANY_NAME)
        .execute(pool)
        .await?;

    sqlx::query_as::<_, CompanyInfo>(&format!(
        "SELECT {COMPANY_COLUMNS} FROM company_info WHERE id = ?"
    ))
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await
}

/// Fetch the profile row, creating the default one when absent.
pub async fn get_or_create_profile(pool: &SqlitePool) -> Result<UserProfile, sqlx::Error> {
    let existing = sqlx::query_as::<_, UserProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM user_profile ORDER BY id LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;

    if let Some(profile) = existing {
        return Ok(profile);
    }

    let result = sqlx::query("INSERT INTO user_profile (name, role) VALUES (?, ?)")
        .bind(DEFAULT_PROFILE_NAME)
        .bind(DEFAULT_PROFILE_ROLE)
        .execute(pool)
        .await?;

    sqlx::query_as::<_, UserProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM user_profile WHERE id = ?"
    ))
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await
}

/// Update the company row and return it.
pub async fn update_company(
    pool: &SqlitePool,
    name: &str,
    cnpj: Option<&str>,
    address: Option<&str>,
    phone: Option<&str>,
    email: Option<&str>,
) -> Result<CompanyInfo, sqlx::Error> {
    let company = get_or_create_company(pool).await?;

    sqlx::query(
        "UPDATE company_info SET name = ?, cnpj = ?, address = ?, phone = ?, email = ?
         WHERE id = ?",
    )
    .bind(name)
    .bind(cnpj)
    .bind(address)
    .bind(phone)
    .bind(email)
    .bind(company.id)
    .execute(pool)
    .await?;

    sqlx::query_as::<_, CompanyInfo>(&format!(
        "SELECT {COMPANY_COLUMNS} FROM company_info WHERE id = ?"
    ))
    .bind(company.id)
    .fetch_one(pool)
    .await
}

/// Update the profile row and return it.
pub async fn update_profile(
    pool: &SqlitePool,
    name: &str,
    email: Option<&str>,
    role: Option<&str>,
) -> Result<UserProfile, sqlx::Error> {
    let profile = get_or_create_profile(pool).await?;

    sqlx::query("UPDATE user_profile SET name = ?, email = ?, role = ? WHERE id = ?")
        .bind(name)
        .bind(email)
        .bind(role)
        .bind(profile.id)
        .execute(pool)
        .await?;

    sqlx::query_as::<_, UserProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM user_profile WHERE id = ?"
    ))
    .bind(profile.id)
    .fetch_one(pool)
    .await
}
