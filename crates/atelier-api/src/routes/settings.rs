//! # Settings API
//!
//! Company information and the manager's profile — both singleton rows,
//! created with defaults on first read.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, require_name, Validate};
use crate::records::{CompanyInfo, Settings, UserProfile};
use crate::state::AppState;

/// Request to update company information.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCompanyRequest {
    pub name: String,
    pub cnpj: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Validate for UpdateCompanyRequest {
    fn validate(&self) -> Result<(), String> {
        require_name(&self.name, "name")
    }
}

/// Request to update the user profile.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> Result<(), String> {
        require_name(&self.name, "name")
    }
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/settings", get(get_settings))
        .route("/v1/settings/company", put(update_company))
        .route("/v1/settings/profile", put(update_profile))
}

/// GET /v1/settings — Company info and user profile.
#[utoipa::path(
    get,
    path = "/v1/settings",
    responses(
        (status = 200, description = "Current settings", body = Settings),
    ),
    tag = "settings"
)]
pub(crate) async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, AppError> {
    let company = db::settings::get_or_create_company(&state.pool).await?;
    let profile = db::settings::get_or_create_profile(&state.pool).await?;
    Ok(Json(Settings { company, profile }))
}

/// PUT /v1/settings/company — Update company information.
#[utoipa::path(
    put,
    path = "/v1/settings/company",
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = CompanyInfo),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "settings"
)]
pub(crate) async fn update_company(
    State(state): State<AppState>,
    body: Result<Json<UpdateCompanyRequest>, JsonRejection>,
) -> Result<Json<CompanyInfo>, AppError> {
    let req = extract_validated_json(body)?;
    let company = db::settings::update_company(
        &state.pool,
        &req.name,
        req.cnpj.as_deref(),
        req.address.as_deref(),
        req.phone.as_deref(),
        req.email.as_deref(),
    )
    .await?;
    Ok(Json(company))
}

/// PUT /v1/settings/profile — Update the user profile.
#[utoipa::path(
    put,
    path = "/v1/settings/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "settings"
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UserProfile>, AppError> {
    let req = extract_validated_json(body)?;
    let profile = db::settings::update_profile(
        &state.pool,
        &req.name,
        req.email.as_deref(),
        req.role.as_deref(),
    )
    .await?;
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_request_requires_name() {
        let req = UpdateCompanyRequest {
            name: "".to_string(),
            cnpj: None,
            address: None,
            phone: None,
            email: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn profile_request_accepts_minimal_body() {
        let req = UpdateProfileRequest {
            name: "Ana".to_string(),
            email: None,
            role: None,
        };
        assert!(req.validate().is_ok());
    }
}
