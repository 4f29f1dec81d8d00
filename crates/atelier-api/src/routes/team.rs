//! # Team API
//!
//! CRUD for the shop-floor roster. Operators referenced by production logs
//! cascade those logs away on deletion.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, require_name, Validate};
use crate::records::TeamMember;
use crate::state::AppState;

/// Request to create or update a team member.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TeamMemberRequest {
    pub name: String,
    pub role: String,
}

impl Validate for TeamMemberRequest {
    fn validate(&self) -> Result<(), String> {
        require_name(&self.name, "name")?;
        require_name(&self.role, "role")
    }
}

/// Build the team router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/team", get(list_team).post(create_team_member))
        .route("/v1/team/:id", put(update_team_member).delete(delete_team_member))
}

/// GET /v1/team — List team members.
#[utoipa::path(
    get,
    path = "/v1/team",
    responses(
        (status = 200, description = "All team members", body = [TeamMember]),
    ),
    tag = "team"
)]
pub(crate) async fn list_team(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    Ok(Json(db::team::list(&state.pool).await?))
}

/// POST /v1/team — Add a team member.
#[utoipa::path(
    post,
    path = "/v1/team",
    request_body = TeamMemberRequest,
    responses(
        (status = 201, description = "Team member added", body = TeamMember),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "team"
)]
pub(crate) async fn create_team_member(
    State(state): State<AppState>,
    body: Result<Json<TeamMemberRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TeamMember>), AppError> {
    let req = extract_validated_json(body)?;
    let member = db::team::insert(&state.pool, &req.name, &req.role).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /v1/team/:id — Update a team member.
#[utoipa::path(
    put,
    path = "/v1/team/{id}",
    params(("id" = i64, Path, description = "Team member id")),
    request_body = TeamMemberRequest,
    responses(
        (status = 200, description = "Team member updated", body = TeamMember),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "team"
)]
pub(crate) async fn update_team_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<TeamMemberRequest>, JsonRejection>,
) -> Result<Json<TeamMember>, AppError> {
    let req = extract_validated_json(body)?;
    let member = db::team::update(&state.pool, id, &req.name, &req.role)
        .await?
        .ok_or_else(|| AppError::record_not_found("team member", id))?;
    Ok(Json(member))
}

/// DELETE /v1/team/:id — Remove a team member.
#[utoipa::path(
    delete,
    path = "/v1/team/{id}",
    params(("id" = i64, Path, description = "Team member id")),
    responses(
        (status = 204, description = "Team member deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "team"
)]
pub(crate) async fn delete_team_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !db::team::delete(&state.pool, id).await? {
        return Err(AppError::record_not_found("team member", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
