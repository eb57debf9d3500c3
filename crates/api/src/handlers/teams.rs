//! Handlers for the `/teams` resource.

use ajfses_core::error::CoreError;
use ajfses_core::types::DbId;
use ajfses_core::validation::{normalize_optional, require_text};
use ajfses_db::models::team::{CreateTeam, Team, TeamWithMembers, UpdateTeam};
use ajfses_db::repositories::{MemberRepo, TeamRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/teams
pub async fn list_teams(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Team>>>> {
    let teams = TeamRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: teams }))
}

/// GET /api/v1/teams/details
///
/// Every team with its members, empty teams included.
pub async fn list_team_details(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TeamWithMembers>>>> {
    let teams = TeamRepo::list_with_members(&state.pool).await?;
    Ok(Json(DataResponse { data: teams }))
}

/// GET /api/v1/teams/{id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Team>>> {
    let team = TeamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Team", id)))?;
    Ok(Json(DataResponse { data: team }))
}

/// POST /api/v1/teams
pub async fn create_team(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<DataResponse<Team>>)> {
    let input = CreateTeam {
        title: require_text("title", Some(&input.title))?,
    };
    let team = TeamRepo::create(&state.pool, &input).await?;

    tracing::info!(team_id = team.id, user_id = admin.user_id, "Team created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: team })))
}

/// PUT /api/v1/teams/{id}
pub async fn update_team(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeam>,
) -> AppResult<Json<DataResponse<Team>>> {
    let input = UpdateTeam {
        title: normalize_optional(input.title.as_deref()),
    };
    let team = TeamRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Team", id)))?;

    tracing::info!(team_id = id, user_id = admin.user_id, "Team updated");
    Ok(Json(DataResponse { data: team }))
}

/// DELETE /api/v1/teams/{id}
///
/// Refused with 409 while members still belong to the team.
pub async fn delete_team(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let members = MemberRepo::count_by_team(&state.pool, id).await?;
    if members > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Team {id} still has {members} member(s)"
        ))));
    }

    // A member added after the count still trips the foreign key (409).
    let deleted = TeamRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Team", id)));
    }

    tracing::info!(team_id = id, user_id = admin.user_id, "Team deleted");
    Ok(StatusCode::NO_CONTENT)
}
