//! Handlers for the `/members` resource.

use ajfses_core::error::CoreError;
use ajfses_core::images::ImageKind;
use ajfses_core::member::{parse_designations, parse_show_on_home, LEADERSHIP_DESIGNATIONS};
use ajfses_core::types::DbId;
use ajfses_core::validation::{normalize_optional, require_text};
use ajfses_db::models::member::{CreateMember, Member, MemberFilter, UpdateMember};
use ajfses_db::repositories::{MemberRepo, TeamRepo};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::image_flow::{create_with_image, remove_image, update_with_image};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::{UploadForm, ValidatedImage};

const IMAGE_FIELD: &str = "profileImage";

/// Query parameters for `GET /members`.
#[derive(Debug, Default, Deserialize)]
pub struct MemberListParams {
    pub team_id: Option<DbId>,
    /// Zero or negative means no limit.
    pub max_limit: Option<i64>,
    pub show_on_home: Option<String>,
    /// Comma-separated designations. Results follow the order given here.
    pub designations: Option<String>,
}

impl MemberListParams {
    fn into_filter(self) -> MemberFilter {
        MemberFilter {
            team_id: self.team_id,
            show_on_homepage_only: self.show_on_home.as_deref().is_some_and(parse_show_on_home),
            designations: self
                .designations
                .as_deref()
                .map(parse_designations)
                .unwrap_or_default(),
            limit: self.max_limit.filter(|n| *n > 0),
        }
    }
}

/// GET /api/v1/members
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<MemberListParams>,
) -> AppResult<Json<DataResponse<Vec<Member>>>> {
    let members = MemberRepo::list(&state.pool, &params.into_filter()).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/members/leaders
///
/// Members holding a leadership designation, chairman first.
pub async fn list_leaders(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Member>>>> {
    let filter = MemberFilter {
        designations: LEADERSHIP_DESIGNATIONS.iter().map(|d| d.to_string()).collect(),
        ..Default::default()
    };
    let members = MemberRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Member>>> {
    let member = find_member(&state, id).await?;
    Ok(Json(DataResponse { data: member }))
}

/// POST /api/v1/members
///
/// Multipart form: `name`, `team` (team id, required), `designation`,
/// `contact`, `note`, `showOnHome`, and an optional `profileImage` file.
pub async fn create_member(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Member>>)> {
    let form = UploadForm::read(multipart).await?;

    let name = require_text("name", form.text("name"))?;
    let team_id = form
        .id("team")?
        .ok_or_else(|| AppError::Core(CoreError::Validation("team is required".into())))?;
    ensure_team(&state, team_id).await?;

    let input = CreateMember {
        name,
        team_id,
        designation: normalize_optional(form.text("designation")),
        contact: normalize_optional(form.text("contact")),
        note: normalize_optional(form.text("note")),
        show_on_homepage: form.text("showOnHome").is_some_and(parse_show_on_home),
    };
    let image = ValidatedImage::from_form(&form, IMAGE_FIELD)?;

    let member = create_with_image::<MemberRepo>(&state, &input, &input.name, image.as_ref()).await?;

    tracing::info!(
        member_id = member.id,
        team_id,
        user_id = admin.user_id,
        "Member created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PUT /api/v1/members/{id}
///
/// `showOnHome` only changes the flag when it is present in the form.
pub async fn update_member(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Member>>> {
    let existing = find_member(&state, id).await?;
    let form = UploadForm::read(multipart).await?;

    let team_id = form.id("team")?;
    if let Some(team_id) = team_id {
        ensure_team(&state, team_id).await?;
    }

    let input = UpdateMember {
        name: normalize_optional(form.text("name")),
        team_id,
        designation: normalize_optional(form.text("designation")),
        contact: normalize_optional(form.text("contact")),
        note: normalize_optional(form.text("note")),
        show_on_homepage: form.text("showOnHome").map(parse_show_on_home),
    };
    let image = ValidatedImage::from_form(&form, IMAGE_FIELD)?;
    let display_name = input.name.as_deref().unwrap_or(&existing.name).to_string();

    let member =
        update_with_image::<MemberRepo>(&state, &existing, &input, &display_name, image.as_ref())
            .await?;

    tracing::info!(member_id = id, user_id = admin.user_id, "Member updated");
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/members/{id}
pub async fn delete_member(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MemberRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Member", id)))?;

    remove_image(&state, ImageKind::Member, deleted.image_link.as_deref()).await;

    tracing::info!(member_id = id, user_id = admin.user_id, "Member deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_member(state: &AppState, id: DbId) -> AppResult<Member> {
    MemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Member", id)))
}

async fn ensure_team(state: &AppState, team_id: DbId) -> AppResult<()> {
    if TeamRepo::exists(&state.pool, team_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Team {team_id} does not exist"
        ))))
    }
}
