//! Handlers for the `/inquiries` resource.
//!
//! Submission is public; everything else requires an admin.

use std::collections::BTreeMap;

use ajfses_core::error::CoreError;
use ajfses_core::inquiry::validate_status;
use ajfses_core::types::DbId;
use ajfses_core::validation::{
    clamp_limit, clamp_offset, normalize_optional, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use ajfses_db::models::inquiry::{CreateInquiry, Inquiry, UpdateInquiry};
use ajfses_db::repositories::InquiryRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /inquiries`.
#[derive(Debug, Default, Deserialize)]
pub struct InquiryListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A page of inquiries plus per-status totals over the whole table.
#[derive(Debug, Serialize)]
pub struct InquiryList {
    pub inquiries: Vec<Inquiry>,
    pub counts: BTreeMap<String, i64>,
}

/// POST /api/v1/inquiries
pub async fn create_inquiry(
    State(state): State<AppState>,
    Json(input): Json<CreateInquiry>,
) -> AppResult<(StatusCode, Json<DataResponse<Inquiry>>)> {
    let input = input.trimmed();
    input.validate()?;

    let inquiry = InquiryRepo::create(&state.pool, &input).await?;

    tracing::info!(inquiry_id = inquiry.id, "Inquiry received");
    Ok((StatusCode::CREATED, Json(DataResponse { data: inquiry })))
}

/// GET /api/v1/inquiries
pub async fn list_inquiries(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<InquiryListParams>,
) -> AppResult<Json<DataResponse<InquiryList>>> {
    let status = normalize_optional(params.status.as_deref())
        .map(|s| validate_status(&s))
        .transpose()?;
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let inquiries = InquiryRepo::list(&state.pool, status.as_deref(), limit, offset).await?;
    let counts = InquiryRepo::status_counts(&state.pool).await?;

    Ok(Json(DataResponse {
        data: InquiryList { inquiries, counts },
    }))
}

/// GET /api/v1/inquiries/{id}
pub async fn get_inquiry(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Inquiry>>> {
    let inquiry = InquiryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Inquiry", id)))?;
    Ok(Json(DataResponse { data: inquiry }))
}

/// PATCH /api/v1/inquiries/{id}
///
/// Blank fields are ignored. `status` must be one of the known statuses.
pub async fn update_inquiry(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInquiry>,
) -> AppResult<Json<DataResponse<Inquiry>>> {
    let input = UpdateInquiry {
        name: normalize_optional(input.name.as_deref()),
        mobile: normalize_optional(input.mobile.as_deref()),
        email: normalize_optional(input.email.as_deref()),
        subject: normalize_optional(input.subject.as_deref()),
        message: normalize_optional(input.message.as_deref()),
        status: normalize_optional(input.status.as_deref())
            .map(|s| validate_status(&s))
            .transpose()?,
    };
    input.validate()?;

    let inquiry = InquiryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Inquiry", id)))?;

    tracing::info!(
        inquiry_id = id,
        status = %inquiry.status,
        user_id = admin.user_id,
        "Inquiry updated"
    );
    Ok(Json(DataResponse { data: inquiry }))
}

/// DELETE /api/v1/inquiries/{id}
pub async fn delete_inquiry(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !InquiryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Inquiry", id)));
    }

    tracing::info!(inquiry_id = id, user_id = admin.user_id, "Inquiry deleted");
    Ok(StatusCode::NO_CONTENT)
}
