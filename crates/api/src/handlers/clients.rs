//! Handlers for the `/clients` resource.

use ajfses_core::client::parse_service_date;
use ajfses_core::error::CoreError;
use ajfses_core::images::ImageKind;
use ajfses_core::types::DbId;
use ajfses_core::validation::{normalize_optional, require_text};
use ajfses_db::models::client::{Client, ClientMetrics, CreateClient, UpdateClient};
use ajfses_db::repositories::ClientRepo;
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

/// Multipart field carrying the client's logo/photo.
const IMAGE_FIELD: &str = "profileImage";

/// Query parameters for `GET /clients`.
#[derive(Debug, Deserialize)]
pub struct ClientListParams {
    pub status: Option<String>,
}

/// GET /api/v1/clients
pub async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<ClientListParams>,
) -> AppResult<Json<DataResponse<Vec<Client>>>> {
    let status = normalize_optional(params.status.as_deref());
    let clients = ClientRepo::list(&state.pool, status.as_deref()).await?;
    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/v1/clients/metrics
pub async fn client_metrics(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ClientMetrics>>> {
    let metrics = ClientRepo::metrics(&state.pool).await?;
    Ok(Json(DataResponse { data: metrics }))
}

/// GET /api/v1/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Client>>> {
    let client = find_client(&state, id).await?;
    Ok(Json(DataResponse { data: client }))
}

/// POST /api/v1/clients
///
/// Multipart form: `name`, `area` (required), `service_name`,
/// `service_date` (YYYY-MM-DD), `status`, `note`, and an optional
/// `profileImage` file.
pub async fn create_client(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Client>>)> {
    let form = UploadForm::read(multipart).await?;

    let input = CreateClient {
        name: require_text("name", form.text("name"))?,
        area: require_text("area", form.text("area"))?,
        service_name: normalize_optional(form.text("service_name")),
        service_date: optional_date(&form)?,
        status: normalize_optional(form.text("status")),
        note: normalize_optional(form.text("note")),
    };
    let image = ValidatedImage::from_form(&form, IMAGE_FIELD)?;

    let client = create_with_image::<ClientRepo>(&state, &input, &input.name, image.as_ref()).await?;

    tracing::info!(
        client_id = client.id,
        user_id = admin.user_id,
        has_image = client.image_link.is_some(),
        "Client created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// PUT /api/v1/clients/{id}
///
/// Same fields as create, all optional. A new `profileImage` replaces the
/// stored one.
pub async fn update_client(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Client>>> {
    let existing = find_client(&state, id).await?;
    let form = UploadForm::read(multipart).await?;

    let input = UpdateClient {
        name: normalize_optional(form.text("name")),
        area: normalize_optional(form.text("area")),
        service_name: normalize_optional(form.text("service_name")),
        service_date: optional_date(&form)?,
        status: normalize_optional(form.text("status")),
        note: normalize_optional(form.text("note")),
    };
    let image = ValidatedImage::from_form(&form, IMAGE_FIELD)?;
    let display_name = input.name.as_deref().unwrap_or(&existing.name).to_string();

    let client =
        update_with_image::<ClientRepo>(&state, &existing, &input, &display_name, image.as_ref())
            .await?;

    tracing::info!(client_id = id, user_id = admin.user_id, "Client updated");
    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/v1/clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ClientRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Client", id)))?;

    remove_image(&state, ImageKind::Client, deleted.image_link.as_deref()).await;

    tracing::info!(client_id = id, user_id = admin.user_id, "Client deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_client(state: &AppState, id: DbId) -> AppResult<Client> {
    ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Client", id)))
}

fn optional_date(form: &UploadForm) -> AppResult<Option<chrono::NaiveDate>> {
    Ok(normalize_optional(form.text("service_date"))
        .map(|d| parse_service_date(&d))
        .transpose()?)
}
