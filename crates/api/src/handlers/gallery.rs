//! Handlers for the `/gallery` resource.

use ajfses_core::error::CoreError;
use ajfses_core::images::ImageKind;
use ajfses_core::types::DbId;
use ajfses_core::validation::normalize_optional;
use ajfses_db::models::gallery::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};
use ajfses_db::repositories::GalleryRepo;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::image_flow::{create_with_image, remove_image, update_with_image};
use crate::middleware::rbac::RequireAdmin;
use crate::query::MaxLimitParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::{UploadForm, ValidatedImage};

/// File field on create. May repeat; each file becomes its own item.
const CREATE_IMAGES_FIELD: &str = "images";

/// File field on update.
const UPDATE_IMAGE_FIELD: &str = "image";

/// GET /api/v1/gallery
pub async fn list_gallery(
    State(state): State<AppState>,
    Query(params): Query<MaxLimitParams>,
) -> AppResult<Json<DataResponse<Vec<GalleryItem>>>> {
    let items = GalleryRepo::list(&state.pool, params.limit()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/gallery/{id}
pub async fn get_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GalleryItem>>> {
    let item = find_item(&state, id).await?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/gallery
///
/// Multipart form: optional `title` plus one or more `images` files. Every
/// file is checked before anything is stored. Each file is then saved with
/// its own row and transaction; a file that fails to store is logged and
/// skipped.
pub async fn create_gallery_items(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<GalleryItem>>>)> {
    let form = UploadForm::read(multipart).await?;

    // An untitled item is stored with an empty title and the `gallery` stem.
    let input = CreateGalleryItem {
        title: normalize_optional(form.text("title")).unwrap_or_default(),
    };
    let files = form.files(CREATE_IMAGES_FIELD);
    if files.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one image is required".into(),
        )));
    }
    let images = files
        .iter()
        .map(ValidatedImage::from_upload)
        .collect::<AppResult<Vec<_>>>()?;

    let mut created = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        match create_with_image::<GalleryRepo>(&state, &input, &input.title, Some(image)).await {
            Ok(item) => created.push(item),
            Err(e) => {
                tracing::warn!(index, user_id = admin.user_id, error = %e, "Skipped gallery image");
            }
        }
    }

    if created.is_empty() {
        return Err(AppError::InternalError(
            "None of the gallery images could be saved".into(),
        ));
    }

    tracing::info!(
        count = created.len(),
        submitted = images.len(),
        user_id = admin.user_id,
        "Gallery items created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/gallery/{id}
pub async fn update_gallery_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<GalleryItem>>> {
    let existing = find_item(&state, id).await?;
    let form = UploadForm::read(multipart).await?;

    let input = UpdateGalleryItem {
        title: normalize_optional(form.text("title")),
    };
    let image = ValidatedImage::from_form(&form, UPDATE_IMAGE_FIELD)?;
    let display_name = input.title.as_deref().unwrap_or(&existing.title).to_string();

    let item =
        update_with_image::<GalleryRepo>(&state, &existing, &input, &display_name, image.as_ref())
            .await?;

    tracing::info!(gallery_item_id = id, user_id = admin.user_id, "Gallery item updated");
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/gallery/{id}
pub async fn delete_gallery_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = GalleryRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("GalleryItem", id)))?;

    remove_image(&state, ImageKind::Gallery, deleted.image_link.as_deref()).await;

    tracing::info!(gallery_item_id = id, user_id = admin.user_id, "Gallery item deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_item(state: &AppState, id: DbId) -> AppResult<GalleryItem> {
    GalleryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("GalleryItem", id)))
}
