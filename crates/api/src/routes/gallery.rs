//! Route definitions for the `/gallery` resource.

use ajfses_core::images::MAX_GALLERY_UPLOAD_BYTES;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Routes mounted at `/gallery`.
///
/// ```text
/// GET    /          -> list_gallery (?max_limit=)
/// POST   /          -> create_gallery_items (admin, multipart, many files)
/// GET    /{id}      -> get_gallery_item
/// PUT    /{id}      -> update_gallery_item (admin, multipart)
/// DELETE /{id}      -> delete_gallery_item (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(gallery::list_gallery).post(gallery::create_gallery_items),
        )
        .route(
            "/{id}",
            get(gallery::get_gallery_item)
                .put(gallery::update_gallery_item)
                .delete(gallery::delete_gallery_item),
        )
        .layer(DefaultBodyLimit::max(MAX_GALLERY_UPLOAD_BYTES))
}
