//! Route definitions for the `/members` resource.

use ajfses_core::images::MAX_IMAGE_UPLOAD_BYTES;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::members;
use crate::state::AppState;

/// Routes mounted at `/members`.
///
/// ```text
/// GET    /          -> list_members (?team_id=&max_limit=&show_on_home=&designations=)
/// POST   /          -> create_member (admin, multipart)
/// GET    /leaders   -> list_leaders
/// GET    /{id}      -> get_member
/// PUT    /{id}      -> update_member (admin, multipart)
/// DELETE /{id}      -> delete_member (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(members::list_members).post(members::create_member))
        .route("/leaders", get(members::list_leaders))
        .route(
            "/{id}",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_UPLOAD_BYTES))
}
