//! Route definitions for the `/inquiries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::inquiries;
use crate::state::AppState;

/// Routes mounted at `/inquiries`.
///
/// ```text
/// POST   /          -> create_inquiry (public)
/// GET    /          -> list_inquiries (admin, ?status=&limit=&offset=)
/// GET    /{id}      -> get_inquiry (admin)
/// PATCH  /{id}      -> update_inquiry (admin)
/// DELETE /{id}      -> delete_inquiry (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(inquiries::list_inquiries).post(inquiries::create_inquiry),
        )
        .route(
            "/{id}",
            get(inquiries::get_inquiry)
                .patch(inquiries::update_inquiry)
                .delete(inquiries::delete_inquiry),
        )
}
