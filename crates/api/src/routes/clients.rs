//! Route definitions for the `/clients` resource.

use ajfses_core::images::MAX_IMAGE_UPLOAD_BYTES;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /          -> list_clients (?status=)
/// POST   /          -> create_client (admin, multipart)
/// GET    /metrics   -> client_metrics
/// GET    /{id}      -> get_client
/// PUT    /{id}      -> update_client (admin, multipart)
/// DELETE /{id}      -> delete_client (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route("/metrics", get(clients::client_metrics))
        .route(
            "/{id}",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_UPLOAD_BYTES))
}
