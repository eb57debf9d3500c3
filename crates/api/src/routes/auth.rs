//! Route definitions for the `/auth` resource.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST  /signin                -> signin
/// PATCH /admin/reset-password  -> reset_password (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(auth::signin))
        .route("/admin/reset-password", patch(auth::reset_password))
}
