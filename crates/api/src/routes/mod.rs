pub mod auth;
pub mod clients;
pub mod gallery;
pub mod health;
pub mod inquiries;
pub mod members;
pub mod teams;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ping                                            environment + host address
/// /images/{kind}/{file}                            stored images (static)
///
/// /auth/signin                                     sign in (public)
/// /auth/admin/reset-password                       reset own password (admin)
///
/// /clients                                         list, create
/// /clients/metrics                                 totals (GET)
/// /clients/{id}                                    get, update, delete
///
/// /members                                         list (filters), create
/// /members/leaders                                 leadership listing (GET)
/// /members/{id}                                    get, update, delete
///
/// /teams                                           list, create
/// /teams/details                                   teams with members (GET)
/// /teams/{id}                                      get, update, delete
///
/// /gallery                                         list, create (multi-file)
/// /gallery/{id}                                    get, update, delete
///
/// /inquiries                                       submit (public), list (admin)
/// /inquiries/{id}                                  get, update, delete (admin)
/// ```
///
/// Reads are public; writes require an admin token unless noted.
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/ping", get(handlers::ping::ping))
        .nest_service("/images", ServeDir::new(&config.image_dir))
        .nest("/auth", auth::router())
        .nest("/clients", clients::router())
        .nest("/members", members::router())
        .nest("/teams", teams::router())
        .nest("/gallery", gallery::router())
        .nest("/inquiries", inquiries::router())
}
