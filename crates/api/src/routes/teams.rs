//! Route definitions for the `/teams` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::teams;
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// GET    /          -> list_teams
/// POST   /          -> create_team (admin)
/// GET    /details   -> list_team_details
/// GET    /{id}      -> get_team
/// PUT    /{id}      -> update_team (admin)
/// DELETE /{id}      -> delete_team (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teams::list_teams).post(teams::create_team))
        .route("/details", get(teams::list_team_details))
        .route(
            "/{id}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
}
