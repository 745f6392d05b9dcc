//! HTTP routes for team and user endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_team, get_team, set_is_active, TeamHandlers};

/// Creates the team router with all endpoints.
pub fn team_routes(handlers: TeamHandlers) -> Router {
    Router::new()
        .route("/team/add", post(create_team))
        .route("/team/get", get(get_team))
        .route("/users/setIsActive", post(set_is_active))
        .with_state(handlers)
}
