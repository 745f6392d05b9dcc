//! HTTP routes for review request endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_pull_request, list_assigned_reviews, merge_pull_request, reassign_reviewer,
    ReviewHandlers,
};

/// Creates the review router with all endpoints.
pub fn review_routes(handlers: ReviewHandlers) -> Router {
    Router::new()
        .route("/pullRequest/create", post(create_pull_request))
        .route("/pullRequest/merge", post(merge_pull_request))
        .route("/pullRequest/reassign", post(reassign_reviewer))
        .route("/users/getReview", get(list_assigned_reviews))
        .with_state(handlers)
}
