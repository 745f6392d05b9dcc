//! HTTP adapters - REST API implementations.
//!
//! Each area has its own router; [`api_router`] merges them.

pub mod error;
pub mod review;
pub mod team;

use axum::Router;

pub use error::ErrorResponse;
pub use review::{review_routes, ReviewHandlers};
pub use team::{team_routes, TeamHandlers};

/// Every endpoint of the service.
pub fn api_router(review: ReviewHandlers, team: TeamHandlers) -> Router {
    review_routes(review).merge(team_routes(team))
}
