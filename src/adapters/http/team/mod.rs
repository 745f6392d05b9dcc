//! HTTP adapter for team and user endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::TeamHandlers;
pub use routes::team_routes;
