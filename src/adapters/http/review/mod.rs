//! HTTP adapter for review request endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::ReviewHandlers;
pub use routes::review_routes;
