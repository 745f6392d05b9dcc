//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - in-process directory and store
//! - `postgres` - sqlx-backed directory and store
//! - `random` - randomness sources for reviewer selection
//! - `http` - axum transport

pub mod http;
pub mod memory;
pub mod postgres;
pub mod random;
