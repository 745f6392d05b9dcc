//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `team` - People and team membership
//! - `review` - Review request lifecycle and reviewer selection

pub mod foundation;
pub mod review;
pub mod team;
