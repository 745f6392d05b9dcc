//! Command and query handlers.
//!
//! - `review` - open, close and reassign review requests; reviewer queues
//! - `team` - team registration and reviewer eligibility

pub mod review;
pub mod team;
