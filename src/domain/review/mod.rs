//! Review domain module.
//!
//! The review request aggregate, its OPEN/CLOSED lifecycle, the reviewer
//! set invariants and the reviewer selection rules.

mod aggregate;
mod errors;
mod reviewer_set;
pub mod selector;
mod status;

pub use aggregate::{ReviewRequest, MAX_TITLE_LENGTH};
pub use errors::{ConflictReason, ReviewError};
pub use reviewer_set::{ReviewerSet, MAX_REVIEWERS};
pub use selector::{select_initial, select_replacement};
pub use status::ReviewStatus;
