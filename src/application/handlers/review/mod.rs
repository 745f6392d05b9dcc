//! Review request command and query handlers.

mod close_review;
mod create_review;
mod lifecycle;
mod list_assigned_reviews;
mod reassign_reviewer;

pub use close_review::{CloseReviewCommand, CloseReviewHandler, CloseReviewResult};
pub use create_review::{CreateReviewCommand, CreateReviewHandler};
pub use lifecycle::ReviewLifecycle;
pub use list_assigned_reviews::{ListAssignedReviewsHandler, ListAssignedReviewsQuery};
pub use reassign_reviewer::{
    ReassignReviewerCommand, ReassignReviewerHandler, ReassignReviewerResult,
};
