//! CloseReviewHandler - Command handler for closing (merging) review requests.

use std::sync::Arc;

use crate::domain::foundation::{ReviewRequestId, Timestamp};
use crate::domain::review::{ReviewError, ReviewRequest};
use crate::ports::{CloseOutcome, ReviewRequestStore};

/// Command to close a review request.
#[derive(Debug, Clone)]
pub struct CloseReviewCommand {
    pub request_id: ReviewRequestId,
}

/// Result of a close.
#[derive(Debug, Clone)]
pub struct CloseReviewResult {
    pub request: ReviewRequest,
    /// False when the request was already closed before this call.
    pub closed_now: bool,
}

/// Handler for closing review requests.
///
/// Idempotent: closing a closed request returns it unchanged.
pub struct CloseReviewHandler {
    store: Arc<dyn ReviewRequestStore>,
}

impl CloseReviewHandler {
    pub fn new(store: Arc<dyn ReviewRequestStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CloseReviewCommand) -> Result<CloseReviewResult, ReviewError> {
        // 1. Load request
        let request = self.load(&cmd.request_id).await?;
        if request.is_closed() {
            tracing::debug!(request_id = %cmd.request_id, "review request already closed");
            return Ok(CloseReviewResult {
                request,
                closed_now: false,
            });
        }

        // 2. Conditional transition; a concurrent close may win
        let outcome = self
            .store
            .close(&cmd.request_id, Timestamp::now())
            .await
            .map_err(|e| ReviewError::infrastructure("closing review request", e))?;

        let closed_now = match outcome {
            CloseOutcome::Closed => true,
            CloseOutcome::AlreadyClosed => false,
            CloseOutcome::NotFound => {
                return Err(ReviewError::not_found("pull request", &cmd.request_id))
            }
        };

        // 3. Re-read so the caller sees the winning close time
        let request = self.load(&cmd.request_id).await?;
        if closed_now {
            tracing::info!(request_id = %cmd.request_id, "review request closed");
        }

        Ok(CloseReviewResult {
            request,
            closed_now,
        })
    }

    async fn load(&self, id: &ReviewRequestId) -> Result<ReviewRequest, ReviewError> {
        self.store
            .get(id)
            .await
            .map_err(|e| ReviewError::infrastructure("loading review request", e))?
            .ok_or_else(|| ReviewError::not_found("pull request", id))
    }
}
