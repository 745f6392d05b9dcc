//! ReviewRequest aggregate.
//!
//! A unit of work under review, its author and up to two reviewers.
//! Created OPEN, closed at most once, never deleted.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    PersonId, ReviewRequestId, StateMachine, Timestamp, ValidationError,
};

use super::{ReviewError, ReviewStatus, ReviewerSet};

/// Maximum length for a request title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Review request aggregate.
///
/// # Invariants
///
/// - `author_id` is never one of the reviewers
/// - at most two distinct reviewers
/// - `closed_at` is present iff status is CLOSED
/// - once CLOSED, status and reviewers never change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    id: ReviewRequestId,
    title: String,
    author_id: PersonId,
    status: ReviewStatus,
    reviewers: ReviewerSet,
    created_at: Timestamp,
    closed_at: Option<Timestamp>,
}

impl ReviewRequest {
    /// Opens a new review request.
    ///
    /// # Errors
    ///
    /// - `Validation` if the title is empty or too long, or the author is
    ///   among the reviewers
    pub fn open(
        id: ReviewRequestId,
        title: impl Into<String>,
        author_id: PersonId,
        reviewers: ReviewerSet,
        created_at: Timestamp,
    ) -> Result<Self, ReviewError> {
        let title = title.into();
        Self::validate_title(&title)?;
        if reviewers.contains(&author_id) {
            return Err(ReviewError::validation(format!(
                "author {} cannot review their own request",
                author_id
            )));
        }

        Ok(Self {
            id,
            title,
            author_id,
            status: ReviewStatus::Open,
            reviewers,
            created_at,
            closed_at: None,
        })
    }

    /// Reconstitute a request from persistence (no validation).
    pub fn reconstitute(
        id: ReviewRequestId,
        title: String,
        author_id: PersonId,
        status: ReviewStatus,
        reviewers: ReviewerSet,
        created_at: Timestamp,
        closed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            title,
            author_id,
            status,
            reviewers,
            created_at,
            closed_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ReviewRequestId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author_id(&self) -> &PersonId {
        &self.author_id
    }

    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    pub fn reviewers(&self) -> &ReviewerSet {
        &self.reviewers
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Present iff the request is closed.
    pub fn closed_at(&self) -> Option<&Timestamp> {
        self.closed_at.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.status == ReviewStatus::Closed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Closes the request.
    ///
    /// Returns false (and keeps the original close time) if it was already
    /// closed.
    pub fn close(&mut self, at: Timestamp) -> bool {
        match self.status.transition_to(ReviewStatus::Closed) {
            Ok(next) => {
                self.status = next;
                self.closed_at = Some(at);
                true
            }
            Err(_) => false,
        }
    }

    /// Checks that `reviewer` can be swapped out right now.
    ///
    /// # Errors
    ///
    /// - `Conflict(RequestMerged)` if the request is closed
    /// - `Conflict(NotAssigned)` if `reviewer` is not currently assigned
    pub fn ensure_reassignable(&self, reviewer: &PersonId) -> Result<(), ReviewError> {
        if !self.status.is_mutable() {
            return Err(ReviewError::request_merged(&self.id));
        }
        if !self.reviewers.contains(reviewer) {
            return Err(ReviewError::not_assigned(reviewer, &self.id));
        }
        Ok(())
    }

    /// Replaces `old` with `new`, keeping the reviewer count.
    ///
    /// # Errors
    ///
    /// - same as [`ensure_reassignable`](Self::ensure_reassignable)
    /// - `Validation` if `new` is the author
    /// - `Conflict(NotAssigned)` if `new` is already a reviewer
    pub fn replace_reviewer(&mut self, old: &PersonId, new: PersonId) -> Result<(), ReviewError> {
        self.ensure_reassignable(old)?;
        if new == self.author_id {
            return Err(ReviewError::validation(format!(
                "author {} cannot review their own request",
                new
            )));
        }
        if !self.reviewers.replace(old, new) {
            return Err(ReviewError::not_assigned(old, &self.id));
        }
        Ok(())
    }

    fn validate_title(title: &str) -> Result<(), ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("pull_request_name"));
        }
        let len = title.chars().count();
        if len > MAX_TITLE_LENGTH {
            return Err(ValidationError::too_long(
                "pull_request_name",
                MAX_TITLE_LENGTH,
                len,
            ));
        }
        Ok(())
    }
}
