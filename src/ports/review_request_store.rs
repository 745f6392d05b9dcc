//! Review request store port.
//!
//! Durable record of review requests and their reviewers. Every write is
//! atomic; the engine relies on that for safety under concurrent callers.
//!
//! # Contract
//!
//! - `create` stores the request and its reviewers together or not at all
//! - `close` is a single conditional write: "close if still OPEN"
//! - `substitute_reviewer` is a single conditional write keyed on
//!   `(request, old reviewer)`; a lost race reports `NotAssigned`

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PersonId, ReviewRequestId, Timestamp};
use crate::domain::review::ReviewRequest;

/// Result of creating a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Request and reviewers were stored.
    Created,
    /// The id is already taken; existing state was not touched.
    AlreadyExists,
}

/// Result of the conditional close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The request moved from OPEN to CLOSED.
    Closed,
    /// The request was already CLOSED; nothing was written.
    AlreadyClosed,
    /// No request with this id.
    NotFound,
}

/// Result of the conditional reviewer substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstituteOutcome {
    /// Exactly one assignment changed.
    Substituted,
    /// Zero rows matched: the pairing no longer holds, the request is
    /// closed, or the new reviewer was assigned concurrently.
    NotAssigned,
}

/// Repository port for review requests.
#[async_trait]
pub trait ReviewRequestStore: Send + Sync {
    /// Find a request by id.
    ///
    /// Returns `None` if not found.
    async fn get(&self, id: &ReviewRequestId) -> Result<Option<ReviewRequest>, DomainError>;

    /// Store a new request with its reviewers.
    async fn create(&self, request: &ReviewRequest) -> Result<CreateOutcome, DomainError>;

    /// Transition to CLOSED if currently OPEN, stamping `closed_at`.
    async fn close(
        &self,
        id: &ReviewRequestId,
        closed_at: Timestamp,
    ) -> Result<CloseOutcome, DomainError>;

    /// Replace `old` with `new` if `old` is still assigned to an OPEN request.
    async fn substitute_reviewer(
        &self,
        id: &ReviewRequestId,
        old: &PersonId,
        new: &PersonId,
    ) -> Result<SubstituteOutcome, DomainError>;

    /// All requests that currently list `reviewer`, oldest first.
    async fn list_by_reviewer(
        &self,
        reviewer: &PersonId,
    ) -> Result<Vec<ReviewRequest>, DomainError>;
}
