//! Review lifecycle error types.
//!
//! One variant per error category. Conflicts carry a [`ConflictReason`] so
//! transport adapters can match exhaustively instead of comparing strings.
//!
//! # HTTP Status Mapping
//!
//! | Error | Code | HTTP Status |
//! |-------|------|-------------|
//! | NotFound | NOT_FOUND | 404 |
//! | Conflict(RequestExists) | PR_EXISTS | 409 |
//! | Conflict(RequestMerged) | PR_MERGED | 409 |
//! | Conflict(NotAssigned) | NOT_ASSIGNED | 409 |
//! | Conflict(NoCandidate) | NO_CANDIDATE | 409 |
//! | Validation | BAD_REQUEST | 400 |
//! | Infrastructure | INTERNAL_ERROR | 500 |

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, PersonId, ReviewRequestId, ValidationError,
};

/// Why an operation conflicted with current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictReason {
    /// A request with this id already exists.
    RequestExists,
    /// The request is closed and can no longer change.
    RequestMerged,
    /// The reviewer is not (or no longer) assigned to the request.
    NotAssigned,
    /// No eligible replacement reviewer exists.
    NoCandidate,
}

impl ConflictReason {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConflictReason::RequestExists => ErrorCode::PrExists,
            ConflictReason::RequestMerged => ErrorCode::PrMerged,
            ConflictReason::NotAssigned => ErrorCode::NotAssigned,
            ConflictReason::NoCandidate => ErrorCode::NoCandidate,
        }
    }
}

/// Errors produced by create, close and reassign.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict {
        reason: ConflictReason,
        message: String,
    },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Infrastructure { message: String },
}

impl ReviewError {
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        ReviewError::NotFound {
            message: format!("{} not found: {}", what, id),
        }
    }

    pub fn request_exists(id: &ReviewRequestId) -> Self {
        ReviewError::Conflict {
            reason: ConflictReason::RequestExists,
            message: format!("pull request already exists: {}", id),
        }
    }

    pub fn request_merged(id: &ReviewRequestId) -> Self {
        ReviewError::Conflict {
            reason: ConflictReason::RequestMerged,
            message: format!("cannot reassign on merged pull request: {}", id),
        }
    }

    pub fn not_assigned(reviewer: &PersonId, id: &ReviewRequestId) -> Self {
        ReviewError::Conflict {
            reason: ConflictReason::NotAssigned,
            message: format!("reviewer {} is not assigned to pull request {}", reviewer, id),
        }
    }

    pub fn no_candidate(id: &ReviewRequestId) -> Self {
        ReviewError::Conflict {
            reason: ConflictReason::NoCandidate,
            message: format!("no active replacement candidate in team for {}", id),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ReviewError::Validation {
            message: message.into(),
        }
    }

    /// Wraps a collaborator failure with the step that was running.
    pub fn infrastructure(context: &str, err: DomainError) -> Self {
        ReviewError::Infrastructure {
            message: format!("{}: {}", context, err),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReviewError::NotFound { .. } => ErrorCode::NotFound,
            ReviewError::Conflict { reason, .. } => reason.code(),
            ReviewError::Validation { .. } => ErrorCode::BadRequest,
            ReviewError::Infrastructure { .. } => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ReviewError::NotFound { message }
            | ReviewError::Conflict { message, .. }
            | ReviewError::Validation { message }
            | ReviewError::Infrastructure { message } => message,
        }
    }

    /// Returns the conflict reason, if this is a conflict.
    pub fn conflict_reason(&self) -> Option<ConflictReason> {
        match self {
            ReviewError::Conflict { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

impl From<ValidationError> for ReviewError {
    fn from(err: ValidationError) -> Self {
        ReviewError::validation(err.to_string())
    }
}
