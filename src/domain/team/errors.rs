//! Directory management errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | TeamExists | 409 |
//! | Validation | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors from team and person management operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    TeamExists { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Infrastructure { message: String },
}

impl DirectoryError {
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        DirectoryError::NotFound {
            message: format!("{} not found: {}", what, id),
        }
    }

    pub fn team_exists(name: impl std::fmt::Display) -> Self {
        DirectoryError::TeamExists {
            message: format!("team_name already exists: {}", name),
        }
    }

    /// Wraps a collaborator failure with the step that was running.
    pub fn infrastructure(context: &str, err: DomainError) -> Self {
        DirectoryError::Infrastructure {
            message: format!("{}: {}", context, err),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DirectoryError::NotFound { .. } => ErrorCode::NotFound,
            DirectoryError::TeamExists { .. } => ErrorCode::TeamExists,
            DirectoryError::Validation { .. } => ErrorCode::BadRequest,
            DirectoryError::Infrastructure { .. } => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationError> for DirectoryError {
    fn from(err: ValidationError) -> Self {
        DirectoryError::Validation {
            message: err.to_string(),
        }
    }
}
