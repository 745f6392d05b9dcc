//! ReviewStatus enum for tracking the lifecycle of review requests.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a review request.
///
/// OPEN --close--> CLOSED. CLOSED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    #[default]
    Open,
    Closed,
}

impl ReviewStatus {
    /// Returns true if reviewers can still be changed.
    pub fn is_mutable(&self) -> bool {
        matches!(self, ReviewStatus::Open)
    }

    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Open => "OPEN",
            ReviewStatus::Closed => "CLOSED",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(ReviewStatus::Open),
            "CLOSED" => Some(ReviewStatus::Closed),
            _ => None,
        }
    }
}

impl StateMachine for ReviewStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ReviewStatus::Open => vec![ReviewStatus::Closed],
            ReviewStatus::Closed => vec![],
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
