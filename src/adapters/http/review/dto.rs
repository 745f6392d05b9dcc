//! HTTP DTOs for review request endpoints.
//!
//! Field names follow the public API (`pull_request_id`, `createdAt`, ...).
//! The closed state is reported as `MERGED` on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::review::{ReviewRequest, ReviewStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReassignPullRequestRequest {
    pub pull_request_id: String,
    pub old_user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignedReviewsQuery {
    pub user_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full review request view.
#[derive(Debug, Clone, Serialize)]
pub struct PullRequestResponse {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: &'static str,
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "mergedAt", skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<String>,
}

impl From<&ReviewRequest> for PullRequestResponse {
    fn from(request: &ReviewRequest) -> Self {
        Self {
            pull_request_id: request.id().to_string(),
            pull_request_name: request.title().to_string(),
            author_id: request.author_id().to_string(),
            status: wire_status(request.status()),
            assigned_reviewers: request.reviewers().iter().map(|r| r.to_string()).collect(),
            created_at: request.created_at().to_rfc3339(),
            merged_at: request.closed_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// `{"pr": ...}` wrapper used by create and merge.
#[derive(Debug, Clone, Serialize)]
pub struct PullRequestEnvelope {
    pub pr: PullRequestResponse,
}

impl From<&ReviewRequest> for PullRequestEnvelope {
    fn from(request: &ReviewRequest) -> Self {
        Self { pr: request.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReassignResponse {
    pub pr: PullRequestResponse,
    pub replaced_by: String,
}

/// Short view used in a reviewer's queue.
#[derive(Debug, Clone, Serialize)]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: &'static str,
}

impl From<&ReviewRequest> for PullRequestShort {
    fn from(request: &ReviewRequest) -> Self {
        Self {
            pull_request_id: request.id().to_string(),
            pull_request_name: request.title().to_string(),
            author_id: request.author_id().to_string(),
            status: wire_status(request.status()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignedReviewsResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShort>,
}

pub fn wire_status(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Open => "OPEN",
        ReviewStatus::Closed => "MERGED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PersonId, ReviewRequestId, Timestamp};
    use crate::domain::review::ReviewerSet;

    fn request() -> ReviewRequest {
        ReviewRequest::open(
            ReviewRequestId::new("pr-7").unwrap(),
            "Drop legacy flag",
            PersonId::new("author1").unwrap(),
            ReviewerSet::new(vec![PersonId::new("u2").unwrap()]).unwrap(),
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn open_request_has_no_merged_at() {
        let json = serde_json::to_value(PullRequestResponse::from(&request())).unwrap();
        assert_eq!(json["status"], "OPEN");
        assert_eq!(json["assigned_reviewers"], serde_json::json!(["u2"]));
        assert!(json.get("createdAt").is_some());
        assert!(json.get("mergedAt").is_none());
    }

    #[test]
    fn closed_request_is_merged_on_the_wire() {
        let mut request = request();
        request.close(Timestamp::now());
        let json = serde_json::to_value(PullRequestResponse::from(&request)).unwrap();
        assert_eq!(json["status"], "MERGED");
        assert!(json["mergedAt"].is_string());
    }
}
