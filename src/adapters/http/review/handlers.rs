//! HTTP handlers for review request endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_rejection, handle_review_error, handle_validation_error};
use crate::application::handlers::review::{
    CloseReviewCommand, CreateReviewCommand, ListAssignedReviewsHandler,
    ListAssignedReviewsQuery, ReassignReviewerCommand, ReviewLifecycle,
};
use crate::domain::foundation::{PersonId, ReviewRequestId};

use super::dto::{
    AssignedReviewsQuery, AssignedReviewsResponse, CreatePullRequestRequest,
    MergePullRequestRequest, PullRequestEnvelope, PullRequestShort, ReassignPullRequestRequest,
    ReassignResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ReviewHandlers {
    lifecycle: Arc<ReviewLifecycle>,
    list_handler: Arc<ListAssignedReviewsHandler>,
}

impl ReviewHandlers {
    pub fn new(
        lifecycle: Arc<ReviewLifecycle>,
        list_handler: Arc<ListAssignedReviewsHandler>,
    ) -> Self {
        Self {
            lifecycle,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /pullRequest/create - Open a review request
pub async fn create_pull_request(
    State(handlers): State<ReviewHandlers>,
    payload: Result<Json<CreatePullRequestRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return handle_rejection(rejection),
    };
    let cmd = match (
        ReviewRequestId::new(req.pull_request_id),
        PersonId::new(req.author_id),
    ) {
        (Ok(request_id), Ok(author_id)) => CreateReviewCommand {
            request_id,
            title: req.pull_request_name,
            author_id,
        },
        (Err(e), _) | (_, Err(e)) => return handle_validation_error(e),
    };

    match handlers.lifecycle.create(cmd).await {
        Ok(request) => {
            (StatusCode::CREATED, Json(PullRequestEnvelope::from(&request))).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// POST /pullRequest/merge - Close a review request (idempotent)
pub async fn merge_pull_request(
    State(handlers): State<ReviewHandlers>,
    payload: Result<Json<MergePullRequestRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return handle_rejection(rejection),
    };
    let request_id = match ReviewRequestId::new(req.pull_request_id) {
        Ok(id) => id,
        Err(e) => return handle_validation_error(e),
    };

    match handlers.lifecycle.close(CloseReviewCommand { request_id }).await {
        Ok(result) => {
            (StatusCode::OK, Json(PullRequestEnvelope::from(&result.request))).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// POST /pullRequest/reassign - Replace one reviewer
pub async fn reassign_reviewer(
    State(handlers): State<ReviewHandlers>,
    payload: Result<Json<ReassignPullRequestRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return handle_rejection(rejection),
    };
    let cmd = match (
        ReviewRequestId::new(req.pull_request_id),
        PersonId::new(req.old_user_id),
    ) {
        (Ok(request_id), Ok(old_reviewer_id)) => ReassignReviewerCommand {
            request_id,
            old_reviewer_id,
        },
        (Err(e), _) | (_, Err(e)) => return handle_validation_error(e),
    };

    match handlers.lifecycle.reassign(cmd).await {
        Ok(result) => {
            let response = ReassignResponse {
                pr: (&result.request).into(),
                replaced_by: result.replaced_by.to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// GET /users/getReview?user_id= - Requests a person is reviewing
pub async fn list_assigned_reviews(
    State(handlers): State<ReviewHandlers>,
    query: Result<Query<AssignedReviewsQuery>, QueryRejection>,
) -> Response {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return handle_rejection(rejection),
    };
    let person_id = match PersonId::new(params.user_id) {
        Ok(id) => id,
        Err(e) => return handle_validation_error(e),
    };

    match handlers
        .list_handler
        .handle(ListAssignedReviewsQuery {
            person_id: person_id.clone(),
        })
        .await
    {
        Ok(requests) => {
            let response = AssignedReviewsResponse {
                user_id: person_id.to_string(),
                pull_requests: requests.iter().map(PullRequestShort::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}
