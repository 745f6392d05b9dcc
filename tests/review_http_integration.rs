//! Integration tests for the HTTP API.
//!
//! Drives the full axum router, backed by in-memory adapters, with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use review_service::adapters::http::{api_router, ReviewHandlers, TeamHandlers};
use review_service::adapters::memory::{InMemoryDirectory, InMemoryReviewStore};
use review_service::adapters::random::SeededRandomSource;
use review_service::application::handlers::review::{ListAssignedReviewsHandler, ReviewLifecycle};
use review_service::application::handlers::team::{
    CreateTeamHandler, GetTeamHandler, SetPersonActiveHandler,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    let directory = Arc::new(InMemoryDirectory::new());
    let store = Arc::new(InMemoryReviewStore::new());
    let random = Arc::new(SeededRandomSource::new(17));

    let review = ReviewHandlers::new(
        Arc::new(ReviewLifecycle::new(directory.clone(), store.clone(), random)),
        Arc::new(ListAssignedReviewsHandler::new(directory.clone(), store)),
    );
    let team = TeamHandlers::new(
        Arc::new(CreateTeamHandler::new(directory.clone())),
        Arc::new(GetTeamHandler::new(directory.clone())),
        Arc::new(SetPersonActiveHandler::new(directory)),
    );
    api_router(review, team)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn add_backend_team(app: &Router) {
    let (status, _) = post(
        app,
        "/team/add",
        json!({
            "team_name": "backend",
            "members": [
                {"user_id": "author1", "username": "Alice", "is_active": true},
                {"user_id": "u2", "username": "Bob", "is_active": true},
                {"user_id": "u3", "username": "Carol", "is_active": true},
                {"user_id": "u4", "username": "Dan", "is_active": false}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

// =============================================================================
// Teams and users
// =============================================================================

#[tokio::test]
async fn team_add_then_get() {
    let app = app();
    add_backend_team(&app).await;

    let (status, body) = get(&app, "/team/get?team_name=backend").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team_name"], "backend");
    assert_eq!(body["members"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn duplicate_team_is_conflict() {
    let app = app();
    add_backend_team(&app).await;

    let (status, body) = post(&app, "/team/add", json!({"team_name": "backend", "members": []})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "TEAM_EXISTS");
}

#[tokio::test]
async fn unknown_team_is_not_found() {
    let (status, body) = get(&app(), "/team/get?team_name=ghosts").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn set_is_active_returns_user() {
    let app = app();
    add_backend_team(&app).await;

    let (status, body) = post(&app, "/users/setIsActive", json!({"user_id": "u2", "is_active": false})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["user_id"], "u2");
    assert_eq!(body["user"]["team_name"], "backend");
    assert_eq!(body["user"]["is_active"], false);

    let (status, _) = post(&app, "/users/setIsActive", json!({"user_id": "nobody", "is_active": true})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Pull requests
// =============================================================================

#[tokio::test]
async fn create_merge_and_reassign_after_merge() {
    let app = app();
    add_backend_team(&app).await;

    let (status, body) = post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "pr1", "pull_request_name": "feat", "author_id": "author1"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["pr"]["status"], "OPEN");
    let reviewers = body["pr"]["assigned_reviewers"].as_array().unwrap().clone();
    assert_eq!(reviewers.len(), 2);
    assert!(reviewers.contains(&json!("u2")));
    assert!(reviewers.contains(&json!("u3")));

    let (status, first) = post(&app, "/pullRequest/merge", json!({"pull_request_id": "pr1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["pr"]["status"], "MERGED");
    assert!(first["pr"]["mergedAt"].is_string());

    let (status, second) = post(&app, "/pullRequest/merge", json!({"pull_request_id": "pr1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["pr"]["mergedAt"], second["pr"]["mergedAt"]);

    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr1", "old_user_id": "u2"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "PR_MERGED");
}

#[tokio::test]
async fn duplicate_pull_request_is_conflict() {
    let app = app();
    add_backend_team(&app).await;
    let create = json!({"pull_request_id": "pr1", "pull_request_name": "feat", "author_id": "author1"});

    post(&app, "/pullRequest/create", create.clone()).await;
    let (status, body) = post(&app, "/pullRequest/create", create).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "PR_EXISTS");
}

#[tokio::test]
async fn reassign_reports_replacement() {
    let app = app();
    add_backend_team(&app).await;
    post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "pr1", "pull_request_name": "feat", "author_id": "author1"}),
    )
    .await;
    // u4 becomes eligible only after the initial pick
    post(&app, "/users/setIsActive", json!({"user_id": "u4", "is_active": true})).await;

    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr1", "old_user_id": "u2"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["replaced_by"], "u4");
    let reviewers = body["pr"]["assigned_reviewers"].as_array().unwrap();
    assert_eq!(reviewers.len(), 2);
    assert!(reviewers.contains(&json!("u3")));
    assert!(reviewers.contains(&json!("u4")));
}

#[tokio::test]
async fn reassign_unassigned_reviewer_is_conflict() {
    let app = app();
    add_backend_team(&app).await;
    post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "pr1", "pull_request_name": "feat", "author_id": "author1"}),
    )
    .await;

    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr1", "old_user_id": "author1"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "NOT_ASSIGNED");
}

#[tokio::test]
async fn reassign_without_candidates_is_conflict() {
    let app = app();
    add_backend_team(&app).await;
    post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "pr1", "pull_request_name": "feat", "author_id": "author1"}),
    )
    .await;

    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr1", "old_user_id": "u2"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "NO_CANDIDATE");
}

#[tokio::test]
async fn get_review_lists_assigned_requests() {
    let app = app();
    add_backend_team(&app).await;
    post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "pr1", "pull_request_name": "feat", "author_id": "author1"}),
    )
    .await;

    let (status, body) = get(&app, "/users/getReview?user_id=u3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "u3");
    assert_eq!(
        body["pull_requests"],
        json!([{
            "pull_request_id": "pr1",
            "pull_request_name": "feat",
            "author_id": "author1",
            "status": "OPEN"
        }])
    );

    let (status, _) = get(&app, "/users/getReview?user_id=ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Bad input
// =============================================================================

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/pullRequest/create")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn empty_identifier_is_bad_request() {
    let (status, body) = post(
        &app(),
        "/pullRequest/merge",
        json!({"pull_request_id": "  "}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn missing_query_parameter_is_bad_request() {
    let (status, _) = get(&app(), "/team/get").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn merge_unknown_request_is_not_found() {
    let (status, body) = post(&app(), "/pullRequest/merge", json!({"pull_request_id": "pr404"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}
