//! Error responses shared by every HTTP endpoint.
//!
//! Body shape: `{"error": {"code": "...", "message": "..."}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::review::ReviewError;
use crate::domain::team::DirectoryError;

const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.as_str().to_string(),
                message: message.into(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }
}

/// Maps a wire error code to its HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::TeamExists
        | ErrorCode::PrExists
        | ErrorCode::PrMerged
        | ErrorCode::NotAssigned
        | ErrorCode::NoCandidate => StatusCode::CONFLICT,
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the response for `code`. Server errors are logged and their
/// detail replaced with a generic message.
pub fn error_response(code: ErrorCode, message: &str) -> Response {
    let status = status_for(code);
    if status.is_server_error() {
        tracing::error!(code = %code, error = %message, "request failed");
        return (status, Json(ErrorResponse::new(ErrorCode::InternalError, INTERNAL_MESSAGE)))
            .into_response();
    }
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

pub fn handle_review_error(error: ReviewError) -> Response {
    error_response(error.code(), error.message())
}

pub fn handle_directory_error(error: DirectoryError) -> Response {
    error_response(error.code(), &error.to_string())
}

pub fn handle_validation_error(error: ValidationError) -> Response {
    error_response(ErrorCode::BadRequest, &error.to_string())
}

/// For JSON body and query string rejections.
pub fn handle_rejection(rejection: impl std::fmt::Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(format!("bad request: {}", rejection))),
    )
        .into_response()
}
