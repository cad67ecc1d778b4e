//! API error handling.
//!
//! Every failure the API can report collapses into an [`ApiErrorResponse`],
//! rendered as `{"error": "<message>"}` with the matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::extract::{PayloadRejection, TaskIdRejection};
use crate::infrastructure::RepositoryError;

const INVALID_PAYLOAD_MESSAGE: &str = "invalid JSON payload";
const INVALID_TASK_ID_MESSAGE: &str = "invalid task ID";
const TASK_NOT_FOUND_MESSAGE: &str = "task not found";
const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

// =============================================================================
// API Error
// =============================================================================

/// Error body for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(message))
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new(message))
    }

    /// Creates a 405 Method Not Allowed response.
    #[must_use]
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, ApiError::new(message))
    }

    /// Creates a 408 Request Timeout response.
    #[must_use]
    pub fn request_timeout(message: impl Into<String>) -> Self {
        Self::new(StatusCode::REQUEST_TIMEOUT, ApiError::new(message))
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiError::new(message))
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.error.error
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<RepositoryError> for ApiErrorResponse {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(_) => Self::not_found(TASK_NOT_FOUND_MESSAGE),
            // Backend details stay in the logs.
            RepositoryError::Storage(detail) => {
                tracing::error!(%detail, "repository operation failed");
                Self::internal_error(INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl From<PayloadRejection> for ApiErrorResponse {
    fn from(rejection: PayloadRejection) -> Self {
        tracing::debug!(%rejection, "rejected request body");
        Self::bad_request(INVALID_PAYLOAD_MESSAGE)
    }
}

impl From<TaskIdRejection> for ApiErrorResponse {
    fn from(rejection: TaskIdRejection) -> Self {
        tracing::debug!(%rejection, "rejected task id");
        Self::bad_request(INVALID_TASK_ID_MESSAGE)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation failure on a mutation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title is missing, empty, or whitespace only.
    #[error("title is required and cannot be empty")]
    EmptyTitle,

    /// Status is anything other than exactly `todo` or `done`.
    #[error("status must be either 'todo' or 'done'")]
    InvalidStatus,
}

impl From<ValidationError> for ApiErrorResponse {
    fn from(error: ValidationError) -> Self {
        Self::bad_request(error.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================
