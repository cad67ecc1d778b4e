//! Request extractors.
//!
//! Both extractors reject before any validation or store access, and their
//! rejections render through [`ApiErrorResponse`] so clients always receive
//! the uniform error body instead of axum's plain-text defaults.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::error::ApiErrorResponse;
use crate::domain::TaskId;

// =============================================================================
// JSON Body
// =============================================================================

/// JSON request body.
///
/// Unlike `axum::Json`, the `Content-Type` header is not required; the body
/// is parsed as JSON whatever the client declared. The top-level value must
/// be an object.
#[derive(Debug)]
pub struct JsonPayload<T>(pub T);

/// Why a request body could not be turned into the expected shape.
#[derive(Debug, Error)]
pub enum PayloadRejection {
    /// The body could not be read.
    #[error("failed to read request body: {0}")]
    Body(String),

    /// The body is JSON but not an object.
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// The body is not JSON, or not the expected structure.
    #[error("failed to parse request body: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        ApiErrorResponse::from(self).into_response()
    }
}

impl<S, T> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = PayloadRejection;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| PayloadRejection::Body(rejection.body_text()))?;
        let value: Value = serde_json::from_slice(&body)?;
        // Derived struct impls also accept sequences, filling fields by position.
        if !value.is_object() {
            return Err(PayloadRejection::NotAnObject);
        }
        Ok(Self(serde_json::from_value(value)?))
    }
}

// =============================================================================
// Task Id Path Segment
// =============================================================================

/// The `{id}` path segment, parsed as a [`TaskId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskIdPath(pub TaskId);

/// Why the `{id}` path segment is unusable.
#[derive(Debug, Error)]
pub enum TaskIdRejection {
    /// The route has no usable `{id}` segment.
    #[error("missing task id: {0}")]
    Missing(String),

    /// The segment is not a base-10 signed 64-bit integer.
    #[error("task id {0:?} is not a 64-bit integer")]
    Malformed(String),
}

impl IntoResponse for TaskIdRejection {
    fn into_response(self) -> Response {
        ApiErrorResponse::from(self).into_response()
    }
}

impl<S> FromRequestParts<S> for TaskIdPath
where
    S: Send + Sync,
{
    type Rejection = TaskIdRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| TaskIdRejection::Missing(rejection.body_text()))?;
        parse_task_id(&raw).map(Self)
    }
}

/// Parses a path segment into a task id.
///
/// # Errors
///
/// Returns `TaskIdRejection::Malformed` if the segment is not an `i64`.
pub fn parse_task_id(raw: &str) -> Result<TaskId, TaskIdRejection> {
    raw.parse::<i64>()
        .map(TaskId::new)
        .map_err(|_| TaskIdRejection::Malformed(raw.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
