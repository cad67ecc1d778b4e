//! Routing definitions for the Task API.
//!
//! Routes and middleware live here so tests can drive the exact router the
//! binary serves.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiErrorResponse;
use super::handlers::{AppState, create_task, delete_task, get_task, list_tasks, update_task};

/// Upper bound on the time spent handling one request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// =============================================================================
// Router Creation
// =============================================================================

/// Creates the API router with all routes and middleware.
///
/// # Middleware
///
/// - `TraceLayer`: request/response logging
/// - `CatchPanicLayer`: turns a handler panic into a 500 with the error body
/// - `TimeoutLayer`: answers 408 with the error body once [`REQUEST_TIMEOUT`]
///   elapses
///
/// Unknown paths answer 404 and unsupported methods 405, both with the error
/// body.
///
/// # Examples
///
/// ```ignore
/// use task_store_api::api::{AppState, create_router};
///
/// let router = create_router(AppState::in_memory());
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(map_response(render_timeout))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> ApiErrorResponse {
    ApiErrorResponse::not_found("not found")
}

async fn method_not_allowed() -> ApiErrorResponse {
    ApiErrorResponse::method_not_allowed("method not allowed")
}

/// Gives the timeout layer's bodiless 408 the uniform error body.
async fn render_timeout(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiErrorResponse::request_timeout("request timed out").into_response();
    }
    response
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(%detail, "request handler panicked");
    ApiErrorResponse::internal_error("internal server error").into_response()
}

// =============================================================================
// Tests
// =============================================================================
