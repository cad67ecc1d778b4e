//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every file uses every
//! helper.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use task_store_api::api::{AppState, TaskResponse, create_router};
use task_store_api::infrastructure::InMemoryTaskRepository;

// =============================================================================
// App Creation Helpers
// =============================================================================

/// Creates a router over a fresh repository, returning both so tests can
/// inspect the store directly.
pub fn create_test_app() -> (Router, InMemoryTaskRepository) {
    let repository = InMemoryTaskRepository::new();
    let state = AppState::new(Arc::new(repository.clone()));
    (create_router(state), repository)
}

// =============================================================================
// Request Helpers
// =============================================================================

/// A collected response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parses the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    /// Parses the body as a task.
    pub fn task(&self) -> TaskResponse {
        serde_json::from_slice(&self.body).expect("response body is not a task")
    }

    /// Returns the `error` field of an error body.
    pub fn error_message(&self) -> String {
        self.json()["error"]
            .as_str()
            .expect("error body has no string `error` field")
            .to_string()
    }
}

/// Sends one request through the router.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map_or_else(Body::empty, |body| Body::from(body.to_string())))
        .expect("failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("failed to collect body")
        .to_bytes()
        .to_vec();

    TestResponse { status, body }
}

/// Creates a task over HTTP and returns it.
pub async fn create_task(app: &Router, title: &str) -> TaskResponse {
    let body = serde_json::json!({ "title": title }).to_string();
    let response = send(app, Method::POST, "/tasks", Some(&body)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.task()
}
