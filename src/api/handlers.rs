//! HTTP handlers for the Task API.
//!
//! Each handler parses, validates, calls the repository once, and maps the
//! outcome. Extraction and validation failures return before the repository
//! is touched.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use super::dto::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use super::error::ApiErrorResponse;
use super::extract::{JsonPayload, TaskIdPath};
use crate::infrastructure::{InMemoryTaskRepository, TaskRepository};

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// Holds the repository as a trait object so the backend is chosen at
/// startup without the handlers knowing which one it is.
#[derive(Clone)]
pub struct AppState {
    /// Task repository.
    pub task_repository: Arc<dyn TaskRepository + Send + Sync>,
}

impl AppState {
    /// Creates a new `AppState` around the given repository.
    #[must_use]
    pub fn new(task_repository: Arc<dyn TaskRepository + Send + Sync>) -> Self {
        Self { task_repository }
    }

    /// Creates a new `AppState` backed by a fresh in-memory repository.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTaskRepository::new()))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("AppState").finish_non_exhaustive()
    }
}

// =============================================================================
// POST /tasks
// =============================================================================

/// Creates a new task.
///
/// # Response
///
/// - **201 Created**: the materialized task
/// - **400 Bad Request**: malformed JSON or blank title
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on validation or repository failure.
pub async fn create_task(
    State(state): State<AppState>,
    JsonPayload(request): JsonPayload<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiErrorResponse> {
    let candidate = request.validate()?;
    let task = state.task_repository.create(candidate)?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

// =============================================================================
// GET /tasks
// =============================================================================

/// Lists every task. An empty store yields `[]`.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] only on repository failure.
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, ApiErrorResponse> {
    let tasks = state.task_repository.get_all()?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

// =============================================================================
// GET /tasks/{id}
// =============================================================================

/// Fetches a single task.
///
/// # Response
///
/// - **200 OK**: the task
/// - **400 Bad Request**: non-numeric id
/// - **404 Not Found**: no such task
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the task does not exist.
pub async fn get_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let task = state.task_repository.get_by_id(id)?;
    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// PUT /tasks/{id}
// =============================================================================

/// Replaces a task's title, description and status.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "New title",
///   "description": "New description",
///   "status": "todo|done"
/// }
/// ```
///
/// # Response
///
/// - **200 OK**: the updated task
/// - **400 Bad Request**: non-numeric id, malformed JSON, blank title or bad status
/// - **404 Not Found**: no such task
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on validation failure or if the task does not exist.
pub async fn update_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
    JsonPayload(request): JsonPayload<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let replacement = request.validate()?;
    let task = state.task_repository.update(id, replacement)?;
    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// DELETE /tasks/{id}
// =============================================================================

/// Deletes a task.
///
/// # Response
///
/// - **204 No Content**: deleted
/// - **400 Bad Request**: non-numeric id
/// - **404 Not Found**: no such task
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the task does not exist.
pub async fn delete_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
) -> Result<StatusCode, ApiErrorResponse> {
    state.task_repository.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    use crate::domain::{NewTask, Task, TaskId, TaskStatus, TaskUpdate};
    use crate::infrastructure::RepositoryError;

    /// Repository whose every call fails with a storage error.
    struct FailingRepository;

    impl TaskRepository for FailingRepository {
        fn create(&self, _candidate: NewTask) -> Result<Task, RepositoryError> {
            Err(RepositoryError::Storage("unavailable".to_string()))
        }

        fn get_all(&self) -> Result<Vec<Task>, RepositoryError> {
            Err(RepositoryError::Storage("unavailable".to_string()))
        }

        fn get_by_id(&self, _id: TaskId) -> Result<Task, RepositoryError> {
            Err(RepositoryError::Storage("unavailable".to_string()))
        }

        fn update(&self, _id: TaskId, _replacement: TaskUpdate) -> Result<Task, RepositoryError> {
            Err(RepositoryError::Storage("unavailable".to_string()))
        }

        fn delete(&self, _id: TaskId) -> Result<(), RepositoryError> {
            Err(RepositoryError::Storage("unavailable".to_string()))
        }
    }

    #[fixture]
    fn state() -> AppState {
        AppState::in_memory()
    }

    fn create_request(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: Some(title.to_string()),
            description: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_task_returns_created(state: AppState) {
        let (status, Json(task)) = create_task(State(state), JsonPayload(create_request("Write docs")))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_task_validation_leaves_store_untouched(state: AppState) {
        let error = create_task(State(state.clone()), JsonPayload(create_request("  ")))
            .await
            .unwrap_err();

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert!(state.task_repository.get_all().unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_task_invalid_status_keeps_record(state: AppState) {
        let created = state.task_repository.create(NewTask::new("A")).unwrap();
        let request = UpdateTaskRequest {
            title: Some("X".to_string()),
            description: None,
            status: Some("in-progress".to_string()),
        };

        let error = update_task(State(state.clone()), TaskIdPath(created.id), JsonPayload(request))
            .await
            .unwrap_err();

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(state.task_repository.get_by_id(created.id).unwrap(), created);
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_task_twice(state: AppState) {
        let created = state.task_repository.create(NewTask::new("A")).unwrap();

        let first = delete_task(State(state.clone()), TaskIdPath(created.id)).await;
        let second = delete_task(State(state), TaskIdPath(created.id)).await;

        assert_eq!(first.unwrap(), StatusCode::NO_CONTENT);
        assert_eq!(second.unwrap_err().status, StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn test_storage_errors_map_to_internal_error() {
        let state = AppState::new(Arc::new(FailingRepository));

        let list = list_tasks(State(state.clone())).await.unwrap_err();
        let get = get_task(State(state.clone()), TaskIdPath(TaskId::new(1)))
            .await
            .unwrap_err();
        let create = create_task(State(state), JsonPayload(create_request("A")))
            .await
            .unwrap_err();

        for error in [list, get, create] {
            assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(error.message(), "internal server error");
        }
    }
}
