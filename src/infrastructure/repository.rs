//! Repository trait for the task entity.
//!
//! Handlers only ever see `dyn TaskRepository`, so a persistent backend can be
//! dropped in without touching the API layer.

use thiserror::Error;

use crate::domain::{NewTask, Task, TaskId, TaskUpdate};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No task with this id exists (never created, or already deleted).
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// Backend failure unrelated to the caller's input.
    #[error("storage error: {0}")]
    Storage(String),
}

// =============================================================================
// Task Repository
// =============================================================================

/// Repository trait for Task entities.
///
/// Implementations must be safe to call from many threads at once. Every
/// operation either completes fully or fails without side effects.
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task, assigning it the next id and stamping its
    /// timestamps. A missing status defaults to `todo`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` only on backend failure.
    fn create(&self, candidate: NewTask) -> Result<Task, RepositoryError>;

    /// Returns a snapshot of every stored task. Ordering is unspecified.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` only on backend failure.
    fn get_all(&self) -> Result<Vec<Task>, RepositoryError>;

    /// Finds a task by its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such task exists.
    fn get_by_id(&self, id: TaskId) -> Result<Task, RepositoryError>;

    /// Replaces title, description and status of an existing task and
    /// refreshes its `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such task exists.
    fn update(&self, id: TaskId, replacement: TaskUpdate) -> Result<Task, RepositoryError>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such task exists.
    fn delete(&self, id: TaskId) -> Result<(), RepositoryError>;
}

// =============================================================================
// Tests
// =============================================================================
