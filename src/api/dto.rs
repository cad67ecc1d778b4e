//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs accept missing and `null` fields so that an absent title or
//! status surfaces as a validation error rather than a parse error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::domain::{NewTask, Task, TaskStatus, TaskUpdate};

// =============================================================================
// Task DTOs
// =============================================================================

/// Request DTO for creating a new task.
///
/// There is no status field: new tasks always start as `todo`, and a status
/// sent by the client is ignored like any other unknown field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    /// Title of the task.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTaskRequest {
    /// Validates the request and converts it into a store candidate.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyTitle` if the title is missing or blank.
    pub fn validate(self) -> Result<NewTask, ValidationError> {
        let title = self.title.unwrap_or_default();
        validate_title(&title)?;
        Ok(NewTask::new(title).with_description(self.description.unwrap_or_default()))
    }
}

/// Request DTO for replacing a task's fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description; missing means empty.
    #[serde(default)]
    pub description: Option<String>,
    /// New status, kept as raw text so an unknown value is a validation error.
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateTaskRequest {
    /// Validates the request and converts it into a full replacement.
    ///
    /// The title is checked before the status and only the first failure is
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyTitle` or `ValidationError::InvalidStatus`.
    pub fn validate(self) -> Result<TaskUpdate, ValidationError> {
        let title = self.title.unwrap_or_default();
        validate_title(&title)?;
        let status = validate_status(self.status.as_deref().unwrap_or_default())?;
        Ok(TaskUpdate::new(
            title,
            self.description.unwrap_or_default(),
            status,
        ))
    }
}

/// Response DTO for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task ID.
    pub id: i64,
    /// Title of the task.
    pub title: String,
    /// Description of the task.
    pub description: String,
    /// Current status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.value(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            created_at: *task.created_at.as_datetime(),
            updated_at: *task.updated_at.as_datetime(),
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validates a task title.
///
/// The title is not modified; trimming is only used for the emptiness check.
///
/// # Errors
///
/// Returns `ValidationError::EmptyTitle` if the title is blank.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// Validates a task status.
///
/// # Errors
///
/// Returns `ValidationError::InvalidStatus` unless the value is exactly
/// `todo` or `done`.
pub fn validate_status(status: &str) -> Result<TaskStatus, ValidationError> {
    status
        .parse::<TaskStatus>()
        .map_err(|_| ValidationError::InvalidStatus)
}

// =============================================================================
// Tests
// =============================================================================
