//! Task domain model.
//!
//! A task is created from a [`NewTask`] candidate, replaced wholesale by a
//! [`TaskUpdate`], and identified by a store-assigned [`TaskId`].

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task.
///
/// Identifiers are assigned by the store, start at 1, and are never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Creates a `TaskId` from a raw integer.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

/// A UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a `Timestamp` from a `DateTime<Utc>`.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the current time as a `Timestamp`.
    ///
    /// **Note**: reads the system clock.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0.to_rfc3339())
    }
}

// =============================================================================
// Enums
// =============================================================================

/// The status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not finished yet.
    #[default]
    Todo,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned when a string is not exactly `todo` or `done`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task status: {0:?}")]
pub struct ParseTaskStatusError(pub String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    /// Parses a status. Matching is exact: no trimming, no case folding.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "todo" => Ok(Self::Todo),
            "done" => Ok(Self::Done),
            other => Err(ParseTaskStatusError(other.to_string())),
        }
    }
}

// =============================================================================
// Mutation Shapes
// =============================================================================

/// Candidate for a new task, before the store assigns identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    /// `None` means the store applies [`TaskStatus::default`].
    pub status: Option<TaskStatus>,
}

impl NewTask {
    /// Creates a candidate with the given title, an empty description and no status.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: None,
        }
    }

    /// Returns a new candidate with the given description.
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    /// Returns a new candidate with an explicit status.
    #[must_use]
    pub fn with_status(self, status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }
}

/// Full replacement of a task's mutable fields.
///
/// All three fields are required; nothing is carried over from the old record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl TaskUpdate {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status,
        }
    }
}

// =============================================================================
// Task Entity
// =============================================================================

/// A stored task.
///
/// Invariant: `created_at <= updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// Materializes a candidate into a task.
    ///
    /// Both timestamps are set to `now`; a missing status becomes `todo`.
    #[must_use]
    pub fn create(id: TaskId, candidate: NewTask, now: Timestamp) -> Self {
        Self {
            id,
            title: candidate.title,
            description: candidate.description,
            status: candidate.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces title, description and status, keeping `id` and `created_at`.
    ///
    /// `updated_at` never moves backwards, so a clock that steps back cannot
    /// break the timestamp ordering.
    pub fn apply(&mut self, update: TaskUpdate, now: Timestamp) {
        self.title = update.title;
        self.description = update.description;
        self.status = update.status;
        self.updated_at = now.max(self.updated_at);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(seconds: i64) -> Timestamp {
        Timestamp::from_datetime(Utc.timestamp_opt(seconds, 0).unwrap())
    }

    // -------------------------------------------------------------------------
    // TaskStatus Tests
    // -------------------------------------------------------------------------

    #[rstest]
    #[case("todo", TaskStatus::Todo)]
    #[case("done", TaskStatus::Done)]
    fn test_task_status_parses_exact_values(#[case] input: &str, #[case] expected: TaskStatus) {
        assert_eq!(input.parse::<TaskStatus>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("in-progress")]
    #[case("TODO")]
    #[case(" done")]
    fn test_task_status_rejects_other_values(#[case] input: &str) {
        let error = input.parse::<TaskStatus>().unwrap_err();
        assert_eq!(error, ParseTaskStatusError(input.to_string()));
    }

    #[rstest]
    fn test_task_status_default_is_todo() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
    }

    #[rstest]
    fn test_task_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"done\"");
        assert_eq!(TaskStatus::Todo.to_string(), "todo");
    }

    // -------------------------------------------------------------------------
    // TaskId Tests
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_task_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&TaskId::new(42)).unwrap(), "42");
        assert_eq!(TaskId::from(7).value(), 7);
    }

    // -------------------------------------------------------------------------
    // Task Tests
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_create_defaults_status_and_stamps_both_timestamps() {
        let now = at(100);
        let task = Task::create(TaskId::new(1), NewTask::new("Write docs"), now);

        assert_eq!(task.id, TaskId::new(1));
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.created_at, now);
        assert_eq!(task.updated_at, now);
    }

    #[rstest]
    fn test_create_keeps_explicit_status() {
        let candidate = NewTask::new("Ship").with_status(TaskStatus::Done);
        let task = Task::create(TaskId::new(3), candidate, at(0));
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[rstest]
    fn test_apply_replaces_fields_and_preserves_identity() {
        let mut task = Task::create(
            TaskId::new(5),
            NewTask::new("A").with_description("old"),
            at(10),
        );

        task.apply(TaskUpdate::new("B", "", TaskStatus::Done), at(20));

        assert_eq!(task.id, TaskId::new(5));
        assert_eq!(task.title, "B");
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.created_at, at(10));
        assert_eq!(task.updated_at, at(20));
    }

    #[rstest]
    fn test_apply_never_moves_updated_at_backwards() {
        let mut task = Task::create(TaskId::new(1), NewTask::new("A"), at(50));

        task.apply(TaskUpdate::new("B", "", TaskStatus::Todo), at(40));

        assert_eq!(task.updated_at, at(50));
        assert!(task.created_at <= task.updated_at);
    }
}
