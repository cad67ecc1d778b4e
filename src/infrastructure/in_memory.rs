//! In-memory repository implementation.
//!
//! # Features
//!
//! - Thread-safe with `Arc<RwLock<...>>`: lookups share the lock, mutations
//!   hold it exclusively
//! - The id counter lives under the same lock as the records, so id
//!   assignment is serialized with every other write
//! - Ids are never reused, even after deletion

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{NewTask, Task, TaskId, TaskUpdate, Timestamp};
use crate::infrastructure::{RepositoryError, TaskRepository};

// =============================================================================
// Task Table
// =============================================================================

/// Records plus the last id handed out.
#[derive(Debug, Default)]
struct TaskTable {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl TaskTable {
    /// Advances the counter by one and returns the new id.
    fn next_id(&mut self) -> Result<TaskId, RepositoryError> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Storage("task id space exhausted".to_string()))?;
        self.last_id = next;
        Ok(TaskId::new(next))
    }
}

// =============================================================================
// In-Memory Task Repository
// =============================================================================

/// In-memory implementation of `TaskRepository`.
///
/// Cloning is cheap and every clone shares the same table.
///
/// # Example
///
/// ```
/// use task_store_api::domain::{NewTask, TaskStatus};
/// use task_store_api::infrastructure::{InMemoryTaskRepository, TaskRepository};
///
/// let repository = InMemoryTaskRepository::new();
/// let task = repository.create(NewTask::new("Write docs")).unwrap();
///
/// assert_eq!(task.id.value(), 1);
/// assert_eq!(task.status, TaskStatus::Todo);
/// assert_eq!(repository.get_by_id(task.id).unwrap(), task);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    table: Arc<RwLock<TaskTable>>,
}

impl InMemoryTaskRepository {
    /// Creates a new empty in-memory task repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().tasks.len()
    }

    /// Returns true if no tasks are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.read().tasks.is_empty()
    }

    #[cfg(test)]
    fn starting_after(last_id: i64) -> Self {
        Self {
            table: Arc::new(RwLock::new(TaskTable {
                tasks: BTreeMap::new(),
                last_id,
            })),
        }
    }
}

#[allow(clippy::significant_drop_tightening)]
impl TaskRepository for InMemoryTaskRepository {
    fn create(&self, candidate: NewTask) -> Result<Task, RepositoryError> {
        let mut table = self.table.write();
        let id = table.next_id()?;
        let task = Task::create(id, candidate, Timestamp::now());
        table.tasks.insert(id, task.clone());
        tracing::debug!(task_id = %id, "task created");
        Ok(task)
    }

    fn get_all(&self) -> Result<Vec<Task>, RepositoryError> {
        let table = self.table.read();
        Ok(table.tasks.values().cloned().collect())
    }

    fn get_by_id(&self, id: TaskId) -> Result<Task, RepositoryError> {
        let table = self.table.read();
        table
            .tasks
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    fn update(&self, id: TaskId, replacement: TaskUpdate) -> Result<Task, RepositoryError> {
        let mut table = self.table.write();
        let task = table
            .tasks
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        task.apply(replacement, Timestamp::now());
        tracing::debug!(task_id = %id, status = %task.status, "task updated");
        Ok(task.clone())
    }

    fn delete(&self, id: TaskId) -> Result<(), RepositoryError> {
        let mut table = self.table.write();
        if table.tasks.remove(&id).is_none() {
            return Err(RepositoryError::NotFound(id));
        }
        tracing::debug!(task_id = %id, "task deleted");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
