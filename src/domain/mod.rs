//! Domain module for task management.
//!
//! This module contains the task entity, its value objects, and the
//! mutation shapes accepted by the store.

pub mod task;

pub use task::{NewTask, ParseTaskStatusError, Task, TaskId, TaskStatus, TaskUpdate, Timestamp};
