//! Infrastructure module for task storage.
//!
//! This module contains the repository abstraction and its in-memory backend.

pub mod in_memory;
pub mod repository;

pub use in_memory::InMemoryTaskRepository;
pub use repository::{RepositoryError, TaskRepository};
