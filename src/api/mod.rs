//! API module for HTTP handlers.
//!
//! This module contains route definitions, extractors, and request/response
//! handlers.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use dto::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
pub use error::{ApiError, ApiErrorResponse, ValidationError};
pub use extract::{JsonPayload, PayloadRejection, TaskIdPath, TaskIdRejection};
pub use handlers::{AppState, create_task, delete_task, get_task, list_tasks, update_task};
pub use routes::create_router;
