//! Task Store API Library
//!
//! A task CRUD service over a concurrent in-memory store. The library holds
//! the domain model, the repository abstraction with its in-memory backend,
//! the HTTP layer, and the server lifecycle; the binary only wires them up.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod server;
