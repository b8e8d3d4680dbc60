//! # API Shared
//!
//! Shared definitions for the taskboard APIs.
//!
//! Contains:
//! - Wire types (`types` module) shared by the REST server and its clients
//! - The `HealthService`
//! - Graceful-shutdown signal handling for the servers
//! - The fixed, operation-specific error messages
//!
//! Used by `api-rest`, `taskboard-client` and `dev-proxy`.

pub mod health;
pub mod shutdown;
pub mod types;

pub use health::HealthService;
pub use shutdown::shutdown_signal;
pub use types::*;

/// Path prefix under which the task routes are mounted.
pub const TASKS_PATH: &str = "/api/tasks";

/// Path prefix forwarded by the dev proxy.
pub const API_PREFIX: &str = "/api";

/// Fixed error messages, one per failing operation.
pub mod messages {
    pub const CREATE_FAILED: &str = "Could not create task";
    pub const LIST_FAILED: &str = "Could not fetch tasks";
    pub const UPDATE_FAILED: &str = "Could not update task";
    pub const DELETE_FAILED: &str = "Could not delete task";
    pub const NOT_FOUND: &str = "Task not found";
    pub const INVALID_BODY: &str = "Request body must be a JSON object";
}
