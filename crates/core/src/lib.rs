//! # Taskboard Core
//!
//! Core task logic and persistence for taskboard.
//!
//! This crate contains pure data operations:
//! - The [`Task`] document and its store-assigned identifier
//! - The [`TaskStore`] trait with file-backed and in-memory implementations
//! - [`TaskService`], which applies the field schema and response policies
//! - Startup configuration ([`CoreConfig`])
//!
//! **No API concerns**: HTTP servers, routing, and wire types belong in `api-rest` and
//! `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod schema;
pub mod service;
pub mod store;
pub mod task;

pub use config::{CoreConfig, MissingTask, StoreBackend, UpdateResponse};
pub use constants::DEFAULT_TASK_DATA_DIR;
pub use error::{TaskError, TaskResult};
pub use schema::TaskSchema;
pub use service::TaskService;
pub use store::{open_store, Replaced, TaskStore};
pub use task::{Task, TaskFields};
pub use taskboard_uuid::{CreationStamp, TaskId};
