//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment variables;
//! binaries read them, hand the raw values to the `*_from_env_value` parsers below, and build a
//! [`CoreConfig`] from the result.

use crate::constants::TASKS_DIR_NAME;
use crate::error::{TaskError, TaskResult};
use crate::schema::TaskSchema;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which [`TaskStore`](crate::store::TaskStore) implementation backs the service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// Sharded JSON documents under the task data directory.
    #[default]
    Files,
    /// Process memory; lost on restart.
    Memory,
}

/// Which document an update returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateResponse {
    /// The document as it was before the update.
    #[default]
    Previous,
    /// The document as stored after the update.
    Current,
}

/// How update and delete report an identifier that matches no task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingTask {
    /// Succeed with a `null` body.
    #[default]
    Null,
    /// Fail with a not-found error.
    NotFound,
}

impl FromStr for StoreBackend {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "files" | "file" => Ok(Self::Files),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(TaskError::InvalidInput(format!(
                "unknown store backend '{other}' (expected 'files' or 'memory')"
            ))),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Files => "files",
            Self::Memory => "memory",
        })
    }
}

impl FromStr for UpdateResponse {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "previous" | "before" => Ok(Self::Previous),
            "current" | "after" => Ok(Self::Current),
            other => Err(TaskError::InvalidInput(format!(
                "unknown update response '{other}' (expected 'previous' or 'current')"
            ))),
        }
    }
}

impl FromStr for MissingTask {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "null" => Ok(Self::Null),
            "not-found" | "not_found" | "404" => Ok(Self::NotFound),
            other => Err(TaskError::InvalidInput(format!(
                "unknown missing-task policy '{other}' (expected 'null' or 'not-found')"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    task_data_dir: PathBuf,
    store_backend: StoreBackend,
    schema: TaskSchema,
    update_response: UpdateResponse,
    missing_task: MissingTask,
}

impl CoreConfig {
    /// Create a new `CoreConfig` with the default policies and a free-form schema.
    pub fn new(task_data_dir: PathBuf, store_backend: StoreBackend) -> Self {
        Self {
            task_data_dir,
            store_backend,
            schema: TaskSchema::free_form(),
            update_response: UpdateResponse::default(),
            missing_task: MissingTask::default(),
        }
    }

    pub fn with_schema(mut self, schema: TaskSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_update_response(mut self, update_response: UpdateResponse) -> Self {
        self.update_response = update_response;
        self
    }

    pub fn with_missing_task(mut self, missing_task: MissingTask) -> Self {
        self.missing_task = missing_task;
        self
    }

    pub fn task_data_dir(&self) -> &Path {
        &self.task_data_dir
    }

    pub fn tasks_dir(&self) -> PathBuf {
        self.task_data_dir.join(TASKS_DIR_NAME)
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.store_backend
    }

    pub fn schema(&self) -> &TaskSchema {
        &self.schema
    }

    pub fn update_response(&self) -> UpdateResponse {
        self.update_response
    }

    pub fn missing_task(&self) -> MissingTask {
        self.missing_task
    }
}

fn parse_or_default<T>(value: Option<String>) -> TaskResult<T>
where
    T: FromStr<Err = TaskError> + Default,
{
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    Ok(value.map(|v| v.parse::<T>()).transpose()?.unwrap_or_default())
}

/// Parse the store backend. `None` or blank selects [`StoreBackend::Files`].
pub fn store_backend_from_env_value(value: Option<String>) -> TaskResult<StoreBackend> {
    parse_or_default(value)
}

/// Parse the update-response policy. `None` or blank selects [`UpdateResponse::Previous`].
pub fn update_response_from_env_value(value: Option<String>) -> TaskResult<UpdateResponse> {
    parse_or_default(value)
}

/// Parse the missing-task policy. `None` or blank selects [`MissingTask::Null`].
pub fn missing_task_from_env_value(value: Option<String>) -> TaskResult<MissingTask> {
    parse_or_default(value)
}
