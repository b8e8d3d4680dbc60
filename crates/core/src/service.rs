//! Task operations.
//!
//! [`TaskService`] is the handle the API layer receives. It owns the store and the policies
//! resolved at startup, checks request bodies against the configured [`TaskSchema`], and
//! otherwise passes each call straight through to the store.

use crate::config::{CoreConfig, MissingTask, UpdateResponse};
use crate::error::{TaskError, TaskResult};
use crate::schema::TaskSchema;
use crate::store::{open_store, TaskStore};
use crate::task::Task;
use serde_json::Value;
use std::sync::Arc;
use taskboard_uuid::TaskId;

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    schema: TaskSchema,
    update_response: UpdateResponse,
    missing_task: MissingTask,
}

impl TaskService {
    /// Wrap `store` with the default policies and a free-form schema.
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self {
            store,
            schema: TaskSchema::free_form(),
            update_response: UpdateResponse::default(),
            missing_task: MissingTask::default(),
        }
    }

    /// Open the configured store and apply the configured schema and policies.
    ///
    /// # Errors
    /// Returns an error if the store cannot be opened.
    pub fn from_config(cfg: &CoreConfig) -> TaskResult<Self> {
        Ok(Self::with_store(open_store(cfg)?, cfg))
    }

    /// Use an already-constructed store with the schema and policies from `cfg`.
    pub fn with_store(store: Arc<dyn TaskStore>, cfg: &CoreConfig) -> Self {
        Self {
            store,
            schema: cfg.schema().clone(),
            update_response: cfg.update_response(),
            missing_task: cfg.missing_task(),
        }
    }

    /// Create a task from a request body.
    ///
    /// # Errors
    /// Schema errors (see [`TaskSchema::validate`]) or any store failure.
    pub async fn create(&self, body: Value) -> TaskResult<Task> {
        let fields = self.schema.validate(body)?;
        self.store.create(fields).await
    }

    /// Every task in creation order.
    pub async fn list(&self) -> TaskResult<Vec<Task>> {
        self.store.list().await
    }

    /// Replace the fields of task `id` with `body`.
    ///
    /// Returns the previous or current document depending on the update-response policy. A
    /// well-formed `id` that names no task is reported according to the missing-task policy.
    ///
    /// # Errors
    /// [`TaskError::InvalidId`] if `id` is not a well-formed identifier, schema errors, or any
    /// store failure.
    pub async fn update(&self, id: &str, body: Value) -> TaskResult<Option<Task>> {
        let fields = self.schema.validate(body)?;
        let id = TaskId::parse(id)?;

        match self.store.replace(&id, fields).await? {
            Some(replaced) => Ok(Some(match self.update_response {
                UpdateResponse::Previous => replaced.previous,
                UpdateResponse::Current => replaced.current,
            })),
            None => self.missing(&id),
        }
    }

    /// Remove task `id` and return it. Missing tasks follow the missing-task policy.
    ///
    /// # Errors
    /// [`TaskError::InvalidId`] if `id` is not a well-formed identifier, or any store failure.
    pub async fn delete(&self, id: &str) -> TaskResult<Option<Task>> {
        let id = TaskId::parse(id)?;

        match self.store.delete(&id).await? {
            Some(task) => Ok(Some(task)),
            None => self.missing(&id),
        }
    }

    pub async fn health_check(&self) -> TaskResult<()> {
        self.store.health_check().await
    }

    fn missing(&self, id: &TaskId) -> TaskResult<Option<Task>> {
        match self.missing_task {
            MissingTask::Null => Ok(None),
            MissingTask::NotFound => Err(TaskError::NotFound(id.to_string())),
        }
    }
}
