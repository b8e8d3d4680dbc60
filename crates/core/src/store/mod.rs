//! Task persistence.
//!
//! [`TaskStore`] is the seam between the service and the document store. The service only ever
//! talks to an `Arc<dyn TaskStore>` constructed once at startup by [`open_store`].
//!
//! Two implementations ship with the crate:
//! - [`files::FileTaskStore`]: sharded JSON documents on disk (durable, the default).
//! - [`memory::InMemoryTaskStore`]: process memory (tests and throwaway runs).

use crate::config::{CoreConfig, StoreBackend};
use crate::error::TaskResult;
use crate::task::{Task, TaskFields};
use async_trait::async_trait;
use std::sync::Arc;
use taskboard_uuid::TaskId;

pub mod files;
mod helpers;
pub mod memory;

/// Outcome of replacing a task's fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Replaced {
    /// The task as it was before the replacement.
    pub previous: Task,
    /// The task as stored after the replacement.
    pub current: Task,
}

/// A document collection holding tasks.
///
/// Implementations own identifier allocation: `create` assigns a fresh [`TaskId`] exactly once,
/// and nothing else may change it. `list` returns tasks in creation order.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persist a new task with the given fields and return it with its identifier.
    async fn create(&self, fields: TaskFields) -> TaskResult<Task>;

    /// Every task, oldest first.
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// Replace every field of the task `id`. `Ok(None)` when no such task exists.
    async fn replace(&self, id: &TaskId, fields: TaskFields) -> TaskResult<Option<Replaced>>;

    /// Remove the task `id` and return it. `Ok(None)` when no such task exists.
    async fn delete(&self, id: &TaskId) -> TaskResult<Option<Task>>;

    async fn health_check(&self) -> TaskResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}

/// Open the store selected by `cfg`.
///
/// # Errors
/// Returns an error if the file store's data directory cannot be created or scanned.
pub fn open_store(cfg: &CoreConfig) -> TaskResult<Arc<dyn TaskStore>> {
    let store: Arc<dyn TaskStore> = match cfg.store_backend() {
        StoreBackend::Files => Arc::new(files::FileTaskStore::open(cfg.tasks_dir())?),
        StoreBackend::Memory => Arc::new(memory::InMemoryTaskStore::new()),
    };
    tracing::info!(backend = store.backend_name(), "task store opened");
    Ok(store)
}
