//! In-memory task store.
//!
//! Holds every task in a `Vec` guarded by a `tokio::sync::RwLock`, in creation order.
//! Not durable: all state is lost when the process exits. Used by tests and by runs started with
//! `TASKBOARD_STORE=memory`.

use super::{Replaced, TaskStore};
use crate::constants::MAX_ID_ALLOCATION_ATTEMPTS;
use crate::error::{TaskError, TaskResult};
use crate::task::{Task, TaskFields};
use async_trait::async_trait;
use taskboard_uuid::TaskId;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create(&self, fields: TaskFields) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;

        let id = (0..MAX_ID_ALLOCATION_ATTEMPTS)
            .map(|_| TaskId::new())
            .find(|candidate| tasks.iter().all(|t| &t.id != candidate))
            .ok_or_else(|| {
                TaskError::StoreUnavailable("failed to allocate a unique task id".into())
            })?;

        let task = Task::new(id, fields);
        tasks.push(task.clone());
        Ok(task)
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        Ok(self.tasks.read().await.clone())
    }

    async fn replace(&self, id: &TaskId, fields: TaskFields) -> TaskResult<Option<Replaced>> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.iter_mut().find(|t| &t.id == id) else {
            return Ok(None);
        };

        let previous = task.clone();
        task.fields = fields;
        Ok(Some(Replaced {
            previous,
            current: task.clone(),
        }))
    }

    async fn delete(&self, id: &TaskId) -> TaskResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks
            .iter()
            .position(|t| &t.id == id)
            .map(|index| tasks.remove(index)))
    }

    async fn health_check(&self) -> TaskResult<()> {
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
