//! File-backed task store.
//!
//! Each task is one JSON document in a sharded directory tree:
//!
//! ```text
//! task_data/
//!   tasks/
//!     <s1>/
//!       <s2>/
//!         <id>/
//!           task.json
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the identifier.
//!
//! The document keeps the creation stamp next to the client fields so listings can be returned
//! in creation order after a restart:
//!
//! ```json
//! { "_id": "550e8400e29b41d4a716446655440000",
//!   "created_at": "2026-10-16T09:12:44.120Z",
//!   "fields": { "title": "buy milk" } }
//! ```
//!
//! Mutations are serialized by a single async mutex, which also holds the last creation stamp.
//! Reads take no lock: documents are replaced by rename, so a reader sees either the old or the
//! new version. Blocking filesystem work runs on tokio's blocking pool.

use super::helpers::{create_unique_task_dir, write_json_atomically};
use super::{Replaced, TaskStore};
use crate::constants::TASK_JSON_FILENAME;
use crate::error::{TaskError, TaskResult};
use crate::task::{Task, TaskFields};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskboard_uuid::{CreationStamp, TaskId};
use tokio::sync::Mutex;

/// On-disk form of a task.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(rename = "_id")]
    id: TaskId,
    created_at: CreationStamp,
    fields: TaskFields,
}

impl TaskDocument {
    fn into_task(self) -> Task {
        Task::new(self.id, self.fields)
    }
}

#[derive(Debug)]
pub struct FileTaskStore {
    tasks_dir: Arc<PathBuf>,
    last_created: Mutex<Option<CreationStamp>>,
}

impl FileTaskStore {
    /// Open (creating if needed) a store rooted at `tasks_dir`.
    ///
    /// Existing documents are scanned once so new creation stamps sort after them.
    ///
    /// # Errors
    /// Returns [`TaskError::StorageDirCreation`] if the directory cannot be created, or
    /// [`TaskError::FileRead`] if it cannot be scanned.
    pub fn open(tasks_dir: impl Into<PathBuf>) -> TaskResult<Self> {
        let tasks_dir = tasks_dir.into();
        fs::create_dir_all(&tasks_dir).map_err(TaskError::StorageDirCreation)?;

        let last_created = read_all_documents(&tasks_dir)?
            .into_iter()
            .map(|doc| doc.created_at)
            .max();

        Ok(Self {
            tasks_dir: Arc::new(tasks_dir),
            last_created: Mutex::new(last_created),
        })
    }

    pub fn tasks_dir(&self) -> &Path {
        &self.tasks_dir
    }
}

#[async_trait]
impl TaskStore for FileTaskStore {
    async fn create(&self, fields: TaskFields) -> TaskResult<Task> {
        let mut last_created = self.last_created.lock().await;
        let created_at = CreationStamp::generate(last_created.as_ref());
        let tasks_dir = Arc::clone(&self.tasks_dir);

        let task = tokio::task::spawn_blocking(move || {
            create_document(&tasks_dir, created_at, fields, write_json_atomically)
        })
        .await??;

        *last_created = Some(created_at);
        Ok(task)
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let tasks_dir = Arc::clone(&self.tasks_dir);
        let docs = tokio::task::spawn_blocking(move || read_all_documents(&tasks_dir)).await??;
        Ok(docs.into_iter().map(TaskDocument::into_task).collect())
    }

    async fn replace(&self, id: &TaskId, fields: TaskFields) -> TaskResult<Option<Replaced>> {
        let _guard = self.last_created.lock().await;
        let tasks_dir = Arc::clone(&self.tasks_dir);
        let id = id.clone();

        tokio::task::spawn_blocking(move || replace_document(&tasks_dir, &id, fields)).await?
    }

    async fn delete(&self, id: &TaskId) -> TaskResult<Option<Task>> {
        let _guard = self.last_created.lock().await;
        let tasks_dir = Arc::clone(&self.tasks_dir);
        let id = id.clone();

        tokio::task::spawn_blocking(move || delete_document(&tasks_dir, &id)).await?
    }

    async fn health_check(&self) -> TaskResult<()> {
        match fs::metadata(self.tasks_dir.as_path()) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(TaskError::StoreUnavailable(format!(
                "{} is not a directory",
                self.tasks_dir.display()
            ))),
            Err(e) => Err(TaskError::StoreUnavailable(format!(
                "{}: {}",
                self.tasks_dir.display(),
                e
            ))),
        }
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "files"
    }
}

/// Allocates a task directory and writes the document with `write`. On a failed write the
/// directory is removed again.
fn create_document<W>(
    tasks_dir: &Path,
    created_at: CreationStamp,
    fields: TaskFields,
    write: W,
) -> TaskResult<Task>
where
    W: FnOnce(&Path, &TaskDocument) -> TaskResult<()>,
{
    let (id, task_dir) = create_unique_task_dir(tasks_dir, TaskId::new)?;
    let doc = TaskDocument {
        id,
        created_at,
        fields,
    };

    if let Err(e) = write(&task_dir.join(TASK_JSON_FILENAME), &doc) {
        // Leave nothing behind for a task the caller was told failed.
        if let Err(cleanup) = fs::remove_dir_all(&task_dir) {
            tracing::warn!(
                "failed to clean up task directory {}: {}",
                task_dir.display(),
                cleanup
            );
        }
        return Err(e);
    }

    Ok(doc.into_task())
}

/// Reads a single document. `Ok(None)` if the task does not exist.
fn read_document(path: &Path) -> TaskResult<Option<TaskDocument>> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(TaskError::FileRead(e)),
    };
    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(TaskError::Deserialization)
}

fn replace_document(
    tasks_dir: &Path,
    id: &TaskId,
    fields: TaskFields,
) -> TaskResult<Option<Replaced>> {
    let path = id.sharded_dir(tasks_dir).join(TASK_JSON_FILENAME);
    let Some(previous) = read_document(&path)? else {
        return Ok(None);
    };

    let current = TaskDocument {
        id: previous.id.clone(),
        created_at: previous.created_at,
        fields,
    };
    write_json_atomically(&path, &current)?;

    Ok(Some(Replaced {
        previous: previous.into_task(),
        current: current.into_task(),
    }))
}

fn delete_document(tasks_dir: &Path, id: &TaskId) -> TaskResult<Option<Task>> {
    let task_dir = id.sharded_dir(tasks_dir);
    let Some(doc) = read_document(&task_dir.join(TASK_JSON_FILENAME))? else {
        return Ok(None);
    };

    fs::remove_dir_all(&task_dir).map_err(TaskError::FileRemove)?;

    // Empty shard directories are harmless; prune them when we can.
    for shard in task_dir.ancestors().skip(1).take(2) {
        if fs::remove_dir(shard).is_err() {
            break;
        }
    }

    Ok(Some(doc.into_task()))
}

/// Reads every document under `tasks_dir`, oldest first.
///
/// Expects documents at `<tasks_dir>/<s1>/<s2>/<id>/task.json`. Directories without a document
/// (a create in flight) are skipped; documents that cannot be read or parsed are logged and
/// skipped.
fn read_all_documents(tasks_dir: &Path) -> TaskResult<Vec<TaskDocument>> {
    let mut docs = Vec::new();

    for s1 in fs::read_dir(tasks_dir).map_err(TaskError::FileRead)?.flatten() {
        let s1_path = s1.path();
        if !s1_path.is_dir() {
            continue;
        }

        let s2_iter = match fs::read_dir(&s1_path) {
            Ok(it) => it,
            Err(_) => continue,
        };

        for s2 in s2_iter.flatten() {
            let s2_path = s2.path();
            if !s2_path.is_dir() {
                continue;
            }

            let id_iter = match fs::read_dir(&s2_path) {
                Ok(it) => it,
                Err(_) => continue,
            };

            for id_ent in id_iter.flatten() {
                let doc_path = id_ent.path().join(TASK_JSON_FILENAME);
                match read_document(&doc_path) {
                    Ok(Some(doc)) => docs.push(doc),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("skipping task document {}: {}", doc_path.display(), e)
                    }
                }
            }
        }
    }

    docs.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(docs)
}
