//! Filesystem helpers for the file-backed store.

use crate::constants::MAX_ID_ALLOCATION_ATTEMPTS;
use crate::error::{TaskError, TaskResult};
use serde::Serialize;
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use taskboard_uuid::TaskId;

/// Creates a unique sharded directory for a new task under `base_dir`.
///
/// Identifiers come from `id_source`. A candidate whose directory already exists (an identifier
/// collision, or a leftover from outside interference) is skipped, up to
/// [`MAX_ID_ALLOCATION_ATTEMPTS`] times.
///
/// # Errors
///
/// Returns [`TaskError::TaskDirCreation`] if:
/// - directory creation fails after the allowed attempts,
/// - parent directory creation fails.
pub(crate) fn create_unique_task_dir(
    base_dir: &Path,
    mut id_source: impl FnMut() -> TaskId,
) -> TaskResult<(TaskId, PathBuf)> {
    for _attempt in 0..MAX_ID_ALLOCATION_ATTEMPTS {
        let id = id_source();
        let candidate = id.sharded_dir(base_dir);

        if candidate.exists() {
            continue;
        }

        if let Some(parent) = candidate.parent() {
            fs::create_dir_all(parent).map_err(TaskError::TaskDirCreation)?;
        }

        match fs::create_dir(&candidate) {
            Ok(()) => return Ok((id, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(TaskError::TaskDirCreation(e)),
        }
    }

    Err(TaskError::TaskDirCreation(io::Error::new(
        ErrorKind::AlreadyExists,
        format!(
            "failed to allocate a unique task directory after {} attempts",
            MAX_ID_ALLOCATION_ATTEMPTS
        ),
    )))
}

/// Writes `value` as pretty JSON to `path` by way of a sibling temp file and a rename, so
/// readers never observe a half-written document.
pub(crate) fn write_json_atomically<T: Serialize>(path: &Path, value: &T) -> TaskResult<()> {
    let raw = serde_json::to_vec_pretty(value).map_err(TaskError::Serialization)?;
    let tmp = path.with_extension("json.tmp");

    fs::write(&tmp, raw).map_err(TaskError::FileWrite)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(TaskError::FileWrite(e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_unique_task_dir_skips_existing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let taken = TaskId::parse("550e8400e29b41d4a716446655440000").unwrap();
        let free = TaskId::parse("00112233445566778899aabbccddeeff").unwrap();
        fs::create_dir_all(taken.sharded_dir(temp_dir.path())).unwrap();

        let mut ids = vec![free.clone(), taken.clone()];
        let (id, path) = create_unique_task_dir(temp_dir.path(), || ids.pop().unwrap()).unwrap();

        assert_eq!(id, free);
        assert!(path.is_dir());
        assert_eq!(path, free.sharded_dir(temp_dir.path()));
    }

    #[test]
    fn test_create_unique_task_dir_gives_up() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let taken = TaskId::parse("550e8400e29b41d4a716446655440000").unwrap();
        fs::create_dir_all(taken.sharded_dir(temp_dir.path())).unwrap();

        let result = create_unique_task_dir(temp_dir.path(), || taken.clone());

        assert!(matches!(result, Err(TaskError::TaskDirCreation(_))));
    }

    #[test]
    fn test_write_json_atomically_leaves_no_temp_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("task.json");

        write_json_atomically(&path, &serde_json::json!({"title": "a"})).unwrap();
        write_json_atomically(&path, &serde_json::json!({"title": "b"})).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["title"], "b");
        assert!(!temp_dir.path().join("task.json.tmp").exists());
    }
}
