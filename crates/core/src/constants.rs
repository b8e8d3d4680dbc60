//! Constants used throughout the taskboard core crate.
//!
//! Path names, file names and reserved keys live here so the stores and the API agree on them.

/// Default directory for task data when no explicit directory is configured.
pub const DEFAULT_TASK_DATA_DIR: &str = "task_data";

/// Directory name for task documents, under the task data directory.
pub const TASKS_DIR_NAME: &str = "tasks";

/// Filename of a single task document.
pub const TASK_JSON_FILENAME: &str = "task.json";

/// Key under which the store-assigned identifier is exposed.
pub const ID_FIELD: &str = "_id";

/// Number of fresh identifiers tried before giving up on allocating a task directory.
pub const MAX_ID_ALLOCATION_ATTEMPTS: usize = 5;
