#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid task id: {0}")]
    InvalidId(#[from] taskboard_uuid::UuidError),
    #[error("task body must be a JSON object")]
    BodyNotAnObject,
    #[error("field `{0}` is reserved")]
    ReservedField(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to create task directory: {0}")]
    TaskDirCreation(std::io::Error),
    #[error("failed to write task file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read task file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to remove task directory: {0}")]
    FileRemove(std::io::Error),
    #[error("failed to serialize task: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize task: {0}")]
    Deserialization(serde_json::Error),
    #[error("task store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("background store operation failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl TaskError {
    /// True for errors caused by what the client sent, as opposed to a failed store operation.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TaskError::BodyNotAnObject | TaskError::ReservedField(_) | TaskError::UnknownField(_)
        )
    }
}

pub type TaskResult<T> = std::result::Result<T, TaskError>;
