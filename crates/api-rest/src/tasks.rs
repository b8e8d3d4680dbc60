//! Task CRUD handlers, mounted under `/api/tasks`.
//!
//! Every handler is a single pass-through to the [`TaskService`](taskboard_core::TaskService).
//! A failed store operation is logged and answered with 500 and a fixed message for that
//! operation; nothing about the cause reaches the client.

use crate::AppState;
use api_shared::{messages, ErrorRes, TaskDoc, TaskFieldsReq};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use taskboard_core::{Task, TaskError};

type ApiError = (StatusCode, Json<ErrorRes>);

/// The operation a handler performs, used to pick its log line and failure message.
#[derive(Clone, Copy, Debug)]
enum Operation {
    Create,
    List,
    Update,
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => messages::CREATE_FAILED,
            Operation::List => messages::LIST_FAILED,
            Operation::Update => messages::UPDATE_FAILED,
            Operation::Delete => messages::DELETE_FAILED,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::List => "list",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Map a core error onto a status and an `{"error": ...}` body.
fn failure(op: Operation, e: TaskError) -> ApiError {
    if e.is_client_error() {
        tracing::debug!(operation = op.name(), "rejected task body: {}", e);
        return (StatusCode::BAD_REQUEST, Json(ErrorRes::new(e.to_string())));
    }
    if let TaskError::NotFound(_) = e {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorRes::new(messages::NOT_FOUND)),
        );
    }

    tracing::error!(operation = op.name(), "Error during task {}: {:?}", op.name(), e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorRes::new(op.failure_message())),
    )
}

/// Parse a request body as JSON. An empty body is an empty object.
fn parse_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("rejected malformed JSON body: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorRes::new(messages::INVALID_BODY)),
        )
    })
}

#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = TaskFieldsReq,
    responses(
        (status = 200, description = "Task created", body = TaskDoc),
        (status = 400, description = "Body is not a JSON object or names a disallowed field", body = ErrorRes),
        (status = 500, description = "Could not create task", body = ErrorRes)
    )
)]
/// Create a task from the request body.
///
/// The body's members become the task's fields; the store assigns `_id`.
#[axum::debug_handler]
pub(crate) async fn create_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Task>, ApiError> {
    let body = parse_body(&body)?;
    match state.task_service.create(body).await {
        Ok(task) => Ok(Json(task)),
        Err(e) => Err(failure(Operation::Create, e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Every task, oldest first", body = [TaskDoc]),
        (status = 500, description = "Could not fetch tasks", body = ErrorRes)
    )
)]
/// List every task in creation order.
#[axum::debug_handler]
pub(crate) async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<Task>>, ApiError> {
    match state.task_service.list().await {
        Ok(tasks) => Ok(Json(tasks)),
        Err(e) => Err(failure(Operation::List, e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = String, Path, description = "Task identifier (32 lowercase hex characters)")),
    request_body = TaskFieldsReq,
    responses(
        (status = 200, description = "Task as it was before the update (or as stored after it, if so configured); null if no such task", body = TaskDoc),
        (status = 400, description = "Body is not a JSON object or names a disallowed field", body = ErrorRes),
        (status = 404, description = "No such task (only when missing tasks are configured as errors)", body = ErrorRes),
        (status = 500, description = "Could not update task", body = ErrorRes)
    )
)]
/// Replace the fields of a task.
#[axum::debug_handler]
pub(crate) async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Option<Task>>, ApiError> {
    let body = parse_body(&body)?;
    match state.task_service.update(&id, body).await {
        Ok(task) => Ok(Json(task)),
        Err(e) => Err(failure(Operation::Update, e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = String, Path, description = "Task identifier (32 lowercase hex characters)")),
    responses(
        (status = 200, description = "Deleted task; null if no such task", body = TaskDoc),
        (status = 404, description = "No such task (only when missing tasks are configured as errors)", body = ErrorRes),
        (status = 500, description = "Could not delete task", body = ErrorRes)
    )
)]
/// Delete a task and return it.
#[axum::debug_handler]
pub(crate) async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Task>>, ApiError> {
    match state.task_service.delete(&id).await {
        Ok(task) => Ok(Json(task)),
        Err(e) => Err(failure(Operation::Delete, e)),
    }
}
