//! Request and response bodies shared across the APIs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned by every failing endpoint: `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// A stored task as it appears on the wire: the store-assigned `_id` plus free-form fields.
///
/// Documentation-only schema; handlers serialize the core `Task` directly.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[schema(
    value_type = Object,
    example = json!({"_id": "550e8400e29b41d4a716446655440000", "title": "buy milk"})
)]
pub struct TaskDoc(pub serde_json::Map<String, serde_json::Value>);

/// Free-form task fields as sent by clients when creating or replacing a task.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[schema(value_type = Object, example = json!({"title": "buy milk"}))]
pub struct TaskFieldsReq(pub serde_json::Map<String, serde_json::Value>);
