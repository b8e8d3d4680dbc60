//! The task document.

use crate::constants::ID_FIELD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use taskboard_uuid::TaskId;

/// Client-supplied task fields: a schema-free JSON object.
pub type TaskFields = Map<String, Value>;

/// A stored task: the store-assigned identifier plus the client's fields.
///
/// Serializes as a flat JSON object, `{"_id": "<id>", ...fields}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: TaskId,
    #[serde(flatten)]
    pub fields: TaskFields,
}

impl Task {
    pub fn new(id: TaskId, fields: TaskFields) -> Self {
        Self { id, fields }
    }

    /// Looks up a single client field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        if name == ID_FIELD {
            return None;
        }
        self.fields.get(name)
    }
}
