//! Field schema applied to incoming task bodies.
//!
//! By default a task is free-form: any JSON object is accepted and stored verbatim. When an
//! allowed-field list is configured, bodies naming any other field are rejected. The `_id` key
//! belongs to the store in both modes.

use crate::constants::ID_FIELD;
use crate::error::{TaskError, TaskResult};
use crate::task::TaskFields;
use serde_json::Value;
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskSchema {
    allowed: Option<BTreeSet<String>>,
}

impl TaskSchema {
    /// Schema that accepts any field except `_id`.
    pub fn free_form() -> Self {
        Self { allowed: None }
    }

    /// Schema that accepts only the listed fields.
    pub fn allowing<I, S>(fields: I) -> TaskResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: BTreeSet<String> = fields.into_iter().map(Into::into).collect();
        if allowed.contains(ID_FIELD) {
            return Err(TaskError::InvalidInput(format!(
                "`{ID_FIELD}` cannot be an allowed task field"
            )));
        }
        if allowed.is_empty() {
            return Ok(Self::free_form());
        }
        Ok(Self {
            allowed: Some(allowed),
        })
    }

    /// Parse a comma-separated allowed-field list.
    ///
    /// `None`, an empty string or a list of blanks yields the free-form schema.
    pub fn from_env_value(value: Option<String>) -> TaskResult<Self> {
        match value {
            Some(raw) => Self::allowing(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned),
            ),
            None => Ok(Self::free_form()),
        }
    }

    pub fn is_free_form(&self) -> bool {
        self.allowed.is_none()
    }

    pub fn allowed_fields(&self) -> Option<impl Iterator<Item = &str>> {
        self.allowed.as_ref().map(|set| set.iter().map(String::as_str))
    }

    /// Check a request body and return it as task fields.
    ///
    /// # Errors
    /// - [`TaskError::BodyNotAnObject`] if the body is not a JSON object.
    /// - [`TaskError::ReservedField`] if the body names `_id`.
    /// - [`TaskError::UnknownField`] if an allowed-field list is configured and the body names
    ///   a field outside it.
    pub fn validate(&self, body: Value) -> TaskResult<TaskFields> {
        let Value::Object(fields) = body else {
            return Err(TaskError::BodyNotAnObject);
        };

        if fields.contains_key(ID_FIELD) {
            return Err(TaskError::ReservedField(ID_FIELD.to_owned()));
        }

        if let Some(allowed) = &self.allowed {
            if let Some(unknown) = fields.keys().find(|k| !allowed.contains(k.as_str())) {
                return Err(TaskError::UnknownField(unknown.clone()));
            }
        }

        Ok(fields)
    }
}
