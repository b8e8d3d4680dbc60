//! Startup configuration for the REST server.
//!
//! Environment variables are read once here and turned into a [`CoreConfig`]; handlers only ever
//! see the resulting [`TaskService`](taskboard_core::TaskService).

use std::path::PathBuf;
use taskboard_core::config::{
    missing_task_from_env_value, store_backend_from_env_value, update_response_from_env_value,
};
use taskboard_core::{CoreConfig, TaskSchema, DEFAULT_TASK_DATA_DIR};

pub const REST_ADDR_VAR: &str = "TASKBOARD_REST_ADDR";
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3500";

pub const TASK_DATA_DIR_VAR: &str = "TASK_DATA_DIR";
pub const STORE_VAR: &str = "TASKBOARD_STORE";
pub const ALLOWED_FIELDS_VAR: &str = "TASKBOARD_ALLOWED_FIELDS";
pub const UPDATE_RETURNS_VAR: &str = "TASKBOARD_UPDATE_RETURNS";
pub const MISSING_TASK_VAR: &str = "TASKBOARD_MISSING_TASK";

/// Build the core configuration from the process environment.
pub fn core_config_from_env() -> anyhow::Result<CoreConfig> {
    core_config_from_lookup(|key| std::env::var(key).ok())
}

/// Build the core configuration from an arbitrary variable lookup.
pub fn core_config_from_lookup<F>(lookup: F) -> anyhow::Result<CoreConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let task_data_dir = lookup(TASK_DATA_DIR_VAR)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TASK_DATA_DIR.into());

    let store_backend = store_backend_from_env_value(lookup(STORE_VAR))?;
    let schema = TaskSchema::from_env_value(lookup(ALLOWED_FIELDS_VAR))?;
    let update_response = update_response_from_env_value(lookup(UPDATE_RETURNS_VAR))?;
    let missing_task = missing_task_from_env_value(lookup(MISSING_TASK_VAR))?;

    Ok(CoreConfig::new(PathBuf::from(task_data_dir), store_backend)
        .with_schema(schema)
        .with_update_response(update_response)
        .with_missing_task(missing_task))
}

/// Address the REST server binds to.
pub fn rest_addr_from_env() -> String {
    std::env::var(REST_ADDR_VAR).unwrap_or_else(|_| DEFAULT_REST_ADDR.into())
}
