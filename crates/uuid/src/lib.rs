//! Task identifiers and sharded-path utilities.
//!
//! Every task is keyed by an identifier that the persistence layer allocates exactly once, at
//! creation. Clients only ever see it as an opaque string under the `_id` key.
//!
//! The identifier uses a *canonical* UUID representation: **32 lowercase hexadecimal
//! characters** (no hyphens).
//!
//! This crate provides:
//! - [`TaskId`], a wrapper that *guarantees* the canonical format once constructed.
//! - Sharding logic to derive a task's document directory from its identifier.
//! - [`CreationStamp`], a monotonic creation timestamp used to order listings.
//!
//! ## Canonical form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! Externally supplied identifiers (path segments, CLI arguments) must already be canonical.
//! Use [`TaskId::parse`] to validate them; hyphenated or uppercase forms are rejected.
//!
//! ## Sharded directory layout
//! For a canonical identifier `u`, documents live under:
//! `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`
//!
//! Example:
//! `task_data/tasks/55/0e/550e8400e29b41d4a716446655440000/`
//!
//! This keeps any single directory from growing without bound.

mod service;

pub use service::{CreationStamp, TaskId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
