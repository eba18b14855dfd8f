//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The caller-supplied task identifier is not a well-formed UUID.
    #[error("invalid task identifier: {0}")]
    InvalidTaskId(String),
}

/// Error returned while parsing task statuses from persistence or callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
