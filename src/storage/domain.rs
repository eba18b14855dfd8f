//! Validated value types for the storage boundary.

use crate::task::domain::TaskId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors returned while constructing storage domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageDomainError {
    /// The location string is empty after trimming.
    #[error("storage location must not be empty")]
    EmptyLocation,
}

/// Key an uploaded payload is stored under.
///
/// Keys are derived from a freshly generated task identifier, never from
/// client-supplied file names, so they cannot collide and cannot leak
/// client-controlled paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Derives the storage key for a task's uploaded CSV.
    #[must_use]
    pub fn for_task(task_id: TaskId) -> Self {
        Self(format!("{task_id}.csv"))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Durable reference to an object the store accepted.
///
/// Every persisted task carries one of these for its input file; a task is
/// never created without a backing location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageLocation(String);

impl StorageLocation {
    /// Creates a validated location.
    ///
    /// # Errors
    ///
    /// Returns [`StorageDomainError::EmptyLocation`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, StorageDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(StorageDomainError::EmptyLocation);
        }
        Ok(Self(raw))
    }

    /// Returns the location as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StorageLocation {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
