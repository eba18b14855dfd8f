//! Task aggregate root and creation payload.

use super::{TaskId, TaskStatus};
use crate::storage::domain::StorageLocation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// One task tracks one CSV-processing job. The status field mutates only
/// through the repository's validated conditional update; the worker-owned
/// bookkeeping fields (`report_location`, `error_message`, `is_retryable`)
/// are persisted and surfaced on reads but have no write path in this
/// core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    task_id: TaskId,
    status: TaskStatus,
    input_location: StorageLocation,
    report_location: Option<StorageLocation>,
    error_message: Option<String>,
    is_retryable: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    original_task_id: Option<TaskId>,
}

/// Payload for creating a task record.
///
/// Carries the freshly generated identifier so ingestion can derive the
/// storage key from it before the row exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    task_id: TaskId,
    input_location: StorageLocation,
    original_task_id: Option<TaskId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub task_id: TaskId,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted uploaded-file reference.
    pub input_location: StorageLocation,
    /// Persisted report reference, if any.
    pub report_location: Option<StorageLocation>,
    /// Persisted failure detail, if any.
    pub error_message: Option<String>,
    /// Persisted resubmission advisory flag.
    pub is_retryable: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Persisted retry back-reference, if any.
    pub original_task_id: Option<TaskId>,
}

impl NewTask {
    /// Creates a payload with a freshly generated task identifier.
    #[must_use]
    pub fn new(input_location: StorageLocation) -> Self {
        Self::with_id(TaskId::new(), input_location)
    }

    /// Creates a payload for an identifier generated ahead of time.
    #[must_use]
    pub const fn with_id(task_id: TaskId, input_location: StorageLocation) -> Self {
        Self {
            task_id,
            input_location,
            original_task_id: None,
        }
    }

    /// Records the task this payload resubmits.
    #[must_use]
    pub const fn retry_of(mut self, original_task_id: TaskId) -> Self {
        self.original_task_id = Some(original_task_id);
        self
    }

    /// Returns the pre-generated task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the uploaded-file reference.
    #[must_use]
    pub const fn input_location(&self) -> &StorageLocation {
        &self.input_location
    }

    /// Returns the retry back-reference, if any.
    #[must_use]
    pub const fn original_task_id(&self) -> Option<TaskId> {
        self.original_task_id
    }
}

impl Task {
    /// Materializes the stored representation of a just-created task.
    ///
    /// Tasks always start in [`TaskStatus::Pending`]; `created_at` and the
    /// initial `updated_at` are the store-assigned creation instant.
    #[must_use]
    pub fn newly_created(new_task: NewTask, created_at: DateTime<Utc>) -> Self {
        let NewTask {
            task_id,
            input_location,
            original_task_id,
        } = new_task;
        Self {
            task_id,
            status: TaskStatus::Pending,
            input_location,
            report_location: None,
            error_message: None,
            is_retryable: false,
            created_at,
            updated_at: Some(created_at),
            original_task_id,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            task_id: data.task_id,
            status: data.status,
            input_location: data.input_location,
            report_location: data.report_location,
            error_message: data.error_message,
            is_retryable: data.is_retryable,
            created_at: data.created_at,
            updated_at: data.updated_at,
            original_task_id: data.original_task_id,
        }
    }

    /// Returns the post-image of a validated transition.
    ///
    /// Stores call this after their conditional predecessor check has
    /// already accepted the edge; the check itself lives in the store so it
    /// is atomic with the write.
    #[must_use]
    pub fn transitioned(&self, next: TaskStatus, at: DateTime<Utc>) -> Self {
        debug_assert!(
            self.status.can_transition_to(next),
            "stores must validate the edge before materializing the post-image"
        );
        let mut updated = self.clone();
        updated.status = next;
        updated.updated_at = Some(at);
        updated
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the uploaded-file reference.
    #[must_use]
    pub const fn input_location(&self) -> &StorageLocation {
        &self.input_location
    }

    /// Returns the report reference, if the worker produced one.
    #[must_use]
    pub const fn report_location(&self) -> Option<&StorageLocation> {
        self.report_location.as_ref()
    }

    /// Returns the failure detail, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns `true` when a failed task may be resubmitted.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.is_retryable
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the task this record resubmits, if any.
    #[must_use]
    pub const fn original_task_id(&self) -> Option<TaskId> {
        self.original_task_id
    }
}
