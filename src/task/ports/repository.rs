//! Repository port for durable task persistence and validated status
//! transitions.

use crate::task::domain::{NewTask, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every operation is a single round-trip against the backing store; the
/// repository holds no task state between calls, so reads always reflect
/// the most recently committed write.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a new task and returns the stored row.
    ///
    /// The returned [`Task`] carries the store-assigned fields (`pending`
    /// status, creation timestamps), so callers observe them atomically
    /// with creation rather than echoing their own input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Unavailable`] when the store cannot
    /// be reached or rejects the write.
    async fn create(&self, new_task: NewTask) -> TaskRepositoryResult<Task>;

    /// Fetches a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task matches
    /// `id`.
    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Returns all stored tasks.
    ///
    /// The result is an empty vector, never an absent value, when no tasks
    /// exist. Unpaginated.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Applies a validated status transition and returns the updated task.
    ///
    /// The write succeeds only when the task's current status is the
    /// required predecessor of `desired` (see
    /// [`TaskStatus::valid_predecessor`]). The predecessor check and the
    /// write are one atomic store operation that also refreshes
    /// `updated_at`, so concurrent calls against one task race at the
    /// store and exactly one observes the row affected.
    ///
    /// When zero rows are affected, the repository issues a follow-up
    /// existence check to distinguish a missing task from a disallowed
    /// edge. That second read is not atomic with the conditional write;
    /// under a concurrent mutation of the same row the reported cause may
    /// be stale. Only the diagnostic is weak — the status write itself is
    /// never unsafe.
    ///
    /// Re-issuing the task's current status is rejected: the machine has
    /// no self-loops, so repeated client retries of an already-applied
    /// status always fail. Deliberate strictness, pending product review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist and [`TaskRepositoryError::InvalidTransition`] when it exists
    /// but its current status does not permit `desired`.
    async fn update_status(
        &self,
        id: TaskId,
        desired: TaskStatus,
    ) -> TaskRepositoryResult<Task>;

    /// Deletes exactly one task.
    ///
    /// Deletion is hard; no tombstone remains. Implementations must count
    /// affected rows rather than treating "no error" as success.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when zero rows were
    /// affected.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// No task exists with the given identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task exists but the requested edge is not in the transition
    /// table.
    #[error(
        "invalid transition for task {task_id}: {} -> {}",
        .from.as_str(),
        .to.as_str()
    )]
    InvalidTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status observed when the transition was rejected. Diagnostic
        /// only; may be stale under a concurrent writer.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The backing store could not be reached or a query failed for
    /// infrastructural reasons.
    #[error("task store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps an infrastructural store failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
