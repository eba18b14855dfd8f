//! Service layer for task retrieval, transition, and deletion.

use crate::storage::domain::StorageLocation;
use crate::task::{
    domain::{NewTask, ParseTaskStatusError, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for a validated status transition.
///
/// Carries the desired status as free text — the form it arrives in from
/// any boundary — so unknown statuses are rejected here, before the store
/// is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    task_id: TaskId,
    desired_status: String,
}

impl TransitionTaskRequest {
    /// Creates a transition request.
    #[must_use]
    pub fn new(task_id: TaskId, desired_status: impl Into<String>) -> Self {
        Self {
            task_id,
            desired_status: desired_status.into(),
        }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The requested status text is not a recognised status.
    #[error("invalid status: {0}")]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task bookkeeping service.
#[derive(Clone)]
pub struct TaskService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> TaskService<R>
where
    R: TaskRepository,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a task for an already-stored upload.
    ///
    /// The returned task reflects the stored row: `pending` status and
    /// store-assigned timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create(&self, input_location: StorageLocation) -> TaskServiceResult<Task> {
        Ok(self.repository.create(NewTask::new(input_location)).await?)
    }

    /// Fetches a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when no task
    /// matches `id`.
    pub async fn get(&self, id: TaskId) -> TaskServiceResult<Task> {
        Ok(self.repository.get(id).await?)
    }

    /// Returns all stored tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store cannot be
    /// queried.
    pub async fn list(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list().await?)
    }

    /// Applies a validated status transition.
    ///
    /// Parses the requested status text, then delegates to the store's
    /// atomic conditional update. Rejections (`NotFound`,
    /// `InvalidTransition`) are expected outcomes of normal use and are
    /// only logged at debug level.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidStatus`] for unknown status text
    /// and [`TaskServiceError::Repository`] for store-level rejections and
    /// failures.
    pub async fn transition(&self, request: TransitionTaskRequest) -> TaskServiceResult<Task> {
        let TransitionTaskRequest {
            task_id,
            desired_status,
        } = request;
        let desired = TaskStatus::try_from(desired_status.as_str())?;
        let result = self.repository.update_status(task_id, desired).await;

        if let Err(
            rejection @ (TaskRepositoryError::NotFound(_)
            | TaskRepositoryError::InvalidTransition { .. }),
        ) = &result
        {
            debug!(%task_id, %rejection, "transition rejected");
        }

        Ok(result?)
    }

    /// Deletes exactly one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task
    /// was already absent.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        Ok(self.repository.delete(id).await?)
    }
}
