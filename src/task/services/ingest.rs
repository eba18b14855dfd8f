//! Ingestion orchestration: persist the upload, then create the task row.

use crate::storage::{
    domain::ObjectKey,
    ports::{ObjectStore, ObjectStoreError, PayloadReader},
};
use crate::task::{
    domain::{NewTask, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors for the two-step ingestion flow.
///
/// The two variants tell the caller exactly how far ingestion got, which
/// is what decides whether a retry is safe and whether an object needs
/// out-of-band cleanup.
#[derive(Debug, Clone, Error)]
pub enum IngestError {
    /// The object store rejected or failed the upload. No task row was
    /// created; retrying is safe.
    #[error("storage write failed: {0}")]
    StorageWriteFailed(#[source] ObjectStoreError),

    /// The task row could not be persisted after the upload succeeded.
    /// The stored object is orphaned under the reported key.
    #[error("task record creation failed, object {key} orphaned: {source}")]
    TaskRecordCreationFailed {
        /// Key of the orphaned object.
        key: ObjectKey,
        /// Store failure that prevented row creation.
        #[source]
        source: TaskRepositoryError,
    },
}

/// Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Turns an inbound CSV upload into a persisted task.
///
/// The storage write strictly precedes row creation, so a task is never
/// visible to readers while its backing file does not exist yet.
#[derive(Clone)]
pub struct IngestService<R, S>
where
    R: TaskRepository,
    S: ObjectStore,
{
    repository: Arc<R>,
    store: Arc<S>,
}

impl<R, S> IngestService<R, S>
where
    R: TaskRepository,
    S: ObjectStore,
{
    /// Creates a new ingestion service.
    #[must_use]
    pub const fn new(repository: Arc<R>, store: Arc<S>) -> Self {
        Self { repository, store }
    }

    /// Ingests one uploaded CSV and returns the created task.
    ///
    /// The storage key is derived from a freshly generated task
    /// identifier; `file_name_hint` is the client-supplied name, recorded
    /// for diagnostics only and never used in storage paths.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::StorageWriteFailed`] when the upload fails
    /// (no row created) and [`IngestError::TaskRecordCreationFailed`] when
    /// row creation fails after a successful upload (object orphaned; no
    /// compensating deletion is attempted, the object may still be wanted
    /// for manual recovery).
    pub async fn ingest(
        &self,
        file_name_hint: &str,
        size: u64,
        payload: PayloadReader<'_>,
    ) -> IngestResult<Task> {
        let task_id = TaskId::new();
        let key = ObjectKey::for_task(task_id);
        debug!(file_name_hint, size, %task_id, "ingesting upload");

        let location = match self.store.put(&key, size, payload).await {
            Ok(location) => location,
            Err(err) => {
                error!(%key, error = %err, "upload rejected by object store");
                return Err(IngestError::StorageWriteFailed(err));
            }
        };

        match self
            .repository
            .create(NewTask::with_id(task_id, location))
            .await
        {
            Ok(task) => {
                info!(%task_id, "upload ingested");
                Ok(task)
            }
            Err(source) => {
                report_orphan(&key, &source);
                Err(IngestError::TaskRecordCreationFailed { key, source })
            }
        }
    }
}

/// Emits the orphan event the reconciliation sweep watches for.
fn report_orphan(key: &ObjectKey, source: &TaskRepositoryError) {
    error!(%key, error = %source, "task row creation failed after upload; object orphaned");
}
