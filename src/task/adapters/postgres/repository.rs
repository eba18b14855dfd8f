//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::storage::domain::StorageLocation;
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tracing::error;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// The conditional status update is expressed as a single `UPDATE … WHERE
/// status = <predecessor>` so the database itself rejects disallowed
/// transitions at the same time as applying the write; there is no
/// read-then-write window on the success path.
#[derive(Debug)]
pub struct PostgresTaskRepository<C = DefaultClock> {
    pool: TaskPgPool,
    clock: Arc<C>,
}

impl PostgresTaskRepository<DefaultClock> {
    /// Creates a repository on the system clock.
    #[must_use]
    pub fn new(pool: TaskPgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }
}

impl<C> PostgresTaskRepository<C> {
    /// Creates a repository with an injected clock.
    #[must_use]
    pub const fn with_clock(pool: TaskPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }
}

impl<C> Clone for PostgresTaskRepository<C> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> PostgresTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(store_unreachable)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::unavailable)?
    }
}

#[async_trait]
impl<C> TaskRepository for PostgresTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, new_task: NewTask) -> TaskRepositoryResult<Task> {
        let created_at = self.clock.utc();
        let new_row = to_new_row(&new_task, created_at);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(store_unreachable)?;
            row_to_task(row)
        })
        .await
    }

    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::task_id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(store_unreachable)?;
            row.map_or(Err(TaskRepositoryError::NotFound(id)), row_to_task)
        })
        .await
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(store_unreachable)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update_status(
        &self,
        id: TaskId,
        desired: TaskStatus,
    ) -> TaskRepositoryResult<Task> {
        let at = self.clock.utc();

        self.run_blocking(move |connection| {
            let updated = apply_conditional_update(connection, id, desired, at)?;
            updated.map_or_else(
                || Err(diagnose_rejected_update(connection, id, desired)),
                row_to_task,
            )
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(tasks::table.filter(tasks::task_id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(store_unreachable)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Issues the atomic conditional update.
///
/// Returns `Ok(None)` when zero rows matched, leaving cause disambiguation
/// to the caller.
fn apply_conditional_update(
    connection: &mut PgConnection,
    id: TaskId,
    desired: TaskStatus,
    at: DateTime<Utc>,
) -> TaskRepositoryResult<Option<TaskRow>> {
    // No edge enters `pending`, so there is no predicate under which the
    // update could match; skip straight to the diagnosis read.
    let Some(predecessor) = TaskStatus::valid_predecessor(desired) else {
        return Ok(None);
    };

    diesel::update(
        tasks::table
            .filter(tasks::task_id.eq(id.into_inner()))
            .filter(tasks::status.eq(predecessor.as_str())),
    )
    .set((
        tasks::status.eq(desired.as_str()),
        tasks::updated_at.eq(Some(at)),
    ))
    .returning(TaskRow::as_returning())
    .get_result::<TaskRow>(connection)
    .optional()
    .map_err(store_unreachable)
}

/// Explains a conditional update that affected zero rows.
///
/// This read is not atomic with the update; a concurrent writer landing in
/// the gap can make the explanation stale. The status write itself is
/// unaffected.
fn diagnose_rejected_update(
    connection: &mut PgConnection,
    id: TaskId,
    desired: TaskStatus,
) -> TaskRepositoryError {
    let current = tasks::table
        .filter(tasks::task_id.eq(id.into_inner()))
        .select(tasks::status)
        .first::<String>(connection)
        .optional();

    match current {
        Ok(None) => TaskRepositoryError::NotFound(id),
        Ok(Some(status_text)) => match TaskStatus::try_from(status_text.as_str()) {
            Ok(from) => TaskRepositoryError::InvalidTransition {
                task_id: id,
                from,
                to: desired,
            },
            Err(err) => store_unreachable(err),
        },
        Err(err) => store_unreachable(err),
    }
}

fn to_new_row(new_task: &NewTask, created_at: DateTime<Utc>) -> NewTaskRow {
    NewTaskRow {
        task_id: new_task.task_id().into_inner(),
        status: TaskStatus::Pending.as_str().to_owned(),
        input_location: new_task.input_location().as_str().to_owned(),
        created_at,
        updated_at: Some(created_at),
        original_task_id: new_task.original_task_id().map(TaskId::into_inner),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        task_id,
        status: persisted_status,
        input_location,
        report_location,
        error_message,
        is_retryable,
        created_at,
        updated_at,
        original_task_id,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str()).map_err(store_unreachable)?;
    let input_location = StorageLocation::new(input_location).map_err(store_unreachable)?;
    let report_location = report_location
        .map(StorageLocation::new)
        .transpose()
        .map_err(store_unreachable)?;

    let data = PersistedTaskData {
        task_id: TaskId::from_uuid(task_id),
        status,
        input_location,
        report_location,
        error_message,
        is_retryable,
        created_at,
        updated_at,
        original_task_id: original_task_id.map(TaskId::from_uuid),
    };
    Ok(Task::from_persisted(data))
}

/// Classifies an infrastructural failure, logging it at the elevated
/// severity the alerting path watches.
fn store_unreachable(err: impl std::error::Error + Send + Sync + 'static) -> TaskRepositoryError {
    error!(error = %err, "task store query failed");
    TaskRepositoryError::unavailable(err)
}
