//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// The single write lock plays the role the conditional `UPDATE` predicate
/// plays in the relational store: the predecessor check and the status
/// write happen under one exclusive section, so concurrent transitions
/// against one task serialize here and exactly one wins.
#[derive(Debug)]
pub struct InMemoryTaskRepository<C = DefaultClock> {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    clock: Arc<C>,
}

impl InMemoryTaskRepository<DefaultClock> {
    /// Creates an empty repository on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskRepository<C> {
    /// Creates an empty repository with an injected clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            tasks: Arc::default(),
            clock,
        }
    }
}

impl<C> Clone for InMemoryTaskRepository<C> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
        }
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, new_task: NewTask) -> TaskRepositoryResult<Task> {
        let mut tasks = self.tasks.write().map_err(lock_poisoned)?;
        if tasks.contains_key(&new_task.task_id()) {
            return Err(TaskRepositoryError::unavailable(std::io::Error::other(
                format!("task identifier already stored: {}", new_task.task_id()),
            )));
        }

        let task = Task::newly_created(new_task, self.clock.utc());
        tasks.insert(task.task_id(), task.clone());
        Ok(task)
    }

    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let tasks = self.tasks.read().map_err(lock_poisoned)?;
        tasks
            .get(&id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(lock_poisoned)?;
        Ok(tasks.values().cloned().collect())
    }

    async fn update_status(
        &self,
        id: TaskId,
        desired: TaskStatus,
    ) -> TaskRepositoryResult<Task> {
        let mut tasks = self.tasks.write().map_err(lock_poisoned)?;
        let current = tasks.get(&id).ok_or(TaskRepositoryError::NotFound(id))?;

        if !current.status().can_transition_to(desired) {
            return Err(TaskRepositoryError::InvalidTransition {
                task_id: id,
                from: current.status(),
                to: desired,
            });
        }

        let updated = current.transitioned(desired, self.clock.utc());
        tasks.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_poisoned)?;
        match tasks.remove(&id) {
            Some(_) => Ok(()),
            None => Err(TaskRepositoryError::NotFound(id)),
        }
    }
}
