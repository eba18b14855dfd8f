//! Shared fixtures for in-memory integration tests.

use csvtrack::storage::domain::StorageLocation;
use csvtrack::task::adapters::memory::InMemoryTaskRepository;
use csvtrack::task::services::TaskService;
use std::sync::Arc;

/// Service type used by the in-memory suites.
pub type TestTaskService = TaskService<InMemoryTaskRepository>;

/// Creates a task service over a fresh in-memory repository.
pub fn task_service() -> TestTaskService {
    TaskService::new(Arc::new(InMemoryTaskRepository::new()))
}

/// Returns a validated storage location.
pub fn location(value: &str) -> StorageLocation {
    StorageLocation::new(value).expect("test location is non-empty")
}
