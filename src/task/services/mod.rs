//! Application services for task lifecycle orchestration.

mod ingest;
mod tasks;

pub use ingest::{IngestError, IngestResult, IngestService};
pub use tasks::{TaskService, TaskServiceError, TaskServiceResult, TransitionTaskRequest};
