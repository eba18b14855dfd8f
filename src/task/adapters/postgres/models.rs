//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub task_id: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Uploaded-file reference.
    pub input_location: String,
    /// Report reference, if any.
    pub report_location: Option<String>,
    /// Failure detail, if any.
    pub error_message: Option<String>,
    /// Resubmission advisory flag.
    pub is_retryable: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last lifecycle timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Retry back-reference, if any.
    pub original_task_id: Option<uuid::Uuid>,
}

/// Insert model for task records.
///
/// `report_location`, `error_message`, and `is_retryable` are omitted: new
/// rows take their column defaults, and only the out-of-scope worker
/// writes them later.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub task_id: uuid::Uuid,
    /// Lifecycle status; always `pending` at creation.
    pub status: String,
    /// Uploaded-file reference.
    pub input_location: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Initial lifecycle timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Retry back-reference, if any.
    pub original_task_id: Option<uuid::Uuid>,
}
