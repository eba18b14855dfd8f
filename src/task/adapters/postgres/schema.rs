//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records tracking CSV-processing jobs.
    tasks (task_id) {
        /// Task identifier.
        task_id -> Uuid,
        /// Lifecycle status; constrained to the four machine states.
        #[max_length = 20]
        status -> Varchar,
        /// Uploaded-file reference.
        #[max_length = 255]
        input_location -> Varchar,
        /// Report reference produced by the worker, if any.
        #[max_length = 255]
        report_location -> Nullable<Varchar>,
        /// Failure detail recorded by the worker, if any.
        error_message -> Nullable<Text>,
        /// Resubmission advisory flag.
        is_retryable -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last lifecycle timestamp.
        updated_at -> Nullable<Timestamptz>,
        /// Retry back-reference, if any.
        original_task_id -> Nullable<Uuid>,
    }
}
