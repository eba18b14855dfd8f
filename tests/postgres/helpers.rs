//! Connection helpers for the opt-in `PostgreSQL` suite.

use csvtrack::storage::domain::StorageLocation;
use csvtrack::task::adapters::postgres::{PostgresTaskRepository, TaskPgPool};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

const CREATE_TASKS_TABLE: &str =
    include_str!("../../migrations/2025-07-14-000000_create_tasks/up.sql");

/// Builds a repository against the scratch database named by
/// `DATABASE_URL`, applying the tasks migration first.
pub fn repository() -> PostgresTaskRepository {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at a scratch database for postgres tests");
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool: TaskPgPool = Pool::builder()
        .max_size(4)
        .build(manager)
        .expect("connection pool should build");

    let mut connection = pool.get().expect("connection should check out");
    connection
        .batch_execute(CREATE_TASKS_TABLE)
        .expect("tasks migration should apply");
    drop(connection);

    PostgresTaskRepository::new(pool)
}

/// Returns a validated storage location unique to one test task.
pub fn unique_location(prefix: &str) -> StorageLocation {
    StorageLocation::new(format!("mem://{prefix}/{}.csv", uuid::Uuid::new_v4()))
        .expect("test location is non-empty")
}
