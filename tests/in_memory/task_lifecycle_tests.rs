//! In-memory integration tests for task lifecycle operations.

use super::helpers::{TestTaskService, location, task_service};
use csvtrack::task::{
    domain::{TaskDomainError, TaskId, TaskStatus},
    ports::TaskRepositoryError,
    services::{TaskServiceError, TransitionTaskRequest},
};
use rstest::{fixture, rstest};

#[fixture]
fn service() -> TestTaskService {
    task_service()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_reports_server_assigned_fields(service: TestTaskService) {
    let task = service
        .create(location("obj/abc.csv"))
        .await
        .expect("task creation should succeed");

    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.input_location().as_str(), "obj/abc.csv");
    assert!(task.report_location().is_none());
    assert_eq!(task.updated_at(), Some(task.created_at()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn finishing_a_pending_task_is_rejected(service: TestTaskService) {
    let task = service
        .create(location("obj/skip.csv"))
        .await
        .expect("task creation should succeed");

    let result = service
        .transition(TransitionTaskRequest::new(task.task_id(), "finished"))
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Repository(
            TaskRepositoryError::InvalidTransition { .. }
        ))
    ));
    let stored = service
        .get(task.task_id())
        .await
        .expect("task should be unchanged");
    assert_eq!(stored.status(), TaskStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn processing_task_can_be_failed(service: TestTaskService) {
    let task = service
        .create(location("obj/fail.csv"))
        .await
        .expect("task creation should succeed");
    service
        .transition(TransitionTaskRequest::new(task.task_id(), "processing"))
        .await
        .expect("pick-up should succeed");

    let failed = service
        .transition(TransitionTaskRequest::new(task.task_id(), "failed"))
        .await
        .expect("failure transition should succeed");

    assert_eq!(failed.status(), TaskStatus::Failed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookup_with_unused_identifier_reports_not_found(service: TestTaskService) {
    let missing = TaskId::new();
    let result = service.get(missing).await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Repository(TaskRepositoryError::NotFound(id))) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_keeps_timestamps_monotonic(service: TestTaskService) {
    let task = service
        .create(location("obj/full.csv"))
        .await
        .expect("task creation should succeed");

    let picked_up = service
        .transition(TransitionTaskRequest::new(task.task_id(), "processing"))
        .await
        .expect("pick-up should succeed");
    let finished = service
        .transition(TransitionTaskRequest::new(task.task_id(), "finished"))
        .await
        .expect("completion should succeed");

    assert_eq!(finished.status(), TaskStatus::Finished);
    assert!(picked_up.updated_at() >= task.updated_at());
    assert!(finished.updated_at() >= picked_up.updated_at());
    assert_eq!(finished.created_at(), task.created_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_returns_all_tasks_and_never_null(service: TestTaskService) {
    assert!(
        service
            .list()
            .await
            .expect("empty listing should succeed")
            .is_empty()
    );

    let first = service
        .create(location("obj/one.csv"))
        .await
        .expect("first creation should succeed");
    let second = service
        .create(location("obj/two.csv"))
        .await
        .expect("second creation should succeed");

    let tasks = service.list().await.expect("listing should succeed");
    let ids: Vec<_> = tasks.iter().map(csvtrack::task::domain::Task::task_id).collect();
    assert_eq!(tasks.len(), 2);
    assert!(ids.contains(&first.task_id()));
    assert!(ids.contains(&second.task_id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_succeeds_once_then_reports_not_found(service: TestTaskService) {
    let task = service
        .create(location("obj/delete.csv"))
        .await
        .expect("task creation should succeed");

    service
        .delete(task.task_id())
        .await
        .expect("first delete should succeed");

    let second = service.delete(task.task_id()).await;
    assert!(matches!(
        second,
        Err(TaskServiceError::Repository(TaskRepositoryError::NotFound(id)))
            if id == task.task_id()
    ));
}

#[rstest]
fn malformed_identifier_is_rejected_before_any_store_access() {
    let result = TaskId::parse("definitely-not-a-uuid");
    assert_eq!(
        result,
        Err(TaskDomainError::InvalidTaskId(
            "definitely-not-a-uuid".to_owned()
        ))
    );
}
