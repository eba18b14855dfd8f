//! Winner-takes-all semantics of the conditional update under contention.

use super::helpers::location;
use csvtrack::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTask, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;

const CONTENDERS: usize = 8;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn exactly_one_concurrent_pickup_wins() {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let created = repository
        .create(NewTask::new(location("obj/contended.csv")))
        .await
        .expect("task creation should succeed");

    let mut handles = Vec::with_capacity(CONTENDERS);
    for _ in 0..CONTENDERS {
        let contender = Arc::clone(&repository);
        let id = created.task_id();
        handles.push(tokio::spawn(async move {
            contender.update_status(id, TaskStatus::Processing).await
        }));
    }

    let mut wins = 0;
    let mut rejections = 0;
    for handle in handles {
        match handle.await.expect("contender should not panic") {
            Ok(task) => {
                assert_eq!(task.status(), TaskStatus::Processing);
                wins += 1;
            }
            Err(TaskRepositoryError::InvalidTransition { from, to, .. }) => {
                // Losers observe the winner's write: the task is already
                // processing and the machine has no self-loop.
                assert_eq!(from, TaskStatus::Processing);
                assert_eq!(to, TaskStatus::Processing);
                rejections += 1;
            }
            Err(other) => panic!("unexpected rejection: {other:?}"),
        }
    }

    assert_eq!(wins, 1);
    assert_eq!(rejections, CONTENDERS - 1);

    let stored = repository
        .get(created.task_id())
        .await
        .expect("task should still exist");
    assert_eq!(stored.status(), TaskStatus::Processing);
}
