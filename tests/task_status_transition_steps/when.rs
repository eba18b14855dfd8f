//! When steps for task status transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use csvtrack::task::services::TransitionTaskRequest;
use rstest_bdd_macros::when;

#[when(r#"the task status is updated to "{target_status}""#)]
fn update_task_status(
    world: &mut TaskTransitionWorld,
    target_status: String,
) -> Result<(), eyre::Report> {
    let task = world
        .last_created_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?;

    let result = run_async(
        world
            .service
            .transition(TransitionTaskRequest::new(task.task_id(), target_status)),
    );
    if let Ok(ref updated) = result {
        world.last_created_task = Some(updated.clone());
    }
    world.last_transition_result = Some(result);
    Ok(())
}
