use super::{progress, PollContext, TaskSource, WaitError, WaitPolicy};
use crate::model::{Task, TaskState};
use indicatif::ProgressBar;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Poll `task_id` until it reaches a terminal state and return the entity id
/// of the completed task.
///
/// A completed task that names no entity is an error, since callers go on to
/// address that entity.
pub async fn wait_for_task_completion<S>(
    source: &S,
    task_id: &str,
    policy: &WaitPolicy,
    context: &PollContext,
) -> Result<String, WaitError>
where
    S: TaskSource + ?Sized,
{
    let task = wait_for_task(source, task_id, policy, context).await?;
    if task.entity.id.is_empty() {
        return Err(WaitError::MissingEntity {
            task_id: task_id.to_string(),
            operation: task.operation,
        });
    }
    Ok(task.entity.id)
}

/// Poll `task_id` until it reaches a terminal state and return the final
/// snapshot of the completed task.
///
/// A failed status fetch aborts immediately; the task's own `ERROR` state is
/// reported with the server's error details. When the policy carries a task
/// timeout, waiting stops once it has elapsed.
pub async fn wait_for_task<S>(
    source: &S,
    task_id: &str,
    policy: &WaitPolicy,
    context: &PollContext,
) -> Result<Task, WaitError>
where
    S: TaskSource + ?Sized,
{
    wait_for_task_with_progress(source, task_id, policy, progress::spinner(context)).await
}

/// Same as [`wait_for_task`], rendering progress on the given bar.
///
/// The bar ticks on its own between polls and is finished and cleared by the
/// time this returns.
pub async fn wait_for_task_with_progress<S>(
    source: &S,
    task_id: &str,
    policy: &WaitPolicy,
    bar: ProgressBar,
) -> Result<Task, WaitError>
where
    S: TaskSource + ?Sized,
{
    bar.enable_steady_tick(progress::TICK_INTERVAL);
    let started = Instant::now();

    let outcome = loop {
        let task = match source.fetch_task_status(task_id).await {
            Ok(task) => task,
            Err(error) => {
                break Err(WaitError::TaskFetch {
                    task_id: task_id.to_string(),
                    source: error,
                })
            }
        };
        debug!(
            "Task {} ({}) is {} after {:?}",
            task_id,
            task.operation,
            task.state,
            started.elapsed()
        );

        match task.state {
            TaskState::Completed => break Ok(task),
            TaskState::Error => {
                break Err(WaitError::TaskFailed {
                    task_id: task_id.to_string(),
                    detail: task.error_detail(),
                    operation: task.operation,
                })
            }
            _ => {}
        }

        if let Some(timeout) = policy.task_timeout {
            if started.elapsed() >= timeout {
                break Err(WaitError::TaskTimedOut {
                    task_id: task_id.to_string(),
                    operation: task.operation,
                    timeout,
                });
            }
        }

        bar.set_message(format!("{} {}: {}", task.operation, task_id, task.state));
        sleep(policy.poll_interval).await;
    };

    // clear the spinner so the caller's result or error starts on a clean line
    bar.finish_and_clear();
    outcome
}
