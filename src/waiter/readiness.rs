use super::{
    progress::{self, ProgressIndicator, TICK_INTERVAL},
    EntitySource, PollContext, WaitError, WaitPolicy,
};
use crate::model::{EntityState, Resource};
use indicatif::ProgressBar;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Poll the entity until it is `READY` and return its final snapshot.
///
/// Progress is rendered on stdout when `context` is interactive.
pub async fn wait_for_entity_ready<E, S>(
    source: &S,
    entity_id: &str,
    policy: &WaitPolicy,
    context: &PollContext,
) -> Result<E, WaitError>
where
    E: Resource,
    S: EntitySource<E> + ?Sized,
{
    wait_for_entity_ready_with_progress(source, entity_id, policy, progress::spinner(context)).await
}

/// Same as [`wait_for_entity_ready`], rendering progress on the given bar.
///
/// The bar is animated by a separate task for the whole wait. That task has
/// stopped, and the bar is finished and cleared, by the time this returns.
pub async fn wait_for_entity_ready_with_progress<E, S>(
    source: &S,
    entity_id: &str,
    policy: &WaitPolicy,
    bar: ProgressBar,
) -> Result<E, WaitError>
where
    E: Resource,
    S: EntitySource<E> + ?Sized,
{
    let indicator = ProgressIndicator::start(bar, TICK_INTERVAL);
    indicator.set_message(format!("Waiting for {} {} to become READY", E::KIND, entity_id));

    let outcome = poll_until_ready(source, entity_id, policy, &indicator).await;

    indicator.stop().await;
    outcome
}

async fn poll_until_ready<E, S>(
    source: &S,
    entity_id: &str,
    policy: &WaitPolicy,
    indicator: &ProgressIndicator,
) -> Result<E, WaitError>
where
    E: Resource,
    S: EntitySource<E> + ?Sized,
{
    let started = Instant::now();
    let mut consecutive_failures: u32 = 0;
    let mut last_state: Option<EntityState> = None;

    loop {
        match source.fetch_entity(entity_id).await {
            Ok(entity) => {
                consecutive_failures = 0;
                let state = entity.state().clone();
                debug!(
                    "{} {} is {} after {:?}",
                    E::KIND,
                    entity_id,
                    state,
                    started.elapsed()
                );

                if state.is_ready() {
                    return Ok(entity);
                }
                if state.is_failed() {
                    return Err(WaitError::EntityFailed {
                        kind: E::KIND,
                        entity_id: entity_id.to_string(),
                        state,
                    });
                }

                indicator.set_message(format!("{} {}: {}", E::KIND, entity_id, state));
                last_state = Some(state);
            }
            Err(error) => {
                consecutive_failures += 1;
                warn!(
                    "Failed to fetch {} {} ({} consecutive): {}",
                    E::KIND,
                    entity_id,
                    consecutive_failures,
                    error
                );

                if consecutive_failures > policy.fetch_retry_budget {
                    return Err(WaitError::FetchRetriesExhausted {
                        kind: E::KIND,
                        entity_id: entity_id.to_string(),
                        attempts: consecutive_failures,
                        source: error,
                    });
                }
            }
        }

        if started.elapsed() >= policy.ready_timeout {
            return Err(WaitError::ReadinessTimedOut {
                kind: E::KIND,
                entity_id: entity_id.to_string(),
                timeout: policy.ready_timeout,
                last_state,
            });
        }

        sleep(policy.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cluster;
    use crate::waiter::testing::{cluster, unavailable, Scripted};
    use std::time::Duration;

    fn policy() -> WaitPolicy {
        WaitPolicy {
            poll_interval: Duration::from_secs(1),
            task_timeout: None,
            ready_timeout: Duration::from_secs(60),
            fetch_retry_budget: 3,
        }
    }

    async fn wait(source: &Scripted<Cluster>, policy: &WaitPolicy) -> (Result<Cluster, WaitError>, ProgressBar) {
        let bar = ProgressBar::hidden();
        let result = wait_for_entity_ready_with_progress(source, "c1", policy, bar.clone()).await;
        (result, bar)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_entity_is_returned() {
        let source = Scripted::new(
            vec![Ok(cluster("CREATING")), Ok(cluster("CREATING"))],
            || Ok(cluster("READY")),
        );

        let (result, bar) = wait(&source, &policy()).await;

        let cluster = result.unwrap();
        assert_eq!(cluster.state, EntityState::Ready);
        assert_eq!(source.calls(), 3);
        assert!(bar.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_state_names_entity() {
        let source = Scripted::new(vec![Ok(cluster("CREATING"))], || Ok(cluster("error")));

        let (result, bar) = wait(&source, &policy()).await;

        let error = result.unwrap_err();
        assert!(matches!(error, WaitError::EntityFailed { .. }));
        let message = error.to_string();
        assert!(message.contains("c1"));
        assert!(message.contains("ERROR"));
        assert!(bar.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failures_exhaust_budget() {
        let source = Scripted::new(vec![], || Err(unavailable()));

        let started = Instant::now();
        let (result, bar) = wait(&source, &policy()).await;

        match result.unwrap_err() {
            WaitError::FetchRetriesExhausted { attempts, .. } => assert_eq!(attempts, 4),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(source.calls(), 4);
        assert!(started.elapsed() < policy().ready_timeout);
        assert!(bar.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_fetch_resets_failure_count() {
        let source = Scripted::new(
            vec![
                Err(unavailable()),
                Err(unavailable()),
                Err(unavailable()),
                Ok(cluster("RESIZING")),
                Err(unavailable()),
                Err(unavailable()),
                Err(unavailable()),
            ],
            || Ok(cluster("READY")),
        );

        let (result, _) = wait(&source, &policy()).await;

        assert_eq!(result.unwrap().state, EntityState::Ready);
        assert_eq!(source.calls(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_when_never_ready() {
        let source = Scripted::new(vec![], || Ok(cluster("CREATING")));
        let policy = WaitPolicy {
            ready_timeout: Duration::from_secs(10),
            ..policy()
        };

        let started = Instant::now();
        let (result, bar) = wait(&source, &policy).await;

        let error = result.unwrap_err();
        assert!(error.is_timeout());
        match error {
            WaitError::ReadinessTimedOut { last_state, .. } => {
                assert_eq!(last_state, Some(EntityState::Creating))
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(started.elapsed() >= Duration::from_secs(10));
        assert_eq!(source.calls(), 11);
        assert!(bar.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_while_fetches_keep_failing() {
        let source = Scripted::new(vec![], || Err(unavailable()));
        let policy = WaitPolicy {
            ready_timeout: Duration::from_secs(5),
            fetch_retry_budget: 100,
            ..policy()
        };

        let (result, bar) = wait(&source, &policy).await;

        let error = result.unwrap_err();
        match &error {
            WaitError::ReadinessTimedOut { last_state, .. } => assert_eq!(last_state, &None),
            other => panic!("unexpected error: {}", other),
        }
        assert!(error.to_string().ends_with("(last state: none observed)"));
        assert_eq!(source.calls(), 6);
        assert!(bar.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_budget_gives_up_on_first_failure() {
        let source = Scripted::new(vec![Err(unavailable())], || Ok(cluster("READY")));
        let policy = WaitPolicy {
            fetch_retry_budget: 0,
            ..policy()
        };

        let (result, bar) = wait(&source, &policy).await;

        match result.unwrap_err() {
            WaitError::FetchRetriesExhausted { attempts, .. } => assert_eq!(attempts, 1),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(source.calls(), 1);
        assert!(bar.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_waits_are_independent() {
        let fast = Scripted::new(vec![], || Ok(cluster("READY")));
        let slow = Scripted::new(
            (0..5).map(|_| Ok(cluster("CREATING"))).collect(),
            || Ok(cluster("READY")),
        );
        let fast_bar = ProgressBar::hidden();
        let slow_bar = ProgressBar::hidden();

        let policy = policy();

        let (fast_result, slow_result) = tokio::join!(
            wait_for_entity_ready_with_progress::<Cluster, _>(&fast, "c1", &policy, fast_bar.clone()),
            wait_for_entity_ready_with_progress::<Cluster, _>(&slow, "c2", &policy, slow_bar.clone()),
        );

        assert!(fast_result.is_ok());
        assert!(slow_result.is_ok());
        assert_eq!(slow.calls(), 6);
        assert!(fast_bar.is_finished());
        assert!(slow_bar.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_interactive_wait_through_public_entry_point() {
        let source = Scripted::new(vec![Ok(cluster("CREATING"))], || Ok(cluster("READY")));

        let result: Result<Cluster, WaitError> =
            wait_for_entity_ready(&source, "c1", &policy(), &PollContext::non_interactive()).await;

        assert_eq!(result.unwrap().id, "c1");
    }
}
