//! Waiting for asynchronous control plane operations.
//!
//! Mutating API calls return a [`Task`]. The task waiter polls that task
//! until it is `COMPLETED` or `ERROR`. Some commands then hand the affected
//! entity to the readiness waiter, which polls the entity itself until it
//! reports `READY`, giving up on `ERROR`, on too many consecutive failed
//! fetches, or when its wall-clock timeout expires.
//!
//! Both waiters sleep with `tokio::time`, so tests drive them with a paused
//! clock instead of real delays.

pub mod progress;
pub mod readiness;
pub mod task;

pub use readiness::{wait_for_entity_ready, wait_for_entity_ready_with_progress};
pub use task::{wait_for_task, wait_for_task_completion, wait_for_task_with_progress};

use crate::{
    client::ApiError,
    configuration::WaitSettings,
    model::{EntityState, Resource, Task},
};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Anything that can report the current status of a task.
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn fetch_task_status(&self, task_id: &str) -> Result<Task, ApiError>;
}

/// Anything that can report the current snapshot of an entity of type `E`.
#[async_trait]
pub trait EntitySource<E: Resource>: Send + Sync {
    async fn fetch_entity(&self, entity_id: &str) -> Result<E, ApiError>;
}

/// Per-invocation polling context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollContext {
    /// Whether human-readable progress may be written to stdout
    pub interactive: bool,
}

impl PollContext {
    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }
}

/// Timing and retry limits shared by both waiters.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitPolicy {
    pub poll_interval: Duration,
    /// `None` waits for the task indefinitely
    pub task_timeout: Option<Duration>,
    pub ready_timeout: Duration,
    /// Consecutive failed entity fetches tolerated before giving up
    pub fetch_retry_budget: u32,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        WaitPolicy::from(&WaitSettings::default())
    }
}

impl From<&WaitSettings> for WaitPolicy {
    fn from(settings: &WaitSettings) -> Self {
        Self {
            poll_interval: settings.poll_interval(),
            task_timeout: settings.task_timeout(),
            ready_timeout: settings.ready_timeout(),
            fetch_retry_budget: settings.fetch_retry_budget,
        }
    }
}

#[derive(Debug, Error)]
pub enum WaitError {
    #[error("failed to fetch status of task {task_id}: {source}")]
    TaskFetch {
        task_id: String,
        #[source]
        source: ApiError,
    },

    #[error(
        "{operation} task {task_id} failed: {}",
        .detail.as_deref().unwrap_or("no error details reported by the server")
    )]
    TaskFailed {
        task_id: String,
        operation: String,
        detail: Option<String>,
    },

    #[error("{operation} task {task_id} completed without reporting the affected entity")]
    MissingEntity { task_id: String, operation: String },

    #[error("timed out after {}s waiting for {operation} task {task_id}", .timeout.as_secs())]
    TaskTimedOut {
        task_id: String,
        operation: String,
        timeout: Duration,
    },

    #[error("{kind} {entity_id} entered state {state}")]
    EntityFailed {
        kind: &'static str,
        entity_id: String,
        state: EntityState,
    },

    #[error("gave up waiting for {kind} {entity_id} after {attempts} consecutive failed fetches: {source}")]
    FetchRetriesExhausted {
        kind: &'static str,
        entity_id: String,
        attempts: u32,
        #[source]
        source: ApiError,
    },

    #[error(
        "timed out after {}s waiting for {kind} {entity_id} to become READY (last state: {})",
        .timeout.as_secs(),
        .last_state.as_ref().map(ToString::to_string).unwrap_or_else(|| "none observed".to_string())
    )]
    ReadinessTimedOut {
        kind: &'static str,
        entity_id: String,
        timeout: Duration,
        /// `None` when no fetch succeeded during the whole wait
        last_state: Option<EntityState>,
    },
}

impl WaitError {
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            WaitError::TaskTimedOut { .. } | WaitError::ReadinessTimedOut { .. }
        )
    }

    /// The server reported the operation or the resource as failed.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            WaitError::TaskFailed { .. } | WaitError::EntityFailed { .. }
        )
    }

    /// The underlying API error, for fetch failures.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            WaitError::TaskFetch { source, .. }
            | WaitError::FetchRetriesExhausted { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted sources replaying a fixed sequence of responses.

    use super::*;
    use crate::model::{Cluster, EntityRef, TaskState};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    pub fn task(state: &str, entity_id: &str) -> Task {
        Task {
            id: "t1".to_string(),
            operation: "CREATE_CLUSTER".to_string(),
            state: TaskState::from(state.to_string()),
            entity: EntityRef {
                id: entity_id.to_string(),
                kind: "cluster".to_string(),
            },
            errors: Vec::new(),
            start_time: None,
            end_time: None,
        }
    }

    pub fn cluster(state: &str) -> Cluster {
        Cluster {
            id: "c1".to_string(),
            name: "kube".to_string(),
            state: EntityState::from(state.to_string()),
            cluster_type: "KUBERNETES".to_string(),
            worker_count: 2,
        }
    }

    pub fn unavailable() -> ApiError {
        ApiError::Status { status: 503 }
    }

    /// Replays `responses` in order, then repeats `fallback` forever.
    pub struct Scripted<T> {
        responses: Mutex<VecDeque<Result<T, ApiError>>>,
        fallback: fn() -> Result<T, ApiError>,
        calls: AtomicUsize,
    }

    impl<T> Scripted<T> {
        pub fn new(responses: Vec<Result<T, ApiError>>, fallback: fn() -> Result<T, ApiError>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                fallback,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn next(&self) -> Result<T, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.responses.lock().unwrap().pop_front();
            next.unwrap_or_else(self.fallback)
        }
    }

    #[async_trait]
    impl TaskSource for Scripted<Task> {
        async fn fetch_task_status(&self, _task_id: &str) -> Result<Task, ApiError> {
            self.next()
        }
    }

    #[async_trait]
    impl EntitySource<Cluster> for Scripted<Cluster> {
        async fn fetch_entity(&self, _entity_id: &str) -> Result<Cluster, ApiError> {
            self.next()
        }
    }
}
