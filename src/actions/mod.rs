use crate::{client::ApiError, exit_codes::InfractlExitCode, waiter::WaitError};
use thiserror::Error;

pub mod clusters;
pub mod disks;
pub mod projects;
pub mod tasks;
pub mod tenants;
pub mod utils;
pub mod vms;

#[derive(Debug, Error)]
pub enum CliActionError {
    #[error("{0}")]
    ApiError(#[from] ApiError),

    #[error("{0}")]
    WaitError(#[from] WaitError),

    #[error("{0}")]
    ConfigurationError(#[from] crate::configuration::ConfigurationError),

    #[error("{0}")]
    FormattingError(#[from] crate::format::FormattingError),

    #[error("Prompt failed: {0}")]
    PromptError(#[from] inquire::InquireError),

    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),

    #[error("Invalid value '{value}' for --{name}: {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },
}

impl CliActionError {
    pub fn exit_code(&self) -> InfractlExitCode {
        match self {
            CliActionError::ApiError(e) => api_exit_code(e),
            CliActionError::WaitError(e) => {
                if e.is_timeout() {
                    InfractlExitCode::Timeout
                } else if e.is_remote_failure() {
                    InfractlExitCode::TaskFailed
                } else if matches!(e, WaitError::MissingEntity { .. }) {
                    InfractlExitCode::ApiError
                } else {
                    e.api_error()
                        .map(api_exit_code)
                        .unwrap_or(InfractlExitCode::SoftwareError)
                }
            }
            CliActionError::ConfigurationError(_) => InfractlExitCode::ConfigError,
            CliActionError::FormattingError(_) => InfractlExitCode::DataError,
            CliActionError::PromptError(_) => InfractlExitCode::SoftwareError,
            CliActionError::MissingRequiredArgument(_) | CliActionError::InvalidArgument { .. } => {
                InfractlExitCode::UsageError
            }
        }
    }
}

fn api_exit_code(error: &ApiError) -> InfractlExitCode {
    match error {
        ApiError::ConfigurationError(_) => InfractlExitCode::ConfigError,
        ApiError::JsonError(_) => InfractlExitCode::DataError,
        e if e.is_network() => InfractlExitCode::NetworkError,
        e if e.status() == Some(503) => InfractlExitCode::Unavailable,
        _ => InfractlExitCode::ApiError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityState;
    use std::time::Duration;

    #[test]
    fn test_wait_errors_map_to_distinct_exit_codes() {
        let timed_out = CliActionError::from(WaitError::TaskTimedOut {
            task_id: "t1".to_string(),
            operation: "CREATE_VM".to_string(),
            timeout: Duration::from_secs(5),
        });
        assert_eq!(timed_out.exit_code(), InfractlExitCode::Timeout);

        let failed = CliActionError::from(WaitError::EntityFailed {
            kind: "cluster",
            entity_id: "c1".to_string(),
            state: EntityState::Error,
        });
        assert_eq!(failed.exit_code(), InfractlExitCode::TaskFailed);

        let fetch = CliActionError::from(WaitError::TaskFetch {
            task_id: "t1".to_string(),
            source: ApiError::Status { status: 404 },
        });
        assert_eq!(fetch.exit_code(), InfractlExitCode::ApiError);

        let missing = CliActionError::from(WaitError::MissingEntity {
            task_id: "t1".to_string(),
            operation: "CREATE_VM".to_string(),
        });
        assert_eq!(missing.exit_code(), InfractlExitCode::ApiError);
    }

    #[test]
    fn test_service_unavailable_exit_code() {
        let unavailable = CliActionError::from(ApiError::Status { status: 503 });
        assert_eq!(unavailable.exit_code().code(), 69);

        let exhausted = CliActionError::from(WaitError::FetchRetriesExhausted {
            kind: "cluster",
            entity_id: "c1".to_string(),
            attempts: 4,
            source: ApiError::Status { status: 503 },
        });
        assert_eq!(exhausted.exit_code(), InfractlExitCode::Unavailable);

        let server_error = CliActionError::from(ApiError::Status { status: 500 });
        assert_eq!(server_error.exit_code(), InfractlExitCode::ApiError);
    }

    #[test]
    fn test_usage_errors() {
        let missing = CliActionError::MissingRequiredArgument("name".to_string());
        assert_eq!(missing.exit_code(), InfractlExitCode::UsageError);
    }
}
