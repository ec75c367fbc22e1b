use thiserror::Error;

use crate::{actions::CliActionError, exit_codes::InfractlExitCode};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    /// Error related to configuration loading
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] crate::configuration::ConfigurationError),
    #[error("{0}")]
    ActionError(#[from] CliActionError),
}

impl CliError {
    /// Get the appropriate exit code for this error
    ///
    /// Action errors carry their own classification: network, remote API,
    /// failed task or timeout.
    pub fn exit_code(&self) -> InfractlExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => InfractlExitCode::UsageError,
            CliError::ConfigurationError(_) => InfractlExitCode::ConfigError,
            CliError::ActionError(e) => e.exit_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::ConfigurationError;

    #[test]
    fn test_exit_codes() {
        let error = CliError::from(ConfigurationError::MissingRequiredPropertyValue {
            name: "project".to_string(),
        });
        assert_eq!(error.exit_code(), InfractlExitCode::ConfigError);

        let error = CliError::UnsupportedSubcommand("frobnicate".to_string());
        assert_eq!(error.exit_code().code(), 64);
    }
}
