//! Custom exit codes for the infractl application
//!
//! This module defines specific exit codes for different error conditions
//! to make scripting and automation easier.

/// Custom exit codes for infractl
///
/// These codes follow the BSD sysexits.h conventions where possible:
/// - 0: Success
/// - 64-78: Standard exit codes from sysexits.h
/// - 100+: Custom application-specific codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum InfractlExitCode {
    /// Success (0) - Command completed successfully
    Success = exitcode::OK,

    /// Command line usage error (64) - User input error
    UsageError = exitcode::USAGE,

    /// Data format error (65) - Input data was incorrect
    DataError = exitcode::DATAERR,

    /// Service unavailable (69) - The control plane could not be reached
    Unavailable = exitcode::UNAVAILABLE,

    /// Internal software error (70) - Unexpected application error
    SoftwareError = exitcode::SOFTWARE,

    /// Configuration error (78) - Application configuration issue
    ConfigError = exitcode::CONFIG,

    /// Network error (101) - Connection or communication issues
    NetworkError = 101,

    /// API error (102) - Remote API returned an error
    ApiError = 102,

    /// Task failure (103) - A server-side task or resource ended in ERROR
    TaskFailed = 103,

    /// Timeout (104) - Gave up waiting for a task or resource
    Timeout = 104,
}

impl InfractlExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            InfractlExitCode::Success => "Success",
            InfractlExitCode::UsageError => "Command line usage error",
            InfractlExitCode::DataError => "Data format error",
            InfractlExitCode::Unavailable => "Service unavailable",
            InfractlExitCode::SoftwareError => "Internal software error",
            InfractlExitCode::ConfigError => "Configuration error",
            InfractlExitCode::NetworkError => "Network communication error",
            InfractlExitCode::ApiError => "Remote API error",
            InfractlExitCode::TaskFailed => "Task failed",
            InfractlExitCode::Timeout => "Timed out",
        }
    }
}

impl From<InfractlExitCode> for i32 {
    fn from(code: InfractlExitCode) -> Self {
        code.code()
    }
}
