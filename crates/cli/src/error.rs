//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ConfigError` and `ClientError` variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-5 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use top_services_client::ClientError;
use top_services_config::ConfigError;

/// Structured exit codes for top-services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - the report was written.
    Success = 0,

    /// General error - I/O, cache, or any unclassified failure.
    GeneralError = 1,

    /// Configuration error - a setting is missing or malformed.
    ///
    /// Raised before any network activity. Scripts should fix the
    /// environment and not retry as-is.
    ConfigError = 2,

    /// Source unavailable - network failure, timeout, 429 or 5xx.
    ///
    /// Scripts may retry with exponential backoff.
    SourceUnavailable = 3,

    /// Authentication failure - a source rejected the credentials (401/403).
    AuthenticationFailed = 4,

    /// Source format error - a source answered with an unreadable payload.
    SourceFormat = 5,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        if err.is_auth_error() {
            ExitCode::AuthenticationFailed
        } else if err.is_unavailable() {
            ExitCode::SourceUnavailable
        } else if err.is_format_error() {
            ExitCode::SourceFormat
        } else {
            ExitCode::GeneralError
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_: &ConfigError) -> Self {
        ExitCode::ConfigError
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error type is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
        }

        ExitCode::GeneralError
    }
}
