//! Error types for the top-services client.
//!
//! Responsibilities:
//! - Describe every way a source fetch can fail.
//! - Classify failures as retryable, authentication or availability problems.
//!
//! Does NOT handle:
//! - Per-record parse problems; those become `RecordWarning`s, not errors.
//! - Mapping errors to process exit codes (see the CLI crate).

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while fetching service records.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success response from a remote source.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// A source could not be reached or read at all.
    #[error("Source '{source_name}' is unavailable: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    /// A source did not answer within the configured timeout.
    #[error("Source '{source_name}' timed out after {timeout:?}")]
    Timeout {
        source_name: String,
        timeout: Duration,
    },

    /// A source answered with a payload that is not a list of records.
    #[error("Source '{source_name}' returned an unreadable payload: {message}")]
    SourceFormat {
        source_name: String,
        message: String,
    },

    /// Retries were exhausted on a transient failure.
    #[error("Maximum retries exceeded ({attempts} attempts): {last}")]
    MaxRetriesExceeded {
        attempts: usize,
        #[source]
        last: Box<ClientError>,
    },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The search cache could not be written.
    #[error("Cache error at {}: {message}", .path.display())]
    Cache { path: PathBuf, message: String },
}

impl ClientError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_connect() || e.is_timeout(),
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    ///
    /// Everything else (4xx client errors, 500, 501) fails immediately.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if this error indicates rejected credentials.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::ApiError { status, .. } => matches!(status, 401 | 403),
            Self::MaxRetriesExceeded { last, .. } => last.is_auth_error(),
            _ => false,
        }
    }

    /// Check if this error means a source could not be reached.
    ///
    /// Covers explicit unavailability, timeouts, transport failures,
    /// rate limiting and server-side (5xx) errors.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::SourceUnavailable { .. } | Self::Timeout { .. } | Self::HttpError(_) => true,
            Self::ApiError { status, .. } => *status == 429 || *status >= 500,
            Self::MaxRetriesExceeded { last, .. } => last.is_unavailable(),
            _ => false,
        }
    }

    /// Check if a source returned a payload that could not be interpreted.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::SourceFormat { .. })
    }

    pub(crate) fn format(source_name: &str, message: impl Into<String>) -> Self {
        Self::SourceFormat {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn unavailable(source_name: &str, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }
}
