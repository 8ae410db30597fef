//! Error types for Movie Finder
//!
//! Errors are grouped by concern: the resilient transport raises
//! [`TransportError`], the movie query client folds those together with
//! upstream signals into [`ApiError`], and configuration loading raises
//! [`ConfigError`]. [`AppError`] is the top-level type used by the CLI.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Transport-level failures raised by the resilient HTTP layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The attempt exceeded its per-attempt timeout
    #[error("Request timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// The host could not be reached (DNS, connect, reset, ...)
    #[error("Network unreachable: {reason}")]
    NetworkUnreachable { reason: String },

    /// Server rejected the request as malformed (HTTP 4xx)
    #[error("Client error: HTTP {status}")]
    HttpClientError { status: u16 },

    /// Server failed to handle the request (HTTP 5xx)
    #[error("Server error: HTTP {status}")]
    HttpServerError { status: u16 },

    /// Any other non-success status (1xx, 3xx, out of range)
    #[error("Unexpected response: HTTP {status}")]
    UnexpectedStatus { status: u16 },

    /// The caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// No usable URL could be built for the request
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

impl TransportError {
    /// Whether another attempt against the same host may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::Timeout { .. }
                | TransportError::NetworkUnreachable { .. }
                | TransportError::HttpServerError { .. }
        )
    }

    /// Classify an HTTP status code that is not a success
    pub fn from_status(status: u16) -> Self {
        match status {
            400..=499 => TransportError::HttpClientError { status },
            500..=599 => TransportError::HttpServerError { status },
            _ => TransportError::UnexpectedStatus { status },
        }
    }

    /// Classify a reqwest failure
    ///
    /// The only timeout reqwest enforces is the connect timeout; the
    /// per-attempt timeout is applied by the transport.
    pub fn from_reqwest(error: reqwest::Error, connect_timeout: Duration) -> Self {
        if error.is_timeout() {
            return TransportError::Timeout {
                millis: connect_timeout.as_millis() as u64,
            };
        }
        if let Some(status) = error.status() {
            return TransportError::from_status(status.as_u16());
        }
        TransportError::NetworkUnreachable {
            reason: error.to_string(),
        }
    }
}

/// Movie database API errors
///
/// `UpstreamNoResults` and `UpstreamNotFound` are not transport failures:
/// the HTTP exchange succeeded but carried no usable data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Search succeeded but matched nothing
    #[error("No results: {message}")]
    UpstreamNoResults { message: String },

    /// Detail lookup succeeded but the identifier is unknown
    #[error("Not found: {message}")]
    UpstreamNotFound { message: String },

    /// Response body could not be decoded
    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// Transport failure after retries and host fallback
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::MalformedResponse {
            reason: error.to_string(),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Configuration file I/O failed
    #[error("Configuration file I/O error: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// API error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is recoverable (transient)
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Transport(e) | AppError::Api(ApiError::Transport(e)) => e.is_retryable(),
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Transport(_) => "transport",
            AppError::Api(_) => "api",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Transport result type alias
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// API result type alias
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
