//! Shared error type across rpcmetrics crates.

use thiserror::Error;

/// Stable error codes surfaced to operators and HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration rejected by the strict loader.
    BadConfig,
    /// Malformed report or request.
    BadRequest,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// A post-update handler failed.
    Handler,
    /// An event listener failed.
    Listener,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in logs and JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadConfig => "BAD_CONFIG",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::Handler => "HANDLER",
            ErrorKind::Listener => "LISTENER",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and collector.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("handler failed: {0}")]
    Handler(String),
    #[error("listener failed: {0}")]
    Listener(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map the error to its stable code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MetricsError::BadConfig(_) => ErrorKind::BadConfig,
            MetricsError::BadRequest(_) => ErrorKind::BadRequest,
            MetricsError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            MetricsError::Handler(_) => ErrorKind::Handler,
            MetricsError::Listener(_) => ErrorKind::Listener,
            MetricsError::Internal(_) => ErrorKind::Internal,
        }
    }
}
