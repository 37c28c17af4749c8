//! Error types for the paper discovery service.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by the provider (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if the provider may succeed on a later attempt.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors from the discovery pipeline.
#[derive(thiserror::Error, Debug, Clone)]
pub enum DiscoveryError {
    /// The request itself is unusable (missing or blank topic).
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// A single provider could not deliver candidates.
    ///
    /// Absorbed by the orchestrator; only surfaces through [`Self::TotalUnavailable`].
    #[error("{source_name} unavailable: {message}")]
    SourceUnavailable {
        /// Provider name
        source_name: String,
        /// Underlying failure
        message: String,
    },

    /// Every provider failed; carries the most recent failure.
    #[error("All paper sources unavailable: {0}")]
    TotalUnavailable(String),
}

impl DiscoveryError {
    /// Create an input validation error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput { field: field.into(), message: message.into() }
    }

    /// Create a source unavailable error.
    #[must_use]
    pub fn source_unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceUnavailable { source_name: source_name.into(), message: message.into() }
    }

    /// True for errors caused by the caller rather than the providers.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Convert to the message placed in the `error` field of an HTTP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::InvalidInput { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::TotalUnavailable(message) => {
                format!("Paper search is temporarily unavailable ({message}). Please try again later.")
            }
            Self::SourceUnavailable { .. } => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_retryable() {
        assert!(ClientError::rate_limited(60).is_retryable());
        assert!(ClientError::server(503, "unavailable").is_retryable());

        let err = ClientError::UnexpectedStatus { status: 404, message: "missing".into() };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_client_error_retry_after() {
        let err = ClientError::rate_limited(60);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));

        let err = ClientError::server(500, "boom");
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_discovery_error_user_message() {
        let err = DiscoveryError::invalid_input("topic", "cannot be empty");
        assert!(err.is_client_error());
        assert!(err.to_user_message().contains("topic"));
        assert!(err.to_user_message().contains("cannot be empty"));

        let err = DiscoveryError::TotalUnavailable("OpenAlex returned 503".into());
        assert!(!err.is_client_error());
        assert!(err.to_user_message().contains("OpenAlex returned 503"));
    }

    #[test]
    fn test_source_unavailable_names_source() {
        let err = DiscoveryError::source_unavailable("semantic_scholar", "timed out");
        assert_eq!(err.to_string(), "semantic_scholar unavailable: timed out");
    }
}
