//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// Whether re-sending the same request could succeed.
    ///
    /// Transport failures and error statuses are retryable; malformed
    /// requests and undecodable bodies are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::RequestError(_) | FetchError::Timeout | FetchError::HttpError { .. }
        )
    }

    /// HTTP status, for error responses.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(FetchError::Timeout.is_retryable());
        assert!(FetchError::RequestError("refused".into()).is_retryable());
        assert!(FetchError::HttpError { status: 500, message: "boom".into() }.is_retryable());
        assert!(!FetchError::InvalidUrl("::".into()).is_retryable());
        assert!(!FetchError::ParseError("eof".into()).is_retryable());
    }

    #[test]
    fn test_status() {
        let err = FetchError::HttpError { status: 404, message: "missing".into() };
        assert_eq!(err.status(), Some(404));
        assert_eq!(FetchError::Timeout.status(), None);
    }
}
