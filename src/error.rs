//! Error types for upstream API calls

use reqwest::StatusCode;
use thiserror::Error;

/// Deezer's in-body error code for "quota exceeded"
pub const DEEZER_QUOTA_CODE: i64 = 4;

/// Errors raised while talking to an upstream music API
#[derive(Error, Debug)]
pub enum ApiError {
    /// DNS, connect, timeout or body read failures
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Unexpected status: {0}")]
    Status(StatusCode),

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Upstream refused the request because of its quota
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Error object embedded in an otherwise successful response
    #[error("Upstream error {code}: {message}")]
    Upstream { code: i64, message: String },

    /// Request rejected before being sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client is not configured (e.g. missing API key)
    #[error("Client disabled: {0}")]
    Disabled(&'static str),
}

impl ApiError {
    /// Whether another attempt at the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::RateLimited(_) => true,
            ApiError::Status(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            ApiError::Malformed(_)
            | ApiError::Upstream { .. }
            | ApiError::InvalidRequest(_)
            | ApiError::Disabled(_) => false,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::Status(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(ApiError::Status(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(!ApiError::Status(StatusCode::NOT_FOUND).is_retryable());
    }

    #[test]
    fn test_shape_errors_not_retried() {
        assert!(!ApiError::Malformed("missing data".into()).is_retryable());
        assert!(!ApiError::Disabled("no key").is_retryable());
        assert!(ApiError::RateLimited("quota".into()).is_retryable());
    }
}
