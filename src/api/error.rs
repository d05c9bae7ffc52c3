//! API error types for the JIRA client.

use thiserror::Error;

/// Errors from a single request to the JIRA API.
///
/// These are the per-attempt failures; retry exhaustion and the
/// run-level error kinds are layered on top in [`crate::error`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed - invalid email or API token.
    #[error("authentication failed: check your email and API token")]
    Unauthorized,

    /// Permission denied - user lacks access to the resource.
    #[error("permission denied: you don't have access to this resource")]
    Forbidden,

    /// Resource not found.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the JIRA API.
    #[error("rate limited: please wait before retrying")]
    RateLimited,

    /// JIRA server error.
    #[error("JIRA server error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid response from the API.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an appropriate error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("unexpected HTTP {}: {}", status, context)),
        }
    }
}
