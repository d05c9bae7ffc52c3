//! Centralized error types for jirafeed.
//!
//! Run-level failures (configuration, connection) abort the whole run;
//! per-item failures (validation, issue creation) are caught at the
//! batch boundary and recorded in the batch result. Callers match on
//! the variant rather than inspecting messages.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;
use crate::issue::ValidationError;
use crate::retry::RetryExhausted;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid configuration; fatal before any network work.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Connection establishment failed after exhausting the retry
    /// policy; fatal, no batch is attempted.
    #[error("failed to connect to JIRA after {} attempts: {}", .0.attempts, .0.cause)]
    Connection(RetryExhausted<ApiError>),

    /// An issue request failed validation; per-item, never retried.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Issue creation failed after exhausting the retry policy;
    /// per-item, the batch continues.
    #[error("failed to create issue after {} attempts: {}", .0.attempts, .0.cause)]
    IssueCreation(RetryExhausted<ApiError>),

    /// A single API call failed outside of a retried operation.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_err = ConfigError::MissingVariables(vec!["JIRA_EMAIL".to_string()]);
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::Config(_)));
        assert!(app_err.to_string().contains("JIRA_EMAIL"));
    }

    #[test]
    fn test_app_error_from_validation_error() {
        let err = ValidationError {
            violations: vec!["summary required".to_string()],
        };
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Validation(_)));
        assert!(app_err.to_string().contains("summary required"));
    }

    #[test]
    fn test_connection_error_reports_attempts_and_cause() {
        let err = AppError::Connection(RetryExhausted {
            attempts: 3,
            cause: ApiError::ServerError("HTTP 503".to_string()),
        });
        let msg = err.to_string();
        assert!(msg.contains("failed to connect to JIRA after 3 attempts"));
        assert!(msg.contains("HTTP 503"));
    }

    #[test]
    fn test_issue_creation_error_reports_attempts_and_cause() {
        let err = AppError::IssueCreation(RetryExhausted {
            attempts: 4,
            cause: ApiError::RateLimited,
        });
        let msg = err.to_string();
        assert!(msg.contains("failed to create issue after 4 attempts"));
        assert!(msg.contains("rate limited"));
    }
}
