//! Credential configuration for jirafeed.
//!
//! Credentials are supplied through environment variables (optionally
//! via a `.env` file loaded at startup) and validated up front so a
//! partially configured client can never be constructed.

mod credentials;

pub use credentials::Credentials;

use thiserror::Error;

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required environment variables are missing or blank.
    /// The message names every offending variable, not just the first.
    #[error(
        "missing required environment variables: {}. Ensure all JIRA credentials are configured",
        .0.join(", ")
    )]
    MissingVariables(Vec<String>),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
