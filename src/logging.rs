//! Logging configuration using the tracing ecosystem.
//!
//! This module configures structured logging with:
//! - Console output on stderr for run progress
//! - File-based output with daily rotation for an audit trail
//! - Environment-based log level configuration

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "jirafeed=info,warn";

/// Initialize the logging system.
///
/// Sets up tracing with a console layer on stderr plus a daily
/// rotating file appender in the user's local data directory:
/// - Linux: `~/.local/share/jirafeed/logs/`
/// - macOS: `~/Library/Application Support/jirafeed/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\jirafeed\logs\`
///
/// Log levels are configured via the `RUST_LOG` environment variable,
/// e.g. `RUST_LOG=jirafeed=debug`.
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be determined or created
/// - The tracing subscriber cannot be set
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "jirafeed.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "jirafeed starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

/// Get the log directory path.
///
/// Returns the platform-specific local data directory with
/// `jirafeed/logs` appended.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("jirafeed").join("logs"))
}

/// Log application shutdown.
///
/// Call this before the application exits to log a clean shutdown
/// message.
pub fn shutdown() {
    tracing::info!("jirafeed shutting down");
}
