//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error reporting
//! that support the main entry point.

use ntfy_pub::notify::{NotificationError, NotifyError};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// The server rejected the notification (exit code 1).
    pub const NOTIFY_ERROR: ExitCode = ExitCode::FAILURE;

    /// Anything else (exit code 2) - invalid config, unreachable server, I/O.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn unexpected() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Sets up the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level` when set. Output goes to
/// stderr so stdout stays free.
pub fn setup_tracing(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Logs a failed publish and returns the matching exit code.
pub fn report_error(error: &NotifyError) -> std::process::ExitCode {
    match error {
        NotifyError::Notification(rejected) => {
            report_rejection(rejected);
            exit_code::NOTIFY_ERROR
        }
        NotifyError::Config(e) => {
            tracing::error!("Configuration error: {e}");
            exit_code::unexpected()
        }
        NotifyError::Http(e) => {
            tracing::error!("Request failed: {e}");
            exit_code::unexpected()
        }
    }
}

fn report_rejection(error: &NotificationError) {
    tracing::error!("{error}");
    tracing::debug!("Sent headers: {:?}", error.headers);
    tracing::debug!("Sent message:\n{}", error.sent_message);
}
