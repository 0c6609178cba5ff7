//! NTFY-PUB: publish a notification to an ntfy topic.
//!
//! Entry point for the ntfy-pub application.

use ntfy_pub::config::{Cli, Config};
use ntfy_pub::input::read_message;
use ntfy_pub::notify::{Notifier, ReqwestClient};
use std::process::ExitCode;

mod app;

use app::{exit_code, report_error, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.log_level.into());

    // Load and validate configuration
    let config = match Config::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            return exit_code::unexpected();
        }
    };
    tracing::debug!("{config}");

    let message = match read_message(&cli.message) {
        Ok(message) => message,
        Err(e) => {
            tracing::error!("Failed to read message from standard input: {e}");
            return exit_code::unexpected();
        }
    };

    publish(&config, &message)
}

/// Sends the notification on a single-threaded runtime.
///
/// Excluded from coverage - requires network access.
#[cfg(not(tarpaulin_include))]
fn publish(config: &Config, message: &str) -> ExitCode {
    let client = match ReqwestClient::with_timeout(config.timeout) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {e}");
            return exit_code::unexpected();
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {e}");
            return exit_code::unexpected();
        }
    };

    let notifier = Notifier::new(client);
    match runtime.block_on(notifier.notify(config, message)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => report_error(&e),
    }
}
