//! Error types for sending notifications.

use thiserror::Error;

use crate::config::ConfigError;

/// Error type for HTTP operations.
///
/// The request never produced a response: the exchange failed at the
/// network level.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// The server answered but the notification was not accepted.
///
/// Carries what was attempted so callers can report it without
/// re-deriving the request.
#[derive(Debug, Clone, Error)]
#[error("Error sending to {server}/{topic}: {message}")]
pub struct NotificationError {
    /// Human-readable reason
    pub message: String,
    /// Server base URL the request went to
    pub server: String,
    /// Topic the request went to
    pub topic: String,
    /// Headers that were sent
    pub headers: http::HeaderMap,
    /// Body that was sent, after timestamp formatting
    pub sent_message: String,
}

/// Error type for [`Notifier::notify`](super::Notifier::notify).
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The configuration is incomplete or conflicting; nothing was sent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The server rejected the notification.
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// The request failed before a response arrived.
    #[error(transparent)]
    Http(#[from] HttpError),
}
