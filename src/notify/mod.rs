//! Notification layer: turns a resolved [`Config`](crate::config::Config)
//! and a message into one HTTP publish request.
//!
//! This module provides types and traits for:
//! - Deriving publish headers ([`build_headers`])
//! - Timestamp injection ([`format_message`])
//! - Building HTTP requests ([`HttpRequest`], [`BasicAuth`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Sending and classifying the answer ([`Notifier`])

mod client;
mod error;
mod headers;
mod message;
mod notifier;
mod transport;

#[cfg(test)]
mod notifier_tests;

pub use client::ReqwestClient;
pub use error::{HttpError, NotificationError, NotifyError};
pub use headers::build_headers;
pub use message::format_message;
pub use notifier::{Notifier, resolve_credentials};
pub use transport::{BasicAuth, HttpClient, HttpRequest, HttpResponse};
