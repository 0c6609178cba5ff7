//! Publishes one notification and classifies the server's answer.

use serde::Deserialize;

use crate::config::{Config, ConfigError, field};
use crate::time::{Clock, SystemClock};

use super::headers::build_headers;
use super::message::format_message;
use super::{BasicAuth, HttpClient, HttpRequest, HttpResponse, NotificationError, NotifyError};

/// Error body returned by ntfy for rejected requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    link: Option<String>,
}

/// Sends notifications through an [`HttpClient`].
///
/// Each call to [`Notifier::notify`] is a single attempt: one POST and no
/// retries.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `C`: The clock used for timestamp injection (defaults to [`SystemClock`])
///
/// # Example
///
/// ```
/// use ntfy_pub::notify::{Notifier, ReqwestClient};
///
/// let notifier = Notifier::new(ReqwestClient::new());
/// ```
#[derive(Debug)]
pub struct Notifier<H, C = SystemClock> {
    client: H,
    clock: C,
}

impl<H> Notifier<H, SystemClock> {
    /// Creates a notifier using the system's local clock.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self {
            client,
            clock: SystemClock,
        }
    }
}

impl<H, C> Notifier<H, C> {
    /// Sets a custom clock for timestamps.
    ///
    /// This is primarily useful for testing with a fixed time.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> Notifier<H, C2> {
        Notifier {
            client: self.client,
            clock,
        }
    }

    /// Returns the HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }
}

impl<H: HttpClient, C: Clock> Notifier<H, C> {
    /// Publishes `message` to the topic described by `config`.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::Config`] if credentials conflict or are incomplete,
    ///   the topic is missing, or a value cannot be sent; nothing is sent.
    /// - [`NotifyError::Http`] if no response was received.
    /// - [`NotifyError::Notification`] if the server answered with a
    ///   non-success status.
    pub async fn notify(&self, config: &Config, message: &str) -> Result<(), NotifyError> {
        let credentials = resolve_credentials(config)?;
        let topic = config.require_topic()?;
        let headers = build_headers(config)?;

        let pattern = if config.include_timestamp {
            config.timestamp.as_deref()
        } else {
            None
        };
        let body = format_message(message, pattern, &self.clock.now())?;

        let url = publish_url(&config.server, topic)?;
        tracing::debug!("Publishing to {url}");
        tracing::debug!("Headers: {headers:?}");
        tracing::debug!("Message:\n{body}");

        let request = HttpRequest::post(url)
            .with_headers(headers.clone())
            .with_basic_auth(credentials)
            .with_body(body.clone().into_bytes());

        let response = self.client.request(request).await?;

        if response.is_success() {
            tracing::debug!(
                "Server accepted notification ({}): {}",
                response.status,
                response.body_text()
            );
            return Ok(());
        }

        Err(NotificationError {
            message: error_message(&response),
            server: config.server.clone(),
            topic: topic.to_string(),
            headers,
            sent_message: body,
        }
        .into())
    }
}

/// Picks basic-auth credentials from the config.
///
/// # Errors
///
/// - [`ConfigError::ConflictingAuth`] for a user/password pair plus a token
/// - [`ConfigError::PartialCredentials`] for a user without a password or
///   the reverse
pub fn resolve_credentials(config: &Config) -> Result<Option<BasicAuth>, ConfigError> {
    let user = config.user.as_deref().filter(|u| !u.is_empty());
    let password = config.password.as_deref().filter(|p| !p.is_empty());
    let token = config.token.as_deref().filter(|t| !t.is_empty());

    match (user, password) {
        (Some(_), Some(_)) if token.is_some() => Err(ConfigError::ConflictingAuth),
        (Some(user), Some(password)) => Ok(Some(BasicAuth::new(user, password))),
        (Some(_), None) | (None, Some(_)) => Err(ConfigError::PartialCredentials),
        (None, None) => Ok(None),
    }
}

/// Joins the server base URL and the topic.
fn publish_url(server: &str, topic: &str) -> Result<url::Url, ConfigError> {
    let raw = format!("{}/{topic}", server.trim_end_matches('/'));

    url::Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw,
        reason: e.to_string(),
    })
    .and_then(|url| {
        if url.cannot_be_a_base() {
            Err(ConfigError::InvalidUrl {
                url: url.to_string(),
                reason: format!("`{}` must be an http(s) base URL", field::SERVER),
            })
        } else {
            Ok(url)
        }
    })
}

/// Describes a non-success response.
///
/// A JSON body with an `error` field yields `"{error} {link}"`, or just
/// `error` when `link` is missing or empty (no trailing space). Anything
/// else yields `"{status} {body}"`.
fn error_message(response: &HttpResponse) -> String {
    match serde_json::from_slice::<ErrorBody>(&response.body) {
        Ok(ErrorBody {
            error,
            link: Some(link),
        }) if !link.is_empty() => format!("{error} {link}"),
        Ok(ErrorBody { error, .. }) => error,
        Err(_) => format!("{} {}", response.status.as_u16(), response.body_text()),
    }
}
