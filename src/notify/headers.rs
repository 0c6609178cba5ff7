//! Derives the publish headers from a resolved config.

use http::header::{AUTHORIZATION, HeaderName, HeaderValue};
use http::HeaderMap;

use crate::config::{Config, ConfigError};

/// Header carrying action buttons.
pub const ACTIONS: HeaderName = HeaderName::from_static("actions");
/// Header carrying an attachment URL.
pub const ATTACH: HeaderName = HeaderName::from_static("attach");
/// Header carrying the click-through URL.
pub const CLICK: HeaderName = HeaderName::from_static("click");
/// Header carrying the delivery delay.
pub const DELAY: HeaderName = HeaderName::from_static("delay");
/// Header carrying the e-mail forwarding address.
pub const EMAIL: HeaderName = HeaderName::from_static("email");
/// Header carrying the priority.
pub const PRIORITY: HeaderName = HeaderName::from_static("priority");
/// Header carrying comma-separated tags.
pub const TAGS: HeaderName = HeaderName::from_static("tags");
/// Header carrying the title.
pub const TITLE: HeaderName = HeaderName::from_static("title");

/// Builds the headers for a publish request.
///
/// A header is present only when its config field is set and non-empty.
/// Tags are joined with commas. A token becomes a bearer `Authorization`
/// header; basic credentials are not headers and are handled by the
/// notifier.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidHeaderValue`] if a value contains
/// characters that cannot appear in a header (such as a newline).
pub fn build_headers(config: &Config) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();

    let fields = [
        (ACTIONS, config.actions.as_deref()),
        (ATTACH, config.attach.as_deref()),
        (CLICK, config.click.as_deref()),
        (DELAY, config.delay.as_deref()),
        (EMAIL, config.email.as_deref()),
        (PRIORITY, config.priority.map(|p| p.as_str())),
        (TITLE, config.title.as_deref()),
    ];
    for (name, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            insert(&mut headers, name, value)?;
        }
    }

    if !config.tags.is_empty() {
        insert(&mut headers, TAGS, &config.tags.join(","))?;
    }

    if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
        insert(&mut headers, AUTHORIZATION, &format!("Bearer {token}"))?;
    }

    Ok(headers)
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<(), ConfigError> {
    // from_bytes accepts UTF-8 (obs-text) so non-ASCII titles survive.
    let header_value =
        HeaderValue::from_bytes(value.as_bytes()).map_err(|e| ConfigError::InvalidHeaderValue {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
    headers.insert(name, header_value);
    Ok(())
}
