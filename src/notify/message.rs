//! Timestamp injection into the message body.

use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};

use crate::config::ConfigError;
use crate::config::defaults::MESSAGE_PLACEHOLDER;

/// Applies the timestamp pattern to `message`.
///
/// - No pattern (or an empty one): the message is returned unchanged.
/// - A pattern containing `%message`: the pattern is formatted with `now`
///   and the message is put where the placeholder was.
/// - Any other pattern: the formatted time, a space, then the message.
///
/// The message text itself is never interpreted as strftime directives.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTimestampFormat`] if the pattern has a
/// directive chrono cannot format.
pub fn format_message<Tz>(
    message: &str,
    pattern: Option<&str>,
    now: &DateTime<Tz>,
) -> Result<String, ConfigError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(pattern) = pattern.filter(|p| !p.is_empty()) else {
        return Ok(message.to_string());
    };

    let invalid = || ConfigError::InvalidTimestampFormat(pattern.to_string());

    if pattern.contains(MESSAGE_PLACEHOLDER) {
        let parts = pattern
            .split(MESSAGE_PLACEHOLDER)
            .map(|part| strftime(part, now).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(parts.join(message));
    }

    let stamp = strftime(pattern, now).ok_or_else(invalid)?;
    Ok(format!("{stamp} {message}"))
}

fn strftime<Tz>(pattern: &str, now: &DateTime<Tz>) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }

    let mut out = String::new();
    write!(out, "{}", now.format_with_items(items.iter())).ok()?;
    Some(out)
}
