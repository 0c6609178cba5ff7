//! The resolved notification settings and their layered merge.
//!
//! A [`Config`] starts from built-in defaults and is refined by
//! [`Config::update`] with one [`ConfigSource`] at a time. Each update
//! validates every recognized key the source defines and commits the
//! result only if all of them are valid.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use toml::Value;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::paths::{config_paths, system_env};
use super::source::{ConfigSource, SourceInput};

/// Urgency level attached to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    /// `max`
    Max,
    /// `urgent`, an alias of `max`
    Urgent,
    /// `high`
    High,
    /// `default`
    Default,
    /// `low`
    Low,
    /// `min`
    Min,
    /// `1`
    One,
    /// `2`
    Two,
    /// `3`
    Three,
    /// `4`
    Four,
    /// `5`
    Five,
}

impl Priority {
    /// All accepted priorities, in the order they are listed to users.
    pub const ALL: [Self; 11] = [
        Self::Max,
        Self::Urgent,
        Self::High,
        Self::Default,
        Self::Low,
        Self::Min,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
    ];

    /// Returns the value sent in the `Priority` header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Default => "default",
            Self::Low => "low",
            Self::Min => "min",
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the accepted priorities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown priority '{0}'")]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPriority(s.to_string()))
    }
}

/// Resolved settings used for one notification.
///
/// Built per invocation and read-only once sending starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Destination topic (required before sending)
    pub topic: Option<String>,
    /// Server base URL
    pub server: String,
    /// Basic-auth user
    pub user: Option<String>,
    /// Basic-auth password
    pub password: Option<String>,
    /// Bearer token
    pub token: Option<String>,
    /// `Actions` header
    pub actions: Option<String>,
    /// `Attach` header
    pub attach: Option<String>,
    /// `Click` header
    pub click: Option<String>,
    /// `Delay` header
    pub delay: Option<String>,
    /// `Email` header
    pub email: Option<String>,
    /// `Priority` header
    pub priority: Option<Priority>,
    /// `Tags` header, replaced as a whole by each source that sets it
    pub tags: Vec<String>,
    /// `Title` header
    pub title: Option<String>,
    /// Timestamp pattern
    pub timestamp: Option<String>,
    /// Whether the timestamp pattern is applied to the message
    pub include_timestamp: bool,
    /// HTTP request timeout (none by default)
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topic: None,
            server: defaults::SERVER.to_string(),
            user: None,
            password: None,
            token: None,
            actions: None,
            attach: None,
            click: None,
            delay: None,
            email: None,
            priority: None,
            tags: Vec::new(),
            title: None,
            timestamp: None,
            include_timestamp: false,
            timeout: None,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auth = match (&self.user, &self.token) {
            (Some(_), _) => "basic",
            (None, Some(_)) => "bearer",
            (None, None) => "none",
        };

        write!(
            f,
            "Config {{ server: {}, topic: {}, priority: {}, tags: [{}], timestamp: {}, auth: {} }}",
            self.server,
            self.topic.as_deref().unwrap_or("<unset>"),
            self.priority.map_or("<unset>", Priority::as_str),
            self.tags.join(","),
            if self.include_timestamp {
                self.timestamp.as_deref().unwrap_or("")
            } else {
                "off"
            },
            auth,
        )
    }
}

impl Config {
    /// Merges `source` into this config.
    ///
    /// Keys the source does not define leave the current values untouched;
    /// keys this config does not recognize are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first field whose
    /// value has the wrong type or is outside its allowed choices. On error
    /// the config is left unchanged.
    pub fn update(&mut self, source: &dyn ConfigSource) -> Result<(), ConfigError> {
        *self = self.merged(source)?;
        Ok(())
    }

    /// Returns a new config made of this one overridden by `source`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::update`].
    pub fn merged(&self, source: &dyn ConfigSource) -> Result<Self, ConfigError> {
        let mut next = self.clone();

        merge_string(source, field::TOPIC, &mut next.topic)?;
        if let Some(value) = source.get(field::SERVER) {
            next.server = expect_string(field::SERVER, value)?;
        }
        merge_string(source, field::USER, &mut next.user)?;
        merge_string(source, field::PASSWORD, &mut next.password)?;
        merge_string(source, field::TOKEN, &mut next.token)?;
        merge_string(source, field::ACTIONS, &mut next.actions)?;
        merge_string(source, field::ATTACH, &mut next.attach)?;
        merge_string(source, field::CLICK, &mut next.click)?;
        merge_string(source, field::DELAY, &mut next.delay)?;
        merge_string(source, field::EMAIL, &mut next.email)?;
        if let Some(value) = source.get(field::PRIORITY) {
            next.priority = Some(parse_priority(value)?);
        }
        if let Some(value) = source.get(field::TAGS) {
            next.tags = normalize_tags(value)?;
        }
        merge_string(source, field::TITLE, &mut next.title)?;
        if let Some(value) = source.get(field::INCLUDE_TIMESTAMP) {
            next.include_timestamp = match value {
                Value::Boolean(flag) => flag,
                other => return Err(ConfigError::invalid(field::INCLUDE_TIMESTAMP, &other)),
            };
        }
        if let Some(value) = source.get(field::TIMESTAMP) {
            let pattern = expect_string(field::TIMESTAMP, value)?;
            if !pattern.is_empty() {
                next.include_timestamp = true;
            }
            next.timestamp = Some(pattern);
        }
        if let Some(value) = source.get(field::TIMEOUT) {
            next.timeout = Some(parse_timeout(value)?);
        }

        Ok(next)
    }

    /// Reads a field by name, rendered as a string.
    ///
    /// Returns `default` when the field is unset or the name is unknown.
    #[must_use]
    pub fn get(&self, key: &str, default: Option<String>) -> Option<String> {
        let value = match key {
            field::TOPIC => self.topic.clone(),
            field::SERVER => Some(self.server.clone()),
            field::USER => self.user.clone(),
            field::PASSWORD => self.password.clone(),
            field::TOKEN => self.token.clone(),
            field::ACTIONS => self.actions.clone(),
            field::ATTACH => self.attach.clone(),
            field::CLICK => self.click.clone(),
            field::DELAY => self.delay.clone(),
            field::EMAIL => self.email.clone(),
            field::PRIORITY => self.priority.map(|p| p.as_str().to_string()),
            field::TAGS if !self.tags.is_empty() => Some(self.tags.join(",")),
            field::TITLE => self.title.clone(),
            field::TIMESTAMP => self.timestamp.clone(),
            field::INCLUDE_TIMESTAMP => Some(self.include_timestamp.to_string()),
            field::TIMEOUT => self.timeout.map(|t| t.as_secs().to_string()),
            _ => None,
        };
        value.or(default)
    }

    /// Merges every config file from `paths`.
    ///
    /// Paths are listed highest precedence first, so they are applied in
    /// reverse: a file earlier in the list overrides the files after it.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is not UTF-8 or not valid TOML, lacks the tool's section,
    /// or holds an invalid value. Missing or unreadable files are skipped.
    pub fn merge_files<P: AsRef<std::path::Path>>(
        &mut self,
        paths: &[P],
    ) -> Result<(), ConfigError> {
        for path in paths.iter().rev() {
            let source = SourceInput::from(path.as_ref().to_path_buf()).into_source()?;
            self.update(&*source)?;
        }
        Ok(())
    }

    /// Merges the well-known config file locations.
    ///
    /// See [`config_paths`] for how the list is built.
    ///
    /// # Errors
    ///
    /// Same as [`Config::merge_files`].
    pub fn search(&mut self) -> Result<(), ConfigError> {
        let paths = config_paths(system_env, dirs::home_dir());
        tracing::debug!("Searching config files: {paths:?}");
        self.merge_files(&paths)
    }

    /// Resolves the full configuration for one invocation.
    ///
    /// Lowest precedence first: built-in defaults, well-known config files,
    /// files given with `--config`, then explicit CLI values.
    ///
    /// # Errors
    ///
    /// Returns an error if any source is invalid or no topic was given.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.search()?;
        config.resolve(cli)?;
        Ok(config)
    }

    /// Applies the explicit config files and CLI values on top of this config.
    ///
    /// # Errors
    ///
    /// Returns an error if any source is invalid or no topic was given.
    pub fn resolve(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        self.merge_files(&cli.configs)?;
        let args = SourceInput::from(cli).into_source()?;
        self.update(&*args)?;
        self.require_topic()?;
        Ok(())
    }

    /// Returns the topic, which must be set and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] for a missing or empty topic.
    pub fn require_topic(&self) -> Result<&str, ConfigError> {
        self.topic
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ConfigError::missing(field::TOPIC, "Use --topic or set topic in a config file")
            })
    }
}

// Helper functions

fn merge_string(
    source: &dyn ConfigSource,
    name: &'static str,
    slot: &mut Option<String>,
) -> Result<(), ConfigError> {
    if let Some(value) = source.get(name) {
        *slot = Some(expect_string(name, value)?);
    }
    Ok(())
}

fn expect_string(name: &'static str, value: Value) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ConfigError::invalid(name, &other)),
    }
}

fn parse_priority(value: Value) -> Result<Priority, ConfigError> {
    match &value {
        Value::String(s) => s
            .parse()
            .map_err(|_| ConfigError::invalid(field::PRIORITY, &value)),
        _ => Err(ConfigError::invalid(field::PRIORITY, &value)),
    }
}

fn parse_timeout(value: Value) -> Result<Duration, ConfigError> {
    match value {
        Value::Integer(secs) if secs > 0 => Ok(Duration::from_secs(secs.unsigned_abs())),
        other => Err(ConfigError::invalid(field::TIMEOUT, &other)),
    }
}

/// Normalizes a `tags` value into a list of strings.
///
/// A single string becomes a one-element list (an empty string clears the
/// tags) and an integer becomes its decimal form. Inside a list, empty
/// strings and non-scalar elements are rejected.
fn normalize_tags(value: Value) -> Result<Vec<String>, ConfigError> {
    match value {
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s]),
        Value::Integer(n) => Ok(vec![n.to_string()]),
        Value::Array(items) => {
            let mut tags = Vec::with_capacity(items.len());
            for item in &items {
                match item {
                    Value::String(s) if !s.is_empty() => tags.push(s.clone()),
                    Value::Integer(n) => tags.push(n.to_string()),
                    _ => {
                        return Err(ConfigError::invalid(
                            field::TAGS,
                            &Value::Array(items.clone()),
                        ));
                    }
                }
            }
            Ok(tags)
        }
        other => Err(ConfigError::invalid(field::TAGS, &other)),
    }
}
