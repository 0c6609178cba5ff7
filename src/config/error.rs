//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from reading sources, type and choice validation,
/// and conflicting or incomplete settings detected before sending.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file that must be read.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The config file has no section for this tool.
    #[error("Invalid config source '{}': missing [{section}] section", path.display())]
    MissingSection {
        /// Path to the config file
        path: PathBuf,
        /// The expected section name
        section: &'static str,
    },

    /// A value that cannot be turned into a config source.
    #[error("Unknown source type: {0}")]
    UnknownSource(String),

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// A field was given a value of the wrong type or outside its choices.
    #[error("Invalid value for `{field}`: {value}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// The rejected value, rendered for display
        value: String,
    },

    /// Invalid server URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A config value cannot be sent as an HTTP header.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Only one half of the basic-auth pair was supplied.
    #[error("Either user or password was specified but not both")]
    PartialCredentials,

    /// Basic credentials and a bearer token were both supplied.
    #[error("Both basic and bearer auth specified")]
    ConflictingAuth,

    /// The timestamp pattern contains a directive that cannot be formatted.
    #[error("Invalid timestamp format '{0}'")]
    InvalidTimestampFormat(String),
}

/// Well-known field names used in error variants.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The destination topic.
    pub const TOPIC: &str = "topic";
    /// The server base URL.
    pub const SERVER: &str = "server";
    /// The basic-auth user.
    pub const USER: &str = "user";
    /// The basic-auth password.
    pub const PASSWORD: &str = "password";
    /// The bearer token.
    pub const TOKEN: &str = "token";
    /// The `Actions` header.
    pub const ACTIONS: &str = "actions";
    /// The `Attach` header.
    pub const ATTACH: &str = "attach";
    /// The `Click` header.
    pub const CLICK: &str = "click";
    /// The `Delay` header.
    pub const DELAY: &str = "delay";
    /// The `Email` header.
    pub const EMAIL: &str = "email";
    /// The `Priority` header.
    pub const PRIORITY: &str = "priority";
    /// The `Tags` header.
    pub const TAGS: &str = "tags";
    /// The `Title` header.
    pub const TITLE: &str = "title";
    /// The timestamp pattern.
    pub const TIMESTAMP: &str = "timestamp";
    /// Whether timestamp injection is active.
    pub const INCLUDE_TIMESTAMP: &str = "include_timestamp";
    /// The HTTP timeout in seconds.
    pub const TIMEOUT: &str = "timeout";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }

    /// Creates an `InvalidValue` error, rendering the value for display.
    #[must_use]
    pub fn invalid(field: &'static str, value: &toml::Value) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}
