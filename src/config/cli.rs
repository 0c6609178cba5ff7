//! CLI argument parsing using clap.
//!
//! Defines the command-line interface. The parsed [`Cli`] doubles as a
//! configuration source: see [`ArgsSource`](super::ArgsSource).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

use super::defaults;
use super::settings::Priority;

/// NTFY-PUB: send a notification to an ntfy topic.
///
/// Values given on the command line override values from config files,
/// which override built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "ntfy-pub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Action buttons (see <https://ntfy.sh/docs/publish/>)
    #[arg(short = 'A', long)]
    pub actions: Option<String>,

    /// URL of a file to attach
    #[arg(short = 'X', long)]
    pub attach: Option<String>,

    /// URL opened when the notification is clicked
    #[arg(short = 'C', long)]
    pub click: Option<String>,

    /// Delivery delay (e.g. "30m", "tomorrow, 10am")
    #[arg(short = 'D', long)]
    pub delay: Option<String>,

    /// Also forward the notification to this e-mail address
    #[arg(short = 'E', long)]
    pub email: Option<String>,

    /// Message priority
    #[arg(short = 'P', long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Tags (one or more values; replaces tags from config files)
    #[arg(short = 'G', long, num_args = 1.., value_name = "TAG")]
    pub tags: Vec<String>,

    /// Message title
    #[arg(short = 'T', long)]
    pub title: Option<String>,

    /// Message body; "-" reads from standard input
    #[arg(short, long, default_value = defaults::STDIN_SENTINEL)]
    pub message: String,

    /// Time format prefixed to the message (strftime syntax, "%message" embeds the body)
    #[arg(
        long,
        value_name = "FORMAT",
        num_args = 0..=1,
        default_missing_value = defaults::TIMESTAMP
    )]
    pub timestamp: Option<String>,

    /// Topic to publish to (required here or in a config file)
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Server base URL
    #[arg(short, long)]
    pub server: Option<String>,

    /// User for basic authentication
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password for basic authentication
    #[arg(short, long)]
    pub password: Option<String>,

    /// Access token for bearer authentication
    #[arg(long)]
    pub token: Option<String>,

    /// Config file; may be repeated, earlier files override later ones
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub configs: Vec<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log level
    #[arg(long = "log-level", value_enum, default_value_t = LogLevelArg::Error)]
    pub log_level: LogLevelArg,
}

/// Priority argument for CLI parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    /// Highest priority
    Max,
    /// Alias of max
    Urgent,
    /// High priority
    High,
    /// Server default
    Default,
    /// Low priority
    Low,
    /// Lowest priority
    Min,
    /// Numeric 1 (min)
    #[value(name = "1")]
    One,
    /// Numeric 2 (low)
    #[value(name = "2")]
    Two,
    /// Numeric 3 (default)
    #[value(name = "3")]
    Three,
    /// Numeric 4 (high)
    #[value(name = "4")]
    Four,
    /// Numeric 5 (max)
    #[value(name = "5")]
    Five,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Max => Self::Max,
            PriorityArg::Urgent => Self::Urgent,
            PriorityArg::High => Self::High,
            PriorityArg::Default => Self::Default,
            PriorityArg::Low => Self::Low,
            PriorityArg::Min => Self::Min,
            PriorityArg::One => Self::One,
            PriorityArg::Two => Self::Two,
            PriorityArg::Three => Self::Three,
            PriorityArg::Four => Self::Four,
            PriorityArg::Five => Self::Five,
        }
    }
}

/// Log level argument for CLI parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    /// Everything, including sent headers and body
    Debug,
    /// Informational messages
    Info,
    /// Warnings such as unreadable config files
    Warning,
    /// Errors only
    Error,
    /// Errors only (same as error)
    Critical,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Warning => Self::WARN,
            LogLevelArg::Error | LogLevelArg::Critical => Self::ERROR,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning clap's error instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown flags or invalid choices.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }
}
