//! Configuration layer for NTFY-PUB.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`])
//! - Uniform config sources ([`ConfigSource`], [`MapSource`], [`ArgsSource`], [`FileSource`])
//! - The resolved settings and their merge rules ([`Config`])
//! - Well-known config file locations ([`config_paths`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **`--config` files** - The first file listed overrides the ones after it
//! 3. **Well-known files** - `NTFY_PUB_CONFIGS`, or the system, local, and user files,
//!    again with the first listed winning
//! 4. **Built-in defaults** - Hardcoded default values
//!
//! # Config File Format
//!
//! Config files are TOML. Settings live in the `[ntfy-pub]` table; other
//! tables and unknown keys are ignored.
//!
//! ```toml
//! [ntfy-pub]
//! server = "https://ntfy.example.com"
//! topic = "alerts"
//! priority = "high"
//! tags = ["warning", "backup"]
//! timestamp = "%H:%M %message"
//! ```
//!
//! # Tags
//!
//! `tags` is replaced as a whole: a source that sets it discards the tags of
//! every lower-precedence source, it never appends to them.

mod cli;
pub mod defaults;
mod error;
mod paths;
mod settings;
mod source;

#[cfg(test)]
mod source_tests;

pub use cli::{Cli, LogLevelArg, PriorityArg};
pub use error::{ConfigError, field};
pub use paths::{config_paths, system_env};
pub use settings::{Config, Priority, UnknownPriority};
pub use source::{ArgsSource, ConfigSource, FileSource, MapSource, SourceInput};
