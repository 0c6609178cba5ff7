//! Uniform lookup over heterogeneous configuration inputs.
//!
//! Three adapters implement [`ConfigSource`]:
//! - [`MapSource`] wraps an in-memory key/value table
//! - [`ArgsSource`] exposes the parsed [`Cli`], where only flags that were
//!   actually given are present
//! - [`FileSource`] holds the tool's section of a TOML config file
//!
//! [`SourceInput`] picks the adapter from the kind of input at construction time.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::settings::Priority;

/// Read-only key lookup used by [`Config::update`](super::Config::update).
pub trait ConfigSource {
    /// Returns the value for `key`, or `None` if the source does not define it.
    fn get(&self, key: &str) -> Option<Value>;

    /// Returns the value for `key`, falling back to `default`.
    fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Returns true if the source defines `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory mapping source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSource {
    table: Table,
}

impl MapSource {
    /// Creates a source over `table`.
    #[must_use]
    pub const fn new(table: Table) -> Self {
        Self { table }
    }

    /// Parses a TOML document whose top-level keys are the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(toml::from_str::<Table>(content)?))
    }

    /// Returns true if the source defines no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<Value> {
        self.table.get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }
}

/// Adapter exposing parsed CLI arguments as a source.
///
/// Flags that were not given (and the empty tag list) are absent, so they
/// fall through to lower-precedence sources.
#[derive(Debug, Clone, Copy)]
pub struct ArgsSource<'a> {
    cli: &'a Cli,
}

impl<'a> ArgsSource<'a> {
    /// Wraps the parsed arguments.
    #[must_use]
    pub const fn new(cli: &'a Cli) -> Self {
        Self { cli }
    }
}

impl ConfigSource for ArgsSource<'_> {
    fn get(&self, key: &str) -> Option<Value> {
        let cli = self.cli;
        let text = |v: &Option<String>| v.clone().map(Value::String);

        match key {
            field::TOPIC => text(&cli.topic),
            field::SERVER => text(&cli.server),
            field::USER => text(&cli.user),
            field::PASSWORD => text(&cli.password),
            field::TOKEN => text(&cli.token),
            field::ACTIONS => text(&cli.actions),
            field::ATTACH => text(&cli.attach),
            field::CLICK => text(&cli.click),
            field::DELAY => text(&cli.delay),
            field::EMAIL => text(&cli.email),
            field::PRIORITY => cli
                .priority
                .map(|p| Value::String(Priority::from(p).as_str().to_string())),
            field::TAGS if !cli.tags.is_empty() => Some(Value::Array(
                cli.tags.iter().cloned().map(Value::String).collect(),
            )),
            field::TITLE => text(&cli.title),
            field::TIMESTAMP => text(&cli.timestamp),
            field::TIMEOUT => cli
                .timeout
                .map(|secs| Value::Integer(i64::try_from(secs).unwrap_or(i64::MAX))),
            _ => None,
        }
    }
}

/// The tool's section of a config file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSource {
    path: PathBuf,
    section: Table,
}

impl FileSource {
    /// Loads the config file at `path`.
    ///
    /// A file that does not exist or cannot be read yields an empty source
    /// and a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file is not valid UTF-8, and
    /// an error if it is not valid TOML or has no section for this tool.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(path, &content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("The config source '{}' does not exist", path.display());
                Ok(Self::empty(path))
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(ConfigError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }),
            Err(e) => {
                tracing::warn!(
                    "Failed to read config source '{}': {e}",
                    absolute(path).display()
                );
                Ok(Self::empty(path))
            }
        }
    }

    /// Parses config file `content` read from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid TOML or has no
    /// section for this tool.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let mut document = toml::from_str::<Table>(content)?;

        match document.remove(defaults::NAMESPACE) {
            Some(Value::Table(section)) => Ok(Self {
                path: path.to_path_buf(),
                section,
            }),
            _ => Err(ConfigError::MissingSection {
                path: path.to_path_buf(),
                section: defaults::NAMESPACE,
            }),
        }
    }

    fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            section: Table::new(),
        }
    }

    /// Returns the path this source was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the source defines no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.section.is_empty()
    }
}

impl ConfigSource for FileSource {
    fn get(&self, key: &str) -> Option<Value> {
        self.section.get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.section.contains_key(key)
    }
}

/// An input that can be turned into a [`ConfigSource`].
#[derive(Debug)]
pub enum SourceInput<'a> {
    /// Key/value table used as-is
    Map(Table),
    /// Parsed command-line arguments
    Args(&'a Cli),
    /// Path to a config file
    Path(PathBuf),
}

impl<'a> SourceInput<'a> {
    /// Builds the matching adapter.
    ///
    /// # Errors
    ///
    /// For [`SourceInput::Path`], the errors of [`FileSource::load`].
    pub fn into_source(self) -> Result<Box<dyn ConfigSource + 'a>, ConfigError> {
        let source: Box<dyn ConfigSource + 'a> = match self {
            Self::Map(table) => Box::new(MapSource::new(table)),
            Self::Args(cli) => Box::new(ArgsSource::new(cli)),
            Self::Path(path) => Box::new(FileSource::load(&path)?),
        };
        Ok(source)
    }
}

impl TryFrom<Value> for SourceInput<'_> {
    type Error = ConfigError;

    /// A table is a mapping and a string is a file path; anything else is rejected.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Table(table) => Ok(Self::Map(table)),
            Value::String(path) => Ok(Self::Path(PathBuf::from(path))),
            other => Err(ConfigError::UnknownSource(other.to_string())),
        }
    }
}

impl<'a> From<&'a Cli> for SourceInput<'a> {
    fn from(cli: &'a Cli) -> Self {
        Self::Args(cli)
    }
}

impl From<PathBuf> for SourceInput<'_> {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Table> for SourceInput<'_> {
    fn from(table: Table) -> Self {
        Self::Map(table)
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
