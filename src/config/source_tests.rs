//! Tests for config source adapters.

use std::path::Path;

use tempfile::tempdir;
use toml::{Table, Value};

use super::ConfigError;
use super::cli::Cli;
use super::source::{ArgsSource, ConfigSource, FileSource, MapSource, SourceInput};

fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["ntfy-pub"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

mod map_source {
    use super::*;

    #[test]
    fn get_and_contains() {
        let source: MapSource = [("title", "test")].into_iter().collect();

        assert!(source.contains("title"));
        assert!(!source.contains("topic"));
        assert_eq!(source.get("title"), Some(Value::from("test")));
        assert_eq!(source.get("topic"), None);
    }

    #[test]
    fn get_or_falls_back_to_default() {
        let source = MapSource::default();

        assert_eq!(source.get_or("topic", Value::from(1)), Value::from(1));
    }

    #[test]
    fn parse_reads_top_level_keys() {
        let source = MapSource::parse("title = \"test\"\ntags = [\"a\", \"b\"]").unwrap();

        assert_eq!(source.get("title"), Some(Value::from("test")));
        assert_eq!(source.get("tags"), Some(Value::from(vec!["a", "b"])));
    }
}

mod args_source {
    use super::*;

    #[test]
    fn given_flags_are_present() {
        let cli = cli(&["--topic", "alerts", "--priority", "5", "--tags", "a", "b"]);
        let source = ArgsSource::new(&cli);

        assert_eq!(source.get("topic"), Some(Value::from("alerts")));
        assert_eq!(source.get("priority"), Some(Value::from("5")));
        assert_eq!(source.get("tags"), Some(Value::from(vec!["a", "b"])));
    }

    #[test]
    fn missing_flags_are_absent() {
        let cli = cli(&["--topic", "alerts"]);
        let source = ArgsSource::new(&cli);

        assert!(!source.contains("server"));
        assert!(!source.contains("priority"));
        assert!(!source.contains("tags"));
        assert!(!source.contains("timestamp"));
        assert_eq!(source.get_or("server", Value::from("x")), Value::from("x"));
    }

    #[test]
    fn non_config_flags_are_absent() {
        let cli = cli(&["--message", "hello", "--log-level", "debug"]);
        let source = ArgsSource::new(&cli);

        assert!(!source.contains("message"));
        assert!(!source.contains("log_level"));
    }

    #[test]
    fn timeout_is_an_integer() {
        let cli = cli(&["--timeout", "30"]);
        let source = ArgsSource::new(&cli);

        assert_eq!(source.get("timeout"), Some(Value::Integer(30)));
    }
}

mod file_source {
    use super::*;

    #[test]
    fn load_reads_tool_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ntfy-pub]\ntitle = \"test\"\n").unwrap();

        let source = FileSource::load(&path).unwrap();

        assert_eq!(source.get("title"), Some(Value::from("test")));
        assert_eq!(source.path(), path.as_path());
    }

    #[test]
    fn other_sections_are_ignored() {
        let source = FileSource::parse(
            Path::new("config.toml"),
            "[other]\ntopic = \"nope\"\n[ntfy-pub]\ntitle = \"test\"\n",
        )
        .unwrap();

        assert!(!source.contains("topic"));
        assert!(source.contains("title"));
    }

    #[test]
    fn missing_section_is_an_error() {
        let result = FileSource::parse(Path::new("config.toml"), "[bad_section]\ntitle = \"test\"");

        assert!(matches!(
            result,
            Err(ConfigError::MissingSection {
                section: "ntfy-pub",
                ..
            })
        ));
    }

    #[test]
    fn section_must_be_a_table() {
        let result = FileSource::parse(Path::new("config.toml"), "ntfy-pub = \"oops\"");

        assert!(matches!(result, Err(ConfigError::MissingSection { .. })));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let result = FileSource::parse(Path::new("config.toml"), "[ntfy-pub\ntitle =");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn nonexistent_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let source = FileSource::load(&path).unwrap();

        assert!(source.is_empty());
    }

    #[test]
    fn non_utf8_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            b"[ntfy-pub]\ntopic = \"alerts\"\ntitle = \"caf\xE9\"\npriority = \"max\"\n",
        )
        .unwrap();

        let result = FileSource::load(&path);

        assert!(matches!(
            result,
            Err(ConfigError::FileRead { path: p, .. }) if p == path
        ));
    }

    #[test]
    fn unreadable_file_is_empty() {
        // A directory cannot be read as a file, regardless of privileges.
        let dir = tempdir().unwrap();

        let source = FileSource::load(dir.path()).unwrap();

        assert!(source.is_empty());
    }
}

mod source_input {
    use super::*;

    #[test]
    fn table_becomes_map_source() {
        let mut table = Table::new();
        table.insert("title".to_string(), Value::from("test"));

        let source = SourceInput::from(table).into_source().unwrap();

        assert_eq!(source.get("title"), Some(Value::from("test")));
    }

    #[test]
    fn cli_becomes_args_source() {
        let cli = cli(&["--title", "from cli"]);

        let source = SourceInput::from(&cli).into_source().unwrap();

        assert_eq!(source.get("title"), Some(Value::from("from cli")));
    }

    #[test]
    fn string_value_is_a_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ntfy-pub]\ntitle = \"test\"\n").unwrap();

        let input = SourceInput::try_from(Value::from(path.to_string_lossy().into_owned())).unwrap();
        let source = input.into_source().unwrap();

        assert_eq!(source.get("title"), Some(Value::from("test")));
    }

    #[test]
    fn path_without_section_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bad_section]\ntitle = \"test\"\n").unwrap();

        let result = SourceInput::from(path).into_source();

        assert!(matches!(result, Err(ConfigError::MissingSection { .. })));
    }

    #[test]
    fn other_values_are_rejected() {
        let result = SourceInput::try_from(Value::Integer(3));

        assert!(matches!(result, Err(ConfigError::UnknownSource(v)) if v == "3"));
    }
}
