//! Default values for configuration options.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Default ntfy server base URL.
pub const SERVER: &str = "https://ntfy.sh";

/// Default timestamp pattern used when `--timestamp` is given without a value.
pub const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Placeholder inside a timestamp pattern that is replaced by the message.
pub const MESSAGE_PLACEHOLDER: &str = "%message";

/// Message argument meaning "read the body from standard input".
pub const STDIN_SENTINEL: &str = "-";

/// Name of the config file section holding this tool's settings.
pub const NAMESPACE: &str = "ntfy-pub";

/// Environment variable holding a colon-separated list of config files.
pub const CONFIGS_ENV: &str = "NTFY_PUB_CONFIGS";

/// File name of the config file inside each well-known directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// System-wide config file.
pub const SYSTEM_CONFIG: &str = "/etc/ntfy-pub/config.toml";

/// Local-installation config file.
pub const LOCAL_CONFIG: &str = "/usr/local/etc/ntfy-pub/config.toml";
