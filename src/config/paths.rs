//! Well-known config file locations.

use std::path::PathBuf;

use super::defaults;

/// Returns the config files to merge, highest precedence first.
///
/// If the [`CONFIGS_ENV`](defaults::CONFIGS_ENV) variable is set it supplies
/// the whole list (colon-separated). Otherwise the list is the system-wide
/// file, the local-installation file, then the user file under
/// `$XDG_CONFIG_HOME` or, failing that, `~/.config`.
///
/// `env` looks up environment variables and `home` is the user's home
/// directory; both are parameters so the resolution can be tested.
pub fn config_paths<F>(env: F, home: Option<PathBuf>) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(list) = env(defaults::CONFIGS_ENV).filter(|v| !v.is_empty()) {
        return list
            .split(':')
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect();
    }

    let mut paths = vec![
        PathBuf::from(defaults::SYSTEM_CONFIG),
        PathBuf::from(defaults::LOCAL_CONFIG),
    ];

    let user_dir = env("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| h.join(".config")));

    if let Some(dir) = user_dir {
        paths.push(
            dir.join(defaults::NAMESPACE)
                .join(defaults::CONFIG_FILE_NAME),
        );
    }

    paths
}

/// Looks up a variable in the process environment.
pub fn system_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
