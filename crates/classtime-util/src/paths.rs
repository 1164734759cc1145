//! Default paths for classtime components
//!
//! - Config: `$XDG_CONFIG_HOME/classtime/config.toml` or `~/.config/classtime/config.toml`
//! - Sessions: `sessions.toml` next to the config file

use std::path::PathBuf;

/// Environment variable for overriding the config path
pub const CLASSTIME_CONFIG_ENV: &str = "CLASSTIME_CONFIG";

const APP_DIR: &str = "classtime";
const CONFIG_FILENAME: &str = "config.toml";
const SESSIONS_FILENAME: &str = "sessions.toml";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$CLASSTIME_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/classtime/config.toml`
/// 3. `~/.config/classtime/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CLASSTIME_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_dir().join(CONFIG_FILENAME)
}

/// Get the default sessions file path (alongside the config).
pub fn default_sessions_path() -> PathBuf {
    config_dir().join(SESSIONS_FILENAME)
}

/// Get the classtime config directory.
pub fn config_dir() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config").join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR)
}
