//! Configuration parsing and validation for classtime
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Display locale and refresh cadence
//! - Reminder offsets before session start
//! - Validation with clear error messages

mod policy;
mod schema;
mod validation;

pub use policy::*;
pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate configuration from a TOML file.
///
/// A relative `sessions_file` is resolved against the config file's directory.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Policy> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let mut policy = parse_config(&content)?;

    if let Some(sessions) = &policy.service.sessions_file
        && sessions.is_relative()
        && let Some(dir) = path.parent()
    {
        policy.service.sessions_file = Some(dir.join(sessions));
    }

    tracing::debug!(
        path = %path.display(),
        reminder_count = policy.reminders.len(),
        locale = %policy.service.locale,
        "Config loaded"
    );

    Ok(policy)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Policy> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Policy::from_raw(raw))
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use classtime_api::Locale;
    use std::io::Write;

    #[test]
    fn parse_minimal_config() {
        let policy = parse_config("config_version = 1").unwrap();
        assert_eq!(policy.reminders.len(), 3);
        assert_eq!(policy.service.locale, Locale::En);
    }

    #[test]
    fn reject_wrong_version() {
        let result = parse_config("config_version = 99");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_reminders() {
        let config = r#"
            config_version = 1

            [[reminders]]
            name = "15min"

            [[reminders]]
            name = "1h"
        "#;

        match parse_config(config) {
            Err(ConfigError::ValidationFailed { errors }) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn load_resolves_sessions_file_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "config_version = 1\n\n[service]\nsessions_file = \"sessions.toml\""
        )
        .unwrap();

        let policy = load_config(&path).unwrap();
        assert_eq!(
            policy.service.sessions_file,
            Some(dir.path().join("sessions.toml"))
        );
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
