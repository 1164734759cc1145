//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Global service settings
    #[serde(default)]
    pub service: RawServiceConfig,

    /// Reminder points before session start. Omitted means the standard
    /// 24h / 1h / 15min set.
    #[serde(default)]
    pub reminders: Option<Vec<RawReminder>>,
}

/// Service-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// Display locale: "ar" or "en"
    pub locale: Option<String>,

    /// Countdown refresh cadence in milliseconds (default: 1000)
    pub tick_millis: Option<u64>,

    /// Session list to load, relative to the config file
    pub sessions_file: Option<PathBuf>,
}

/// Reminder offset
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawReminder {
    /// Offset name, e.g. "24h". Parsed as the duration when
    /// `seconds_before` is absent.
    pub name: String,

    /// Explicit lead time in seconds
    pub seconds_before: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            config_version = 1

            [service]
            locale = "ar"
            tick_millis = 500
            sessions_file = "sessions.toml"

            [[reminders]]
            name = "24h"

            [[reminders]]
            name = "before-class"
            seconds_before = 600
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.service.locale.as_deref(), Some("ar"));
        assert_eq!(config.service.tick_millis, Some(500));

        let reminders = config.reminders.unwrap();
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].name, "24h");
        assert!(reminders[0].seconds_before.is_none());
        assert_eq!(reminders[1].seconds_before, Some(600));
    }

    #[test]
    fn service_section_is_optional() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.service.locale.is_none());
        assert!(config.reminders.is_none());
    }
}
