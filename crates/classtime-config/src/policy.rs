//! Validated policy structures

use crate::schema::{RawConfig, RawServiceConfig};
use crate::validation::resolve_reminder;
use classtime_api::{Locale, TriggerSet};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Default countdown refresh cadence
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Validated policy ready for use by the countdown engine
#[derive(Debug, Clone)]
pub struct Policy {
    /// Service configuration
    pub service: ServiceConfig,

    /// Reminder offsets, longest lead time first
    pub reminders: TriggerSet,
}

impl Policy {
    /// Convert from raw config. Callers validate first; anything that
    /// still fails to resolve is logged and dropped.
    pub(crate) fn from_raw(raw: RawConfig) -> Self {
        let reminders = match raw.reminders {
            Some(list) => {
                let offsets = list
                    .iter()
                    .filter_map(|r| match resolve_reminder(r) {
                        Ok(offset) => Some(offset),
                        Err(message) => {
                            warn!(reminder = %r.name, error = %message, "Dropping invalid reminder");
                            None
                        }
                    })
                    .collect();
                TriggerSet::new(offsets).unwrap_or_else(|e| {
                    warn!(error = %e, "Invalid reminder list, using standard reminders");
                    TriggerSet::standard()
                })
            }
            None => TriggerSet::standard(),
        };

        Self {
            service: ServiceConfig::from_raw(raw.service),
            reminders,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            reminders: TriggerSet::standard(),
        }
    }
}

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub locale: Locale,
    pub tick_interval: Duration,
    pub sessions_file: Option<PathBuf>,
}

impl ServiceConfig {
    fn from_raw(raw: RawServiceConfig) -> Self {
        Self {
            locale: raw
                .locale
                .and_then(|l| l.parse().ok())
                .unwrap_or_default(),
            tick_interval: raw
                .tick_millis
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TICK),
            sessions_file: raw.sessions_file,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            tick_interval: DEFAULT_TICK,
            sessions_file: None,
        }
    }
}
