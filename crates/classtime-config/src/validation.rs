//! Configuration validation

use crate::schema::{RawConfig, RawReminder};
use classtime_api::{Locale, TriggerOffset};
use std::collections::HashSet;
use thiserror::Error;

/// Longest accepted tick interval
pub const MAX_TICK_MILLIS: u64 = 60_000;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Reminder '{name}': {message}")]
    ReminderError { name: String, message: String },

    #[error("Duplicate reminder name: {0}")]
    DuplicateReminder(String),

    #[error("Reminder '{name}' ({seconds}s) must be shorter than preceding '{previous}' ({previous_seconds}s)")]
    RemindersNotDecreasing {
        name: String,
        seconds: u64,
        previous: String,
        previous_seconds: u64,
    },

    #[error("Unknown locale '{0}', expected 'ar' or 'en'")]
    InvalidLocale(String),

    #[error("tick_millis must be between 1 and 60000, got {0}")]
    InvalidTick(u64),
}

/// Validate a raw configuration, collecting every problem found
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(locale) = &config.service.locale
        && locale.parse::<Locale>().is_err()
    {
        errors.push(ValidationError::InvalidLocale(locale.clone()));
    }

    if let Some(tick) = config.service.tick_millis
        && (tick == 0 || tick > MAX_TICK_MILLIS)
    {
        errors.push(ValidationError::InvalidTick(tick));
    }

    if let Some(reminders) = &config.reminders {
        errors.extend(validate_reminders(reminders));
    }

    errors
}

fn validate_reminders(reminders: &[RawReminder]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for reminder in reminders {
        if !seen.insert(reminder.name.as_str()) {
            errors.push(ValidationError::DuplicateReminder(reminder.name.clone()));
        }
    }

    let mut previous: Option<(&str, u64)> = None;
    for reminder in reminders {
        let duration_ms = match resolve_reminder(reminder) {
            Ok(offset) => offset.duration_ms,
            Err(message) => {
                errors.push(ValidationError::ReminderError {
                    name: reminder.name.clone(),
                    message,
                });
                continue;
            }
        };

        if let Some((prev_name, prev_ms)) = previous
            && duration_ms >= prev_ms
        {
            errors.push(ValidationError::RemindersNotDecreasing {
                name: reminder.name.clone(),
                seconds: duration_ms / 1000,
                previous: prev_name.to_string(),
                previous_seconds: prev_ms / 1000,
            });
        }
        previous = Some((reminder.name.as_str(), duration_ms));
    }

    errors
}

/// Turn a raw reminder into an offset: explicit seconds win, otherwise the
/// name itself must describe the lead time.
pub fn resolve_reminder(raw: &RawReminder) -> Result<TriggerOffset, String> {
    if raw.name.trim().is_empty() {
        return Err("name cannot be empty".into());
    }

    match raw.seconds_before {
        Some(0) => Err("seconds_before must be greater than zero".into()),
        Some(secs) => {
            let ms = secs
                .checked_mul(1000)
                .ok_or_else(|| "seconds_before is too large".to_string())?;
            TriggerOffset::new(raw.name.clone(), ms).map_err(|e| e.to_string())
        }
        None => TriggerOffset::parse(&raw.name).map_err(|e| e.to_string()),
    }
}
