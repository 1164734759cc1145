//! Error types for classtime

use thiserror::Error;

/// Core error type for classtime operations
#[derive(Debug, Error)]
pub enum ClasstimeError {
    #[error("Invalid date '{value}': {message}")]
    InvalidDate { value: String, message: String },

    #[error("Invalid time '{value}': {message}")]
    InvalidTime { value: String, message: String },

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid reminder offset '{value}': {message}")]
    InvalidOffset { value: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ClasstimeError {
    pub fn date(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn time(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTime {
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn duration(msg: impl Into<String>) -> Self {
        Self::InvalidDuration(msg.into())
    }

    pub fn offset(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOffset {
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ClasstimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ClasstimeError::date("2025-13-40", "month out of range");
        assert_eq!(
            err.to_string(),
            "Invalid date '2025-13-40': month out of range"
        );

        let err = ClasstimeError::duration("must be greater than zero");
        assert_eq!(err.to_string(), "Invalid duration: must be greater than zero");
    }
}
