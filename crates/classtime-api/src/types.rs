//! Shared value types for classtime

use classtime_util::ClasstimeError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub const MILLIS_PER_SECOND: u64 = 1_000;
pub const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// Coarse lifecycle of a session relative to a clock reading.
///
/// Variants are declared in lifecycle order, so `Ord` follows the only
/// allowed direction of travel: Upcoming -> Active -> Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Upcoming,
    Active,
    Completed,
}

impl LifecycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStatus::Upcoming => "upcoming",
            LifecycleStatus::Active => "active",
            LifecycleStatus::Completed => "completed",
        }
    }

    /// Whether a student can join right now
    pub fn is_joinable(&self) -> bool {
        matches!(self, LifecycleStatus::Active)
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed distances from a clock reading to a session's start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDelta {
    pub start_delta_ms: i64,
    pub end_delta_ms: i64,
}

/// Time remaining until start, split into display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub total_milliseconds: u64,
}

impl CountdownBreakdown {
    /// The "no countdown" value reported once a session has started.
    pub const ZERO: CountdownBreakdown = CountdownBreakdown {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        total_milliseconds: 0,
    };

    pub fn is_zero(&self) -> bool {
        self.total_milliseconds == 0
    }

    /// Milliseconds covered by the whole units (sub-second remainder dropped)
    pub fn whole_unit_millis(&self) -> u64 {
        self.days * MILLIS_PER_DAY
            + self.hours * MILLIS_PER_HOUR
            + self.minutes * MILLIS_PER_MINUTE
            + self.seconds * MILLIS_PER_SECOND
    }

    /// Two-digit fields for digit-box style displays: `[DD, HH, MM, SS]`.
    /// Days are not capped, so a countdown of 100+ days yields three digits.
    pub fn padded(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

/// Display language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ar,
    #[default]
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ClasstimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ar" | "arabic" => Ok(Locale::Ar),
            "en" | "english" => Ok(Locale::En),
            other => Err(ClasstimeError::validation(format!(
                "Unknown locale '{}', expected 'ar' or 'en'",
                other
            ))),
        }
    }
}

/// A named lead time before session start at which a reminder fires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerOffset {
    pub name: String,
    pub duration_ms: u64,
}

impl TriggerOffset {
    /// Create an offset. Zero-length offsets are rejected.
    pub fn new(name: impl Into<String>, duration_ms: u64) -> Result<Self, ClasstimeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ClasstimeError::offset(name, "name cannot be empty"));
        }
        if duration_ms == 0 {
            return Err(ClasstimeError::offset(name, "must be greater than zero"));
        }
        Ok(Self { name, duration_ms })
    }

    /// Parse a self-describing offset name such as `24h`, `1h`, `15min`,
    /// `30s` or `2d`. The name of the resulting offset is the input string.
    pub fn parse(s: &str) -> Result<Self, ClasstimeError> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| ClasstimeError::offset(trimmed, "missing unit (d, h, min, s)"))?;
        let (digits, unit) = trimmed.split_at(split);

        if digits.is_empty() {
            return Err(ClasstimeError::offset(trimmed, "missing amount"));
        }
        let amount: u64 = digits
            .parse()
            .map_err(|_| ClasstimeError::offset(trimmed, "amount out of range"))?;

        let unit_ms = match unit.to_lowercase().as_str() {
            "d" | "day" | "days" => MILLIS_PER_DAY,
            "h" | "hr" | "hour" | "hours" => MILLIS_PER_HOUR,
            "m" | "min" | "mins" | "minute" | "minutes" => MILLIS_PER_MINUTE,
            "s" | "sec" | "secs" | "second" | "seconds" => MILLIS_PER_SECOND,
            other => {
                return Err(ClasstimeError::offset(
                    trimmed,
                    format!("unknown unit '{}'", other),
                ));
            }
        };

        let duration_ms = amount
            .checked_mul(unit_ms)
            .ok_or_else(|| ClasstimeError::offset(trimmed, "amount out of range"))?;

        Self::new(trimmed, duration_ms)
    }
}

impl fmt::Display for TriggerOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Ordered reminder offsets, strictly decreasing in magnitude with unique
/// names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerSet(Vec<TriggerOffset>);

impl TriggerSet {
    pub fn new(offsets: Vec<TriggerOffset>) -> Result<Self, ClasstimeError> {
        let mut names = HashSet::new();
        for offset in &offsets {
            if offset.duration_ms == 0 {
                return Err(ClasstimeError::offset(&offset.name, "must be greater than zero"));
            }
            if !names.insert(offset.name.as_str()) {
                return Err(ClasstimeError::offset(&offset.name, "duplicate name"));
            }
        }

        for pair in offsets.windows(2) {
            if pair[1].duration_ms >= pair[0].duration_ms {
                return Err(ClasstimeError::offset(
                    &pair[1].name,
                    format!(
                        "must be shorter than the preceding offset '{}'",
                        pair[0].name
                    ),
                ));
            }
        }

        Ok(Self(offsets))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// The platform's reminder points: a day before, an hour before and
    /// fifteen minutes before start.
    pub fn standard() -> Self {
        Self(vec![
            TriggerOffset {
                name: "24h".into(),
                duration_ms: 24 * MILLIS_PER_HOUR,
            },
            TriggerOffset {
                name: "1h".into(),
                duration_ms: MILLIS_PER_HOUR,
            },
            TriggerOffset {
                name: "15min".into(),
                duration_ms: 15 * MILLIS_PER_MINUTE,
            },
        ])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TriggerOffset> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[TriggerOffset] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a TriggerSet {
    type Item = &'a TriggerOffset;
    type IntoIter = std::slice::Iter<'a, TriggerOffset>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether one offset has been crossed at a given clock reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCrossing {
    pub offset: TriggerOffset,
    pub crossed: bool,
}

/// Everything derived from one session at one clock reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: LifecycleStatus,
    pub delta: TimeDelta,
    pub countdown: CountdownBreakdown,
    pub triggers: Vec<TriggerCrossing>,
}

impl SessionSnapshot {
    /// Offsets crossed at this reading, in configured order
    pub fn crossed(&self) -> impl Iterator<Item = &TriggerOffset> {
        self.triggers
            .iter()
            .filter(|t| t.crossed)
            .map(|t| &t.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_order_follows_lifecycle() {
        assert!(LifecycleStatus::Upcoming < LifecycleStatus::Active);
        assert!(LifecycleStatus::Active < LifecycleStatus::Completed);
        assert!(LifecycleStatus::Active.is_joinable());
        assert!(!LifecycleStatus::Completed.is_joinable());
    }

    #[test]
    fn parse_offset_names() {
        assert_eq!(TriggerOffset::parse("24h").unwrap().duration_ms, 86_400_000);
        assert_eq!(TriggerOffset::parse("1h").unwrap().duration_ms, 3_600_000);
        assert_eq!(TriggerOffset::parse("15min").unwrap().duration_ms, 900_000);
        assert_eq!(TriggerOffset::parse("30s").unwrap().duration_ms, 30_000);
        assert_eq!(TriggerOffset::parse("2d").unwrap().duration_ms, 2 * 86_400_000);
        assert_eq!(TriggerOffset::parse("15min").unwrap().name, "15min");
    }

    #[test]
    fn parse_offset_rejects_garbage() {
        assert!(TriggerOffset::parse("").is_err());
        assert!(TriggerOffset::parse("15").is_err());
        assert!(TriggerOffset::parse("h").is_err());
        assert!(TriggerOffset::parse("0h").is_err());
        assert!(TriggerOffset::parse("5 fortnights").is_err());
    }

    #[test]
    fn trigger_set_requires_decreasing_offsets() {
        let ok = TriggerSet::new(vec![
            TriggerOffset::parse("24h").unwrap(),
            TriggerOffset::parse("1h").unwrap(),
            TriggerOffset::parse("15min").unwrap(),
        ]);
        assert_eq!(ok.unwrap().len(), 3);

        let increasing = TriggerSet::new(vec![
            TriggerOffset::parse("1h").unwrap(),
            TriggerOffset::parse("24h").unwrap(),
        ]);
        assert!(increasing.is_err());

        let equal = TriggerSet::new(vec![
            TriggerOffset::parse("60min").unwrap(),
            TriggerOffset::parse("1h").unwrap(),
        ]);
        assert!(equal.is_err());
    }

    #[test]
    fn standard_set_is_valid() {
        let standard = TriggerSet::standard();
        let names: Vec<_> = standard.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["24h", "1h", "15min"]);
        assert_eq!(TriggerSet::new(standard.as_slice().to_vec()).unwrap(), standard);
    }

    #[test]
    fn trigger_set_rejects_duplicate_names() {
        let dup = TriggerSet::new(vec![
            TriggerOffset::new("soon", 3_600_000).unwrap(),
            TriggerOffset::new("soon", 60_000).unwrap(),
        ]);
        assert!(dup.is_err());
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("ar".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn breakdown_padding() {
        let b = CountdownBreakdown {
            days: 0,
            hours: 1,
            minutes: 5,
            seconds: 9,
            total_milliseconds: 3_909_000,
        };
        assert_eq!(b.padded(), ["00", "01", "05", "09"]);
        assert_eq!(b.whole_unit_millis(), 3_909_000);
    }
}
