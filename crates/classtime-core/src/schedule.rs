//! Session schedules and the boundary where raw records become schedules
//!
//! Everything past this module assumes a well-formed [`SessionSchedule`];
//! malformed dates, times and durations are rejected here with a
//! descriptive error instead of turning into a nonsense countdown later.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use classtime_util::{ClasstimeError, Result, SessionId};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// When a session starts and how long it runs.
///
/// Only constructible through [`SessionSchedule::new`] or
/// [`SessionSchedule::at`], so the duration is always positive and the end
/// is always a representable date-time.
///
/// A wall-clock start is read in the timezone of whatever clock reading it
/// is evaluated against. A start that carried an explicit offset is pinned
/// to that instant instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSchedule {
    start_date: NaiveDate,
    start_time: NaiveTime,
    start_instant: Option<DateTime<FixedOffset>>,
    duration_minutes: u32,
}

impl SessionSchedule {
    pub fn new(start_date: NaiveDate, start_time: NaiveTime, duration_minutes: u32) -> Result<Self> {
        check_duration(start_date.and_time(start_time), duration_minutes)?;
        Ok(Self {
            start_date,
            start_time,
            start_instant: None,
            duration_minutes,
        })
    }

    /// A schedule pinned to an absolute start instant
    pub fn at(start: DateTime<FixedOffset>, duration_minutes: u32) -> Result<Self> {
        check_duration(start.naive_utc(), duration_minutes)?;
        let wall = start.naive_local();
        check_duration(wall, duration_minutes)?;
        Ok(Self {
            start_date: wall.date(),
            start_time: wall.time(),
            start_instant: Some(start),
            duration_minutes,
        })
    }

    /// Build a schedule from `YYYY-MM-DD` and `HH:MM[:SS]` strings
    pub fn parse(date: &str, time: &str, duration_minutes: i64) -> Result<Self> {
        Self::new(
            parse_date(date)?,
            parse_time_of_day(time)?,
            parse_duration(duration_minutes)?,
        )
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Start as a wall-clock date-time. For a pinned schedule this is the
    /// wall clock of the offset it was given in.
    pub fn start_naive(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    /// The absolute start instant, when the schedule was given one
    pub fn start_instant(&self) -> Option<DateTime<FixedOffset>> {
        self.start_instant
    }
}

fn check_duration(start: NaiveDateTime, duration_minutes: u32) -> Result<()> {
    if duration_minutes == 0 {
        return Err(ClasstimeError::duration("must be greater than zero"));
    }
    if start
        .checked_add_signed(Duration::minutes(i64::from(duration_minutes)))
        .is_none()
    {
        return Err(ClasstimeError::duration(format!(
            "{} minutes from {} is out of range",
            duration_minutes, start
        )));
    }
    Ok(())
}

/// A session row as handed over by the persistence layer.
///
/// `start_time` is either a full date-time, or a time of day when
/// `start_date` is present. `duration` is in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    pub start_time: String,

    #[serde(default)]
    pub start_date: Option<String>,

    pub duration: i64,
}

impl SessionRecord {
    /// Validate the record and turn it into a schedule
    pub fn to_schedule(&self) -> Result<SessionSchedule> {
        let duration = parse_duration(self.duration)?;

        match &self.start_date {
            Some(date) => {
                SessionSchedule::new(parse_date(date)?, parse_time_of_day(&self.start_time)?, duration)
            }
            None => match parse_instant(&self.start_time) {
                Some(start) => SessionSchedule::at(start, duration),
                None => {
                    let start = parse_datetime(&self.start_time)?;
                    SessionSchedule::new(start.date(), start.time(), duration)
                }
            },
        }
    }

    /// The record's own id, or a fresh one
    pub fn session_id(&self) -> SessionId {
        match &self.id {
            Some(id) if !id.trim().is_empty() => SessionId::from_external(id.trim()),
            _ => SessionId::new(),
        }
    }

    /// Display label, falling back to the start time
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) if !label.trim().is_empty() => label.trim().to_string(),
            _ => match &self.start_date {
                Some(date) => format!("Session {} {}", date, self.start_time),
                None => format!("Session {}", self.start_time),
            },
        }
    }
}

/// Parse `YYYY-MM-DD`
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ClasstimeError::date(s, "date is empty"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|e| ClasstimeError::date(s, format!("expected YYYY-MM-DD ({})", e)))
}

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ClasstimeError::time(s, "time is empty"));
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ClasstimeError::time(s, "expected HH:MM or HH:MM:SS"))
}

/// Parse an RFC 3339 timestamp with an explicit offset
/// (`2025-12-25T14:30:00+03:00`, `...Z`). Returns `None` for anything else.
pub fn parse_instant(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s.trim()).ok()
}

/// Parse a date-time in wall-clock terms.
///
/// A timestamp carrying an offset yields the wall clock of that offset; use
/// [`parse_instant`] to keep the instant itself.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ClasstimeError::time(s, "start time is empty"));
    }

    if let Some(with_offset) = parse_instant(trimmed) {
        return Ok(with_offset.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| {
            ClasstimeError::time(s, "expected an ISO date-time such as 2025-12-25T14:30:00")
        })
}

fn parse_duration(minutes: i64) -> Result<u32> {
    if minutes <= 0 {
        return Err(ClasstimeError::duration(format!(
            "must be greater than zero, got {} minutes",
            minutes
        )));
    }
    u32::try_from(minutes)
        .map_err(|_| ClasstimeError::duration(format!("{} minutes is too long", minutes)))
}
