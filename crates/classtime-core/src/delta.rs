//! Time arithmetic: signed distances from a clock reading to a session's
//! start and end

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use classtime_api::TimeDelta;

use crate::SessionSchedule;

/// Resolve a wall-clock date-time in `tz`.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times that
/// do not exist (clocks going forward) are pushed forward by an hour, so a
/// 02:30 class on a spring-forward night starts at 03:30.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            let shifted = naive.checked_add_signed(Duration::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Session start and end instants in the clock reading's timezone.
///
/// A pinned schedule keeps its instant; a wall-clock one is read in `tz`.
/// An end past the representable range is clamped to the start.
pub fn session_bounds<Tz: TimeZone>(
    schedule: &SessionSchedule,
    tz: &Tz,
) -> (DateTime<Tz>, DateTime<Tz>) {
    let start = match schedule.start_instant() {
        Some(instant) => instant.with_timezone(tz),
        None => resolve_local(tz, schedule.start_naive()),
    };
    let end = start
        .clone()
        .checked_add_signed(Duration::minutes(i64::from(schedule.duration_minutes())))
        .unwrap_or_else(|| start.clone());
    (start, end)
}

/// Milliseconds from `now` until the session starts and ends. Either may be
/// negative.
pub fn compute_delta<Tz: TimeZone>(schedule: &SessionSchedule, now: &DateTime<Tz>) -> TimeDelta {
    let (start, end) = session_bounds(schedule, &now.timezone());

    TimeDelta {
        start_delta_ms: start.signed_duration_since(now.clone()).num_milliseconds(),
        end_delta_ms: end.signed_duration_since(now.clone()).num_milliseconds(),
    }
}
