//! Countdown decomposition into display units

use classtime_api::{
    CountdownBreakdown, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND,
};

/// Split a non-negative delta into days, hours, minutes and seconds.
///
/// Floor division throughout: sub-second remainders are dropped, never
/// rounded up, so a unit only ticks over once it has fully elapsed.
pub fn decompose(delta_ms: u64) -> CountdownBreakdown {
    CountdownBreakdown {
        days: delta_ms / MILLIS_PER_DAY,
        hours: (delta_ms % MILLIS_PER_DAY) / MILLIS_PER_HOUR,
        minutes: (delta_ms % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
        seconds: (delta_ms % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND,
        total_milliseconds: delta_ms,
    }
}

/// [`decompose`] for a signed delta, clamping anything in the past to zero
pub fn decompose_clamped(delta_ms: i64) -> CountdownBreakdown {
    decompose(u64::try_from(delta_ms).unwrap_or(0))
}
