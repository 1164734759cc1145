//! Lifecycle classification

use classtime_api::{LifecycleStatus, TimeDelta};

/// Classify a session from its signed deltas.
///
/// The start instant belongs to Active (`start_delta_ms == 0` is joinable),
/// the end instant belongs to Completed (`end_delta_ms == 0` has ended).
pub fn classify(start_delta_ms: i64, end_delta_ms: i64) -> LifecycleStatus {
    if start_delta_ms > 0 {
        LifecycleStatus::Upcoming
    } else if end_delta_ms > 0 {
        LifecycleStatus::Active
    } else {
        LifecycleStatus::Completed
    }
}

/// [`classify`] for a computed delta
pub fn classify_delta(delta: &TimeDelta) -> LifecycleStatus {
    classify(delta.start_delta_ms, delta.end_delta_ms)
}
