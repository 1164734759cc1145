//! Countdown engine: one clock reading in, one snapshot out

use chrono::{DateTime, TimeZone};
use classtime_api::{CountdownBreakdown, LifecycleStatus, Locale, SessionSnapshot, TriggerSet};
use classtime_config::Policy;

use crate::{
    classify_delta, compute_delta, decompose_clamped, evaluate_triggers, format_countdown,
    SessionSchedule,
};

/// Evaluate a session against a single clock reading.
///
/// Every derived value comes from the same `now`, so status and countdown
/// can never disagree across a second boundary. The countdown is zero
/// unless the session is still upcoming.
pub fn evaluate<Tz: TimeZone>(
    schedule: &SessionSchedule,
    now: &DateTime<Tz>,
    offsets: &TriggerSet,
) -> SessionSnapshot {
    let delta = compute_delta(schedule, now);
    let status = classify_delta(&delta);

    let countdown = match status {
        LifecycleStatus::Upcoming => decompose_clamped(delta.start_delta_ms),
        LifecycleStatus::Active | LifecycleStatus::Completed => CountdownBreakdown::ZERO,
    };

    SessionSnapshot {
        status,
        delta,
        countdown,
        triggers: evaluate_triggers(delta.start_delta_ms, offsets),
    }
}

/// Render a snapshot as display text
pub fn render(snapshot: &SessionSnapshot, locale: Locale) -> String {
    format_countdown(&snapshot.countdown, snapshot.status, locale)
}

/// Engine bound to a reminder configuration and display locale
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    offsets: TriggerSet,
    locale: Locale,
}

impl CountdownEngine {
    pub fn new(offsets: TriggerSet, locale: Locale) -> Self {
        Self { offsets, locale }
    }

    pub fn from_policy(policy: &Policy) -> Self {
        Self::new(policy.reminders.clone(), policy.service.locale)
    }

    pub fn offsets(&self) -> &TriggerSet {
        &self.offsets
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn evaluate<Tz: TimeZone>(
        &self,
        schedule: &SessionSchedule,
        now: &DateTime<Tz>,
    ) -> SessionSnapshot {
        evaluate(schedule, now, &self.offsets)
    }

    pub fn render(&self, snapshot: &SessionSnapshot) -> String {
        render(snapshot, self.locale)
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new(TriggerSet::standard(), Locale::default())
    }
}
