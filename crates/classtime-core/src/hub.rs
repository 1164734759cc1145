//! Countdown hub
//!
//! Multiplexes every displayed countdown onto a single timer. Each tick
//! takes one clock reading, evaluates all subscriptions against it and fans
//! the results out on the [`EventBus`].

use chrono::{DateTime, TimeZone};
use classtime_api::{HubEvent, LifecycleStatus, Locale, SessionSnapshot};
use classtime_util::SessionId;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::{CountdownEngine, EventBus, ReminderLedger, SessionSchedule};

#[derive(Debug)]
struct Subscription {
    label: String,
    schedule: SessionSchedule,
    /// Latest status reported; None until the first tick
    status: Option<LifecycleStatus>,
}

/// Shared scheduler for session countdowns
#[derive(Debug)]
pub struct CountdownHub {
    engine: CountdownEngine,
    bus: EventBus,
    ledger: ReminderLedger,
    subscriptions: BTreeMap<SessionId, Subscription>,
}

impl CountdownHub {
    pub fn new(engine: CountdownEngine, bus: EventBus) -> Self {
        info!(
            reminder_count = engine.offsets().len(),
            locale = %engine.locale(),
            "Countdown hub initialized"
        );

        Self {
            engine,
            bus,
            ledger: ReminderLedger::new(),
            subscriptions: BTreeMap::new(),
        }
    }

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn locale(&self) -> Locale {
        self.engine.locale()
    }

    /// Start tracking a session under a fresh id
    pub fn subscribe(&mut self, label: impl Into<String>, schedule: SessionSchedule) -> SessionId {
        let session_id = SessionId::new();
        self.subscribe_as(session_id.clone(), label, schedule);
        session_id
    }

    /// Start tracking a session under a caller-chosen id.
    ///
    /// Subscribing an id that is already tracked replaces it: a rescheduled
    /// session starts over as Upcoming with no reminders sent.
    pub fn subscribe_as(
        &mut self,
        session_id: SessionId,
        label: impl Into<String>,
        schedule: SessionSchedule,
    ) {
        let label = label.into();
        let replaced = self
            .subscriptions
            .insert(
                session_id.clone(),
                Subscription {
                    label: label.clone(),
                    schedule,
                    status: None,
                },
            )
            .is_some();

        if replaced {
            self.ledger.forget_session(&session_id);
            info!(session_id = %session_id, label = %label, "Session rescheduled");
        } else {
            debug!(
                session_id = %session_id,
                label = %label,
                start = %schedule.start_naive(),
                duration_minutes = schedule.duration_minutes(),
                "Session subscribed"
            );
        }
    }

    /// Stop tracking a session. Returns false if it was not tracked.
    pub fn unsubscribe(&mut self, session_id: &SessionId) -> bool {
        self.ledger.forget_session(session_id);
        let removed = self.subscriptions.remove(session_id).is_some();
        if removed {
            debug!(session_id = %session_id, "Session unsubscribed");
        }
        removed
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.subscriptions.contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Evaluate every subscription without emitting events or touching the
    /// ledger. Entries are `(id, label, snapshot)` in id order.
    pub fn evaluate_all<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Vec<(SessionId, String, SessionSnapshot)> {
        self.subscriptions
            .iter()
            .map(|(id, sub)| {
                (
                    id.clone(),
                    sub.label.clone(),
                    self.engine.evaluate(&sub.schedule, now),
                )
            })
            .collect()
    }

    /// Advance every subscription to `now`.
    ///
    /// Per session, events come out as: status change, first-time reminders,
    /// the countdown itself, and finally completion, after which the session
    /// is dropped. All events are also published on the bus. A reading that
    /// would move a session backwards yields no events for that session.
    pub fn tick<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Vec<HubEvent> {
        let mut events = Vec::new();
        let mut completed = Vec::new();

        for (session_id, sub) in self.subscriptions.iter_mut() {
            let snapshot = self.engine.evaluate(&sub.schedule, now);

            match sub.status {
                Some(previous) if snapshot.status < previous => {
                    // Clock moved backwards: nothing from this reading is
                    // published for the session, reminders included.
                    warn!(
                        session_id = %session_id,
                        reported = %snapshot.status,
                        kept = %previous,
                        "Ignoring status regression"
                    );
                    continue;
                }
                Some(previous) if snapshot.status > previous => {
                    info!(
                        session_id = %session_id,
                        label = %sub.label,
                        from = %previous,
                        to = %snapshot.status,
                        "Session status changed"
                    );
                    events.push(HubEvent::StatusChanged {
                        session_id: session_id.clone(),
                        from: previous,
                        to: snapshot.status,
                    });
                    sub.status = Some(snapshot.status);
                }
                Some(_) => {}
                None => sub.status = Some(snapshot.status),
            }

            for offset in snapshot.crossed() {
                if self.ledger.record(session_id, offset) {
                    info!(
                        session_id = %session_id,
                        label = %sub.label,
                        offset = %offset.name,
                        start_delta_ms = snapshot.delta.start_delta_ms,
                        "Reminder due"
                    );
                    events.push(HubEvent::ReminderDue {
                        session_id: session_id.clone(),
                        label: sub.label.clone(),
                        offset: offset.clone(),
                        start_delta_ms: snapshot.delta.start_delta_ms,
                    });
                }
            }

            let is_completed = sub.status == Some(LifecycleStatus::Completed);

            events.push(HubEvent::Countdown {
                session_id: session_id.clone(),
                snapshot,
            });

            if is_completed {
                events.push(HubEvent::SessionCompleted {
                    session_id: session_id.clone(),
                });
                completed.push(session_id.clone());
            }
        }

        for session_id in &completed {
            self.subscriptions.remove(session_id);
            self.ledger.forget_session(session_id);
            info!(session_id = %session_id, "Session completed, subscription dropped");
        }

        for event in &events {
            self.bus.publish(event.clone());
        }

        events
    }

    /// Drive [`tick`](Self::tick) from a timer until `shutdown` resolves.
    ///
    /// `clock` is read once per tick. Ticks missed while the task was busy
    /// are skipped rather than replayed.
    pub async fn run<Tz, C, F>(&mut self, period: Duration, mut clock: C, shutdown: F)
    where
        Tz: TimeZone,
        C: FnMut() -> DateTime<Tz>,
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(
            period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
            "Countdown hub running"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(remaining = self.len(), "Countdown hub stopping");
                    break;
                }
                _ = ticker.tick() => {
                    let now = clock();
                    self.tick(&now);
                }
            }
        }
    }
}
