//! Integration tests for classtimed
//!
//! These tests drive the hub end to end with fixed clock readings: config
//! in, session records in, events and rendered text out.

use chrono::{DateTime, Duration, TimeZone, Utc};
use classtime_api::{HubEvent, LifecycleStatus, Locale};
use classtime_config::parse_config;
use classtime_core::{CountdownEngine, CountdownHub, EventBus, SessionRecord};
use classtime_util::SessionId;

const CONFIG: &str = r#"
config_version = 1

[service]
locale = "ar"
tick_millis = 500

[[reminders]]
name = "1h"

[[reminders]]
name = "warning"
seconds_before = 300
"#;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 25, 14, 30, 0).unwrap()
}

fn record(id: &str) -> SessionRecord {
    SessionRecord {
        id: Some(id.into()),
        label: Some("Grammar".into()),
        start_time: "14:30".into(),
        start_date: Some("2025-12-25".into()),
        duration: 60,
    }
}

fn make_hub() -> (CountdownHub, SessionId) {
    let policy = parse_config(CONFIG).unwrap();
    let mut hub = CountdownHub::new(CountdownEngine::from_policy(&policy), EventBus::default());

    let rec = record("grammar-1");
    let id = rec.session_id();
    hub.subscribe_as(id.clone(), rec.label(), rec.to_schedule().unwrap());
    (hub, id)
}

fn reminder_names(events: &[HubEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            HubEvent::ReminderDue { offset, .. } => Some(offset.name.clone()),
            _ => None,
        })
        .collect()
}

fn rendered(hub: &CountdownHub, events: &[HubEvent]) -> Option<String> {
    events.iter().find_map(|e| match e {
        HubEvent::Countdown { snapshot, .. } => Some(hub.engine().render(snapshot)),
        _ => None,
    })
}

#[test]
fn test_policy_drives_engine() {
    let (hub, _) = make_hub();
    assert_eq!(hub.locale(), Locale::Ar);

    let names: Vec<_> = hub.engine().offsets().iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["1h", "warning"]);
}

#[test]
fn test_full_session_lifecycle() {
    let (mut hub, id) = make_hub();

    // Two hours out: nothing crossed yet
    let events = hub.tick(&(start() - Duration::hours(2)));
    assert!(reminder_names(&events).is_empty());
    assert_eq!(
        rendered(&hub, &events).as_deref(),
        Some("٢ ساعات و ٠ دقائق و ٠ ثوان")
    );

    // 59 minutes out: the 1h reminder, once
    let events = hub.tick(&(start() - Duration::minutes(59)));
    assert_eq!(reminder_names(&events), ["1h"]);
    let events = hub.tick(&(start() - Duration::minutes(58)));
    assert!(reminder_names(&events).is_empty());

    // Four minutes out: the custom warning
    let events = hub.tick(&(start() - Duration::minutes(4)));
    assert_eq!(reminder_names(&events), ["warning"]);
    assert_eq!(
        rendered(&hub, &events).as_deref(),
        Some("٤ دقائق و ٠ ثوان")
    );

    // Start time: active, no more reminders
    let events = hub.tick(&start());
    assert!(events.contains(&HubEvent::StatusChanged {
        session_id: id.clone(),
        from: LifecycleStatus::Upcoming,
        to: LifecycleStatus::Active,
    }));
    assert!(reminder_names(&events).is_empty());
    assert_eq!(rendered(&hub, &events).as_deref(), Some("الحصة جارية الآن"));

    // End time: completed and dropped
    let events = hub.tick(&(start() + Duration::minutes(60)));
    assert_eq!(rendered(&hub, &events).as_deref(), Some("انتهت الحصة"));
    assert!(matches!(
        events.last(),
        Some(HubEvent::SessionCompleted { session_id }) if *session_id == id
    ));
    assert!(hub.is_empty());
}

#[test]
fn test_status_never_goes_backwards_across_ticks() {
    let (mut hub, _) = make_hub();
    let mut last = LifecycleStatus::Upcoming;

    let mut now = start() - Duration::minutes(2);
    while !hub.is_empty() {
        for event in hub.tick(&now) {
            if let HubEvent::Countdown { snapshot, .. } = event {
                assert!(snapshot.status >= last);
                last = snapshot.status;
            }
        }
        now += Duration::seconds(30);
    }

    assert_eq!(last, LifecycleStatus::Completed);
}

#[tokio::test]
async fn test_bus_subscriber_sees_reminders() {
    let (mut hub, id) = make_hub();
    let mut rx = hub.bus().subscribe();

    hub.tick(&(start() - Duration::minutes(30)));

    let first = rx.recv().await.unwrap();
    assert!(matches!(
        first,
        HubEvent::ReminderDue { ref session_id, ref label, .. }
            if *session_id == id && label == "Grammar"
    ));
    assert_eq!(first.event_name(), "reminder-due");

    let second = rx.recv().await.unwrap();
    assert_eq!(second.event_name(), "countdown");
}

#[test]
fn test_english_locale_override() {
    let mut policy = parse_config(CONFIG).unwrap();
    policy.service.locale = Locale::En;

    let engine = CountdownEngine::from_policy(&policy);
    let schedule = record("x").to_schedule().unwrap();
    let snapshot = engine.evaluate(&schedule, &(start() - Duration::seconds(90)));

    assert_eq!(engine.render(&snapshot), "1 minute 30 seconds");
}

#[test]
fn test_invalid_record_is_rejected() {
    let mut rec = record("bad");
    rec.start_time = "25:99".into();
    assert!(rec.to_schedule().is_err());

    let mut rec = record("bad");
    rec.duration = -5;
    assert!(rec.to_schedule().is_err());
}

#[test]
fn test_offset_record_starts_at_its_instant() {
    let (mut hub, _) = make_hub();
    let rec = SessionRecord {
        id: Some("utc-class".into()),
        label: Some("Reading".into()),
        start_time: "2025-11-02T06:30:00Z".into(),
        start_date: None,
        duration: 60,
    };
    let id = rec.session_id();
    hub.subscribe_as(id.clone(), rec.label(), rec.to_schedule().unwrap());

    let now = Utc.with_ymd_and_hms(2025, 11, 2, 6, 30, 0).unwrap();
    let snapshots = hub.evaluate_all(&now);
    let (_, _, snapshot) = snapshots.iter().find(|(sid, _, _)| *sid == id).unwrap();

    assert_eq!(snapshot.delta.start_delta_ms, 0);
    assert_eq!(snapshot.status, LifecycleStatus::Active);
}
