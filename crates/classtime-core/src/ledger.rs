//! Record of reminders already emitted
//!
//! Trigger evaluation is stateless and reports a crossed offset on every
//! poll inside its window. The ledger turns that into at-most-once
//! delivery per (session, offset name).

use classtime_api::TriggerOffset;
use classtime_util::SessionId;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct ReminderLedger {
    sent: HashMap<SessionId, HashSet<String>>,
}

impl ReminderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reminder. Returns `true` the first time a given offset is
    /// recorded for a session, `false` on every repeat.
    pub fn record(&mut self, session_id: &SessionId, offset: &TriggerOffset) -> bool {
        self.sent
            .entry(session_id.clone())
            .or_default()
            .insert(offset.name.clone())
    }

    pub fn was_sent(&self, session_id: &SessionId, offset_name: &str) -> bool {
        self.sent
            .get(session_id)
            .is_some_and(|names| names.contains(offset_name))
    }

    /// Drop everything recorded for a session (completed or rescheduled)
    pub fn forget_session(&mut self, session_id: &SessionId) {
        self.sent.remove(session_id);
    }

    /// Number of reminders recorded across all sessions
    pub fn len(&self) -> usize {
        self.sent.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_at_most_once() {
        let mut ledger = ReminderLedger::new();
        let session = SessionId::from("s1");
        let hour = TriggerOffset::parse("1h").unwrap();

        assert!(ledger.record(&session, &hour));
        assert!(!ledger.record(&session, &hour));
        assert!(ledger.was_sent(&session, "1h"));
        assert!(!ledger.was_sent(&session, "15min"));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut ledger = ReminderLedger::new();
        let hour = TriggerOffset::parse("1h").unwrap();

        assert!(ledger.record(&SessionId::from("a"), &hour));
        assert!(ledger.record(&SessionId::from("b"), &hour));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_forget_session() {
        let mut ledger = ReminderLedger::new();
        let session = SessionId::from("s1");
        let hour = TriggerOffset::parse("1h").unwrap();

        ledger.record(&session, &hour);
        ledger.forget_session(&session);
        assert!(ledger.is_empty());
        assert!(ledger.record(&session, &hour));
    }
}
