//! Events fanned out by the countdown hub

use classtime_util::SessionId;
use serde::{Deserialize, Serialize};

use crate::{LifecycleStatus, SessionSnapshot, TriggerOffset};

/// All events published by the hub on each tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HubEvent {
    /// Fresh countdown for a subscribed session
    Countdown {
        session_id: SessionId,
        snapshot: SessionSnapshot,
    },

    /// Session advanced to a later lifecycle status
    StatusChanged {
        session_id: SessionId,
        from: LifecycleStatus,
        to: LifecycleStatus,
    },

    /// A reminder offset was crossed for the first time
    ReminderDue {
        session_id: SessionId,
        label: String,
        offset: TriggerOffset,
        /// Milliseconds until start when the crossing was observed
        start_delta_ms: i64,
    },

    /// Session ended; its subscription has been dropped
    SessionCompleted {
        session_id: SessionId,
    },
}

impl HubEvent {
    pub fn session_id(&self) -> &SessionId {
        match self {
            HubEvent::Countdown { session_id, .. }
            | HubEvent::StatusChanged { session_id, .. }
            | HubEvent::ReminderDue { session_id, .. }
            | HubEvent::SessionCompleted { session_id } => session_id,
        }
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            HubEvent::Countdown { .. } => "countdown",
            HubEvent::StatusChanged { .. } => "status-changed",
            HubEvent::ReminderDue { .. } => "reminder-due",
            HubEvent::SessionCompleted { .. } => "session-completed",
        }
    }
}
