//! Event bus for hub fan-out
//!
//! An owned object rather than a process-wide listener list: whoever
//! creates the hub creates the bus, hands clones to publishers and
//! subscribers, and everything is torn down when the last handle drops.

use classtime_api::HubEvent;
use tokio::sync::broadcast;
use tracing::trace;

/// Default number of events a slow subscriber may fall behind by
pub const DEFAULT_BUS_CAPACITY: usize = 256;

/// Broadcast channel for [`HubEvent`]s
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<HubEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event. Returns the number of subscribers that will see it;
    /// publishing with no subscribers is not an error.
    pub fn publish(&self, event: HubEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                trace!(event = event.event_name(), "No bus subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classtime_util::SessionId;

    fn completed(id: &str) -> HubEvent {
        HubEvent::SessionCompleted {
            session_id: SessionId::from(id),
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        assert_eq!(bus.publish(completed("s1")), 2);

        assert_eq!(a.recv().await.unwrap(), completed("s1"));
        assert_eq!(b.recv().await.unwrap(), completed("s1"));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new(4);
        assert_eq!(bus.publish(completed("s1")), 0);
    }

    #[test]
    fn test_dropped_subscriber_is_released() {
        let bus = EventBus::default();
        let rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(rx);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
