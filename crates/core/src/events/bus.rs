use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{ChangeKind, SiteEvent};
use crate::document::StoredDocument;

/// In-process event bus backed by `tokio::broadcast`. Single node only.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<SiteEvent>>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish to all current subscribers. Returns how many received it;
    /// having nobody listening is not an error.
    pub fn publish(&self, event: SiteEvent) -> usize {
        match self.sender.send(event) {
            Ok(n) => n,
            Err(_) => 0,
        }
    }

    /// Announce a write that a store just completed.
    pub fn document_written(&self, doc: &StoredDocument, change: ChangeKind) -> usize {
        self.publish(SiteEvent::changed(&doc.key.collection, doc.id(), change, doc.updated_at))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(SiteEvent::Welcome), 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event, SiteEvent::Welcome);
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(SiteEvent::Welcome);

        assert_eq!(rx1.recv().await.unwrap(), SiteEvent::Welcome);
        assert_eq!(rx2.recv().await.unwrap(), SiteEvent::Welcome);
    }

    #[test]
    fn publishing_without_listeners_is_fine() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(SiteEvent::Welcome), 0);
    }
}
