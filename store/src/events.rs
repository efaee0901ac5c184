//! Change notification for store writes.
//!
//! Subscribers get an event for every committed batch, naming the
//! collections it touched. This replaces interval re-reads: a view
//! re-queries only when something it shows has actually changed.

use crate::store::Collection;
use parking_lot::Mutex;
use std::sync::mpsc::{channel, Receiver, Sender};
use tracing::debug;

/// A committed write, naming the collections it touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Collections written in the commit.
    pub collections: Vec<Collection>,
}

impl ChangeEvent {
    /// Check whether the event touched a collection.
    pub fn touches(&self, collection: Collection) -> bool {
        self.collections.contains(&collection)
    }
}

/// Fan-out of change events to any number of subscribers.
///
/// Delivery is fire-and-forget; a subscriber that dropped its receiver is
/// pruned on the next publish.
#[derive(Default)]
pub struct ChangeFeed {
    senders: Mutex<Vec<Sender<ChangeEvent>>>,
}

impl ChangeFeed {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> Receiver<ChangeEvent> {
        let (tx, rx) = channel();
        self.senders.lock().push(tx);
        rx
    }

    /// Publish an event to all live subscribers.
    pub fn publish(&self, event: ChangeEvent) {
        let mut senders = self.senders.lock();
        senders.retain(|sender| sender.send(event.clone()).is_ok());
        debug!(
            collections = ?event.collections,
            subscribers = senders.len(),
            "Published change event"
        );
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.senders.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_publish() {
        let feed = ChangeFeed::new();
        let rx = feed.subscribe();

        feed.publish(ChangeEvent {
            collections: vec![Collection::Vaults, Collection::Transactions],
        });

        let event = rx.try_recv().unwrap();
        assert!(event.touches(Collection::Vaults));
        assert!(event.touches(Collection::Transactions));
        assert!(!event.touches(Collection::Rates));
    }

    #[test]
    fn test_dropped_subscribers_pruned() {
        let feed = ChangeFeed::new();
        let rx = feed.subscribe();
        drop(rx);

        feed.publish(ChangeEvent {
            collections: vec![Collection::Rates],
        });
        assert_eq!(feed.subscriber_count(), 0);
    }
}
