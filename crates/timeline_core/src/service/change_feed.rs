//! Store change notifications.
//!
//! Subscribers get their own unbounded channel; views drain it to decide
//! whether to re-fetch. A dropped receiver is pruned on the next publish.

use crate::model::event::EventId;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// One successful write against the event store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Added(EventId),
    Updated(EventId),
    Deleted(EventId),
}

impl StoreChange {
    pub fn event_id(self) -> EventId {
        match self {
            Self::Added(id) | Self::Updated(id) | Self::Deleted(id) => id,
        }
    }
}

/// Fan-out of `StoreChange` to every live subscriber.
#[derive(Debug, Default)]
pub struct ChangeFeed {
    subscribers: Vec<Sender<StoreChange>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&mut self) -> Receiver<StoreChange> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Delivers `change` to all subscribers, dropping disconnected ones.
    pub fn publish(&mut self, change: StoreChange) {
        self.subscribers.retain(|tx| tx.send(change).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeFeed, StoreChange};

    #[test]
    fn publish_reaches_every_subscriber() {
        let mut feed = ChangeFeed::new();
        let first = feed.subscribe();
        let second = feed.subscribe();

        feed.publish(StoreChange::Added(7));

        assert_eq!(first.try_recv().unwrap(), StoreChange::Added(7));
        assert_eq!(second.try_recv().unwrap(), StoreChange::Added(7));
        assert!(first.try_recv().is_err());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut feed = ChangeFeed::new();
        let kept = feed.subscribe();
        drop(feed.subscribe());
        assert_eq!(feed.subscriber_count(), 2);

        feed.publish(StoreChange::Deleted(1));

        assert_eq!(feed.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap().event_id(), 1);
    }
}
