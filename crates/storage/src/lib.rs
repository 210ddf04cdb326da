//! In-memory data services for the order and person demos.
//!
//! Each store owns its records, its id allocator and its selection state.
//! Callers refresh by re-querying after the [`ChangeEvent`]s delivered through
//! [`ChangeFeed`] subscriptions.

use crossbeam_channel::{unbounded, Receiver, Sender};
use shared::protocol::ChangeEvent;

mod orders;
mod persons;
pub mod seed;

pub use orders::OrderStore;
pub use persons::PersonStore;

/// Fan-out of change events to every live subscriber.
#[derive(Debug, Default)]
pub struct ChangeFeed {
    subscribers: Vec<Sender<ChangeEvent>>,
}

impl ChangeFeed {
    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self, event: ChangeEvent) {
        // A send only fails once the receiver is gone.
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::PersonId;

    #[test]
    fn publish_reaches_every_subscriber() {
        let mut feed = ChangeFeed::default();
        let first = feed.subscribe();
        let second = feed.subscribe();

        feed.publish(ChangeEvent::PersonUpdated {
            person_id: PersonId(3),
        });

        for rx in [first, second] {
            assert_eq!(
                rx.try_recv().expect("event"),
                ChangeEvent::PersonUpdated {
                    person_id: PersonId(3)
                }
            );
        }
    }

    #[test]
    fn dropped_subscribers_are_pruned_on_publish() {
        let mut feed = ChangeFeed::default();
        let kept = feed.subscribe();
        drop(feed.subscribe());
        assert_eq!(feed.subscriber_count(), 2);

        feed.publish(ChangeEvent::CurrentPersonChanged {
            person_id: PersonId(0),
        });

        assert_eq!(feed.subscriber_count(), 1);
        assert!(kept.try_recv().is_ok());
    }
}
