//! Subscription channel for session events.
//!
//! Subscribers are plain callbacks. Delivery is synchronous: every event
//! reaches every subscriber, in subscription order, before the command that
//! produced it returns.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::event::SessionEvent;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

/// Receiver of session events.
///
/// Implemented for any `FnMut(&SessionEvent)`.
pub trait Subscriber {
    fn notify(&mut self, event: &SessionEvent);
}

impl<F> Subscriber for F
where
    F: FnMut(&SessionEvent),
{
    fn notify(&mut self, event: &SessionEvent) {
        self(event);
    }
}

/// Fan-out of events to subscribers.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Box<dyn Subscriber>)>,
    next_id: u32,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber.
    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver one event to every subscriber.
    pub fn publish(&mut self, event: &SessionEvent) {
        trace!(kind = event.kind(), subscribers = self.subscribers.len(), "publish");
        for (_, subscriber) in &mut self.subscribers {
            subscriber.notify(event);
        }
    }

    /// Deliver a batch of events in order.
    pub fn publish_all(&mut self, events: &[SessionEvent]) {
        for event in events {
            self.publish(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
