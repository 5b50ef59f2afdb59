//! Event notification.
//!
//! The controller reports every state change as a [`SessionEvent`] through
//! an [`EventBus`]. The view subscribes and re-renders; it never reads the
//! session directly except through the controller's accessors.

pub mod bus;
pub mod event;

pub use bus::{EventBus, Subscriber, SubscriptionId};
pub use event::SessionEvent;
