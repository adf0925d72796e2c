//! Event bus port: push notifications to real-time observers.

use voicehome_domain::event::Event;

/// Publishes events to every connected observer.
///
/// Publishing never blocks and never fails: an event nobody listens to is
/// dropped.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event);
}

impl<T: EventPublisher + ?Sized> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) {
        (**self).publish(event);
    }
}
