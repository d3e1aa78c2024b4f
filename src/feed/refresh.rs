//! Broadcast channel for collection-changed notifications.
//!
//! Mutating flows (post creation, membership changes) publish here and the
//! interested controllers subscribe, so the trigger side never holds a
//! reference to the component it refreshes.

use tokio::sync::broadcast;

/// Channel capacity; events are tiny and late subscribers only care about
/// the most recent ones.
const CHANNEL_CAPACITY: usize = 16;

/// Something a controller may want to reload after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    /// The post collection changed (a post was created or deleted).
    PostsChanged,
    /// The circle roster or invitation set changed.
    MembersChanged,
}

/// Cloneable broadcast bus for [`RefreshEvent`]s.
#[derive(Debug, Clone)]
pub struct RefreshBus {
    tx: broadcast::Sender<RefreshEvent>,
}

impl RefreshBus {
    /// Creates a new bus.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publishes an event to all current subscribers.
    ///
    /// Publishing with no subscribers is a no-op.
    pub fn publish(&self, event: RefreshEvent) {
        let _ = self.tx.send(event);
    }

    /// Subscribes to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.tx.subscribe()
    }
}

impl Default for RefreshBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = RefreshBus::new();
        let mut rx = bus.subscribe();

        bus.publish(RefreshEvent::PostsChanged);
        assert_eq!(rx.recv().await.unwrap(), RefreshEvent::PostsChanged);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_noop() {
        let bus = RefreshBus::new();
        bus.publish(RefreshEvent::MembersChanged);
    }

    #[tokio::test]
    async fn clones_share_the_channel() {
        let bus = RefreshBus::new();
        let mut rx = bus.subscribe();

        bus.clone().publish(RefreshEvent::MembersChanged);
        assert_eq!(rx.recv().await.unwrap(), RefreshEvent::MembersChanged);
    }

    #[tokio::test]
    async fn subscriber_only_sees_events_after_subscribing() {
        let bus = RefreshBus::new();
        bus.publish(RefreshEvent::PostsChanged);

        let mut rx = bus.subscribe();
        bus.publish(RefreshEvent::MembersChanged);
        assert_eq!(rx.recv().await.unwrap(), RefreshEvent::MembersChanged);
    }
}
