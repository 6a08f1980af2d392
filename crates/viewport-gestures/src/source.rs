//! Input source seam: subscription lifecycle and an in-memory source.

use crate::event::{InputEvent, InputKind};
use std::collections::{HashMap, VecDeque};

/// Identifier handed out by an [`InputSource`] on subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl SubscriptionId {
    /// Create a new subscription ID.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Something that delivers input notifications for a host element.
pub trait InputSource {
    /// Start delivering the given kinds.
    fn subscribe(&mut self, kinds: &[InputKind]) -> SubscriptionId;

    /// Stop delivering for a subscription. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Receiver of input notifications.
pub trait InputSink {
    /// Subscription this sink is attached through, if any.
    fn subscription(&self) -> Option<SubscriptionId>;

    /// Handle a single notification.
    fn handle(&mut self, event: &InputEvent);
}

/// In-memory input source fed from a queue of notifications.
///
/// Notifications are only delivered to a sink whose subscription is live and
/// covers the notification kind; anything else is dropped, as a detached
/// element would drop it.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    queue: VecDeque<InputEvent>,
    subscriptions: HashMap<SubscriptionId, Vec<InputKind>>,
    next_id: u64,
}

impl ScriptedSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source preloaded with notifications.
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Queue a notification.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Number of queued notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Check if a subscription is live.
    #[must_use]
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.contains_key(&id)
    }

    /// Timestamp of the next queued notification.
    #[must_use]
    pub fn peek_timestamp(&self) -> Option<u64> {
        self.queue.front().map(InputEvent::timestamp_ms)
    }

    /// Deliver every queued notification. Returns how many reached the sink.
    pub fn pump<S: InputSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        self.pump_until(sink, u64::MAX)
    }

    /// Deliver queued notifications stamped strictly before `before_ms`.
    pub fn pump_until<S: InputSink + ?Sized>(&mut self, sink: &mut S, before_ms: u64) -> usize {
        let mut delivered = 0;
        while self
            .peek_timestamp()
            .is_some_and(|timestamp| timestamp < before_ms || before_ms == u64::MAX)
        {
            let Some(event) = self.queue.pop_front() else {
                break;
            };
            if self.accepts(sink.subscription(), event.kind()) {
                sink.handle(&event);
                delivered += 1;
            }
        }
        delivered
    }

    fn accepts(&self, id: Option<SubscriptionId>, kind: InputKind) -> bool {
        id.and_then(|id| self.subscriptions.get(&id))
            .is_some_and(|kinds| kinds.contains(&kind))
    }
}

impl InputSource for ScriptedSource {
    fn subscribe(&mut self, kinds: &[InputKind]) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id);
        self.next_id += 1;
        self.subscriptions.insert(id, kinds.to_vec());
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscriptions.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        subscription: Option<SubscriptionId>,
        seen: Vec<InputEvent>,
    }

    impl InputSink for Recorder {
        fn subscription(&self) -> Option<SubscriptionId> {
            self.subscription
        }

        fn handle(&mut self, event: &InputEvent) {
            self.seen.push(event.clone());
        }
    }

    #[test]
    fn test_subscribe_unsubscribe() {
        let mut source = ScriptedSource::new();
        let a = source.subscribe(&InputKind::ALL);
        let b = source.subscribe(&[InputKind::Wheel]);
        assert_ne!(a, b);
        assert_eq!(source.subscription_count(), 2);

        source.unsubscribe(a);
        assert!(!source.is_subscribed(a));
        assert!(source.is_subscribed(b));

        source.unsubscribe(a);
        assert_eq!(source.subscription_count(), 1);
    }

    #[test]
    fn test_pump_delivers_to_live_subscription() {
        let mut source = ScriptedSource::from_events([
            InputEvent::down(0.0, 0.0, 0),
            InputEvent::up(0.0, 0.0, 10),
        ]);
        let mut sink = Recorder {
            subscription: Some(source.subscribe(&InputKind::ALL)),
            ..Recorder::default()
        };

        assert_eq!(source.pump(&mut sink), 2);
        assert_eq!(sink.seen.len(), 2);
        assert!(source.is_empty());
    }

    #[test]
    fn test_pump_filters_kinds() {
        let mut source = ScriptedSource::from_events([
            InputEvent::down(0.0, 0.0, 0),
            InputEvent::wheel(0.0, 0.0, 5, -1.0),
        ]);
        let mut sink = Recorder {
            subscription: Some(source.subscribe(&[InputKind::Wheel])),
            ..Recorder::default()
        };

        assert_eq!(source.pump(&mut sink), 1);
        assert_eq!(sink.seen[0].kind(), InputKind::Wheel);
    }

    #[test]
    fn test_pump_drops_without_subscription() {
        let mut source = ScriptedSource::from_events([InputEvent::down(0.0, 0.0, 0)]);
        let mut sink = Recorder::default();
        assert_eq!(source.pump(&mut sink), 0);
        assert!(source.is_empty());
    }

    #[test]
    fn test_pump_until_stops_at_timestamp() {
        let mut source = ScriptedSource::from_events([
            InputEvent::down(0.0, 0.0, 0),
            InputEvent::moved(1.0, 0.0, 50),
            InputEvent::up(1.0, 0.0, 100),
        ]);
        let mut sink = Recorder {
            subscription: Some(source.subscribe(&InputKind::ALL)),
            ..Recorder::default()
        };

        assert_eq!(source.pump_until(&mut sink, 50), 1);
        assert_eq!(source.peek_timestamp(), Some(50));
        assert_eq!(source.pump_until(&mut sink, 101), 2);
        assert!(source.is_empty());
    }
}
