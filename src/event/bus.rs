//! Event bus: decouples widgets that produce notifications from the
//! screens that react to them.
//!
//! Widgets publish [`UiEvent`]s while the tree handles input; background
//! tasks publish redraw requests from their own threads. A screen holds a
//! [`Subscription`] and drains it once per frame on the main thread, so
//! every reaction runs where widget state may be touched.

use crate::widget::WidgetId;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;

/// Notifications published by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A pressable widget completed a click.
    Clicked {
        /// The clicked widget.
        source: WidgetId,
        /// Its debug name.
        name: String,
    },

    /// A transient popup closed itself because of an outside click.
    Dismissed {
        /// The popup.
        source: WidgetId,
        /// Its debug name.
        name: String,
    },

    /// A text field was confirmed with Enter.
    Submitted {
        /// The field.
        source: WidgetId,
        /// Its debug name.
        name: String,
        /// The text at the time of the key press.
        text: String,
    },

    /// Shared state changed off the main thread; redraw on the next frame.
    RedrawRequested,
}

/// Multi-subscriber publish/subscribe channel.
///
/// Cloning the bus yields another handle to the same subscriber list.
/// Publishing never blocks; subscribers that were dropped are pruned on
/// the next publish.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<Sender<UiEvent>>>>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber; it sees events published from now on.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        Subscription { rx }
    }

    /// Deliver `event` to every live subscriber.
    pub fn publish(&self, event: UiEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        tracing::trace!(?event, subscribers = subscribers.len(), "published");
    }

    /// Number of live subscribers as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Receiving end of an [`EventBus`] registration.
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<UiEvent>,
}

impl Subscription {
    /// Take every pending event without blocking.
    pub fn drain(&self) -> Vec<UiEvent> {
        self.rx.try_iter().collect()
    }

    /// Take the next pending event without blocking.
    pub fn try_next(&self) -> Option<UiEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event.
    pub fn next_timeout(&self, timeout: std::time::Duration) -> Option<UiEvent> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Underlying channel, for use with `crossbeam_channel::select!`.
    pub fn receiver(&self) -> &Receiver<UiEvent> {
        &self.rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subscriber_receives() {
        let bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        bus.publish(UiEvent::RedrawRequested);
        assert_eq!(a.drain(), vec![UiEvent::RedrawRequested]);
        assert_eq!(b.drain(), vec![UiEvent::RedrawRequested]);
        assert!(a.drain().is_empty());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let bus = EventBus::new();
        let keep = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);
        bus.publish(UiEvent::RedrawRequested);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.try_next(), Some(UiEvent::RedrawRequested));
    }

    #[test]
    fn test_publish_from_another_thread() {
        let bus = EventBus::new();
        let sub = bus.subscribe();
        let remote = bus.clone();
        std::thread::spawn(move || remote.publish(UiEvent::RedrawRequested))
            .join()
            .unwrap();
        assert_eq!(
            sub.next_timeout(std::time::Duration::from_secs(1)),
            Some(UiEvent::RedrawRequested)
        );
    }
}
