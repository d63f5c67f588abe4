//! Delayed clearing of short-lived shared state.
//!
//! Markers such as "just hit" highlights are added by the frame loop and
//! wiped a fixed time later by a fire-once task, which then asks the
//! frame loop to redraw.

use super::background::{BackgroundTask, TaskHandle};
use super::clock::Clock;
use super::ttl::TtlMap;
use crate::event::{EventBus, UiEvent};
use std::hash::Hash;
use std::time::Duration;

/// Schedules "wait, clear, redraw" tasks.
#[derive(Debug, Clone)]
pub struct DelayedClear {
    delay: Duration,
    bus: EventBus,
}

impl DelayedClear {
    /// Clear after `delay`, publishing redraw requests on `bus`.
    pub const fn new(delay: Duration, bus: EventBus) -> Self {
        Self { delay, bus }
    }

    /// Configured delay.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `clear` once after the delay, then request a redraw.
    ///
    /// Stopping the handle before the delay elapses cancels the clear.
    pub fn schedule<F>(&self, name: &str, clear: F) -> TaskHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let bus = self.bus.clone();
        BackgroundTask::run(name, move |ctx| {
            if ctx.sleep(delay) {
                clear();
                bus.publish(UiEvent::RedrawRequested);
            }
        })
    }

    /// Empty `map` once after the delay.
    pub fn schedule_map<K, V, C>(&self, map: &TtlMap<K, V, C>) -> TaskHandle
    where
        K: Eq + Hash + Send + 'static,
        V: Send + 'static,
        C: Clock + Clone,
    {
        let map = map.clone();
        self.schedule("delayed-clear", move || {
            let cleared = map.clear();
            tracing::debug!(cleared, "cleared markers");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clears_map_and_requests_redraw() {
        let bus = EventBus::new();
        let sub = bus.subscribe();
        let markers = TtlMap::new(Duration::from_secs(60));
        markers.insert((1, 1), 'x');
        markers.insert((2, 1), 'x');

        let clear = DelayedClear::new(Duration::from_millis(5), bus);
        clear.schedule_map(&markers).wait();

        assert!(markers.is_empty());
        assert_eq!(sub.drain(), vec![UiEvent::RedrawRequested]);
    }

    #[test]
    fn test_stopped_before_delay_keeps_state() {
        let bus = EventBus::new();
        let sub = bus.subscribe();
        let markers = TtlMap::new(Duration::from_secs(60));
        markers.insert(1, ());

        let clear = DelayedClear::new(Duration::from_secs(60), bus);
        clear.schedule_map(&markers).join();

        assert_eq!(markers.len(), 1);
        assert!(sub.drain().is_empty());
    }
}
