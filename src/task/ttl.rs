//! Shared maps whose entries expire after a fixed time to live.
//!
//! The frame loop inserts entries (for example transient overlays keyed by
//! board position) and reads them while drawing; an eviction task removes
//! stale entries in the background and asks for a redraw when it did.

use super::background::{BackgroundTask, TaskHandle};
use super::clock::{Clock, SystemClock};
use crate::event::{EventBus, UiEvent};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A value plus the instant it was (re)inserted.
#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// A thread-safe map that forgets entries older than its time to live.
///
/// Cloning yields another handle to the same entries.
pub struct TtlMap<K, V, C: Clock = SystemClock> {
    entries: Arc<Mutex<HashMap<K, Entry<V>>>>,
    ttl: Duration,
    clock: C,
}

impl<K: Eq + Hash, V> TtlMap<K, V, SystemClock> {
    /// Create an empty map on the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<K: Eq + Hash, V, C: Clock> TtlMap<K, V, C> {
    /// Create an empty map reading time from `clock`.
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            clock,
        }
    }

    /// Configured time to live.
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Insert or replace; the entry's age restarts either way.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let entry = Entry { value, inserted_at: self.clock.now() };
        self.entries.lock().insert(key, entry).map(|old| old.value)
    }

    /// Remove an entry. Removing a missing key is not an error.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries.lock().remove(key).map(|entry| entry.value)
    }

    /// Whether `key` is present (expired or not).
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every entry, returning how many there were.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.lock();
        let count = entries.len();
        entries.clear();
        count
    }

    /// Remove entries whose age at `now` exceeds the time to live.
    ///
    /// Returns the number of entries removed.
    pub fn evict_expired(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.inserted_at) <= self.ttl);
        before - entries.len()
    }

    /// One eviction pass at the clock's current time.
    ///
    /// Publishes exactly one [`UiEvent::RedrawRequested`] when anything was
    /// removed and nothing otherwise.
    pub fn poll(&self, bus: &EventBus) -> usize {
        let removed = self.evict_expired(self.clock.now());
        if removed > 0 {
            tracing::debug!(removed, remaining = self.len(), "evicted expired entries");
            bus.publish(UiEvent::RedrawRequested);
        }
        removed
    }
}

impl<K: Eq + Hash + Clone, V: Clone, C: Clock> TtlMap<K, V, C> {
    /// Copy of a value.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().get(key).map(|entry| entry.value.clone())
    }

    /// Copy of every entry, for drawing.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.entries
            .lock()
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }
}

impl<K, V, C> TtlMap<K, V, C>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
    C: Clock + Clone,
{
    /// Run [`TtlMap::poll`] every `interval` on a background task.
    pub fn spawn_eviction(&self, interval: Duration, bus: EventBus) -> TaskHandle {
        let map = self.clone();
        BackgroundTask::repeat("ttl-eviction", move |ctx| {
            map.poll(&bus);
            ctx.sleep(interval);
        })
    }
}

impl<K, V, C: Clock + Clone> Clone for TtlMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
            clock: self.clock.clone(),
        }
    }
}

impl<K, V, C: Clock> std::fmt::Debug for TtlMap<K, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlMap")
            .field("len", &self.entries.lock().len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::ManualClock;

    fn redraws(sub: &crate::event::Subscription) -> usize {
        sub.drain()
            .into_iter()
            .filter(|e| *e == UiEvent::RedrawRequested)
            .count()
    }

    #[test]
    fn test_entry_expires_after_threshold_with_one_redraw() {
        let clock = ManualClock::new();
        let bus = EventBus::new();
        let sub = bus.subscribe();
        let map = TtlMap::with_clock(Duration::from_secs(3), clock.clone());
        map.insert((2, 5), "hit");

        clock.advance(Duration::from_secs(1));
        assert_eq!(map.poll(&bus), 0);
        assert!(map.contains_key(&(2, 5)));
        assert_eq!(redraws(&sub), 0);

        clock.advance(Duration::from_secs(3));
        assert_eq!(map.poll(&bus), 1);
        assert!(map.is_empty());
        assert_eq!(redraws(&sub), 1);

        assert_eq!(map.poll(&bus), 0);
        assert_eq!(redraws(&sub), 0);
    }

    #[test]
    fn test_reinsert_refreshes_age() {
        let clock = ManualClock::new();
        let map = TtlMap::with_clock(Duration::from_secs(3), clock.clone());
        map.insert("a", 1);
        clock.advance(Duration::from_secs(2));
        assert_eq!(map.insert("a", 2), Some(1));
        clock.advance(Duration::from_secs(2));
        assert_eq!(map.evict_expired(clock.now()), 0);
        assert_eq!(map.get(&"a"), Some(2));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let map: TtlMap<i32, i32> = TtlMap::new(Duration::from_secs(1));
        map.insert(1, 10);
        assert_eq!(map.remove(&1), Some(10));
        assert_eq!(map.remove(&1), None);
    }

    #[test]
    fn test_eviction_task_requests_redraw() {
        let bus = EventBus::new();
        let sub = bus.subscribe();
        let map = TtlMap::new(Duration::from_millis(5));
        map.insert(1, ());
        let task = map.spawn_eviction(Duration::from_millis(5), bus.clone());
        assert_eq!(
            sub.next_timeout(Duration::from_secs(2)),
            Some(UiEvent::RedrawRequested)
        );
        assert!(map.is_empty());
        task.join();
    }
}
