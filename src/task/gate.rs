//! Lock-wait retry for updates that must not run concurrently.
//!
//! An update that arrives while another holds the gate is not dropped: a
//! fire-once task sleeps, rechecks the gate and runs the update as soon
//! as it is free. There is no queueing order and no backoff, so a gate
//! that is held continuously starves waiting updates.

use super::background::{BackgroundTask, TaskHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A boolean lock plus the polling interval used by waiting updates.
#[derive(Debug, Clone)]
pub struct UpdateGate {
    locked: Arc<AtomicBool>,
    retry_interval: Duration,
}

/// Holds an [`UpdateGate`] locked until dropped.
#[derive(Debug)]
pub struct GateGuard {
    locked: Arc<AtomicBool>,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        self.locked.store(false, Ordering::Release);
    }
}

impl UpdateGate {
    /// Create an unlocked gate.
    pub fn new(retry_interval: Duration) -> Self {
        Self {
            locked: Arc::new(AtomicBool::new(false)),
            retry_interval,
        }
    }

    /// Whether an update currently holds the gate.
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Take the gate if it is free.
    pub fn try_lock(&self) -> Option<GateGuard> {
        self.locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GateGuard { locked: Arc::clone(&self.locked) })
    }

    /// Run `update` while holding the gate.
    ///
    /// When the gate is free the update runs on the calling thread and
    /// `None` is returned. Otherwise a retry task is spawned that runs the
    /// update exactly once after the gate clears; dropping the returned
    /// handle abandons the retry.
    #[must_use = "dropping the retry handle abandons the pending update"]
    pub fn request<F>(&self, update: F) -> Option<TaskHandle>
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(_guard) = self.try_lock() {
            update();
            return None;
        }

        tracing::debug!(retry_ms = self.retry_interval.as_millis(), "gate busy, deferring update");
        let gate = self.clone();
        Some(BackgroundTask::run("gate-retry", move |ctx| loop {
            if let Some(_guard) = gate.try_lock() {
                update();
                return;
            }
            if !ctx.sleep(gate.retry_interval) {
                tracing::debug!("deferred update abandoned");
                return;
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_free_gate_runs_inline() {
        let gate = UpdateGate::new(Duration::from_millis(1));
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        assert!(gate.request(move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
        .is_none());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!gate.is_locked());
    }

    #[test]
    fn test_busy_gate_retries_once_after_release() {
        let gate = UpdateGate::new(Duration::from_millis(2));
        let guard = gate.try_lock().unwrap();
        assert!(gate.try_lock().is_none());

        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let retry = gate
            .request(move || {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        drop(guard);
        retry.wait();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!gate.is_locked());
    }

    #[test]
    fn test_dropping_retry_abandons_update() {
        let gate = UpdateGate::new(Duration::from_millis(2));
        let _guard = gate.try_lock().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let retry = gate.request(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        drop(retry);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
