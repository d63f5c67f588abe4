//! Background task threads with cooperative cancellation.
//!
//! A task runs an action on its own named thread, either once or in an
//! unbounded loop. The loop has no implicit delay: actions pace themselves
//! through [`TaskContext::sleep`], which also wakes early when a stop is
//! requested. Every task is owned by a [`TaskHandle`]; dropping the handle
//! requests a stop that the loop honours at its next iteration.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// View of its own task handed to a running action.
pub struct TaskContext {
    /// Set once a stop has been requested.
    stop: Arc<AtomicBool>,
    /// Wakes an interruptible sleep early.
    wake_rx: Receiver<()>,
    /// Keeps the wake channel connected after the handle is detached.
    _wake_tx: Sender<()>,
}

impl TaskContext {
    /// Whether a stop has been requested.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Sleep for `duration` unless a stop arrives first.
    ///
    /// Returns `true` when the full duration elapsed and the task should
    /// keep going, `false` when it was stopped.
    pub fn sleep(&self, duration: Duration) -> bool {
        if self.is_stopped() {
            return false;
        }
        if let Err(RecvTimeoutError::Disconnected) = self.wake_rx.recv_timeout(duration) {
            return false;
        }
        !self.is_stopped()
    }
}

/// Spawner for background work.
#[derive(Debug, Clone, Copy)]
pub struct BackgroundTask;

impl BackgroundTask {
    /// Run `action` exactly once on a new thread.
    pub fn run<F>(name: &str, action: F) -> TaskHandle
    where
        F: FnOnce(&TaskContext) + Send + 'static,
    {
        let mut action = Some(action);
        Self::spawn(name, false, move |ctx| {
            if let Some(action) = action.take() {
                action(ctx);
            }
        })
    }

    /// Run `action` in a loop until the handle stops the task.
    pub fn repeat<F>(name: &str, action: F) -> TaskHandle
    where
        F: FnMut(&TaskContext) + Send + 'static,
    {
        Self::spawn(name, true, action)
    }

    /// Spawn a task thread.
    ///
    /// With `repetitive` set the action is invoked back to back, checking
    /// for a stop request before every iteration. Otherwise it runs once.
    /// A panic inside the action is caught at the thread boundary and
    /// logged; it ends only this task and is never restarted.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn<F>(name: &str, repetitive: bool, mut action: F) -> TaskHandle
    where
        F: FnMut(&TaskContext) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let finished = Arc::new(AtomicBool::new(false));
        let (wake_tx, wake_rx) = bounded(1);

        let ctx = TaskContext {
            stop: stop.clone(),
            wake_rx,
            _wake_tx: wake_tx.clone(),
        };
        let finished_clone = finished.clone();
        let task_name = name.to_string();

        let thread = thread::Builder::new()
            .name(format!("dungeon-task-{name}"))
            .spawn(move || {
                tracing::info!(task = %task_name, repetitive, "task started");
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    if repetitive {
                        while !ctx.is_stopped() {
                            action(&ctx);
                        }
                    } else if !ctx.is_stopped() {
                        action(&ctx);
                    }
                }));
                match outcome {
                    Ok(()) => tracing::info!(task = %task_name, "task finished"),
                    Err(payload) => tracing::error!(
                        task = %task_name,
                        panic = %panic_message(payload.as_ref()),
                        "task panicked; it will not be restarted"
                    ),
                }
                finished_clone.store(true, Ordering::Release);
            })
            .expect("Failed to spawn background task thread");

        TaskHandle {
            name: name.to_string(),
            thread: Some(thread),
            stop,
            finished,
            wake: wake_tx,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Owner of a running task.
///
/// Dropping the handle requests a stop; use [`TaskHandle::detach`] to let
/// the task run unsupervised instead.
#[must_use = "dropping a TaskHandle stops the task"]
pub struct TaskHandle {
    /// Task name, for logs.
    name: String,
    /// Thread handle; `None` once joined or detached.
    thread: Option<JoinHandle<()>>,
    /// Stop request flag shared with the context.
    stop: Arc<AtomicBool>,
    /// Set by the thread when the action returned or panicked.
    finished: Arc<AtomicBool>,
    /// Interrupts a sleeping action.
    wake: Sender<()>,
}

impl TaskHandle {
    /// Task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Request a stop; a sleeping action wakes immediately.
    pub fn stop(&self) {
        if !self.stop.swap(true, Ordering::AcqRel) {
            tracing::debug!(task = %self.name, "stop requested");
        }
        let _ = self.wake.try_send(());
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Whether the task thread has completed.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Request a stop and wait for the thread to exit.
    pub fn join(mut self) {
        self.stop();
        self.wait_thread();
    }

    /// Wait for the thread to exit on its own, without requesting a stop.
    pub fn wait(mut self) {
        self.wait_thread();
    }

    /// Let the task run to completion without an owner.
    pub fn detach(mut self) {
        self.thread.take();
    }

    fn wait_thread(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("name", &self.name)
            .field("stopped", &self.is_stopped())
            .field("finished", &self.is_finished())
            .finish()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.stop();
        }
    }
}
