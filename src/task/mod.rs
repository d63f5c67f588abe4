//! Background work that runs beside the frame loop.
//!
//! Widgets live on the frame-loop thread; tasks never touch them. Tasks
//! share state through thread-safe containers ([`TtlMap`], [`UpdateGate`])
//! and ask the frame loop to redraw through the [`crate::event::EventBus`].
//!
//! - [`BackgroundTask`]: fire-once or repeating thread with a stop signal
//! - [`TtlMap`]: shared map with time-based eviction
//! - [`UpdateGate`]: lock-wait retry for mutually exclusive updates
//! - [`DelayedClear`]: clear shared markers after a delay

mod background;
mod clock;
mod delayed;
mod gate;
mod ttl;

pub use background::{BackgroundTask, TaskContext, TaskHandle};
pub use clock::{Clock, ManualClock, SystemClock};
pub use delayed::DelayedClear;
pub use gate::{GateGuard, UpdateGate};
pub use ttl::TtlMap;
