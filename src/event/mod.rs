//! Event routing: input events, click detection and the notification bus.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  InputEvent   ┌────────────┐  Response   ┌──────────┐
//! │ Input Thread │ ────────────▶ │ Group root │ ──────────▶ │ children │
//! └──────────────┘               └────────────┘  (topmost   └──────────┘
//!                                      │          first)         │
//!                                      │ UiEvent                 │ clicks
//!                                      ▼                         ▼
//!                                ┌─────────────────────────────────┐
//!                                │            EventBus             │
//!                                └─────────────────────────────────┘
//! ```

mod bus;
mod click;
mod input;

pub use bus::{EventBus, Subscription, UiEvent};
pub use click::ClickTracker;
pub use input::{InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent};
