//! # Dungeon UI
//!
//! A retained-mode widget and layout engine for terminal game clients.
//!
//! Screens are built as a tree of widgets whose geometry may be declared
//! relative to widgets constructed earlier. Geometry is resolved lazily
//! and cached until invalidated; the root [`Group`] routes input through
//! the tree each frame and draws it in insertion order, while background
//! tasks evict timed overlay state off the main thread.
//!
//! ## Core Concepts
//!
//! - **Lazy geometry**: literal values or provider functions, resolved on demand
//! - **Construction order**: a provider may only read widgets built before its own
//! - **Auto-sized groups**: a group without an explicit size wraps its children
//! - **Click routing**: topmost child first, press and release inside to click
//! - **Background tasks**: one-shot or repeating threads with prompt stop
//!
//! ## Example
//!
//! ```rust,ignore
//! use dungeon_ui::{Canvas, Group, WidgetBuilder};
//!
//! let mut screen = Group::new(Canvas::new(80, 24));
//! let menu = WidgetBuilder::new("Menu").position(10, 4).padding(1).group();
//! let play = WidgetBuilder::new("Menu-Play").parent(&menu).button("Play");
//! play.on_click(|_| tracing::info!("play"));
//! screen.add(&menu);
//! screen.draw();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod logging;
pub mod render;
pub mod task;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use config::UiConfig;
pub use error::{LayoutError, UiError};
pub use event::{EventBus, InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent, UiEvent};
pub use layout::{Anchor, Geometry, Rect, Size};
pub use render::{Canvas, Rgb, Style, Surface};
pub use task::{BackgroundTask, DelayedClear, TaskHandle, TtlMap, UpdateGate};
pub use terminal::TerminalSession;
pub use widget::{
    Alert, Button, DropMenu, Group, Image, InputBox, Label, WidgetBuilder, WidgetRef, WidgetsGroup,
};
