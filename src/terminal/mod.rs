//! Terminal module: the crossterm backend for a live screen.
//!
//! - [`TerminalSession`]: raw mode, alternate screen, frame pacing
//! - [`InputActor`]: input thread feeding [`crate::InputEvent`]s
//! - [`OutputBuffer`] / [`render_canvas`]: ANSI encoding of a [`crate::Canvas`]

mod input;
mod output;
mod session;

pub use input::{convert_event, InputActor};
pub use output::{render_canvas, OutputBuffer};
pub use session::TerminalSession;
