//! Render module: the drawing backend widgets paint through.
//!
//! This module contains:
//! - [`Surface`]: the trait every render target implements
//! - [`Canvas`]: a cell grid used both as the frame target and as sprites
//! - [`Cell`], [`Rgb`], [`Style`], [`Modifiers`]: cell contents and styling
//! - [`measure_text`]: intrinsic text size in terminal columns
//! - [`RecordingSurface`]: a call recorder for tests

mod canvas;
mod cell;
pub mod recording;
mod surface;
mod text;

pub use canvas::Canvas;
pub use cell::{Cell, Modifiers, Rgb, Style};
pub use recording::{DrawOp, RecordingSurface};
pub use surface::Surface;
pub use text::{line_width, measure_text, wrap_text};

/// A pre-rendered block of cells used as image content.
pub type Sprite = Canvas;
