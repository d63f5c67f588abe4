//! A surface that records draw calls instead of rasterising them.
//!
//! Used by tests to assert which widgets participated in a frame.

use super::canvas::Canvas;
use super::cell::{Rgb, Style};
use super::surface::Surface;
use crate::layout::{Rect, Size};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// A background fill.
    Fill {
        /// Filled area.
        area: Rect,
        /// Fill colour.
        bg: Rgb,
    },
    /// A border ring.
    Stroke {
        /// Outer area of the ring.
        area: Rect,
        /// Ring thickness.
        thickness: i32,
    },
    /// A sprite copy.
    Blit {
        /// Destination area.
        area: Rect,
        /// Size of the sprite that was copied.
        sprite: Size,
    },
    /// Printed text.
    Print {
        /// Destination area.
        area: Rect,
        /// The text.
        text: String,
    },
    /// A dimmed region.
    Dim {
        /// Dimmed area.
        area: Rect,
        /// Dim amount.
        amount: u8,
    },
}

/// Records every call made through [`Surface`].
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Create a recorder reporting the given bounds.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { size: Size::new(width, height), ops: Vec::new() }
    }

    /// All calls recorded so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Texts printed so far, in order.
    pub fn printed(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Print { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Destination areas of all sprite copies.
    pub fn blits(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Blit { area, .. } => Some(*area),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    fn fill(&mut self, area: Rect, bg: Rgb) {
        self.ops.push(DrawOp::Fill { area, bg });
    }

    fn stroke(&mut self, area: Rect, thickness: i32, _color: Rgb) {
        self.ops.push(DrawOp::Stroke { area, thickness });
    }

    fn blit(&mut self, sprite: &Canvas, area: Rect) {
        self.ops.push(DrawOp::Blit { area, sprite: sprite.size() });
    }

    fn print(&mut self, area: Rect, text: &str, _style: Style) {
        self.ops.push(DrawOp::Print { area, text: text.to_string() });
    }

    fn dim(&mut self, area: Rect, amount: u8) {
        self.ops.push(DrawOp::Dim { area, amount });
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.size = Size::new(width, height);
    }
}
