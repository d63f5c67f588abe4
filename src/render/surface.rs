//! The rendering seam between widgets and a backend.

use super::canvas::Canvas;
use super::cell::{Rgb, Style};
use crate::layout::Rect;

/// A render target widgets draw onto.
///
/// All areas are in surface (global) coordinates and may extend past the
/// surface bounds; implementations clip.
pub trait Surface {
    /// The drawable area, always anchored at the origin.
    fn bounds(&self) -> Rect;

    /// Paint the background of `area`.
    fn fill(&mut self, area: Rect, bg: Rgb);

    /// Paint a border ring `thickness` cells wide just inside `area`.
    fn stroke(&mut self, area: Rect, thickness: i32, color: Rgb);

    /// Copy a pre-rendered sprite to `area`, cropping the sprite to it.
    fn blit(&mut self, sprite: &Canvas, area: Rect);

    /// Print a text line by line starting at the top-left of `area`.
    fn print(&mut self, area: Rect, text: &str, style: Style);

    /// Darken everything inside `area` by `amount` (0-255).
    fn dim(&mut self, area: Rect, amount: u8);

    /// Change the drawable size. Fixed-size targets ignore this.
    fn resize(&mut self, _width: i32, _height: i32) {}
}
