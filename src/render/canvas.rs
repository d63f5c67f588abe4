//! Canvas: a grid of cells that is both the frame surface and a sprite.
//!
//! The canvas uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order. Every drawing operation takes
//! signed rectangles and clips them against the canvas, so widgets that
//! hang off an edge are drawn partially instead of being rejected.

use super::cell::{Cell, Rgb, Style};
use super::surface::Surface;
use super::text::measure_text;
use crate::layout::{Rect, Size};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A grid of cells.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: i32,
    /// Height in rows.
    height: i32,
}

impl Canvas {
    /// Create a new canvas filled with empty cells.
    ///
    /// Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(Size::new(width, height), Cell::EMPTY)
    }

    /// Create a canvas where every cell is `cell`.
    pub fn filled(size: Size, cell: Cell) -> Self {
        let width = size.width.max(0);
        let height = size.height.max(0);
        Self {
            cells: vec![cell; to_index(width) * to_index(height)],
            width,
            height,
        }
    }

    /// Render text into a sprite exactly as large as the text.
    pub fn from_text(text: &str, style: Style) -> Self {
        let size = measure_text(text);
        let mut canvas = Self::new(size.width, size.height);
        canvas.print(Rect::from_size(size), text, style);
        canvas
    }

    /// Get the canvas width.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Get the canvas height.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Intrinsic size, used when the canvas is a widget's sprite.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some(to_index(y) * to_index(self.width) + to_index(x))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to a cell at (x, y).
    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index_of(x, y).map(|i| &mut self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Read one row back as a string, skipping continuation cells.
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.is_continuation())
            .map(|c| c.symbol)
            .collect()
    }

    /// Clear the entire canvas (fill with empty cells).
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize the canvas, preserving content where possible.
    pub fn resize(&mut self, new_width: i32, new_height: i32) {
        let new_width = new_width.max(0);
        let new_height = new_height.max(0);
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut new_cells = vec![Cell::EMPTY; to_index(new_width) * to_index(new_height)];
        let copy_width = to_index(self.width.min(new_width));
        let copy_height = to_index(self.height.min(new_height));

        for y in 0..copy_height {
            let old_start = y * to_index(self.width);
            let new_start = y * to_index(new_width);
            new_cells[new_start..new_start + copy_width]
                .copy_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        self.cells = new_cells;
        self.width = new_width;
        self.height = new_height;
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(to_index(self.width).max(1))
    }

    fn clipped(&self, area: Rect) -> Option<Rect> {
        area.intersection(&self.bounds())
    }
}

impl Surface for Canvas {
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn fill(&mut self, area: Rect, bg: Rgb) {
        let Some(area) = self.clipped(area) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    *cell = Cell::EMPTY.with_bg(bg);
                }
            }
        }
    }

    fn stroke(&mut self, area: Rect, thickness: i32, color: Rgb) {
        if thickness <= 0 {
            return;
        }
        let Some(visible) = self.clipped(area) else {
            return;
        };
        let inner = area.inflate(-thickness);
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                if inner.contains(x, y) {
                    continue;
                }
                if let Some(cell) = self.get_mut(x, y) {
                    *cell = Cell::EMPTY.with_bg(color);
                }
            }
        }
    }

    fn blit(&mut self, sprite: &Canvas, area: Rect) {
        let source = Rect::new(area.x, area.y, area.width.min(sprite.width), area.height.min(sprite.height));
        let Some(visible) = self.clipped(source) else {
            return;
        };
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                if let Some(cell) = sprite.get(x - area.x, y - area.y) {
                    self.set(x, y, *cell);
                }
            }
        }
    }

    fn print(&mut self, area: Rect, text: &str, style: Style) {
        for (row, line) in (area.y..area.bottom()).zip(text.lines()) {
            let mut col = area.x;
            for grapheme in line.graphemes(true) {
                let width = i32::try_from(UnicodeWidthStr::width(grapheme)).unwrap_or(1);
                if col + width > area.right() {
                    break;
                }
                let symbol = grapheme.chars().next().unwrap_or(' ');
                if let Some(cell) = self.get_mut(col, row) {
                    cell.symbol = symbol;
                    cell.apply(style);
                }
                if width == 2 {
                    if let Some(cell) = self.get_mut(col + 1, row) {
                        cell.symbol = Cell::CONTINUATION;
                        cell.apply(style);
                    }
                }
                col += width;
            }
        }
    }

    fn dim(&mut self, area: Rect, amount: u8) {
        let Some(area) = self.clipped(area) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.fg = cell.fg.darken(amount);
                    cell.bg = cell.bg.darken(amount);
                }
            }
        }
    }

    fn resize(&mut self, width: i32, height: i32) {
        Self::resize(self, width, height);
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[inline]
fn to_index(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_new() {
        let canvas = Canvas::new(80, 24);
        assert_eq!(canvas.width(), 80);
        assert_eq!(canvas.height(), 24);
        assert_eq!(canvas.cells().len(), 80 * 24);
        assert_eq!(Canvas::new(-3, 4).cells().len(), 0);
    }

    #[test]
    fn test_canvas_bounds() {
        let canvas = Canvas::new(80, 24);
        assert!(canvas.get(79, 23).is_some());
        assert!(canvas.get(80, 23).is_none());
        assert!(canvas.get(-1, 0).is_none());
    }

    #[test]
    fn test_print_clips_to_area_and_canvas() {
        let mut canvas = Canvas::new(6, 2);
        canvas.print(Rect::new(-2, 0, 6, 1), "abcdef", Style::default());
        assert_eq!(canvas.row_text(0), "cdef  ");
        canvas.print(Rect::new(3, 1, 10, 1), "xyz123", Style::default());
        assert_eq!(canvas.row_text(1), "   xyz");
    }

    #[test]
    fn test_print_wide_characters() {
        let mut canvas = Canvas::new(5, 1);
        canvas.print(Rect::new(0, 0, 5, 1), "日本", Style::default());
        assert!(canvas.get(1, 0).unwrap().is_continuation());
        assert_eq!(canvas.row_text(0), "日本 ");
    }

    #[test]
    fn test_fill_and_stroke() {
        let mut canvas = Canvas::new(5, 5);
        canvas.fill(Rect::new(0, 0, 5, 5), Rgb::GRAY);
        canvas.stroke(Rect::new(0, 0, 5, 5), 1, Rgb::RED);
        assert_eq!(canvas.get(0, 0).unwrap().bg, Rgb::RED);
        assert_eq!(canvas.get(4, 2).unwrap().bg, Rgb::RED);
        assert_eq!(canvas.get(2, 2).unwrap().bg, Rgb::GRAY);
    }

    #[test]
    fn test_stroke_partially_offscreen() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill(Rect::new(0, 0, 4, 4), Rgb::GRAY);
        canvas.stroke(Rect::new(-1, -1, 4, 4), 1, Rgb::RED);
        assert_eq!(canvas.get(2, 0).unwrap().bg, Rgb::RED);
        assert_eq!(canvas.get(0, 2).unwrap().bg, Rgb::RED);
        assert_eq!(canvas.get(2, 2).unwrap().bg, Rgb::RED);
        assert_eq!(canvas.get(0, 0).unwrap().bg, Rgb::GRAY);
        assert_eq!(canvas.get(1, 1).unwrap().bg, Rgb::GRAY);
        assert_eq!(canvas.get(3, 3).unwrap().bg, Rgb::GRAY);

        // Only the on-screen part of a huge frame is visited.
        canvas.stroke(Rect::new(-100_000, 1, 200_000, 100_000), 1, Rgb::WHITE);
        assert_eq!(canvas.get(3, 0).unwrap().bg, Rgb::GRAY);
        assert_eq!(canvas.get(0, 1).unwrap().bg, Rgb::WHITE);
        assert_eq!(canvas.get(0, 2).unwrap().bg, Rgb::RED);
    }

    #[test]
    fn test_blit_sprite_partially_offscreen() {
        let sprite = Canvas::from_text("ab\ncd", Style::default());
        let mut canvas = Canvas::new(4, 4);
        canvas.blit(&sprite, Rect::new(-1, 3, 2, 2));
        assert_eq!(canvas.row_text(3), "b   ");
        assert_eq!(canvas.row_text(2), "    ");
    }

    #[test]
    fn test_dim() {
        let mut canvas = Canvas::new(2, 1);
        canvas.fill(Rect::new(0, 0, 2, 1), Rgb::WHITE);
        canvas.dim(Rect::new(1, 0, 1, 1), 255);
        assert_eq!(canvas.get(0, 0).unwrap().bg, Rgb::WHITE);
        assert_eq!(canvas.get(1, 0).unwrap().bg, Rgb::BLACK);
    }

    #[test]
    fn test_canvas_resize() {
        let mut canvas = Canvas::new(10, 4);
        canvas.set(5, 2, Cell::new('X'));

        canvas.resize(20, 8);
        assert_eq!(canvas.get(5, 2).unwrap().symbol, 'X');

        canvas.resize(3, 3);
        assert!(canvas.get(5, 2).is_none());
    }
}
