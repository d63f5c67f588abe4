//! `OutputBuffer`: single-syscall output buffer for ANSI sequences.

use crate::render::{Canvas, Cell, Modifiers, Rgb};
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// A whole frame is accumulated here, then flushed in a single `write()`
/// syscall to prevent terminal flickering.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity) }
    }

    /// Create a buffer sized for a typical terminal frame.
    pub fn new() -> Self {
        Self::with_capacity(64 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Move cursor to (x, y) position (1-indexed for ANSI).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let _ = write!(self.data, "\x1b[{};{}H", y + 1, x + 1);
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Set foreground color (true color).
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Set background color (true color).
    #[inline]
    pub fn set_bg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Emit SGR sequences for a set of modifiers.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        const CODES: [(Modifiers, &[u8]); 5] = [
            (Modifiers::BOLD, b"\x1b[1m"),
            (Modifiers::DIM, b"\x1b[2m"),
            (Modifiers::ITALIC, b"\x1b[3m"),
            (Modifiers::UNDERLINE, b"\x1b[4m"),
            (Modifiers::REVERSED, b"\x1b[7m"),
        ];
        for (flag, code) in CODES {
            if modifiers.contains(flag) {
                self.data.extend_from_slice(code);
            }
        }
    }

    /// Write one cell's symbol; continuation cells of wide glyphs emit nothing.
    #[inline]
    pub fn put_cell(&mut self, cell: &Cell) {
        if cell.is_continuation() {
            return;
        }
        let mut utf8 = [0u8; 4];
        self.data
            .extend_from_slice(cell.symbol.encode_utf8(&mut utf8).as_bytes());
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Append a full redraw of `canvas` (no diffing).
///
/// Colour and modifier sequences are only emitted when they change from
/// the previous cell.
pub fn render_canvas(canvas: &Canvas, output: &mut OutputBuffer) {
    output.cursor_hide();
    output.cursor_move(0, 0);

    let mut last: Option<(Rgb, Rgb, Modifiers)> = None;
    for (y, row) in canvas.rows().enumerate() {
        if y > 0 {
            output.data.extend_from_slice(b"\r\n");
        }
        for cell in row {
            if cell.is_continuation() {
                continue;
            }
            let attrs = (cell.fg, cell.bg, cell.modifiers);
            if last != Some(attrs) {
                // Removing a modifier takes a reset, which also drops colours.
                if last.map_or(true, |(_, _, mods)| mods != cell.modifiers) {
                    output.reset_attrs();
                    output.set_modifiers(cell.modifiers);
                }
                output.set_fg(cell.fg);
                output.set_bg(cell.bg);
                last = Some(attrs);
            }
            output.put_cell(cell);
        }
    }

    output.reset_attrs();
}
