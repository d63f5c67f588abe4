//! Cell: the unit of terminal display, plus colour and style types.

use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Gray (128, 128, 128)
    pub const GRAY: Self = Self::new(128, 128, 128);
    /// Red (255, 0, 0)
    pub const RED: Self = Self::new(255, 0, 0);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Darken towards black; `amount` 0 keeps the colour, 255 yields black.
    #[inline]
    #[must_use]
    pub const fn darken(self, amount: u8) -> Self {
        const fn channel(c: u8, amount: u8) -> u8 {
            // (c * (255 - amount)) / 255 always fits in u8
            ((c as u16 * (255 - amount as u16)) / 255) as u8
        }
        Self::new(channel(self.r, amount), channel(self.g, amount), channel(self.b, amount))
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Foreground, background and modifiers applied to printed text.
///
/// `None` colours leave whatever is already on the surface untouched.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Style {
    /// Text colour.
    pub fg: Option<Rgb>,
    /// Background colour.
    pub bg: Option<Rgb>,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// Style with only a foreground colour.
    pub const fn fg(color: Rgb) -> Self {
        Self { fg: Some(color), bg: None, modifiers: Modifiers::empty() }
    }

    /// Set the background colour (builder pattern).
    #[must_use]
    pub const fn with_bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set the modifiers (builder pattern).
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A single terminal cell.
///
/// Wide (two-column) symbols occupy their own cell plus a continuation cell
/// to the right whose `symbol` is `'\0'`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    /// The displayed symbol.
    pub symbol: char,
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Text modifiers (bold, italic, etc.).
    pub modifiers: Modifiers,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space character with default colors).
    pub const EMPTY: Self = Self {
        symbol: ' ',
        fg: Rgb::WHITE,
        bg: Rgb::BLACK,
        modifiers: Modifiers::empty(),
    };

    /// Marker symbol for the right half of a wide character.
    pub const CONTINUATION: char = '\0';

    /// Create a new cell with default colors.
    #[inline]
    pub const fn new(symbol: char) -> Self {
        Self { symbol, ..Self::EMPTY }
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.symbol == Self::CONTINUATION
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Apply a style on top of this cell.
    #[inline]
    pub fn apply(&mut self, style: Style) {
        if let Some(fg) = style.fg {
            self.fg = fg;
        }
        if let Some(bg) = style.bg {
            self.bg = bg;
        }
        self.modifiers = style.modifiers;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex_and_darken() {
        let c = Rgb::from(0x80_40_20);
        assert_eq!(c, Rgb::new(0x80, 0x40, 0x20));
        assert_eq!(c.darken(0), c);
        assert_eq!(c.darken(255), Rgb::BLACK);
        assert_eq!(Rgb::WHITE.darken(100), Rgb::new(155, 155, 155));
    }

    #[test]
    fn test_cell_apply_keeps_unset_colours() {
        let mut cell = Cell::new('x').with_bg(Rgb::RED);
        cell.apply(Style::fg(Rgb::GRAY).with_modifiers(Modifiers::BOLD));
        assert_eq!(cell.fg, Rgb::GRAY);
        assert_eq!(cell.bg, Rgb::RED);
        assert_eq!(cell.modifiers, Modifiers::BOLD);
    }
}
