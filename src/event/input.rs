//! Input event types delivered to the widget tree once per frame.

/// Key codes for keyboard input.
///
/// This is a simplified subset of crossterm's `KeyCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Tab key.
    Tab,
    /// Delete key.
    Delete,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button (primary).
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

/// Pointer event details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// X coordinate (column) in surface space.
    pub x: i32,
    /// Y coordinate (row) in surface space.
    pub y: i32,
    /// Mouse button involved (if any).
    pub button: Option<MouseButton>,
}

impl MouseEvent {
    /// Event at a position with the primary button.
    pub const fn primary(x: i32, y: i32) -> Self {
        Self { x, y, button: Some(MouseButton::Left) }
    }

    /// Event at a position with an arbitrary button.
    pub const fn with_button(x: i32, y: i32, button: MouseButton) -> Self {
        Self { x, y, button: Some(button) }
    }
}

/// Events produced by the input backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Mouse button pressed.
    MouseDown(MouseEvent),

    /// Mouse button released.
    MouseUp(MouseEvent),

    /// Mouse moved.
    MouseMove(MouseEvent),

    /// Mouse scroll.
    MouseScroll {
        /// X coordinate.
        x: i32,
        /// Y coordinate.
        y: i32,
        /// Scroll delta (positive = up, negative = down).
        delta: i16,
    },

    /// Surface was resized.
    Resize {
        /// New width in columns.
        width: i32,
        /// New height in rows.
        height: i32,
    },

    /// The user asked to quit (window close, Ctrl+C).
    Quit,

    /// Input backend encountered an error.
    Error(String),
}

impl InputEvent {
    /// Pointer position carried by the event, if any.
    pub const fn position(&self) -> Option<(i32, i32)> {
        match self {
            Self::MouseDown(m) | Self::MouseUp(m) | Self::MouseMove(m) => Some((m.x, m.y)),
            Self::MouseScroll { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }

    /// Primary-button press position.
    pub const fn primary_press(&self) -> Option<(i32, i32)> {
        match self {
            Self::MouseDown(MouseEvent { x, y, button: Some(MouseButton::Left) }) => Some((*x, *y)),
            _ => None,
        }
    }

    /// Primary-button release position.
    pub const fn primary_release(&self) -> Option<(i32, i32)> {
        match self {
            Self::MouseUp(MouseEvent { x, y, button: Some(MouseButton::Left) }) => Some((*x, *y)),
            _ => None,
        }
    }

    /// Whether this event targets a pointer location.
    pub const fn is_pointer(&self) -> bool {
        self.position().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_press_ignores_other_buttons() {
        let right = InputEvent::MouseDown(MouseEvent::with_button(3, 4, MouseButton::Right));
        assert_eq!(right.primary_press(), None);
        assert_eq!(right.position(), Some((3, 4)));

        let left = InputEvent::MouseDown(MouseEvent::primary(3, 4));
        assert_eq!(left.primary_press(), Some((3, 4)));
        assert_eq!(left.primary_release(), None);
        assert!(!InputEvent::Quit.is_pointer());
    }
}
