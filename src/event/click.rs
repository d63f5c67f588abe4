//! Press/release click detection.

use super::input::InputEvent;
use crate::layout::Rect;

/// Tracks whether a primary press started inside a widget.
///
/// A click is a primary press inside the widget followed by a primary
/// release that is still inside it. Any other release clears the press
/// without producing a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickTracker {
    pressed: bool,
}

impl ClickTracker {
    /// Create a tracker with no press in progress.
    pub const fn new() -> Self {
        Self { pressed: false }
    }

    /// Whether a press that started inside the widget is being held.
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one event; returns `true` exactly when a click completes.
    ///
    /// `area` is the widget's rectangle in the same space as the event
    /// positions (the global rectangle).
    pub fn track(&mut self, event: &InputEvent, area: Rect) -> bool {
        if let Some((x, y)) = event.primary_press() {
            if area.contains(x, y) {
                self.pressed = true;
            }
            return false;
        }
        if let InputEvent::MouseUp(mouse) = event {
            let was_pressed = std::mem::take(&mut self.pressed);
            return was_pressed && event.primary_release().is_some() && area.contains(mouse.x, mouse.y);
        }
        false
    }

    /// Drop any press in progress.
    pub const fn reset(&mut self) {
        self.pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{MouseButton, MouseEvent};

    const AREA: Rect = Rect::new(10, 10, 5, 3);

    fn down(x: i32, y: i32) -> InputEvent {
        InputEvent::MouseDown(MouseEvent::primary(x, y))
    }

    fn up(x: i32, y: i32) -> InputEvent {
        InputEvent::MouseUp(MouseEvent::primary(x, y))
    }

    #[test]
    fn test_press_and_release_inside_clicks_once() {
        let mut tracker = ClickTracker::new();
        assert!(!tracker.track(&down(11, 11), AREA));
        assert!(tracker.is_pressed());
        assert!(tracker.track(&up(12, 11), AREA));
        assert!(!tracker.is_pressed());
        // A second release without a new press does nothing.
        assert!(!tracker.track(&up(12, 11), AREA));
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut tracker = ClickTracker::new();
        tracker.track(&down(11, 11), AREA);
        assert!(!tracker.track(&up(30, 30), AREA));
        assert!(!tracker.is_pressed());
        // Coming back inside does not resurrect the press.
        assert!(!tracker.track(&up(11, 11), AREA));
    }

    #[test]
    fn test_press_outside_never_clicks() {
        let mut tracker = ClickTracker::new();
        tracker.track(&down(0, 0), AREA);
        assert!(!tracker.track(&up(11, 11), AREA));
    }

    #[test]
    fn test_secondary_button_release_clears_without_click() {
        let mut tracker = ClickTracker::new();
        tracker.track(&down(11, 11), AREA);
        let right_up = InputEvent::MouseUp(MouseEvent::with_button(11, 11, MouseButton::Right));
        assert!(!tracker.track(&right_up, AREA));
        assert!(!tracker.is_pressed());
    }
}
