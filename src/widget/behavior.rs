//! The per-kind half of a widget.
//!
//! Geometry, visibility, children and dispatch order are the same for
//! every widget and live in the tree node. What differs between a label,
//! a button or a drop-menu is captured by a [`Behavior`]: intrinsic size,
//! how content is painted and how input is interpreted.

use super::node::WidgetRef;
use crate::event::{InputEvent, UiEvent};
use crate::layout::{Rect, Size};
use crate::render::Surface;
use std::any::Any;

/// Outcome of offering an event to a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    /// The widget completed a click; its click handlers run and a
    /// [`UiEvent::Clicked`] is published.
    pub clicked: bool,
    /// Widgets beneath this one must not see the event.
    pub stop_propagation: bool,
}

impl Response {
    /// Nothing happened.
    pub const IGNORED: Self = Self { clicked: false, stop_propagation: false };

    /// A click completed; propagation continues.
    pub const CLICKED: Self = Self { clicked: true, stop_propagation: false };

    /// The event was swallowed.
    pub const CONSUMED: Self = Self { clicked: false, stop_propagation: true };

    /// Combine with a later response.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            clicked: self.clicked || other.clicked,
            stop_propagation: self.stop_propagation || other.stop_propagation,
        }
    }
}

/// Context handed to [`Behavior::on_event`].
pub struct EventCx<'a> {
    widget: &'a WidgetRef,
    global: Rect,
}

impl<'a> EventCx<'a> {
    pub(crate) const fn new(widget: &'a WidgetRef, global: Rect) -> Self {
        Self { widget, global }
    }

    /// The widget receiving the event.
    ///
    /// Its state (visibility, geometry, children) may be changed freely;
    /// only its behavior is borrowed during the call.
    pub const fn widget(&self) -> &WidgetRef {
        self.widget
    }

    /// The widget's rectangle in surface coordinates.
    pub const fn global_rect(&self) -> Rect {
        self.global
    }

    /// Publish on the bus of the root the widget is attached to.
    pub fn publish(&self, event: UiEvent) {
        if let Some(bus) = self.widget.bus() {
            bus.publish(event);
        }
    }
}

/// Kind-specific widget logic.
pub trait Behavior: Any {
    /// Intrinsic content size, excluding padding and border.
    ///
    /// Used when the widget's width or height is [`crate::Geometry::Auto`].
    fn measure(&self) -> Option<Size> {
        None
    }

    /// Paint before the widget's own background, e.g. a backdrop that
    /// covers what is already on the surface.
    fn paint_under(&self, _surface: &mut dyn Surface, _global: Rect) {}

    /// Paint the content. `global` is the whole widget and `content` the
    /// area inside padding and border, both in surface coordinates.
    fn paint(&self, _surface: &mut dyn Surface, _global: Rect, _content: Rect) {}

    /// React to an input event after the widget's children have seen it.
    fn on_event(&mut self, _cx: &mut EventCx<'_>, _event: &InputEvent) -> Response {
        Response::IGNORED
    }

    /// Whether a hidden widget of this kind, children included, ignores
    /// events even while enabled.
    ///
    /// Popups answer `true`: an enable cascading from an ancestor must not
    /// bring a closed popup back to life.
    fn inert_while_hidden(&self) -> bool {
        false
    }

    /// Upcast for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed mutable access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Behavior of plain containers: no content and no reactions.
#[derive(Debug, Default)]
pub struct Container;

impl Behavior for Container {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_merge() {
        assert_eq!(Response::IGNORED.merge(Response::CLICKED), Response::CLICKED);
        let both = Response::CLICKED.merge(Response::CONSUMED);
        assert!(both.clicked && both.stop_propagation);
    }
}
