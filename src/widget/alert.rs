//! Modal-looking message box.

use super::behavior::{Behavior, EventCx, Response};
use super::builder::WidgetBuilder;
use super::label::Label;
use super::node::WidgetRef;
use crate::error::LayoutError;
use crate::event::{InputEvent, UiEvent};
use crate::layout::{Anchor, Geometry, Rect, Size};
use crate::render::Surface;
use std::any::Any;

/// Backdrop and dismiss settings of an [`Alert`].
#[derive(Debug, Default)]
pub struct AlertState {
    /// Dim applied to the whole surface below the alert.
    fogging: Option<u8>,
    /// Close on a primary press outside the alert.
    dismiss_on_outside: bool,
}

impl Behavior for AlertState {
    fn paint_under(&self, surface: &mut dyn Surface, _global: Rect) {
        if let Some(amount) = self.fogging {
            let bounds = surface.bounds();
            surface.dim(bounds, amount);
        }
    }

    fn on_event(&mut self, cx: &mut EventCx<'_>, event: &InputEvent) -> Response {
        if !event.is_pointer() {
            return Response::IGNORED;
        }
        if let Some((x, y)) = event.primary_press() {
            if self.dismiss_on_outside && !cx.global_rect().contains(x, y) {
                let widget = cx.widget();
                close(widget);
                cx.publish(UiEvent::Dismissed { source: widget.id(), name: widget.name().to_string() });
            }
        }
        Response::CONSUMED
    }

    fn inert_while_hidden(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn close(widget: &WidgetRef) {
    widget.hide();
    widget.disable();
    tracing::debug!(widget = %widget.name(), "alert closed");
}

super::widget_handle! {
    /// A group centred in its parent that swallows pointer input while shown.
    ///
    /// The alert starts closed. Disabling the layers beneath it while it
    /// is open is up to the caller.
    Alert
}

impl Alert {
    /// Show and enable the alert, then re-resolve its layout.
    pub fn open(&self) {
        self.0.show();
        self.0.enable();
        if let Err(err) = self.0.update() {
            tracing::warn!(widget = %self.0.name(), error = %err, "alert opened with broken layout");
        }
    }

    /// Hide and disable the alert.
    pub fn close(&self) {
        close(&self.0);
    }

    /// Whether the alert is shown and accepting input.
    pub fn is_open(&self) -> bool {
        !self.0.is_hidden() && self.0.is_enabled()
    }

    /// Replace the message text and open the alert.
    ///
    /// The message label is created on first use as the alert's first
    /// free-standing child.
    pub fn show_message(&self, text: impl Into<String>) {
        let text = text.into();
        match self.message_label() {
            Some(label) => label.set_text(text),
            None => {
                WidgetBuilder::new(format!("{}-Message", self.0.name()))
                    .parent(&self.0)
                    .label(text);
            }
        }
        self.open();
    }

    /// The message label, once a message was shown.
    pub fn message_label(&self) -> Option<Label> {
        let name = format!("{}-Message", self.0.name());
        self.0
            .children()
            .into_iter()
            .find(|child| child.name() == name)
            .map(Label)
    }

    /// Dim the surface by `amount` behind the alert, or not at all.
    pub fn set_fogging(&self, amount: Option<u8>) {
        self.0.with_behavior_mut(|state: &mut AlertState| state.fogging = amount);
    }

    /// Close on a primary press outside the alert.
    pub fn set_dismiss_on_outside(&self, dismiss: bool) {
        self.0
            .with_behavior_mut(|state: &mut AlertState| state.dismiss_on_outside = dismiss);
    }
}

/// Centre of the owner's content along one axis.
///
/// Owners whose size depends on their children, the alert included, cannot
/// be read while they resolve; `fallback` stands in for them and for a
/// missing owner.
fn owner_center(
    widget: &WidgetRef,
    extent: fn(&WidgetRef) -> Result<i32, LayoutError>,
    fallback: i32,
) -> Result<i32, LayoutError> {
    let Some(owner) = widget.owner() else {
        return Ok(fallback / 2);
    };
    match extent(&owner) {
        Ok(extent) => Ok((extent - 2 * owner.inset()) / 2),
        Err(LayoutError::Cycle { .. }) => {
            tracing::trace!(widget = %widget.name(), owner = %owner.name(), "alert centred on fallback size");
            Ok(fallback / 2)
        }
        Err(err) => Err(err),
    }
}

impl WidgetBuilder {
    /// Create a closed [`Alert`] centred in its owner.
    ///
    /// The centre follows the owner's content size across resizes.
    /// `parent_size` is used while the owner has no size of its own to
    /// offer. Any position set on the builder is replaced.
    pub fn alert(mut self, parent_size: Size) -> Alert {
        let placement = self.placement_mut();
        placement.x = Geometry::provider(move |w| owner_center(w, WidgetRef::width, parent_size.width));
        placement.y = Geometry::provider(move |w| owner_center(w, WidgetRef::height, parent_size.height));
        placement.anchor = Anchor::Center;
        tracing::trace!(widget = %self.name(), ?parent_size, "alert centred");
        Alert(self.hidden(true).disabled().build_group_with(AlertState::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseEvent;
    use crate::render::{DrawOp, RecordingSurface};
    use crate::widget::Group;
    use std::cell::Cell;
    use std::rc::Rc;

    fn press(x: i32, y: i32) -> InputEvent {
        InputEvent::MouseDown(MouseEvent::primary(x, y))
    }

    #[test]
    fn test_show_message_centres_and_opens() {
        let group = Group::new(RecordingSurface::new(40, 20));
        let alert = WidgetBuilder::new("Info").padding(1).parent(group.root()).alert(Size::new(40, 20));
        assert!(!alert.is_open());

        alert.show_message("Saved");
        assert!(alert.is_open());
        assert_eq!(alert.rect().unwrap(), Rect::with_center(20, 10, Size::new(7, 3)));

        alert.show_message("Connection lost");
        assert_eq!(alert.child_count(), 1);
        assert_eq!(alert.message_label().unwrap().text(), "Connection lost");
        assert_eq!(alert.width().unwrap(), 17);
    }

    #[test]
    fn test_centre_follows_owner_resize() {
        let mut group = Group::new(RecordingSurface::new(40, 20));
        let alert = WidgetBuilder::new("Info").padding(1).parent(group.root()).alert(Size::new(40, 20));
        alert.show_message("Saved");
        assert_eq!(alert.rect().unwrap(), Rect::with_center(20, 10, Size::new(7, 3)));

        group.resize(60, 30);
        assert_eq!(alert.rect().unwrap(), Rect::with_center(30, 15, Size::new(7, 3)));
    }

    #[test]
    fn test_centre_inside_padded_owner() {
        let group = Group::new(RecordingSurface::new(40, 20));
        let frame = WidgetBuilder::new("Frame").size(30, 12).padding(1).parent(group.root()).group();
        let alert = WidgetBuilder::new("Info").parent(&frame).alert(Size::new(40, 20));
        alert.show_message("Hi");
        assert_eq!(alert.rect().unwrap(), Rect::with_center(14, 5, Size::new(2, 1)));
    }

    #[test]
    fn test_auto_sized_or_missing_owner_uses_given_size() {
        let group = Group::new(RecordingSurface::new(40, 20));
        let hud = WidgetBuilder::new("Hud").parent(group.root()).group();
        WidgetBuilder::new("Corner").size(50, 30).parent(&hud).button("");
        let alert = WidgetBuilder::new("Info").parent(&hud).alert(Size::new(40, 20));
        alert.show_message("Hi");
        assert_eq!(alert.rect().unwrap(), Rect::with_center(20, 10, Size::new(2, 1)));

        let detached = WidgetBuilder::new("Loose").alert(Size::new(10, 6));
        assert_eq!(detached.rect().unwrap(), Rect::with_center(5, 3, Size::new(0, 0)));
    }

    #[test]
    fn test_closed_alert_stays_inert_after_cascading_enable() {
        let mut group = Group::new(RecordingSurface::new(40, 20));
        let screen = WidgetBuilder::new("Screen").parent(group.root()).group();
        let field = WidgetBuilder::new("Field").position(0, 0).size(40, 20).parent(&screen).button("");
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        field.on_click(move |_| c.set(c.get() + 1));
        let alert = WidgetBuilder::new("Info").parent(&screen).alert(Size::new(40, 20));
        alert.set_dismiss_on_outside(true);

        screen.disable();
        screen.enable();
        assert!(alert.is_enabled());
        assert!(!alert.is_open());

        group.handle_event(&press(1, 0));
        group.handle_event(&InputEvent::MouseUp(MouseEvent::primary(1, 0)));
        assert_eq!(clicks.get(), 1);
        assert!(alert.is_hidden());
    }

    #[test]
    fn test_swallows_pointer_events_while_open() {
        let mut group = Group::new(RecordingSurface::new(40, 20));
        let beneath = WidgetBuilder::new("Play").position(0, 0).parent(group.root()).button("Play");
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        beneath.on_click(move |_| c.set(c.get() + 1));
        let alert = WidgetBuilder::new("Info").parent(group.root()).alert(Size::new(40, 20));

        alert.show_message("Busy");
        group.handle_event(&press(0, 0));
        group.handle_event(&InputEvent::MouseUp(MouseEvent::primary(0, 0)));
        assert_eq!(clicks.get(), 0);
        assert!(alert.is_open());

        alert.close();
        group.handle_event(&press(0, 0));
        group.handle_event(&InputEvent::MouseUp(MouseEvent::primary(0, 0)));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_outside_press_dismisses_when_enabled() {
        let mut group = Group::new(RecordingSurface::new(40, 20));
        let events = group.subscribe();
        let alert = WidgetBuilder::new("Info").parent(group.root()).alert(Size::new(40, 20));
        alert.set_dismiss_on_outside(true);
        alert.show_message("Hello");

        group.handle_event(&press(20, 10));
        assert!(alert.is_open());
        group.handle_event(&press(0, 0));
        assert!(!alert.is_open());
        assert_eq!(
            events.drain(),
            vec![UiEvent::Dismissed { source: alert.id(), name: "Info".into() }]
        );
    }

    #[test]
    fn test_fogging_dims_whole_surface_first() {
        let mut group = Group::new(RecordingSurface::new(40, 20));
        group.set_background(None);
        let alert = WidgetBuilder::new("Info").parent(group.root()).alert(Size::new(40, 20));
        alert.set_fogging(Some(100));
        alert.show_message("Paused");
        group.draw();
        assert_eq!(
            group.surface().ops().first(),
            Some(&DrawOp::Dim { area: Rect::new(0, 0, 40, 20), amount: 100 })
        );
    }
}
