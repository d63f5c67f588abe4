//! Transient popup dismissed by clicking elsewhere.

use super::behavior::{Behavior, EventCx, Response};
use super::builder::WidgetBuilder;
use super::node::{WeakWidget, WidgetRef};
use crate::event::{InputEvent, UiEvent};
use std::any::Any;

/// Dismiss logic of a [`DropMenu`].
#[derive(Debug, Default)]
pub struct DropMenuState {
    /// Presses on this widget never dismiss the menu.
    exempt: Option<WeakWidget>,
}

impl DropMenuState {
    fn is_exempt(&self, x: i32, y: i32) -> bool {
        self.exempt
            .as_ref()
            .and_then(WeakWidget::upgrade)
            .and_then(|widget| widget.global_rect().ok())
            .is_some_and(|rect| rect.contains(x, y))
    }
}

impl Behavior for DropMenuState {
    fn on_event(&mut self, cx: &mut EventCx<'_>, event: &InputEvent) -> Response {
        let Some((x, y)) = event.primary_press() else {
            return Response::IGNORED;
        };
        if cx.global_rect().contains(x, y) {
            return Response::CONSUMED;
        }
        if self.is_exempt(x, y) {
            return Response::IGNORED;
        }

        let widget = cx.widget();
        close(widget);
        cx.publish(UiEvent::Dismissed { source: widget.id(), name: widget.name().to_string() });
        Response::IGNORED
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
    tracing::debug!(widget = %widget.name(), "drop menu closed");
}

super::widget_handle! {
    /// A popup group that closes itself on an outside primary press.
    ///
    /// The menu starts closed (hidden and disabled). While open, presses
    /// inside it are not seen by widgets beneath, and a primary press
    /// outside closes it and publishes a [`UiEvent::Dismissed`]. Presses on
    /// the exempt widget, usually the control that opens the menu, are
    /// left alone.
    DropMenu
}

impl DropMenu {
    /// Place the top-left corner at `point` (owner content space), then
    /// show and enable the menu.
    pub fn open(&self, point: (i32, i32)) {
        self.0.set_position(point.0, point.1);
        self.0.show();
        self.0.enable();
        tracing::debug!(widget = %self.0.name(), x = point.0, y = point.1, "drop menu opened");
    }

    /// Hide and disable the menu.
    pub fn close(&self) {
        close(&self.0);
    }

    /// Whether the menu is shown and accepting input.
    pub fn is_open(&self) -> bool {
        !self.0.is_hidden() && self.0.is_enabled()
    }

    /// Exempt a widget from the outside-press check.
    pub fn set_exempt(&self, widget: Option<&WidgetRef>) {
        let exempt = widget.map(WidgetRef::downgrade);
        self.0
            .with_behavior_mut(|state: &mut DropMenuState| state.exempt = exempt);
    }
}

impl WidgetBuilder {
    /// Create a closed [`DropMenu`].
    pub fn drop_menu(self) -> DropMenu {
        DropMenu(self.hidden(true).disabled().build_group_with(DropMenuState::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseEvent;
    use crate::render::RecordingSurface;
    use crate::widget::Group;
    use std::cell::Cell;
    use std::rc::Rc;

    fn press(x: i32, y: i32) -> InputEvent {
        InputEvent::MouseDown(MouseEvent::primary(x, y))
    }

    fn menu_in(group: &Group<RecordingSurface>) -> DropMenu {
        let menu = WidgetBuilder::new("ItemMenu").padding(1).parent(group.root()).drop_menu();
        WidgetBuilder::new("Use").parent(&menu).button("Use");
        WidgetBuilder::new("Drop").y(1).parent(&menu).button("Drop");
        menu
    }

    #[test]
    fn test_starts_closed() {
        let group = Group::new(RecordingSurface::new(60, 20));
        let menu = menu_in(&group);
        assert!(!menu.is_open());
        assert!(menu.is_hidden());
    }

    #[test]
    fn test_outside_press_closes_and_inside_press_keeps_open() {
        let mut group = Group::new(RecordingSurface::new(60, 20));
        let events = group.subscribe();
        let menu = menu_in(&group);

        menu.open((10, 4));
        assert!(menu.is_open());
        assert_eq!(menu.global_rect().unwrap(), crate::Rect::new(10, 4, 6, 4));

        group.handle_event(&press(11, 5));
        assert!(menu.is_open());

        group.handle_event(&press(40, 15));
        assert!(!menu.is_open());
        assert!(menu.is_hidden());
        assert_eq!(
            events.drain(),
            vec![UiEvent::Dismissed { source: menu.id(), name: "ItemMenu".into() }]
        );
    }

    #[test]
    fn test_inside_press_does_not_reach_widgets_beneath() {
        let mut group = Group::new(RecordingSurface::new(60, 20));
        let beneath = WidgetBuilder::new("Field").position(0, 0).size(60, 20).parent(group.root()).button("");
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        beneath.on_click(move |_| c.set(c.get() + 1));
        let menu = menu_in(&group);
        menu.open((10, 4));

        group.handle_event(&press(11, 5));
        group.handle_event(&InputEvent::MouseUp(MouseEvent::primary(11, 5)));
        assert_eq!(clicks.get(), 0);
        assert!(menu.is_open());
    }

    #[test]
    fn test_exempt_widget_does_not_dismiss() {
        let mut group = Group::new(RecordingSurface::new(60, 20));
        let opener = WidgetBuilder::new("Bag").position(30, 0).parent(group.root()).button("Bag");
        let menu = menu_in(&group);
        menu.set_exempt(Some(&opener));
        menu.open((0, 5));

        group.handle_event(&press(31, 0));
        assert!(menu.is_open());

        menu.set_exempt(None);
        group.handle_event(&press(31, 0));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_closed_menu_stays_inert_after_cascading_enable() {
        let mut group = Group::new(RecordingSurface::new(60, 20));
        let events = group.subscribe();
        let screen = WidgetBuilder::new("Screen").parent(group.root()).group();
        let field = WidgetBuilder::new("Field").position(0, 0).size(60, 20).parent(&screen).button("");
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        field.on_click(move |_| c.set(c.get() + 1));
        let menu = WidgetBuilder::new("ItemMenu").position(0, 0).parent(&screen).drop_menu();
        let item = WidgetBuilder::new("Use").parent(&menu).button("Use");
        let item_clicks = Rc::new(Cell::new(0));
        let ic = item_clicks.clone();
        item.on_click(move |_| ic.set(ic.get() + 1));

        screen.disable();
        screen.enable();
        // Hidden but enabled now; still closed as far as input goes.
        assert!(menu.is_hidden() && menu.is_enabled());

        group.handle_event(&press(1, 0));
        group.handle_event(&InputEvent::MouseUp(MouseEvent::primary(1, 0)));
        assert_eq!(clicks.get(), 1);
        assert_eq!(item_clicks.get(), 0);
        assert_eq!(
            events.drain(),
            vec![UiEvent::Clicked { source: field.id(), name: "Field".into() }]
        );

        menu.open((0, 0));
        group.handle_event(&press(1, 0));
        group.handle_event(&InputEvent::MouseUp(MouseEvent::primary(1, 0)));
        assert_eq!(item_clicks.get(), 1);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_visible_but_disabled_menu_neither_reacts_nor_closes() {
        let mut group = Group::new(RecordingSurface::new(60, 20));
        let menu = menu_in(&group);
        menu.open((10, 4));
        menu.disable();

        group.handle_event(&press(40, 15));
        assert!(!menu.is_hidden());
        assert!(!menu.is_enabled());
    }

    #[test]
    fn test_closed_menu_ignores_presses() {
        let mut group = Group::new(RecordingSurface::new(60, 20));
        let events = group.subscribe();
        let menu = menu_in(&group);
        group.handle_event(&press(40, 15));
        assert!(events.drain().is_empty());
        assert!(!menu.is_open());
    }
}
