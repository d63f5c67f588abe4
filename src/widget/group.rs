//! Composite widget.

use super::builder::WidgetBuilder;

super::widget_handle! {
    /// A widget owning an ordered sequence of children.
    ///
    /// Children draw in insertion order (later ones on top) and receive
    /// events in reverse insertion order. Without an explicit width or
    /// height the group sizes itself to its children's bounding box plus
    /// its own padding and border on both sides; the size is re-aggregated
    /// on `update`, or after `add`/`remove` when the cache was dropped.
    WidgetsGroup
}

impl WidgetBuilder {
    /// Create a [`WidgetsGroup`].
    pub fn group(self) -> WidgetsGroup {
        WidgetsGroup(self.build_group())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::event::{InputEvent, MouseEvent};
    use crate::layout::{Anchor, Geometry, Rect, Size};
    use crate::render::{DrawOp, RecordingSurface, Rgb};
    use crate::widget::{Group, WidgetRef};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn boxed(name: &str, parent: &WidgetRef, x: i32, y: i32) -> WidgetRef {
        WidgetBuilder::new(name).position(x, y).size(10, 10).parent(parent).build_group()
    }

    #[test]
    fn test_auto_size_covers_children_and_insets() {
        let padding = 3;
        let group = WidgetBuilder::new("Menu").padding(padding).group();
        boxed("A", &group, 0, 0);
        boxed("B", &group, 12, 0);

        let size = group.size().unwrap();
        assert!(size.width >= 22 + 2 * padding);
        assert_eq!(size, Size::new(22 + 2 * padding, 10 + 2 * padding));
    }

    #[test]
    fn test_empty_auto_group_is_just_insets() {
        let group = WidgetBuilder::new("Empty").padding(2).border(1, Rgb::WHITE).group();
        assert_eq!(group.size().unwrap(), Size::new(6, 6));
    }

    #[test]
    fn test_add_and_remove_reaggregate_auto_size() {
        let group = WidgetBuilder::new("Menu").group();
        boxed("A", &group, 0, 0);
        assert_eq!(group.width().unwrap(), 10);

        let b = boxed("B", &group, 20, 0);
        assert_eq!(group.width().unwrap(), 30);

        assert!(group.remove(&b));
        assert_eq!(group.width().unwrap(), 10);
        assert!(b.owner().is_none());
        assert!(!group.remove(&b));
    }

    #[test]
    fn test_explicit_size_is_kept() {
        let group = WidgetBuilder::new("Panel").size(5, 5).group();
        boxed("A", &group, 0, 0);
        assert_eq!(group.size().unwrap(), Size::new(5, 5));
    }

    #[test]
    fn test_child_moves_are_seen_after_update() {
        let group = WidgetBuilder::new("Menu").group();
        let a = boxed("A", &group, 0, 0);
        assert_eq!(group.width().unwrap(), 10);

        a.set_x(5);
        assert_eq!(group.width().unwrap(), 10);
        group.update().unwrap();
        assert_eq!(group.width().unwrap(), 15);
    }

    #[test]
    fn test_provider_reads_earlier_sibling() {
        let group = WidgetBuilder::new("Menu").group();
        let a = boxed("A", &group, 0, 0);
        let b = WidgetBuilder::new("B")
            .x_with({
                let a = a.clone();
                move |_| Ok(a.rect()?.right() + 2)
            })
            .size(10, 10)
            .parent(&group)
            .build_group();

        group.update().unwrap();
        assert_eq!(b.rect().unwrap().x, 12);
        assert_eq!(group.width().unwrap(), 22);
    }

    #[test]
    fn test_forward_reference_is_an_order_error() {
        let group = WidgetBuilder::new("Menu").group();
        let later: Rc<RefCell<Option<WidgetRef>>> = Rc::default();
        let early = WidgetBuilder::new("Early")
            .x_with({
                let later = later.clone();
                move |_| match later.borrow().as_ref() {
                    Some(widget) => Ok(widget.rect()?.right()),
                    None => Ok(0),
                }
            })
            .parent(&group)
            .build_group();
        let late = boxed("Late", &group, 0, 0);
        *later.borrow_mut() = Some(late);

        let err = group.update().unwrap_err();
        assert_eq!(
            err,
            LayoutError::OrderDependency { widget: "Early".into(), dependency: "Late".into() }
        );
        assert!(early.rect().is_err());
    }

    #[test]
    fn test_self_referential_center_is_a_cycle() {
        let widget = WidgetBuilder::new("Spinner")
            .x_with(|w| Ok(w.rect()?.width / 2))
            .size(4, 4)
            .anchor(Anchor::Center)
            .group();
        assert_eq!(widget.rect(), Err(LayoutError::Cycle { widget: "Spinner".into() }));

        // Reading only the already resolved size is fine.
        widget.set_x(Geometry::provider(|w| Ok(w.width()? * 2)));
        assert_eq!(widget.rect().unwrap(), Rect::new(6, -2, 4, 4));
    }

    #[test]
    fn test_child_reading_auto_sized_parent_is_a_cycle() {
        let group = WidgetBuilder::new("Menu").group();
        let weak = group.downgrade();
        WidgetBuilder::new("Child")
            .x_with(move |_| match weak.upgrade() {
                Some(parent) => parent.width(),
                None => Ok(0),
            })
            .parent(&group)
            .label("x");
        assert_eq!(group.update(), Err(LayoutError::Cycle { widget: "Menu".into() }));
    }

    #[test]
    fn test_child_reads_explicit_parent_width() {
        let group = WidgetBuilder::new("Bar").size(30, 3).group();
        let weak = group.downgrade();
        let label = WidgetBuilder::new("Right")
            .x_with(move |w| {
                let parent = weak.upgrade().map_or(Ok(0), |p| p.width())?;
                Ok(parent - w.width()?)
            })
            .parent(&group)
            .label("end");
        assert_eq!(label.rect().unwrap().x, 27);
    }

    #[test]
    fn test_global_rect_sums_ancestor_content_origins() {
        let group = Group::new(RecordingSurface::new(80, 24));
        let outer = WidgetBuilder::new("Outer").position(10, 5).padding(2).border(1, Rgb::WHITE).parent(group.root()).group();
        let inner = WidgetBuilder::new("Inner").position(4, 1).padding(1).parent(&outer).group();
        let leaf = WidgetBuilder::new("Leaf").position(2, 2).size(3, 1).parent(&inner).build_group();

        let local = leaf.rect().unwrap();
        let expected = local.translate(10 + 3 + 4 + 1, 5 + 3 + 1 + 1);
        assert_eq!(leaf.global_rect().unwrap(), expected);
        assert_eq!(expected, Rect::new(20, 12, 3, 1));
    }

    #[test]
    fn test_detached_widget_is_a_no_op() {
        let detached = WidgetBuilder::new("Loose").position(0, 0).button("x");
        let mut surface = RecordingSurface::new(10, 10);
        detached.draw(&mut surface);
        assert!(surface.ops().is_empty());
        let response = detached.handle_event(&InputEvent::MouseDown(MouseEvent::primary(0, 0)));
        assert_eq!(response, crate::widget::Response::IGNORED);
        assert_eq!(
            detached.global_rect(),
            Err(LayoutError::Detached { widget: "Loose".into() })
        );
    }

    #[test]
    fn test_hidden_subtree_is_never_drawn() {
        let mut group = Group::new(RecordingSurface::new(40, 10));
        let menu = WidgetBuilder::new("Menu").parent(group.root()).group();
        WidgetBuilder::new("Title").parent(&menu).label("Title");
        let other = WidgetBuilder::new("Other").position(0, 5).parent(group.root()).label("Other");

        menu.hide();
        group.draw();
        assert_eq!(group.surface().printed(), vec!["Other"]);

        menu.show();
        other.hide();
        group.surface_mut().clear();
        group.draw();
        assert_eq!(group.surface().printed(), vec!["Title"]);
    }

    #[test]
    fn test_draws_in_insertion_order_and_dispatches_in_reverse() {
        let mut group = Group::new(RecordingSurface::new(40, 10));
        let order = Rc::new(RefCell::new(Vec::new()));
        for name in ["Bottom", "Top"] {
            let button = WidgetBuilder::new(name).position(0, 0).parent(group.root()).button(name);
            let order = order.clone();
            button.on_click(move |w| order.borrow_mut().push(w.name().to_string()));
        }

        group.draw();
        assert_eq!(group.surface().printed(), vec!["Bottom", "Top"]);

        group.handle_event(&InputEvent::MouseDown(MouseEvent::primary(0, 0)));
        group.handle_event(&InputEvent::MouseUp(MouseEvent::primary(0, 0)));
        // Ordinary widgets do not stop propagation.
        assert_eq!(*order.borrow(), vec!["Top".to_string(), "Bottom".to_string()]);
    }

    #[test]
    fn test_disable_cascades_and_enable_restores() {
        let group = WidgetBuilder::new("Menu").group();
        let inner = WidgetBuilder::new("Inner").parent(&group).group();
        let leaf = WidgetBuilder::new("Leaf").parent(&inner).label("x");

        group.disable();
        assert!(!inner.is_enabled() && !leaf.is_enabled());
        group.enable();
        assert!(inner.is_enabled() && leaf.is_enabled());
    }

    #[test]
    fn test_disabled_group_is_drawn_but_ignores_input() {
        let mut group = Group::new(RecordingSurface::new(40, 10));
        let menu = WidgetBuilder::new("Menu").parent(group.root()).group();
        let play = WidgetBuilder::new("Play").parent(&menu).button("Play");
        let clicks = Rc::new(RefCell::new(0));
        let c = clicks.clone();
        play.on_click(move |_| *c.borrow_mut() += 1);

        menu.disable();
        group.draw();
        assert_eq!(group.surface().printed(), vec!["Play"]);
        group.handle_event(&InputEvent::MouseDown(MouseEvent::primary(0, 0)));
        group.handle_event(&InputEvent::MouseUp(MouseEvent::primary(0, 0)));
        assert_eq!(*clicks.borrow(), 0);

        menu.enable();
        group.handle_event(&InputEvent::MouseDown(MouseEvent::primary(0, 0)));
        group.handle_event(&InputEvent::MouseUp(MouseEvent::primary(0, 0)));
        assert_eq!(*clicks.borrow(), 1);
    }

    #[test]
    fn test_hidden_plain_group_still_routes_input() {
        let mut group = Group::new(RecordingSurface::new(40, 10));
        let hotkeys = WidgetBuilder::new("Hotkeys").parent(group.root()).group();
        let trigger = WidgetBuilder::new("Trigger").size(4, 1).parent(&hotkeys).button("");
        let clicks = Rc::new(RefCell::new(0));
        let c = clicks.clone();
        trigger.on_click(move |_| *c.borrow_mut() += 1);

        hotkeys.hide();
        group.draw();
        assert!(group.surface().printed().is_empty());
        group.handle_event(&InputEvent::MouseDown(MouseEvent::primary(1, 0)));
        group.handle_event(&InputEvent::MouseUp(MouseEvent::primary(1, 0)));
        assert_eq!(*clicks.borrow(), 1);
    }

    #[test]
    fn test_box_style_draws_background_then_border() {
        let mut group = Group::new(RecordingSurface::new(40, 10));
        group.set_background(None);
        WidgetBuilder::new("Panel")
            .position(1, 1)
            .size(6, 4)
            .background(Rgb::BLACK)
            .border(1, Rgb::RED)
            .parent(group.root())
            .group();
        group.draw();
        assert_eq!(
            group.surface().ops(),
            &[
                DrawOp::Fill { area: Rect::new(1, 1, 6, 4), bg: Rgb::BLACK },
                DrawOp::Stroke { area: Rect::new(1, 1, 6, 4), thickness: 1 },
            ]
        );
    }
}
