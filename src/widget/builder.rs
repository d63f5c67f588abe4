//! Fluent construction of widgets.

use super::behavior::{Behavior, Container};
use super::node::{BoxStyle, NodeInit, Placement, WidgetKind, WidgetRef};
use crate::error::LayoutError;
use crate::event::EventBus;
use crate::layout::{Anchor, Geometry};
use crate::render::Rgb;

/// Collects a widget's attributes, then creates it.
///
/// Every attribute is optional: position defaults to the owner's content
/// origin, size to the content (leaves) or the children's bounding box
/// (groups). When a parent is set the new widget is appended to it.
///
/// # Example
///
/// ```rust,ignore
/// let a = WidgetBuilder::new("A").size(10, 10).parent(&menu).label("A");
/// let b = WidgetBuilder::new("B")
///     .x_with({
///         let a = a.widget().clone();
///         move |_| Ok(a.rect()?.right() + 2)
///     })
///     .parent(&menu)
///     .label("B");
/// ```
#[derive(Debug)]
pub struct WidgetBuilder {
    name: String,
    placement: Placement,
    style: BoxStyle,
    hidden: bool,
    enabled: bool,
    parent: Option<WidgetRef>,
}

impl WidgetBuilder {
    /// Start a widget with a debug name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            placement: Placement::default(),
            style: BoxStyle::default(),
            hidden: false,
            enabled: true,
            parent: None,
        }
    }

    /// Set the x attribute.
    #[must_use]
    pub fn x(mut self, x: impl Into<Geometry>) -> Self {
        self.placement.x = x.into();
        self
    }

    /// Compute x from the widget.
    #[must_use]
    pub fn x_with<F>(self, provider: F) -> Self
    where
        F: Fn(&WidgetRef) -> Result<i32, LayoutError> + 'static,
    {
        self.x(Geometry::provider(provider))
    }

    /// Set the y attribute.
    #[must_use]
    pub fn y(mut self, y: impl Into<Geometry>) -> Self {
        self.placement.y = y.into();
        self
    }

    /// Compute y from the widget.
    #[must_use]
    pub fn y_with<F>(self, provider: F) -> Self
    where
        F: Fn(&WidgetRef) -> Result<i32, LayoutError> + 'static,
    {
        self.y(Geometry::provider(provider))
    }

    /// Set the width attribute.
    #[must_use]
    pub fn width(mut self, width: impl Into<Geometry>) -> Self {
        self.placement.width = width.into();
        self
    }

    /// Compute the width from the widget's content.
    #[must_use]
    pub fn width_with<F>(self, provider: F) -> Self
    where
        F: Fn(&WidgetRef) -> Result<i32, LayoutError> + 'static,
    {
        self.width(Geometry::provider(provider))
    }

    /// Set the height attribute.
    #[must_use]
    pub fn height(mut self, height: impl Into<Geometry>) -> Self {
        self.placement.height = height.into();
        self
    }

    /// Compute the height from the widget's content.
    #[must_use]
    pub fn height_with<F>(self, provider: F) -> Self
    where
        F: Fn(&WidgetRef) -> Result<i32, LayoutError> + 'static,
    {
        self.height(Geometry::provider(provider))
    }

    /// Literal position.
    #[must_use]
    pub fn position(self, x: i32, y: i32) -> Self {
        self.x(x).y(y)
    }

    /// Literal size.
    #[must_use]
    pub fn size(self, width: i32, height: i32) -> Self {
        self.width(width).height(height)
    }

    /// How x/y map to the rectangle.
    #[must_use]
    pub const fn anchor(mut self, anchor: Anchor) -> Self {
        self.placement.anchor = anchor;
        self
    }

    /// Space between border and content.
    #[must_use]
    pub const fn padding(mut self, padding: i32) -> Self {
        self.placement.padding = if padding < 0 { 0 } else { padding };
        self
    }

    /// Border ring width and colour.
    #[must_use]
    pub const fn border(mut self, width: i32, color: Rgb) -> Self {
        self.placement.border_width = if width < 0 { 0 } else { width };
        self.style.border_color = Some(color);
        self
    }

    /// Fill colour behind the content.
    #[must_use]
    pub const fn background(mut self, color: Rgb) -> Self {
        self.style.background = Some(color);
        self
    }

    /// Start hidden.
    #[must_use]
    pub const fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Start with event handling switched off.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Append the new widget to `parent`.
    #[must_use]
    pub fn parent(mut self, parent: &WidgetRef) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Create a leaf widget driven by `behavior`.
    pub fn build(self, behavior: impl Behavior) -> WidgetRef {
        self.finish(WidgetKind::Leaf, None, Box::new(behavior))
    }

    /// Create a plain group.
    pub fn build_group(self) -> WidgetRef {
        self.build_group_with(Container)
    }

    /// Create a group whose own reactions come from `behavior`.
    pub fn build_group_with(self, behavior: impl Behavior) -> WidgetRef {
        self.finish(WidgetKind::Group, None, Box::new(behavior))
    }

    pub(crate) fn build_root(self, bus: EventBus) -> WidgetRef {
        self.finish(WidgetKind::Root, Some(bus), Box::new(Container))
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) const fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    fn finish(self, kind: WidgetKind, bus: Option<EventBus>, behavior: Box<dyn Behavior>) -> WidgetRef {
        let widget = WidgetRef::from_init(
            NodeInit {
                name: self.name,
                kind,
                bus,
                placement: self.placement,
                style: self.style,
                hidden: self.hidden,
                enabled: self.enabled,
            },
            behavior,
        );
        if let Some(parent) = self.parent {
            parent.add(&widget);
        }
        widget
    }
}
