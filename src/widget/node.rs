//! Widget tree nodes.
//!
//! A [`WidgetRef`] is a shared handle to one node of the tree. The owner
//! holds its children strongly and each child points back at its owner
//! weakly, so removing a child from its owner is enough to release it.
//!
//! # Geometry
//!
//! Position and size are [`Geometry`] attributes resolved on first use and
//! cached until invalidated. Resolution runs in two phases:
//!
//! 1. width and height (explicit ones first, then derived ones: content
//!    size for leaves, children's bounding box for groups)
//! 2. x and y, which may read the widget's own size
//!
//! A provider may read its own widget, its ancestors and descendants, and
//! any widget constructed earlier. A read of a later widget fails with
//! [`LayoutError::OrderDependency`]; a read that loops back into a widget
//! still being resolved fails with [`LayoutError::Cycle`].

use super::behavior::{Behavior, EventCx, Response};
use crate::error::LayoutError;
use crate::event::{EventBus, InputEvent, UiEvent};
use crate::layout::{resolver, Anchor, Geometry, Rect, Size};
use crate::render::{Rgb, Surface};
use crate::task::TaskHandle;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a widget, increasing in construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(u64);

impl WidgetId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Content widget without children.
    Leaf,
    /// Composite widget owning an ordered child sequence.
    Group,
    /// Tree root; owns the event bus.
    Root,
}

/// Background and border colours drawn behind a widget's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxStyle {
    /// Fill colour of the whole rectangle.
    pub background: Option<Rgb>,
    /// Border colour; white when unset.
    pub border_color: Option<Rgb>,
}

/// Raw geometry attributes of a widget.
#[derive(Debug, Clone, Default)]
pub(crate) struct Placement {
    pub(crate) x: Geometry,
    pub(crate) y: Geometry,
    pub(crate) width: Geometry,
    pub(crate) height: Geometry,
    pub(crate) anchor: Anchor,
    pub(crate) padding: i32,
    pub(crate) border_width: i32,
}

impl Placement {
    const fn inset(&self) -> i32 {
        self.padding + self.border_width
    }

    const fn is_auto_sized(&self) -> bool {
        self.width.is_auto() || self.height.is_auto()
    }
}

/// Resolved values, valid until invalidated.
#[derive(Debug, Clone, Copy, Default)]
struct Cache {
    width: Option<i32>,
    height: Option<i32>,
    rect: Option<Rect>,
    resolving: bool,
}

/// Mutable per-node state.
struct NodeState {
    owner: Option<WeakWidget>,
    placement: Placement,
    cache: Cache,
    style: BoxStyle,
    hidden: bool,
    enabled: bool,
}

/// Everything a builder hands over to create a node.
pub(crate) struct NodeInit {
    pub(crate) name: String,
    pub(crate) kind: WidgetKind,
    pub(crate) bus: Option<EventBus>,
    pub(crate) placement: Placement,
    pub(crate) style: BoxStyle,
    pub(crate) hidden: bool,
    pub(crate) enabled: bool,
}

type ClickHandler = Rc<dyn Fn(&WidgetRef)>;

/// One node of the widget tree.
pub(crate) struct WidgetNode {
    id: WidgetId,
    name: String,
    kind: WidgetKind,
    /// Present on roots only.
    bus: Option<EventBus>,
    state: RefCell<NodeState>,
    children: RefCell<Vec<WidgetRef>>,
    behavior: RefCell<Box<dyn Behavior>>,
    click_handlers: RefCell<Vec<ClickHandler>>,
    /// Tasks stopped when the widget leaves its owner or is dropped.
    tasks: RefCell<Vec<TaskHandle>>,
}

/// Shared handle to a widget.
///
/// Equality is identity: two handles are equal when they refer to the
/// same node.
#[derive(Clone)]
pub struct WidgetRef(Rc<WidgetNode>);

/// Non-owning handle to a widget.
#[derive(Clone, Default)]
pub struct WeakWidget(Weak<WidgetNode>);

impl WeakWidget {
    /// The widget, if it is still alive.
    pub fn upgrade(&self) -> Option<WidgetRef> {
        self.0.upgrade().map(WidgetRef)
    }
}

impl fmt::Debug for WeakWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(widget) => write!(f, "WeakWidget({widget:?})"),
            None => write!(f, "WeakWidget(dropped)"),
        }
    }
}

impl PartialEq for WidgetRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for WidgetRef {}

impl fmt::Debug for WidgetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.name, self.0.id)
    }
}

// Identity and structure
impl WidgetRef {
    pub(crate) fn from_init(init: NodeInit, behavior: Box<dyn Behavior>) -> Self {
        let node = WidgetNode {
            id: WidgetId::next(),
            name: init.name,
            kind: init.kind,
            bus: init.bus,
            state: RefCell::new(NodeState {
                owner: None,
                placement: init.placement,
                cache: Cache::default(),
                style: init.style,
                hidden: init.hidden,
                enabled: init.enabled,
            }),
            children: RefCell::new(Vec::new()),
            behavior: RefCell::new(behavior),
            click_handlers: RefCell::new(Vec::new()),
            tasks: RefCell::new(Vec::new()),
        };
        let widget = Self(Rc::new(node));
        tracing::trace!(widget = %widget.name(), id = %widget.id(), kind = ?widget.kind(), "widget created");
        widget
    }

    /// Construction-order identity.
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.0.id
    }

    /// Debug name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Structural role.
    #[inline]
    pub fn kind(&self) -> WidgetKind {
        self.0.kind
    }

    /// Whether this is a tree root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.kind == WidgetKind::Root
    }

    /// Non-owning handle.
    pub fn downgrade(&self) -> WeakWidget {
        WeakWidget(Rc::downgrade(&self.0))
    }

    /// The group holding this widget.
    pub fn owner(&self) -> Option<WidgetRef> {
        self.state().owner.as_ref().and_then(WeakWidget::upgrade)
    }

    /// Snapshot of the children in insertion order.
    pub fn children(&self) -> Vec<WidgetRef> {
        self.0.children.borrow().clone()
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    /// Whether `other` is somewhere below this widget.
    pub fn is_ancestor_of(&self, other: &WidgetRef) -> bool {
        let mut current = other.owner();
        while let Some(widget) = current {
            if widget == *self {
                return true;
            }
            current = widget.owner();
        }
        false
    }

    /// The root this widget is attached to.
    pub fn root(&self) -> Option<WidgetRef> {
        let mut current = Some(self.clone());
        while let Some(widget) = current {
            if widget.is_root() {
                return Some(widget);
            }
            current = widget.owner();
        }
        None
    }

    /// Whether the owner chain reaches a root.
    pub fn is_attached(&self) -> bool {
        self.root().is_some()
    }

    /// Event bus of the root this widget is attached to.
    pub fn bus(&self) -> Option<EventBus> {
        self.root().and_then(|root| root.0.bus.clone())
    }

    /// Append `child`, making this widget its owner.
    ///
    /// A child that already belongs to another group moves here. Leaves
    /// cannot own children, and a widget cannot be added below itself.
    pub fn add(&self, child: &WidgetRef) {
        if self.kind() == WidgetKind::Leaf {
            tracing::warn!(widget = %self.name(), child = %child.name(), "leaf widgets cannot own children");
            return;
        }
        if child == self || child.is_ancestor_of(self) {
            tracing::warn!(widget = %self.name(), child = %child.name(), "refusing to create an ownership cycle");
            return;
        }
        if let Some(previous) = child.owner() {
            if previous == *self {
                return;
            }
            previous.detach_child(child);
        }

        child.state_mut().owner = Some(self.downgrade());
        child.invalidate();
        self.0.children.borrow_mut().push(child.clone());
        self.invalidate_aggregate();
        tracing::debug!(widget = %self.name(), child = %child.name(), "child added");
    }

    /// Append several children in order.
    pub fn add_all<'a, I>(&self, children: I)
    where
        I: IntoIterator<Item = &'a WidgetRef>,
    {
        for child in children {
            self.add(child);
        }
    }

    /// Detach `child`, clearing its owner and stopping its adopted tasks.
    ///
    /// Returns `false` if `child` was not a child of this widget.
    pub fn remove(&self, child: &WidgetRef) -> bool {
        if !self.detach_child(child) {
            return false;
        }
        child.stop_tasks();
        tracing::debug!(widget = %self.name(), child = %child.name(), "child removed");
        true
    }

    /// Detach several children.
    pub fn remove_all<'a, I>(&self, children: I)
    where
        I: IntoIterator<Item = &'a WidgetRef>,
    {
        for child in children {
            self.remove(child);
        }
    }

    /// Detach every child.
    pub fn clear_children(&self) {
        let children = std::mem::take(&mut *self.0.children.borrow_mut());
        for child in &children {
            child.state_mut().owner = None;
            child.stop_tasks();
        }
        if !children.is_empty() {
            self.invalidate_aggregate();
            tracing::debug!(widget = %self.name(), removed = children.len(), "children cleared");
        }
    }

    fn detach_child(&self, child: &WidgetRef) -> bool {
        let removed = {
            let mut children = self.0.children.borrow_mut();
            children
                .iter()
                .position(|c| c == child)
                .map(|index| children.remove(index))
        };
        let Some(child) = removed else {
            return false;
        };
        child.state_mut().owner = None;
        self.invalidate_aggregate();
        true
    }

    /// Bind a task to this widget's lifetime.
    ///
    /// The task is stopped when the widget is removed from its owner or
    /// dropped.
    pub fn adopt_task(&self, task: TaskHandle) {
        tracing::debug!(widget = %self.name(), task = %task.name(), "task adopted");
        self.0.tasks.borrow_mut().push(task);
    }

    /// Number of adopted tasks still held.
    pub fn task_count(&self) -> usize {
        self.0.tasks.borrow().len()
    }

    fn stop_tasks(&self) {
        let tasks = std::mem::take(&mut *self.0.tasks.borrow_mut());
        for task in &tasks {
            task.stop();
        }
        for child in self.children() {
            child.stop_tasks();
        }
    }

    #[inline]
    fn state(&self) -> Ref<'_, NodeState> {
        self.0.state.borrow()
    }

    #[inline]
    fn state_mut(&self) -> RefMut<'_, NodeState> {
        self.0.state.borrow_mut()
    }
}

// Visibility and input participation
impl WidgetRef {
    /// Take part in drawing again.
    pub fn show(&self) {
        self.set_hidden(false);
    }

    /// Stop drawing this widget and its subtree.
    pub fn hide(&self) {
        self.set_hidden(true);
    }

    /// Set draw participation.
    pub fn set_hidden(&self, hidden: bool) {
        let previous = std::mem::replace(&mut self.state_mut().hidden, hidden);
        if previous != hidden {
            tracing::debug!(widget = %self.name(), hidden, "visibility changed");
        }
    }

    /// Whether drawing skips this widget.
    pub fn is_hidden(&self) -> bool {
        self.state().hidden
    }

    /// Handle events again, together with every descendant.
    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// Stop handling events, together with every descendant.
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Set event participation for this widget and its subtree.
    pub fn set_enabled(&self, enabled: bool) {
        let previous = std::mem::replace(&mut self.state_mut().enabled, enabled);
        if previous != enabled {
            tracing::debug!(widget = %self.name(), enabled, "input participation changed");
        }
        for child in self.children() {
            child.set_enabled(enabled);
        }
    }

    /// Whether events reach this widget.
    pub fn is_enabled(&self) -> bool {
        self.state().enabled
    }
}

// Geometry attributes
impl WidgetRef {
    /// Replace the x attribute.
    pub fn set_x(&self, x: impl Into<Geometry>) {
        self.state_mut().placement.x = x.into();
        self.invalidate();
    }

    /// Replace the y attribute.
    pub fn set_y(&self, y: impl Into<Geometry>) {
        self.state_mut().placement.y = y.into();
        self.invalidate();
    }

    /// Replace both position attributes.
    pub fn set_position(&self, x: impl Into<Geometry>, y: impl Into<Geometry>) {
        {
            let mut state = self.state_mut();
            state.placement.x = x.into();
            state.placement.y = y.into();
        }
        self.invalidate();
    }

    /// Replace the width attribute.
    pub fn set_width(&self, width: impl Into<Geometry>) {
        self.state_mut().placement.width = width.into();
        self.invalidate();
    }

    /// Replace the height attribute.
    pub fn set_height(&self, height: impl Into<Geometry>) {
        self.state_mut().placement.height = height.into();
        self.invalidate();
    }

    /// Change how x/y map to the rectangle.
    pub fn set_anchor(&self, anchor: Anchor) {
        self.state_mut().placement.anchor = anchor;
        self.invalidate();
    }

    /// Change the padding; negative values count as zero.
    pub fn set_padding(&self, padding: i32) {
        self.state_mut().placement.padding = padding.max(0);
        self.invalidate();
    }

    /// Change the border width; negative values count as zero.
    pub fn set_border_width(&self, border_width: i32) {
        self.state_mut().placement.border_width = border_width.max(0);
        self.invalidate();
    }

    /// Anchor mode.
    pub fn anchor(&self) -> Anchor {
        self.state().placement.anchor
    }

    /// Padding.
    pub fn padding(&self) -> i32 {
        self.state().placement.padding
    }

    /// Border width.
    pub fn border_width(&self) -> i32 {
        self.state().placement.border_width
    }

    /// Offset of the content origin from the top-left corner, on both axes.
    pub fn inset(&self) -> i32 {
        self.state().placement.inset()
    }

    /// Background and border colours.
    pub fn style(&self) -> BoxStyle {
        self.state().style
    }

    /// Replace the background colour.
    pub fn set_background(&self, background: Option<Rgb>) {
        self.state_mut().style.background = background;
    }

    /// Replace the border colour.
    pub fn set_border_color(&self, color: Option<Rgb>) {
        self.state_mut().style.border_color = color;
    }
}

// Resolution
impl WidgetRef {
    /// Resolved rectangle in the owner's content space.
    pub fn rect(&self) -> Result<Rect, LayoutError> {
        resolver::check_read(self)?;
        if let Some(rect) = self.state().cache.rect {
            return Ok(rect);
        }
        self.resolve()
    }

    /// Resolved width. Available to the widget's own x/y providers.
    pub fn width(&self) -> Result<i32, LayoutError> {
        self.dimension(|cache| cache.width)
    }

    /// Resolved height. Available to the widget's own x/y providers.
    pub fn height(&self) -> Result<i32, LayoutError> {
        self.dimension(|cache| cache.height)
    }

    /// Resolved size.
    pub fn size(&self) -> Result<Size, LayoutError> {
        Ok(Size::new(self.width()?, self.height()?))
    }

    /// Rectangle in surface coordinates.
    ///
    /// Adds the content origin of every ancestor up to the root; fails with
    /// [`LayoutError::Detached`] when the owner chain ends elsewhere.
    pub fn global_rect(&self) -> Result<Rect, LayoutError> {
        let mut rect = self.rect()?;
        if self.is_root() {
            return Ok(rect);
        }
        let mut current = self.owner();
        while let Some(ancestor) = current {
            let origin = ancestor.rect()?;
            let inset = ancestor.inset();
            rect = rect.translate(origin.x + inset, origin.y + inset);
            if ancestor.is_root() {
                return Ok(rect);
            }
            current = ancestor.owner();
        }
        Err(LayoutError::Detached { widget: self.name().to_string() })
    }

    /// Area inside padding and border, in surface coordinates.
    pub fn content_rect(&self) -> Result<Rect, LayoutError> {
        Ok(self.global_rect()?.inflate(-self.inset()))
    }

    /// Drop cached geometry of this widget only.
    pub fn invalidate(&self) {
        let mut state = self.state_mut();
        state.cache.width = None;
        state.cache.height = None;
        state.cache.rect = None;
    }

    /// Re-resolve this widget and its subtree from the current attributes.
    ///
    /// Groups re-aggregate their size from their current children. Errors
    /// are logged and returned.
    pub fn update(&self) -> Result<Rect, LayoutError> {
        self.invalidate_subtree();
        let result = self.resolve_subtree();
        if let Err(err) = &result {
            tracing::warn!(widget = %self.name(), error = %err, "layout update failed");
        }
        result
    }

    fn invalidate_subtree(&self) {
        self.invalidate();
        for child in self.children() {
            child.invalidate_subtree();
        }
    }

    fn resolve_subtree(&self) -> Result<Rect, LayoutError> {
        let rect = self.rect()?;
        for child in self.children() {
            child.resolve_subtree()?;
        }
        Ok(rect)
    }

    fn invalidate_aggregate(&self) {
        if self.state().placement.is_auto_sized() {
            self.invalidate();
        }
    }

    fn cycle(&self) -> LayoutError {
        LayoutError::Cycle { widget: self.name().to_string() }
    }

    fn dimension(&self, pick: fn(&Cache) -> Option<i32>) -> Result<i32, LayoutError> {
        resolver::check_read(self)?;
        {
            let state = self.state();
            if let Some(value) = pick(&state.cache) {
                return Ok(value);
            }
            if state.cache.resolving {
                return Err(self.cycle());
            }
        }
        self.resolve()?;
        pick(&self.state().cache).ok_or_else(|| self.cycle())
    }

    fn resolve(&self) -> Result<Rect, LayoutError> {
        {
            let mut state = self.state_mut();
            if state.cache.resolving {
                return Err(self.cycle());
            }
            state.cache.resolving = true;
        }

        let result = {
            let _scope = resolver::enter(self);
            self.compute_rect()
        };

        let mut state = self.state_mut();
        state.cache.resolving = false;
        match result {
            Ok(rect) => {
                state.cache.rect = Some(rect);
                tracing::trace!(widget = %self.name(), ?rect, "resolved");
            }
            Err(_) => {
                state.cache.width = None;
                state.cache.height = None;
            }
        }
        result
    }

    fn compute_rect(&self) -> Result<Rect, LayoutError> {
        let (width_attr, height_attr) = {
            let state = self.state();
            (state.placement.width.clone(), state.placement.height.clone())
        };

        // Providers never run with the state borrowed; they may read it.
        let width = width_attr.resolve(self)?;
        if width.is_some() {
            self.state_mut().cache.width = width;
        }
        let height = height_attr.resolve(self)?;
        if height.is_some() {
            self.state_mut().cache.height = height;
        }

        let size = if let (Some(width), Some(height)) = (width, height) {
            Size::new(width, height)
        } else {
            let derived = self.derived_size()?;
            let size = Size::new(width.unwrap_or(derived.width), height.unwrap_or(derived.height));
            let mut state = self.state_mut();
            state.cache.width = Some(size.width);
            state.cache.height = Some(size.height);
            size
        };

        let (x_attr, y_attr, anchor) = {
            let state = self.state();
            (state.placement.x.clone(), state.placement.y.clone(), state.placement.anchor)
        };
        let x = x_attr.resolve(self)?.unwrap_or(0);
        let y = y_attr.resolve(self)?.unwrap_or(0);

        Ok(match anchor {
            Anchor::TopLeft => Rect::new(x, y, size.width, size.height),
            Anchor::Center => Rect::with_center(x, y, size),
        })
    }

    /// Size used for auto attributes: content plus insets on both sides.
    fn derived_size(&self) -> Result<Size, LayoutError> {
        let content = match self.kind() {
            WidgetKind::Leaf => {
                let behavior = self.0.behavior.try_borrow().map_err(|_| self.cycle())?;
                behavior.measure().unwrap_or(Size::ZERO)
            }
            WidgetKind::Group | WidgetKind::Root => {
                let mut extent = Size::ZERO;
                for child in self.children() {
                    let rect = child.rect()?;
                    extent.width = extent.width.max(rect.right());
                    extent.height = extent.height.max(rect.bottom());
                }
                extent
            }
        };
        Ok(content.expand(self.inset()))
    }
}

// Drawing and events
impl WidgetRef {
    /// Draw this widget and its visible subtree.
    ///
    /// Hidden widgets and widgets not attached to a root draw nothing.
    pub fn draw(&self, surface: &mut dyn Surface) {
        if self.is_hidden() {
            return;
        }
        match self.global_rect() {
            Ok(global) => self.paint_tree(surface, global),
            Err(LayoutError::Detached { .. }) => {
                tracing::trace!(widget = %self.name(), "detached widget not drawn");
            }
            Err(err) => {
                tracing::warn!(widget = %self.name(), error = %err, "widget not drawn");
            }
        }
    }

    fn paint_tree(&self, surface: &mut dyn Surface, global: Rect) {
        let (inset, border_width, style) = {
            let state = self.state();
            (state.placement.inset(), state.placement.border_width, state.style)
        };
        let content = global.inflate(-inset);

        {
            let behavior = self.0.behavior.borrow();
            behavior.paint_under(surface, global);
            if let Some(background) = style.background {
                surface.fill(global, background);
            }
            if border_width > 0 {
                surface.stroke(global, border_width, style.border_color.unwrap_or(Rgb::WHITE));
            }
            behavior.paint(surface, global, content);
        }

        for child in self.children() {
            if child.is_hidden() {
                continue;
            }
            match child.rect() {
                Ok(rect) => child.paint_tree(surface, rect.translate(content.x, content.y)),
                Err(err) => {
                    tracing::warn!(widget = %child.name(), error = %err, "widget not drawn");
                }
            }
        }
    }

    /// Offer an event to this widget and its enabled subtree.
    ///
    /// Children see the event first, most recently added first. A child
    /// that stops propagation hides the event from everything beneath it,
    /// including this widget. Disabled and detached widgets ignore events,
    /// and so do hidden popups (see [`Behavior::inert_while_hidden`]).
    pub fn handle_event(&self, event: &InputEvent) -> Response {
        if !self.is_attached() {
            tracing::trace!(widget = %self.name(), "detached widget ignores events");
            return Response::IGNORED;
        }
        self.dispatch(event)
    }

    fn dispatch(&self, event: &InputEvent) -> Response {
        if !self.is_enabled() {
            return Response::IGNORED;
        }
        if self.is_hidden() && self.is_inert_while_hidden() {
            tracing::trace!(widget = %self.name(), "hidden popup ignores events");
            return Response::IGNORED;
        }

        for child in self.children().iter().rev() {
            if child.dispatch(event).stop_propagation {
                return Response::CONSUMED;
            }
        }

        let global = match self.global_rect() {
            Ok(global) => global,
            Err(err) => {
                tracing::debug!(widget = %self.name(), error = %err, "event skipped");
                return Response::IGNORED;
            }
        };
        let response = {
            let mut cx = EventCx::new(self, global);
            self.0.behavior.borrow_mut().on_event(&mut cx, event)
        };
        if response.clicked {
            self.fire_click();
        }
        response
    }

    fn is_inert_while_hidden(&self) -> bool {
        self.0
            .behavior
            .try_borrow()
            .is_ok_and(|behavior| behavior.inert_while_hidden())
    }

    /// Run `handler` every time this widget completes a click.
    ///
    /// Handlers that need other widgets should capture them as
    /// [`WeakWidget`] when those widgets own this one.
    pub fn on_click<F>(&self, handler: F)
    where
        F: Fn(&WidgetRef) + 'static,
    {
        self.0.click_handlers.borrow_mut().push(Rc::new(handler));
    }

    fn fire_click(&self) {
        tracing::debug!(widget = %self.name(), "clicked");
        let handlers = self.0.click_handlers.borrow().clone();
        for handler in &handlers {
            handler(self);
        }
        if let Some(bus) = self.bus() {
            bus.publish(UiEvent::Clicked { source: self.id(), name: self.name().to_string() });
        }
    }

    /// Typed read access to the behavior.
    ///
    /// Returns `None` when the behavior is not a `B`.
    pub fn with_behavior<B: Behavior, R>(&self, f: impl FnOnce(&B) -> R) -> Option<R> {
        let behavior = self.0.behavior.borrow();
        behavior.as_any().downcast_ref::<B>().map(f)
    }

    /// Typed write access to the behavior.
    pub fn with_behavior_mut<B: Behavior, R>(&self, f: impl FnOnce(&mut B) -> R) -> Option<R> {
        let mut behavior = self.0.behavior.borrow_mut();
        behavior.as_any_mut().downcast_mut::<B>().map(f)
    }
}
