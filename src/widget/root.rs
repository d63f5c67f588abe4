//! The root controller: owns the surface and the top-level overlays.

use super::behavior::Response;
use super::builder::WidgetBuilder;
use super::node::WidgetRef;
use crate::error::LayoutError;
use crate::event::{EventBus, InputEvent, Subscription};
use crate::render::{Canvas, Rgb, Surface};

/// Root of a widget tree bound to a render surface.
///
/// Top-level children are independent overlays (screens, menus, modals),
/// each with its own visibility and input state. Opening a modal does not
/// disable what is beneath it; callers pair those calls themselves. The
/// frame loop belongs to the application, which calls
/// [`Group::handle_event`] for every input event and [`Group::draw`] once
/// per frame.
pub struct Group<S: Surface = Canvas> {
    root: WidgetRef,
    surface: S,
    bus: EventBus,
}

impl<S: Surface> Group<S> {
    /// Create a root covering the whole surface, with a fresh event bus.
    pub fn new(surface: S) -> Self {
        Self::with_bus(surface, EventBus::new())
    }

    /// Create a root publishing on an existing bus.
    pub fn with_bus(surface: S, bus: EventBus) -> Self {
        let bounds = surface.bounds();
        let root = WidgetBuilder::new("Root")
            .position(0, 0)
            .size(bounds.width, bounds.height)
            .background(Rgb::BLACK)
            .build_root(bus.clone());
        tracing::debug!(width = bounds.width, height = bounds.height, "root group created");
        Self { root, surface, bus }
    }

    /// The root widget; pass it as `parent` to attach overlays.
    pub const fn root(&self) -> &WidgetRef {
        &self.root
    }

    /// The bus click and dismiss notifications are published on.
    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Subscribe to the bus.
    pub fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    /// The render target.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The render target, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Attach a top-level overlay.
    pub fn add(&self, overlay: &WidgetRef) {
        self.root.add(overlay);
    }

    /// Detach a top-level overlay.
    pub fn remove(&self, overlay: &WidgetRef) -> bool {
        self.root.remove(overlay)
    }

    /// Top-level overlays in draw order.
    pub fn overlays(&self) -> Vec<WidgetRef> {
        self.root.children()
    }

    /// Colour the surface is cleared to each frame; `None` keeps the
    /// previous frame's cells.
    pub fn set_background(&self, color: Option<Rgb>) {
        self.root.set_background(color);
    }

    /// Re-resolve the whole tree.
    pub fn update(&self) -> Result<(), LayoutError> {
        self.root.update().map(|_| ())
    }

    /// Resize the surface and re-resolve the tree against the new size.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.surface.resize(width, height);
        self.root.set_width(width);
        self.root.set_height(height);
        tracing::debug!(width, height, "root resized");
        // The failing widget was already logged by `update`; the root itself
        // always resolves since its size is literal.
        if let Err(err) = self.update() {
            tracing::trace!(error = %err, "layout incomplete after resize");
        }
    }

    /// Route one input event through the tree, topmost overlay first.
    ///
    /// Resize events resize the surface before being offered to widgets.
    pub fn handle_event(&mut self, event: &InputEvent) -> Response {
        if let InputEvent::Resize { width, height } = *event {
            self.resize(width, height);
        }
        self.root.handle_event(event)
    }

    /// Draw every visible overlay in insertion order.
    pub fn draw(&mut self) {
        self.root.draw(&mut self.surface);
    }
}

impl<S: Surface> Drop for Group<S> {
    fn drop(&mut self) {
        // Release overlays and stop their tasks with the root.
        self.root.clear_children();
    }
}

impl<S: Surface> std::fmt::Debug for Group<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("overlays", &self.root.child_count())
            .field("bounds", &self.surface.bounds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Geometry, Rect};
    use crate::render::{DrawOp, RecordingSurface};
    use crate::task::BackgroundTask;
    use std::time::Duration;

    #[test]
    fn test_root_covers_surface_and_clears_it() {
        let mut group = Group::new(RecordingSurface::new(30, 10));
        assert_eq!(group.root().rect().unwrap(), Rect::new(0, 0, 30, 10));
        group.draw();
        assert_eq!(
            group.surface().ops(),
            &[DrawOp::Fill { area: Rect::new(0, 0, 30, 10), bg: Rgb::BLACK }]
        );
    }

    #[test]
    fn test_resize_event_resizes_root() {
        let mut group = Group::new(RecordingSurface::new(30, 10));
        group.handle_event(&InputEvent::Resize { width: 50, height: 20 });
        assert_eq!(group.root().rect().unwrap(), Rect::new(0, 0, 50, 20));
        assert_eq!(group.surface().bounds(), Rect::new(0, 0, 50, 20));
    }

    #[test]
    fn test_resize_survives_broken_widget_layout() {
        let mut group = Group::new(RecordingSurface::new(30, 10));
        let broken = WidgetBuilder::new("Broken").parent(group.root()).group();
        broken.set_x(Geometry::provider(|w| Err(LayoutError::Cycle { widget: w.name().to_string() })));

        group.handle_event(&InputEvent::Resize { width: 50, height: 20 });
        assert_eq!(group.root().rect().unwrap(), Rect::new(0, 0, 50, 20));
        assert_eq!(group.surface().bounds(), Rect::new(0, 0, 50, 20));
        assert!(matches!(group.update(), Err(LayoutError::Cycle { .. })));
    }

    #[test]
    fn test_overlays_are_independent() {
        let group = Group::new(RecordingSurface::new(30, 10));
        let hud = WidgetBuilder::new("Hud").parent(group.root()).group();
        let menu = WidgetBuilder::new("Menu").build_group();
        group.add(&menu);
        assert_eq!(group.overlays(), vec![hud.widget().clone(), menu.clone()]);

        menu.disable();
        assert!(hud.is_enabled());
        assert!(group.remove(&menu));
        assert!(!menu.is_attached());
    }

    #[test]
    fn test_removing_widget_stops_adopted_tasks() {
        let group = Group::new(RecordingSurface::new(30, 10));
        let field = WidgetBuilder::new("Field").parent(group.root()).group();
        // The sender lives in the task closure; it disconnects when the thread ends.
        let (tx, rx) = crossbeam_channel::unbounded::<()>();
        field.adopt_task(BackgroundTask::repeat("field-eviction", move |ctx| {
            let _keep = &tx;
            ctx.sleep(Duration::from_millis(1));
        }));
        assert_eq!(field.task_count(), 1);

        group.remove(&field);
        assert_eq!(field.task_count(), 0);
        assert_eq!(
            rx.recv_timeout(Duration::from_secs(2)),
            Err(crossbeam_channel::RecvTimeoutError::Disconnected)
        );
    }
}
