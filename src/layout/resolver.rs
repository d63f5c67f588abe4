//! Resolution context: which widget's providers are currently running.
//!
//! Geometry is resolved on the frame-loop thread only, so the stack of
//! in-progress widgets lives in a thread local. Reads made from inside a
//! provider are checked against the top of the stack to reject forward
//! references.

use crate::error::LayoutError;
use crate::widget::{WeakWidget, WidgetRef};
use std::cell::RefCell;

thread_local! {
    static ACTIVE: RefCell<Vec<WeakWidget>> = const { RefCell::new(Vec::new()) };
}

/// Marks a widget as being resolved until dropped.
pub(crate) struct ResolveScope {
    _private: (),
}

impl Drop for ResolveScope {
    fn drop(&mut self) {
        ACTIVE.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Push `widget` as the widget whose providers are about to run.
pub(crate) fn enter(widget: &WidgetRef) -> ResolveScope {
    ACTIVE.with(|stack| stack.borrow_mut().push(widget.downgrade()));
    ResolveScope { _private: () }
}

/// The widget whose providers are running right now, if any.
pub(crate) fn current() -> Option<WidgetRef> {
    ACTIVE.with(|stack| stack.borrow().last().and_then(WeakWidget::upgrade))
}

/// Check that the widget being resolved may read the geometry of `target`.
///
/// Allowed reads: the widget itself, its ancestors and descendants, and any
/// widget constructed before it. Reads outside of resolution are always
/// allowed.
pub(crate) fn check_read(target: &WidgetRef) -> Result<(), LayoutError> {
    let Some(current) = current() else {
        return Ok(());
    };
    if current == *target || target.id() < current.id() {
        return Ok(());
    }
    if target.is_ancestor_of(&current) || current.is_ancestor_of(target) {
        return Ok(());
    }
    tracing::warn!(
        widget = %current.name(),
        dependency = %target.name(),
        "forward geometry reference"
    );
    Err(LayoutError::OrderDependency {
        widget: current.name().to_string(),
        dependency: target.name().to_string(),
    })
}
