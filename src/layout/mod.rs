//! Layout module: lazily resolved, dependency-ordered widget geometry.
//!
//! Geometry attributes are either literals or provider functions of the
//! owning widget. Providers run on demand, their results are cached until
//! the widget is invalidated, and a provider may only read widgets that
//! were constructed before the widget it belongs to.

mod geometry;
mod rect;
pub(crate) mod resolver;

pub use geometry::{Anchor, Geometry, Provider};
pub use rect::{Rect, Size};
