//! Geometry attributes: literal values or provider functions.

use crate::error::LayoutError;
use crate::widget::WidgetRef;
use std::fmt;
use std::rc::Rc;

/// A provider computes one geometry value from the widget it belongs to.
///
/// Providers may read the widget itself (its already-resolved size while
/// its position is being computed, or its content) and any widget
/// constructed before it. Reads that break those rules fail with a
/// [`LayoutError`].
pub type Provider = Rc<dyn Fn(&WidgetRef) -> Result<i32, LayoutError>>;

/// One position or size attribute of a widget.
#[derive(Clone, Default)]
pub enum Geometry {
    /// Derive the value: size from content or children, position 0.
    #[default]
    Auto,
    /// A fixed value.
    Literal(i32),
    /// A lazily evaluated function of the widget.
    Provider(Provider),
}

impl Geometry {
    /// Wrap a closure as a provider attribute.
    pub fn provider<F>(f: F) -> Self
    where
        F: Fn(&WidgetRef) -> Result<i32, LayoutError> + 'static,
    {
        Self::Provider(Rc::new(f))
    }

    /// Whether this attribute is derived rather than supplied.
    #[inline]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Evaluate the attribute for `widget`.
    ///
    /// Returns `Ok(None)` for [`Geometry::Auto`]; the caller supplies the
    /// derived value.
    pub fn resolve(&self, widget: &WidgetRef) -> Result<Option<i32>, LayoutError> {
        match self {
            Self::Auto => Ok(None),
            Self::Literal(value) => Ok(Some(*value)),
            Self::Provider(f) => f(widget).map(Some),
        }
    }
}

impl From<i32> for Geometry {
    fn from(value: i32) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Debug for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Literal(value) => write!(f, "Literal({value})"),
            Self::Provider(_) => write!(f, "Provider(..)"),
        }
    }
}

/// How a widget's raw x/y relate to its rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Anchor {
    /// Raw x/y is the top-left corner.
    #[default]
    TopLeft,
    /// Raw x/y is the desired center point.
    Center,
}
