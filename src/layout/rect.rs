//! Rect and Size: axis-aligned geometry primitives.

/// A width/height pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Size {
    /// Width in columns.
    pub width: i32,
    /// Height in rows.
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Grow both dimensions by `amount` on every side.
    #[inline]
    #[must_use]
    pub const fn expand(self, amount: i32) -> Self {
        Self::new(self.width + amount * 2, self.height + amount * 2)
    }
}

/// A rectangle defined by position and size.
///
/// Coordinates are signed: a center-anchored widget near an edge can end up
/// partially off-surface, and drawing simply clips it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
    /// Width in columns.
    pub width: i32,
    /// Height in rows.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Size of the rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Center point, rounded towards the top-left.
    #[inline]
    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this rectangle intersects with another.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Move the rectangle by an offset.
    #[inline]
    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Place a rectangle of `size` so that its center lands on `(cx, cy)`.
    #[inline]
    pub const fn with_center(cx: i32, cy: i32, size: Size) -> Self {
        Self::new(cx - size.width / 2, cy - size.height / 2, size.width, size.height)
    }

    /// Grow the rectangle by a margin on all sides; a negative margin shrinks it.
    #[inline]
    #[must_use]
    pub const fn inflate(&self, margin: i32) -> Self {
        let width = self.width + margin * 2;
        let height = self.height + margin * 2;
        if width <= 0 || height <= 0 {
            return Self::new(self.x - margin, self.y - margin, 0, 0);
        }
        Self::new(self.x - margin, self.y - margin, width, height)
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Overlapping area of two rectangles, if any.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Self::new(
            x,
            y,
            self.right().min(other.right()) - x,
            self.bottom().min(other.bottom()) - y,
        ))
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_contains() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 7);
        assert!(r.contains(2, 3));
        assert!(r.contains(11, 6));
        assert!(!r.contains(12, 6));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn test_rect_with_center_allows_negative_origin() {
        let r = Rect::with_center(2, 2, Size::new(10, 6));
        assert_eq!(r, Rect::new(-3, -1, 10, 6));
        assert_eq!(r.center(), (2, 2));
    }

    #[test]
    fn test_rect_union_and_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(12, 0, 10, 10);
        assert_eq!(a.union(&b), Rect::new(0, 0, 22, 10));
        assert_eq!(a.intersection(&b), None);
        assert_eq!(
            a.intersection(&Rect::new(5, 5, 10, 10)),
            Some(Rect::new(5, 5, 5, 5))
        );
        assert_eq!(Rect::ZERO.union(&b), b);
    }

    #[test]
    fn test_rect_inflate() {
        let r = Rect::new(5, 5, 4, 4);
        assert_eq!(r.inflate(1), Rect::new(4, 4, 6, 6));
        assert!(r.inflate(-3).is_empty());
    }
}
