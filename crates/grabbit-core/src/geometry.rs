#![forbid(unsafe_code)]

//! Geometric primitives for drag-drop positioning.
//!
//! Coordinates are page-relative `f32` values in whatever unit the host
//! renders in (pixels, cells, points). The core never caches geometry:
//! rectangles are supplied by the host's geometry provider and are valid
//! only at the instant they are read.

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn delta(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the point lies inside (left/top inclusive, right/bottom
    /// exclusive, matching hit-test conventions).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// A cardinal movement direction for keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
}

impl Direction {
    /// Unit vector for this direction (screen coordinates: +y is down).
    #[must_use]
    pub const fn unit(&self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    /// The reverse direction.
    #[must_use]
    pub const fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Whether movement is along the x axis.
    #[must_use]
    pub const fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Whether movement is along the y axis.
    #[must_use]
    pub const fn is_vertical(&self) -> bool {
        !self.is_horizontal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 20.0, 10.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(29.9, 19.9)));
        assert!(!r.contains(Point::new(30.0, 15.0)));
        assert!(!r.contains(Point::new(15.0, 20.0)));
        assert!(!r.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn rect_center() {
        let r = Rect::new(0.0, 0.0, 10.0, 4.0);
        assert_eq!(r.center(), Point::new(5.0, 2.0));
    }

    #[test]
    fn point_delta() {
        let a = Point::new(5.0, 7.0);
        let b = Point::new(2.0, 10.0);
        assert_eq!(a.delta(b), Point::new(3.0, -3.0));
    }

    #[test]
    fn direction_units_and_opposites() {
        assert_eq!(Direction::Right.unit(), (1.0, 0.0));
        assert_eq!(Direction::Up.unit(), (0.0, -1.0));
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Down.is_vertical());
    }

    #[test]
    fn zero_sized_rect_contains_nothing() {
        let r = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(!r.contains(Point::new(5.0, 5.0)));
    }
}
