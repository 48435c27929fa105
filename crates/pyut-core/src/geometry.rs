//! Geometric primitives for shapes placed on a diagram canvas.
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height of a node shape
//!
//! Coordinates use `f64` so that values read from a project file survive a
//! save/load round trip without loss. The origin is the top-left corner of
//! the canvas with Y increasing downward.

/// A 2D point in canvas coordinates.
///
/// # Examples
///
/// ```
/// # use pyut_core::geometry::Point;
/// let a = Point::new(10.0, 20.0);
/// let b = Point::new(30.0, 40.0);
///
/// let mid = a.midpoint(b);
/// assert_eq!(mid.x(), 20.0);
/// assert_eq!(mid.y(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point at the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Returns the point halfway between `self` and `other`
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Width and height of a node shape.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the center of a box of this size whose top-left corner is `origin`.
    pub fn center_from(self, origin: Point) -> Point {
        origin.add_point(Point::new(self.width / 2.0, self.height / 2.0))
    }
}
