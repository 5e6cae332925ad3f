//! Geometric primitives for floor-plan graphs.
//!
//! [`Point`] doubles as the vertex key of a [`NavGraph`](crate::graph::NavGraph):
//! two points are the same vertex exactly when their coordinates are
//! bit-identical. Every coordinate is produced by the same deterministic
//! arithmetic (parsed value plus a fixed offset), so structural points that
//! are drawn repeatedly collapse onto one vertex without any tolerance.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// A point in drawing coordinates.
///
/// Equality and hashing compare the raw bit patterns of both coordinates.
/// Negative zero is normalised to positive zero on construction so that
/// `-0.0` and `0.0` name the same vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: normalize_zero(x),
            y: normalize_zero(y),
        }
    }

    /// The origin, where every path cursor starts.
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Returns the x-coordinate of the point.
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point.
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate.
    pub fn with_x(self, x: f64) -> Self {
        Self::new(x, self.y)
    }

    /// Creates a new point with the specified y-coordinate.
    pub fn with_y(self, y: f64) -> Self {
        Self::new(self.x, y)
    }

    /// Translates the point by an offset.
    pub fn translate(self, offset: Offset) -> Self {
        Self::new(self.x + offset.dx(), self.y + offset.dy())
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn key(self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// A translation applied to every coordinate of a drawing fragment.
///
/// Floor plans are frequently assembled from several fragments that share
/// one logical coordinate space at different translations. The active
/// offset is declared by a component marker in the markup and stays in
/// force until the next marker redefines it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    dx: f64,
    dy: f64,
}

impl Offset {
    /// Creates a new offset.
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Horizontal translation.
    pub fn dx(self) -> f64 {
        self.dx
    }

    /// Vertical translation.
    pub fn dy(self) -> f64 {
        self.dy
    }
}

/// A directed line segment between two distinct points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    /// Creates a segment, or `None` when both endpoints coincide.
    pub fn new(start: Point, end: Point) -> Option<Self> {
        (start != end).then_some(Self { start, end })
    }

    /// Where the segment starts.
    pub fn start(self) -> Point {
        self.start
    }

    /// Where the segment ends.
    pub fn end(self) -> Point {
        self.end
    }
}
