//! Room annotations collected from a floor plan.

use crate::geometry::Point;

/// A labelled room (or staircase landing) and the vertex it is bound to.
///
/// Created when an annotation is collected; `node` is set at most once by
/// room linking and stays `None` when no vertex was close enough.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomInfo {
    number: String,
    position: Point,
    node: Option<Point>,
}

impl RoomInfo {
    /// Creates an unlinked room at `position`.
    pub fn new(number: impl Into<String>, position: Point) -> Self {
        Self {
            number: number.into(),
            position,
            node: None,
        }
    }

    /// The room identifier as written in the drawing.
    ///
    /// May carry extra whitespace-separated tokens such as a staircase index.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Annotation position with the component offset applied.
    pub fn position(&self) -> Point {
        self.position
    }

    /// The bound graph vertex, if linked.
    pub fn node(&self) -> Option<Point> {
        self.node
    }

    /// Whether the room has been bound to a vertex.
    pub fn is_linked(&self) -> bool {
        self.node.is_some()
    }

    /// Binds the room to `node`.
    pub fn link_to(&mut self, node: Point) {
        self.node = Some(node);
    }
}
