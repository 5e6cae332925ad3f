//! Translation of path commands into line segments.
//!
//! The extractor is a small state machine over a cursor. It starts at the
//! origin with no subpath start, interprets `M`, `L`, `H`, `V` and `Z`
//! against the active component offset, and emits one [`Segment`] per drawn
//! line. Coordinate pairs are consumed two at a time, so a single `L` with
//! six arguments draws three lines; a dangling odd argument is ignored.
//! Lines whose endpoints coincide are dropped.

use indexmap::IndexSet;

use floornav_core::geometry::{Offset, Point, Segment};

use crate::path_data::{CommandKind, PathCommand};

/// Everything one path element contributed.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTrace {
    segments: Vec<Segment>,
    points: IndexSet<Point>,
    cursor: Point,
    unsupported: Vec<CommandKind>,
}

impl PathTrace {
    /// Drawn segments in emission order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Distinct points visited, including move targets.
    pub fn points(&self) -> &IndexSet<Point> {
        &self.points
    }

    /// Cursor position after the last command.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Commands that were skipped because they are not interpreted.
    pub fn unsupported(&self) -> &[CommandKind] {
        &self.unsupported
    }
}

/// Interprets path commands for a single path element.
#[derive(Debug)]
pub struct SegmentExtractor {
    offset: Offset,
    cursor: Point,
    subpath_start: Option<Point>,
    segments: Vec<Segment>,
    points: IndexSet<Point>,
    unsupported: Vec<CommandKind>,
}

impl SegmentExtractor {
    /// Creates an extractor with the cursor at the origin.
    pub fn new(offset: Offset) -> Self {
        Self {
            offset,
            cursor: Point::origin(),
            subpath_start: None,
            segments: Vec::new(),
            points: IndexSet::new(),
            unsupported: Vec::new(),
        }
    }

    /// Applies one command.
    pub fn apply(&mut self, command: &PathCommand) {
        let args = command.args();
        match command.kind() {
            CommandKind::MoveTo => {
                for pair in args.chunks_exact(2) {
                    let target = self.place(pair[0], pair[1]);
                    self.cursor = target;
                    // Only the first move of the element anchors `Z`.
                    self.subpath_start.get_or_insert(target);
                    self.points.insert(target);
                }
            }
            CommandKind::LineTo => {
                for pair in args.chunks_exact(2) {
                    let target = self.place(pair[0], pair[1]);
                    self.line_to(target);
                }
            }
            CommandKind::Horizontal => {
                for &x in args {
                    let target = self.cursor.with_x(x + self.offset.dx());
                    self.line_to(target);
                }
            }
            CommandKind::Vertical => {
                for &y in args {
                    let target = self.cursor.with_y(y + self.offset.dy());
                    self.line_to(target);
                }
            }
            CommandKind::ClosePath => {
                if let Some(start) = self.subpath_start {
                    self.line_to(start);
                }
            }
            kind @ CommandKind::Unsupported(_) => self.unsupported.push(kind),
        }
    }

    /// Finishes the element and returns its trace.
    pub fn finish(self) -> PathTrace {
        PathTrace {
            segments: self.segments,
            points: self.points,
            cursor: self.cursor,
            unsupported: self.unsupported,
        }
    }

    fn place(&self, x: f64, y: f64) -> Point {
        Point::new(x, y).translate(self.offset)
    }

    fn line_to(&mut self, target: Point) {
        if let Some(segment) = Segment::new(self.cursor, target) {
            self.segments.push(segment);
        }
        self.cursor = target;
        self.points.insert(target);
    }
}

/// Interprets a full command sequence under `offset`.
pub fn extract(commands: &[PathCommand], offset: Offset) -> PathTrace {
    let mut extractor = SegmentExtractor::new(offset);
    for command in commands {
        extractor.apply(command);
    }
    extractor.finish()
}
