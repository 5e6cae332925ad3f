//! Navigation graph over floor-plan points.
//!
//! The graph is undirected. Every vertex is a uniform [`Vertex`] record
//! holding its neighbor set and the list of rooms bound to it; the list
//! stays empty until a room is linked. Alongside the adjacency map the
//! graph keeps an ordered set of [`Edge`]s in the orientation they were
//! inserted, which is what exporters enumerate.
//!
//! # Redundancy
//!
//! [`NavGraph::add_edge`] refuses an edge whose endpoints are already
//! connected through the existing graph. Raw drawings re-trace shared walls
//! once per room outline; the reachability probe collapses those re-traces.
//! It is stricter than duplicate removal: a second, geometrically different
//! route between two connected vertices is rejected as well, so the graph is
//! always a forest. Room linking relies on that shape.
//!
//! Both maps preserve insertion order, which keeps nearest-vertex ties and
//! exported vertex ids deterministic.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use log::trace;
use thiserror::Error;

use crate::geometry::{Point, Segment};

/// Inconsistencies detected while mutating or auditing a [`NavGraph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("vertex {0} is not part of the graph")]
    MissingVertex(Point),

    #[error("vertex {vertex} has {degree} neighbors, expected a single-neighbor stub")]
    NotAStub { vertex: Point, degree: usize },

    #[error("edge between {0} and {1} is missing from the edge set")]
    MissingEdge(Point, Point),

    #[error("edge between {0} and {1} is recorded in both orientations")]
    DuplicateEdge(Point, Point),

    #[error("{0} lists {1} as neighbor but not the other way around")]
    AsymmetricAdjacency(Point, Point),

    #[error("edge set contains {0} -> {1} without matching adjacency")]
    DanglingEdge(Point, Point),

    #[error("vertex {0} is adjacent to itself")]
    SelfLoop(Point),
}

/// A graph vertex: its neighbors plus the rooms bound to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vertex {
    neighbors: IndexSet<Point>,
    rooms: Vec<String>,
}

impl Vertex {
    /// Neighboring vertices, in insertion order.
    pub fn neighbors(&self) -> &IndexSet<Point> {
        &self.neighbors
    }

    /// Number of incident edges.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Room numbers bound to this vertex.
    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    /// Whether at least one room is bound to this vertex.
    pub fn hosts_rooms(&self) -> bool {
        !self.rooms.is_empty()
    }
}

/// An edge as recorded in the edge set, in insertion orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    from: Point,
    to: Point,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// First endpoint.
    pub fn from(self) -> Point {
        self.from
    }

    /// Second endpoint.
    pub fn to(self) -> Point {
        self.to
    }

    /// The same edge in the opposite orientation.
    pub fn reversed(self) -> Self {
        Self::new(self.to, self.from)
    }
}

/// Outcome of [`NavGraph::add_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsertion {
    /// The edge was added.
    Inserted,
    /// Both endpoints are the same point.
    Degenerate,
    /// The endpoints were already connected.
    Redundant,
}

/// Undirected navigation graph keyed by [`Point`].
#[derive(Debug, Clone, Default)]
pub struct NavGraph {
    vertices: IndexMap<Point, Vertex>,
    edges: IndexSet<Edge>,
}

impl NavGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the edge `p1 -> p2` unless it is degenerate or redundant.
    pub fn add_edge(&mut self, p1: Point, p2: Point) -> EdgeInsertion {
        if p1 == p2 {
            return EdgeInsertion::Degenerate;
        }

        if self.is_redundant(p1, p2) {
            trace!(from:? = p1, to:? = p2; "Skipping redundant edge");
            return EdgeInsertion::Redundant;
        }

        self.vertices.entry(p1).or_default().neighbors.insert(p2);
        self.vertices.entry(p2).or_default().neighbors.insert(p1);
        self.edges.insert(Edge::new(p1, p2));

        trace!(from:? = p1, to:? = p2; "Edge inserted");
        EdgeInsertion::Inserted
    }

    /// Inserts a segment as an edge, see [`NavGraph::add_edge`].
    pub fn add_segment(&mut self, segment: Segment) -> EdgeInsertion {
        self.add_edge(segment.start(), segment.end())
    }

    /// Whether `p2` is already reachable from `p1`.
    ///
    /// Depth-first search from `p1` over the current adjacency, never
    /// stepping back through `p1`. An existing direct edge counts as a path,
    /// so literal duplicates are redundant too.
    pub fn is_redundant(&self, p1: Point, p2: Point) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![p1];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(vertex) = self.vertices.get(&current) else {
                continue;
            };
            for &neighbor in &vertex.neighbors {
                if neighbor == p2 {
                    return true;
                }
                if neighbor != p1 && !visited.contains(&neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        false
    }

    /// Returns the vertex stored at `point`, if any.
    pub fn vertex(&self, point: Point) -> Option<&Vertex> {
        self.vertices.get(&point)
    }

    /// Whether `point` is a vertex of the graph.
    pub fn contains_vertex(&self, point: Point) -> bool {
        self.vertices.contains_key(&point)
    }

    /// Iterates vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (Point, &Vertex)> {
        self.vertices.iter().map(|(point, vertex)| (*point, vertex))
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Iterates recorded edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    /// Number of recorded edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the edge set records `edge` in exactly this orientation.
    pub fn contains_edge(&self, edge: Edge) -> bool {
        self.edges.contains(&edge)
    }

    /// Finds the vertex closest to `target` whose distance is strictly below
    /// `threshold`.
    ///
    /// Ties resolve to the vertex inserted first.
    pub fn nearest_vertex(&self, target: Point, threshold: f64) -> Option<Point> {
        self.vertices
            .keys()
            .map(|&point| (point, point.distance(target)))
            .filter(|&(_, distance)| distance < threshold)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(point, _)| point)
    }

    /// Removes the single-neighbor `stub` vertex and returns its neighbor.
    ///
    /// The stub's adjacency entry, the neighbor's back-reference and the
    /// connecting edge (in whichever orientation it was recorded) are all
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotAStub`] when `stub` does not have exactly one
    /// neighbor, and [`GraphError::MissingVertex`] or
    /// [`GraphError::MissingEdge`] when adjacency and edge set disagree.
    pub fn absorb_stub(&mut self, stub: Point) -> Result<Point, GraphError> {
        let vertex = self
            .vertices
            .get(&stub)
            .ok_or(GraphError::MissingVertex(stub))?;
        if vertex.degree() != 1 {
            return Err(GraphError::NotAStub {
                vertex: stub,
                degree: vertex.degree(),
            });
        }

        let Some(vertex) = self.vertices.shift_remove(&stub) else {
            return Err(GraphError::MissingVertex(stub));
        };
        let Some(&anchor) = vertex.neighbors.first() else {
            return Err(GraphError::NotAStub {
                vertex: stub,
                degree: 0,
            });
        };

        let anchor_vertex = self
            .vertices
            .get_mut(&anchor)
            .ok_or(GraphError::MissingVertex(anchor))?;
        anchor_vertex.neighbors.shift_remove(&stub);

        let edge = Edge::new(anchor, stub);
        if !self.edges.shift_remove(&edge) && !self.edges.shift_remove(&edge.reversed()) {
            return Err(GraphError::MissingEdge(anchor, stub));
        }

        trace!(stub:? = stub, anchor:? = anchor; "Stub absorbed");
        Ok(anchor)
    }

    /// Binds a room number to the vertex at `point`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingVertex`] if `point` is not a vertex.
    pub fn attach_room(&mut self, point: Point, number: impl Into<String>) -> Result<(), GraphError> {
        let vertex = self
            .vertices
            .get_mut(&point)
            .ok_or(GraphError::MissingVertex(point))?;
        vertex.rooms.push(number.into());
        Ok(())
    }

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        let mut seen = HashSet::new();
        let mut components = 0;

        for &start in self.vertices.keys() {
            if !seen.insert(start) {
                continue;
            }
            components += 1;
            let mut stack = vec![start];
            while let Some(current) = stack.pop() {
                for &neighbor in &self.vertices[&current].neighbors {
                    if seen.insert(neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
        }

        components
    }

    /// Whether the graph contains no cycle.
    pub fn is_forest(&self) -> bool {
        self.edges.len() + self.component_count() == self.vertices.len()
    }

    /// Audits that adjacency and the edge set describe the same edges.
    ///
    /// Every neighbor relation must be symmetric and be recorded in the edge
    /// set in exactly one orientation; every recorded edge must be backed by
    /// adjacency.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn check_consistency(&self) -> Result<(), GraphError> {
        for (&point, vertex) in &self.vertices {
            for &neighbor in &vertex.neighbors {
                if neighbor == point {
                    return Err(GraphError::SelfLoop(point));
                }
                let symmetric = self
                    .vertices
                    .get(&neighbor)
                    .is_some_and(|other| other.neighbors.contains(&point));
                if !symmetric {
                    return Err(GraphError::AsymmetricAdjacency(point, neighbor));
                }

                let edge = Edge::new(point, neighbor);
                match (self.edges.contains(&edge), self.edges.contains(&edge.reversed())) {
                    (true, true) => return Err(GraphError::DuplicateEdge(point, neighbor)),
                    (false, false) => return Err(GraphError::MissingEdge(point, neighbor)),
                    _ => {}
                }
            }
        }

        for edge in &self.edges {
            let backed = self
                .vertices
                .get(&edge.from)
                .is_some_and(|vertex| vertex.neighbors.contains(&edge.to));
            if !backed {
                return Err(GraphError::DanglingEdge(edge.from, edge.to));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// A corridor through `(50, 0)` with a doorway stub at `(50, 10)`.
    fn stub_graph() -> NavGraph {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(50.0, 0.0));
        graph.add_edge(p(50.0, 0.0), p(100.0, 0.0));
        graph.add_edge(p(50.0, 0.0), p(50.0, 10.0));
        graph
    }

    #[test]
    fn test_add_edge_updates_both_sides() {
        let mut graph = NavGraph::new();
        assert_eq!(graph.add_edge(p(0.0, 0.0), p(1.0, 0.0)), EdgeInsertion::Inserted);

        assert!(graph.vertex(p(0.0, 0.0)).unwrap().neighbors().contains(&p(1.0, 0.0)));
        assert!(graph.vertex(p(1.0, 0.0)).unwrap().neighbors().contains(&p(0.0, 0.0)));
        assert!(graph.contains_edge(Edge::new(p(0.0, 0.0), p(1.0, 0.0))));
        assert!(!graph.contains_edge(Edge::new(p(1.0, 0.0), p(0.0, 0.0))));
    }

    #[test]
    fn test_degenerate_edge_is_dropped() {
        let mut graph = NavGraph::new();
        assert_eq!(graph.add_edge(p(3.0, 3.0), p(3.0, 3.0)), EdgeInsertion::Degenerate);
        assert_eq!(graph.vertex_count(), 0);
    }

    #[test]
    fn test_duplicate_edge_in_either_orientation_is_redundant() {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(1.0, 0.0));

        assert_eq!(graph.add_edge(p(0.0, 0.0), p(1.0, 0.0)), EdgeInsertion::Redundant);
        assert_eq!(graph.add_edge(p(1.0, 0.0), p(0.0, 0.0)), EdgeInsertion::Redundant);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_closing_a_cycle_is_redundant() {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(10.0, 0.0));
        graph.add_edge(p(10.0, 0.0), p(10.0, 10.0));

        // A different, shorter route between already connected vertices is
        // rejected as well.
        assert_eq!(graph.add_edge(p(10.0, 10.0), p(0.0, 0.0)), EdgeInsertion::Redundant);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.is_forest());
    }

    #[test]
    fn test_joining_components_is_allowed() {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(1.0, 0.0));
        graph.add_edge(p(5.0, 0.0), p(6.0, 0.0));
        assert_eq!(graph.component_count(), 2);

        assert_eq!(graph.add_edge(p(1.0, 0.0), p(5.0, 0.0)), EdgeInsertion::Inserted);
        assert_eq!(graph.component_count(), 1);
    }

    #[test]
    fn test_nearest_vertex_threshold_is_strict() {
        let graph = stub_graph();

        assert_eq!(graph.nearest_vertex(p(50.0, 40.0), 30.0), None);
        assert_eq!(graph.nearest_vertex(p(50.0, 40.0), 30.5), Some(p(50.0, 10.0)));
    }

    #[test]
    fn test_nearest_vertex_tie_keeps_first_inserted() {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(10.0, 0.0));

        assert_eq!(graph.nearest_vertex(p(5.0, 0.0), 40.0), Some(p(0.0, 0.0)));
    }

    #[test]
    fn test_absorb_stub() {
        let mut graph = stub_graph();
        let anchor = graph.absorb_stub(p(50.0, 10.0)).expect("stub should absorb");

        assert_eq!(anchor, p(50.0, 0.0));
        assert!(!graph.contains_vertex(p(50.0, 10.0)));
        assert!(!graph.vertex(anchor).unwrap().neighbors().contains(&p(50.0, 10.0)));
        assert_eq!(graph.edge_count(), 2);
        graph.check_consistency().expect("graph stays consistent");
    }

    #[test]
    fn test_absorb_rejects_non_stub() {
        let mut graph = stub_graph();
        let err = graph.absorb_stub(p(50.0, 0.0)).unwrap_err();

        assert_eq!(
            err,
            GraphError::NotAStub {
                vertex: p(50.0, 0.0),
                degree: 3
            }
        );
    }

    #[test]
    fn test_absorb_missing_vertex() {
        let mut graph = stub_graph();
        assert_eq!(
            graph.absorb_stub(p(7.0, 7.0)),
            Err(GraphError::MissingVertex(p(7.0, 7.0)))
        );
    }

    #[test]
    fn test_attach_room() {
        let mut graph = stub_graph();
        graph.attach_room(p(0.0, 0.0), "101").unwrap();

        let vertex = graph.vertex(p(0.0, 0.0)).unwrap();
        assert!(vertex.hosts_rooms());
        assert_eq!(vertex.rooms(), ["101".to_string()]);
        assert!(graph.attach_room(p(9.0, 9.0), "102").is_err());
    }

    fn coordinate() -> impl Strategy<Value = f64> {
        (0i32..6).prop_map(|v| f64::from(v) * 10.0)
    }

    proptest! {
        #[test]
        fn prop_graph_is_consistent_forest(
            edges in prop::collection::vec(
                ((coordinate(), coordinate()), (coordinate(), coordinate())),
                0..60,
            )
        ) {
            let mut graph = NavGraph::new();
            for ((x1, y1), (x2, y2)) in edges {
                graph.add_edge(p(x1, y1), p(x2, y2));
            }

            prop_assert!(graph.check_consistency().is_ok());
            prop_assert!(graph.is_forest());
        }
    }
}
