//! Binding of rooms to corridor vertices.
//!
//! Drawings end every door with a short corridor stub pointing at the room
//! label. Linking finds the vertex closest to each label, and if it is such
//! a stub, absorbs it: the stub vertex and its edge disappear and the room is
//! attached to the vertex the stub hung off. Rooms are only ever matched to
//! vertices, never projected onto segments.

use std::fmt;

use log::{debug, info, warn};

use floornav_core::{geometry::Point, graph::NavGraph, room::RoomInfo};

use crate::error::FloornavError;

/// Outcome counts of a linking pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSummary {
    linked: usize,
    unlinked: usize,
    skipped: usize,
}

impl LinkSummary {
    /// Rooms bound to a vertex.
    pub fn linked(&self) -> usize {
        self.linked
    }

    /// Rooms with no vertex within the threshold.
    pub fn unlinked(&self) -> usize {
        self.unlinked
    }

    /// Rooms left alone because their nearest vertex could not be absorbed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Why a room near a vertex was not linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    StubHostsRooms,
    NotAStub(usize),
    AnchorHostsRooms(Point),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StubHostsRooms => write!(f, "nearest vertex already hosts rooms"),
            Self::NotAStub(degree) => write!(f, "nearest vertex has {degree} neighbors"),
            Self::AnchorHostsRooms(anchor) => write!(f, "anchor {anchor} already hosts rooms"),
        }
    }
}

/// Attaches rooms to the graph by absorbing their door stubs.
#[derive(Debug, Clone, Copy)]
pub struct RoomLinker {
    threshold: f64,
}

impl RoomLinker {
    /// Creates a linker that only considers vertices strictly closer than
    /// `threshold`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Returns the link threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Links every room in order, mutating both the graph and the rooms.
    ///
    /// # Errors
    ///
    /// Returns [`FloornavError::Graph`] when the adjacency and the edge set
    /// disagree about a stub's edge. The graph is left partially linked in
    /// that case.
    pub fn link(
        &self,
        graph: &mut NavGraph,
        rooms: &mut [RoomInfo],
    ) -> Result<LinkSummary, FloornavError> {
        info!(rooms = rooms.len(), threshold = self.threshold; "Linking rooms to graph");
        let mut summary = LinkSummary::default();

        for room in rooms.iter_mut() {
            let Some(stub) = graph.nearest_vertex(room.position(), self.threshold) else {
                debug!(number = room.number(); "No vertex within link threshold");
                summary.unlinked += 1;
                continue;
            };

            if let Some(rejection) = Self::check(graph, stub) {
                warn!(
                    number = room.number(),
                    vertex:? = stub,
                    reason:% = rejection;
                    "Room left unlinked"
                );
                summary.skipped += 1;
                continue;
            }

            let anchor = graph.absorb_stub(stub)?;
            graph.attach_room(anchor, room.number())?;
            room.link_to(anchor);
            debug!(number = room.number(), anchor:? = anchor; "Room linked");
            summary.linked += 1;
        }

        info!(
            linked = summary.linked,
            unlinked = summary.unlinked,
            skipped = summary.skipped;
            "Room linking finished"
        );
        Ok(summary)
    }

    fn check(graph: &NavGraph, stub: Point) -> Option<Rejection> {
        let vertex = graph.vertex(stub)?;
        if vertex.hosts_rooms() {
            return Some(Rejection::StubHostsRooms);
        }
        if vertex.degree() != 1 {
            return Some(Rejection::NotAStub(vertex.degree()));
        }

        let anchor = *vertex.neighbors().first()?;
        graph
            .vertex(anchor)
            .filter(|anchor_vertex| anchor_vertex.hosts_rooms())
            .map(|_| Rejection::AnchorHostsRooms(anchor))
    }
}

/// Link `rooms` into `graph` with the given threshold.
///
/// Consumes and returns both so the call reads as a pipeline step after
/// [`floornav_parser::build_graph`].
pub fn link_rooms(
    mut graph: NavGraph,
    mut rooms: Vec<RoomInfo>,
    threshold: f64,
) -> Result<(NavGraph, Vec<RoomInfo>), FloornavError> {
    RoomLinker::new(threshold).link(&mut graph, &mut rooms)?;
    Ok((graph, rooms))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Corridor (0,0)-(100,0) with a door stub (50,0)-(50,10).
    fn corridor_with_stub() -> NavGraph {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(50.0, 0.0));
        graph.add_edge(p(50.0, 0.0), p(100.0, 0.0));
        graph.add_edge(p(50.0, 0.0), p(50.0, 10.0));
        graph
    }

    #[test]
    fn test_stub_is_absorbed() {
        let rooms = vec![RoomInfo::new("101", p(50.0, 15.0))];
        let (graph, rooms) = link_rooms(corridor_with_stub(), rooms, 40.0).unwrap();

        assert!(!graph.contains_vertex(p(50.0, 10.0)));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(rooms[0].node(), Some(p(50.0, 0.0)));
        assert_eq!(
            graph.vertex(p(50.0, 0.0)).map(|vertex| vertex.rooms().to_vec()),
            Some(vec!["101".to_string()])
        );
        assert!(graph.check_consistency().is_ok());
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(0.0, 100.0));
        let mut rooms = vec![
            RoomInfo::new("edge", p(40.0, 0.0)),
            RoomInfo::new("inside", p(0.0, 139.9)),
        ];
        assert_approx_eq!(f64, rooms[0].position().distance(p(0.0, 0.0)), 40.0);

        let summary = RoomLinker::new(40.0).link(&mut graph, &mut rooms).unwrap();

        assert!(rooms[0].node().is_none());
        assert_eq!(rooms[1].node(), Some(p(0.0, 0.0)));
        assert_eq!(summary.linked(), 1);
        assert_eq!(summary.unlinked(), 1);
    }

    #[test]
    fn test_no_projection_onto_segments() {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(0.0, 100.0));
        let rooms = vec![RoomInfo::new("mid", p(2.0, 50.0))];

        let (graph, rooms) = link_rooms(graph, rooms, 40.0).unwrap();

        assert!(rooms[0].node().is_none());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_ties_resolve_to_first_vertex() {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(10.0, 0.0));
        let rooms = vec![RoomInfo::new("tie", p(5.0, 0.0))];

        let (graph, rooms) = link_rooms(graph, rooms, 40.0).unwrap();

        // (0,0) was inserted first, so it is absorbed and (10,0) anchors.
        assert_eq!(rooms[0].node(), Some(p(10.0, 0.0)));
        assert!(!graph.contains_vertex(p(0.0, 0.0)));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_non_stub_is_left_alone() {
        let mut graph = corridor_with_stub();
        let mut rooms = vec![RoomInfo::new("junction", p(50.0, -1.0))];

        let summary = RoomLinker::new(40.0).link(&mut graph, &mut rooms).unwrap();

        assert_eq!(summary.skipped(), 1);
        assert!(rooms[0].node().is_none());
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_duplicate_anchor_is_skipped() {
        let mut graph = corridor_with_stub();
        graph.add_edge(p(50.0, 0.0), p(50.0, -10.0));
        let mut rooms = vec![
            RoomInfo::new("101", p(50.0, 12.0)),
            RoomInfo::new("102", p(50.0, -12.0)),
        ];

        let summary = RoomLinker::new(40.0).link(&mut graph, &mut rooms).unwrap();

        assert_eq!(summary.linked(), 1);
        assert_eq!(summary.skipped(), 1);
        assert!(rooms[1].node().is_none());
        assert!(graph.contains_vertex(p(50.0, -10.0)));
        assert!(graph.check_consistency().is_ok());
    }

    #[test]
    fn test_stub_hosting_rooms_is_skipped() {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(0.0, 10.0));
        graph.add_edge(p(0.0, 10.0), p(0.0, 20.0));
        let mut rooms = vec![
            RoomInfo::new("a", p(0.0, 25.0)),
            RoomInfo::new("b", p(0.0, 9.0)),
        ];

        let summary = RoomLinker::new(40.0).link(&mut graph, &mut rooms).unwrap();

        // "a" absorbs (0,20); "b" then finds (0,10), which now hosts "a".
        assert_eq!(rooms[0].node(), Some(p(0.0, 10.0)));
        assert!(rooms[1].node().is_none());
        assert_eq!(summary.skipped(), 1);
    }

    #[test]
    fn test_empty_inputs() {
        let (graph, rooms) = link_rooms(NavGraph::new(), Vec::new(), 40.0).unwrap();

        assert_eq!(graph.vertex_count(), 0);
        assert!(rooms.is_empty());
    }
}
