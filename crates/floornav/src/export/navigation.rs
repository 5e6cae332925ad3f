//! Navigation document export.
//!
//! The document lists every vertex with its generated id and coordinates,
//! every recorded edge as an id pair, and every room with the id of the
//! vertex it is bound to (`null` when unlinked):
//!
//! ```json
//! {
//!   "nodes": [{ "id": "node_0", "x": 0.0, "y": 0.0, "rooms": ["101"] }],
//!   "edges": [{ "from": "node_0", "to": "node_1" }],
//!   "rooms": [{ "number": "101", "x": 2.0, "y": 50.0, "node_id": "node_0" }]
//! }
//! ```
//!
//! `rooms` is omitted from vertices that host none.

use std::io::Write;

use log::debug;
use serde::Serialize;

use floornav_core::{graph::NavGraph, room::RoomInfo};

use super::{Error, Exporter, NodeIds};

/// A vertex entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rooms: Vec<String>,
}

/// An edge entry, in the orientation it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
}

/// A room entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomRecord {
    pub number: String,
    pub x: f64,
    pub y: f64,
    pub node_id: Option<String>,
}

/// The full navigation document of one floor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    pub rooms: Vec<RoomRecord>,
}

impl NavigationDocument {
    /// Builds the document for a linked graph.
    pub fn new(graph: &NavGraph, rooms: &[RoomInfo]) -> Self {
        let ids = NodeIds::new(graph);

        let nodes = graph
            .vertices()
            .filter_map(|(point, vertex)| {
                Some(NodeRecord {
                    id: ids.get(point)?.to_string(),
                    x: point.x(),
                    y: point.y(),
                    rooms: vertex.rooms().to_vec(),
                })
            })
            .collect();

        let edges = graph
            .edges()
            .filter_map(|edge| {
                Some(EdgeRecord {
                    from: ids.get(edge.from())?.to_string(),
                    to: ids.get(edge.to())?.to_string(),
                })
            })
            .collect();

        let rooms = rooms
            .iter()
            .map(|room| RoomRecord {
                number: room.number().to_string(),
                x: room.position().x(),
                y: room.position().y(),
                node_id: room
                    .node()
                    .and_then(|node| ids.get(node))
                    .map(str::to_string),
            })
            .collect();

        Self {
            nodes,
            edges,
            rooms,
        }
    }
}

/// Writes [`NavigationDocument`]s as pretty-printed JSON.
#[derive(Debug)]
pub struct NavigationExporter<W> {
    writer: W,
}

impl<W: Write> NavigationExporter<W> {
    /// Creates an exporter writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for NavigationExporter<W> {
    fn export(&mut self, graph: &NavGraph, rooms: &[RoomInfo]) -> Result<(), Error> {
        let document = NavigationDocument::new(graph, rooms);
        debug!(
            nodes = document.nodes.len(),
            edges = document.edges.len(),
            rooms = document.rooms.len();
            "Writing navigation document"
        );

        serde_json::to_writer_pretty(&mut self.writer, &document)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
