//! Per-floor routing document export.
//!
//! Routing services merge the graphs of many floors and buildings, so every
//! key is qualified with a [`FloorTag`]:
//!
//! - `graph` maps `"node_<i> <floor> <building>"` to the vertex coordinates,
//!   its neighbours (as qualified keys), floor and building.
//! - `names` maps `"<room> <building>"` to the qualified key of the vertex the
//!   room is bound to. Unlinked rooms are left out.

use std::{fmt, io::Write};

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use floornav_core::{graph::NavGraph, room::RoomInfo};

use super::{Error, Exporter, NodeIds};

/// Floor number and building name of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FloorTag {
    floor: String,
    building: String,
}

impl FloorTag {
    /// Creates a tag.
    pub fn new(floor: impl Into<String>, building: impl Into<String>) -> Self {
        Self {
            floor: floor.into(),
            building: building.into(),
        }
    }

    /// Reads a tag from a file stem shaped `<word> <floor> <building> ...`,
    /// e.g. `floor 3 main`.
    ///
    /// Returns `None` for stems with fewer than three tokens.
    pub fn from_file_stem(stem: &str) -> Option<Self> {
        let mut tokens = stem.split_whitespace().skip(1);
        let floor = tokens.next()?;
        let building = tokens.next()?;
        Some(Self::new(floor, building))
    }

    /// The floor.
    pub fn floor(&self) -> &str {
        &self.floor
    }

    /// The building.
    pub fn building(&self) -> &str {
        &self.building
    }

    fn node_key(&self, node_id: &str) -> String {
        format!("{node_id} {} {}", self.floor, self.building)
    }

    fn room_key(&self, number: &str) -> String {
        format!("{number} {}", self.building)
    }
}

impl fmt::Display for FloorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "floor {} of {}", self.floor, self.building)
    }
}

/// A vertex of the routing graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorNode {
    pub x: f64,
    pub y: f64,
    pub neighbours: Vec<String>,
    pub floor: String,
    pub korpus: String,
}

/// The routing document of one floor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorDocument {
    pub graph: IndexMap<String, FloorNode>,
    pub names: IndexMap<String, String>,
}

impl FloorDocument {
    /// Builds the document for a linked graph.
    pub fn new(graph: &NavGraph, rooms: &[RoomInfo], tag: &FloorTag) -> Self {
        let ids = NodeIds::new(graph);
        let key = |point| ids.get(point).map(|id| tag.node_key(id));

        let mut nodes: IndexMap<String, FloorNode> = graph
            .vertices()
            .filter_map(|(point, _)| {
                let node = FloorNode {
                    x: point.x(),
                    y: point.y(),
                    neighbours: Vec::new(),
                    floor: tag.floor.clone(),
                    korpus: tag.building.clone(),
                };
                Some((key(point)?, node))
            })
            .collect();

        // Neighbour lists follow edge order, not adjacency order.
        for edge in graph.edges() {
            let (Some(from), Some(to)) = (key(edge.from()), key(edge.to())) else {
                continue;
            };
            if let Some(node) = nodes.get_mut(&to) {
                node.neighbours.push(from.clone());
            }
            if let Some(node) = nodes.get_mut(&from) {
                node.neighbours.push(to);
            }
        }

        let names = rooms
            .iter()
            .filter_map(|room| {
                let node = key(room.node()?)?;
                Some((tag.room_key(room.number()), node))
            })
            .collect();

        Self {
            graph: nodes,
            names,
        }
    }
}

/// Writes the `graph` and `names` maps of [`FloorDocument`]s as two
/// pretty-printed JSON documents.
#[derive(Debug)]
pub struct FloorExporter<G, N> {
    tag: FloorTag,
    graph_writer: G,
    names_writer: N,
}

impl<G: Write, N: Write> FloorExporter<G, N> {
    /// Creates an exporter for the floor `tag`.
    pub fn new(tag: FloorTag, graph_writer: G, names_writer: N) -> Self {
        Self {
            tag,
            graph_writer,
            names_writer,
        }
    }

    /// Returns the underlying writers.
    pub fn into_inner(self) -> (G, N) {
        (self.graph_writer, self.names_writer)
    }
}

impl<G: Write, N: Write> Exporter for FloorExporter<G, N> {
    fn export(&mut self, graph: &NavGraph, rooms: &[RoomInfo]) -> Result<(), Error> {
        let document = FloorDocument::new(graph, rooms, &self.tag);
        debug!(
            tag:% = self.tag,
            nodes = document.graph.len(),
            names = document.names.len();
            "Writing floor document"
        );

        serde_json::to_writer_pretty(&mut self.graph_writer, &document.graph)?;
        self.graph_writer.write_all(b"\n")?;
        serde_json::to_writer_pretty(&mut self.names_writer, &document.names)?;
        self.names_writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use floornav_core::geometry::Point;

    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_tag_from_file_stem() {
        let tag = FloorTag::from_file_stem("floor 3 main").unwrap();

        assert_eq!(tag.floor(), "3");
        assert_eq!(tag.building(), "main");
        assert_eq!(
            FloorTag::from_file_stem("floor 3 main annex"),
            Some(FloorTag::new("3", "main"))
        );
        assert_eq!(FloorTag::from_file_stem("floor 3"), None);
        assert_eq!(FloorTag::from_file_stem("plan"), None);
    }

    #[test]
    fn test_document_keys_and_neighbours() {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(10.0, 0.0));
        graph.add_edge(p(10.0, 0.0), p(10.0, 10.0));
        graph.attach_room(p(10.0, 10.0), "101").unwrap();

        let mut linked = RoomInfo::new("101", p(12.0, 12.0));
        linked.link_to(p(10.0, 10.0));
        let rooms = vec![linked, RoomInfo::new("102", p(90.0, 90.0))];

        let tag = FloorTag::new("2", "east");
        let document = FloorDocument::new(&graph, &rooms, &tag);

        let keys: Vec<_> = document.graph.keys().map(String::as_str).collect();
        assert_eq!(keys, ["node_0 2 east", "node_1 2 east", "node_2 2 east"]);
        assert_eq!(
            document.graph["node_1 2 east"].neighbours,
            ["node_0 2 east", "node_2 2 east"]
        );
        assert_eq!(document.graph["node_0 2 east"].korpus, "east");
        assert_eq!(document.names.len(), 1);
        assert_eq!(document.names["101 east"], "node_2 2 east");
    }

    #[test]
    fn test_exporter_writes_both_maps() {
        let mut graph = NavGraph::new();
        graph.add_edge(p(0.0, 0.0), p(0.0, 5.0));

        let mut exporter = FloorExporter::new(FloorTag::new("1", "b"), Vec::new(), Vec::new());
        exporter.export(&graph, &[]).unwrap();
        let (graph_json, names_json) = exporter.into_inner();

        let graph_value: serde_json::Value = serde_json::from_slice(&graph_json).unwrap();
        let names_value: serde_json::Value = serde_json::from_slice(&names_json).unwrap();

        assert_eq!(graph_value["node_0 1 b"]["neighbours"][0], "node_1 1 b");
        assert_eq!(graph_value["node_1 1 b"]["floor"], "1");
        assert!(names_value.as_object().is_some_and(|names| names.is_empty()));
    }
}
