//! Export functionality for linked floor graphs.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a linked graph and its rooms to an output format. It is the final
//! stage of the floornav pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Markup
//!     ↓ parse
//! Graph + rooms
//!     ↓ link
//! Linked graph + rooms
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`navigation`] - node, edge and room lists with generated node ids
//! - [`floor`] - per-floor routing maps keyed by floor-qualified node ids
//!
//! Both backends number vertices `node_<i>` in graph insertion order, so the
//! two documents of one floor agree on ids.

pub mod floor;
pub mod navigation;

use std::io;

use indexmap::IndexMap;
use thiserror::Error;

use floornav_core::{geometry::Point, graph::NavGraph, room::RoomInfo};

/// Abstraction for export backends.
pub trait Exporter {
    /// Writes `graph` and `rooms` in the backend's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the document cannot be encoded, or
    /// [`Error::Io`] if writing the output fails.
    fn export(&mut self, graph: &NavGraph, rooms: &[RoomInfo]) -> Result<(), Error>;
}

/// Errors that can occur during export.
///
/// Converted into [`FloornavError::Export`](crate::FloornavError::Export) at
/// the crate boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Sequential `node_<i>` ids for the vertices of a graph.
#[derive(Debug, Clone)]
pub(crate) struct NodeIds {
    ids: IndexMap<Point, String>,
}

impl NodeIds {
    pub(crate) fn new(graph: &NavGraph) -> Self {
        let ids = graph
            .vertices()
            .enumerate()
            .map(|(index, (point, _))| (point, format!("node_{index}")))
            .collect();
        Self { ids }
    }

    pub(crate) fn get(&self, point: Point) -> Option<&str> {
        self.ids.get(&point).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_follow_insertion_order() {
        let mut graph = NavGraph::new();
        graph.add_edge(Point::new(5.0, 5.0), Point::new(0.0, 0.0));
        let ids = NodeIds::new(&graph);

        assert_eq!(ids.get(Point::new(5.0, 5.0)), Some("node_0"));
        assert_eq!(ids.get(Point::new(0.0, 0.0)), Some("node_1"));
        assert_eq!(ids.get(Point::new(1.0, 1.0)), None);
    }
}
