//! Floornav - navigation graphs from floor-plan drawings.
//!
//! Reads the markup of a floor plan, extracts the corridor graph drawn on
//! its graph layer, collects the room labels, binds every room to the
//! corridor vertex its door stub leads to and exports the result for
//! routing services.
//!
//! The individual stages are exposed as [`build_graph`] and [`link_rooms`];
//! [`FloorPlanBuilder`] runs them with an [`AppConfig`](config::AppConfig).

pub mod config;
pub mod export;

mod error;
mod link;

pub use floornav_core::{geometry, graph, room};
pub use floornav_parser::{MarkupConfig, ParsedFloor, build_graph, error::Diagnostic};

pub use error::FloornavError;
pub use link::{LinkSummary, RoomLinker, link_rooms};

use std::{fs, path::Path};

use log::{debug, info, trace};

use config::AppConfig;
use export::{floor::FloorDocument, floor::FloorTag, navigation::NavigationDocument};
use graph::NavGraph;
use room::RoomInfo;

/// A floor whose rooms have been linked into its graph.
#[derive(Debug, Clone)]
pub struct LinkedFloor {
    graph: NavGraph,
    rooms: Vec<RoomInfo>,
    warnings: Vec<Diagnostic>,
    summary: LinkSummary,
}

impl LinkedFloor {
    /// The linked graph.
    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    /// All rooms, linked or not, in document order.
    pub fn rooms(&self) -> &[RoomInfo] {
        &self.rooms
    }

    /// Parser warnings of the source document.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Linking outcome counts.
    pub fn summary(&self) -> LinkSummary {
        self.summary
    }

    /// The navigation document of this floor.
    pub fn navigation_document(&self) -> NavigationDocument {
        NavigationDocument::new(&self.graph, &self.rooms)
    }

    /// The routing document of this floor under `tag`.
    pub fn floor_document(&self, tag: &FloorTag) -> FloorDocument {
        FloorDocument::new(&self.graph, &self.rooms, tag)
    }

    /// Splits the floor into graph and rooms.
    pub fn into_parts(self) -> (NavGraph, Vec<RoomInfo>) {
        (self.graph, self.rooms)
    }
}

/// Builder for turning floor-plan markup into linked navigation graphs.
///
/// Every call works on its own document state, so one builder can process
/// any number of floors.
///
/// # Examples
///
/// ```rust
/// use floornav::{FloorPlanBuilder, config::AppConfig};
///
/// let source = r#"
///     <path id="graph" d="M 0 0 L 0 100 M 0 100 L 0 110"/>
///     <g id="rooms_numbers">
///       <text id="101" x="3" y="115">101</text>
///     </g>
/// "#;
///
/// let builder = FloorPlanBuilder::new(AppConfig::default());
/// let floor = builder.build(source).expect("Failed to build floor");
///
/// assert_eq!(floor.summary().linked(), 1);
/// assert_eq!(floor.graph().edge_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct FloorPlanBuilder {
    config: AppConfig,
}

impl FloorPlanBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse markup into an unlinked graph and its rooms.
    ///
    /// # Errors
    ///
    /// Returns [`FloornavError::Parse`] carrying the diagnostics and the
    /// source when the document is malformed.
    pub fn parse(&self, source: &str) -> Result<ParsedFloor, FloornavError> {
        info!("Parsing floor plan");

        let markers = self.config.markup().to_markup_config();
        let floor = floornav_parser::parse(source, &markers)
            .map_err(|err| FloornavError::new_parse_error(err, source))?;

        debug!(
            vertices = floor.graph().vertex_count(),
            rooms = floor.rooms().len();
            "Floor plan parsed successfully"
        );
        trace!(graph:? = floor.graph(); "Parsed graph");

        Ok(floor)
    }

    /// Link the rooms of a parsed floor into its graph.
    ///
    /// # Errors
    ///
    /// Returns [`FloornavError::Graph`] if the graph is internally
    /// inconsistent.
    pub fn link(&self, floor: ParsedFloor) -> Result<LinkedFloor, FloornavError> {
        let (mut graph, mut rooms, warnings) = floor.into_parts();

        let linker = RoomLinker::new(self.config.linking().room_link_threshold());
        let summary = linker.link(&mut graph, &mut rooms)?;

        Ok(LinkedFloor {
            graph,
            rooms,
            warnings,
            summary,
        })
    }

    /// Parse and link a document.
    pub fn build(&self, source: &str) -> Result<LinkedFloor, FloornavError> {
        let floor = self.parse(source)?;
        self.link(floor)
    }

    /// Read, parse and link the document at `path`.
    ///
    /// # Errors
    ///
    /// Errors are wrapped in [`FloornavError::Batch`] naming `path`.
    pub fn build_file(&self, path: impl AsRef<Path>) -> Result<LinkedFloor, FloornavError> {
        let path = path.as_ref();
        info!(path:? = path; "Reading floor plan");

        fs::read_to_string(path)
            .map_err(FloornavError::from)
            .and_then(|source| self.build(&source))
            .map_err(|err| err.in_document(path))
    }
}
