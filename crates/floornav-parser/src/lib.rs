//! # Floornav Parser
//!
//! Turns a floor-plan markup document into a navigation graph and a list of
//! room annotations. The pipeline works line by line:
//!
//! 1. **Scan** - Recognise element heads (`<g>`, `<path>`, `<text>`, ...)
//! 2. **Collect** - Track open groups, skip regions and component offsets
//! 3. **Trace** - Tokenize graph path data and extract line segments
//! 4. **Build** - Insert segments into the graph, rejecting redundant edges
//!
//! ## Usage
//!
//! ```
//! # use floornav_parser::{parse, MarkupConfig, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <path id="graph" d="M 0 0 L 0 100"/>
//!         <g id="rooms_numbers">
//!           <text id="101" x="2" y="50">101</text>
//!         </g>
//!     "#;
//!
//!     let floor = parse(source, &MarkupConfig::default())?;
//!     assert_eq!(floor.graph().edge_count(), 1);
//!     assert_eq!(floor.rooms().len(), 1);
//!     Ok(())
//! }
//! ```

mod config;
pub mod coordinates;
mod document;
pub mod error;
pub mod markup;
pub mod path_data;
pub mod segments;
mod span;

pub use config::MarkupConfig;
pub use document::ParsedFloor;
pub use error::ParseError;
pub use span::Span;

use log::{debug, info};

use floornav_core::{graph::NavGraph, room::RoomInfo};

use document::DocumentParser;

/// Parse one floor-plan document.
///
/// # Arguments
///
/// * `source` - The markup text of the document
/// * `config` - The id markers that give elements their roles
///
/// # Returns
///
/// The unlinked graph and rooms together with any warnings, or a
/// [`ParseError`] carrying the fatal diagnostic that stopped parsing.
pub fn parse(source: &str, config: &MarkupConfig) -> Result<ParsedFloor, ParseError> {
    info!(bytes = source.len(); "Parsing floor-plan markup");

    let floor = DocumentParser::new(config).parse(source)?;

    debug!(
        vertices = floor.graph().vertex_count(),
        edges = floor.graph().edge_count(),
        rooms = floor.rooms().len(),
        warnings = floor.warnings().len();
        "Parsed floor-plan markup"
    );
    Ok(floor)
}

/// Parse a document with the default markers and drop the warnings.
pub fn build_graph(source: &str) -> Result<(NavGraph, Vec<RoomInfo>), ParseError> {
    let (graph, rooms, _) = parse(source, &MarkupConfig::default())?.into_parts();
    Ok((graph, rooms))
}
