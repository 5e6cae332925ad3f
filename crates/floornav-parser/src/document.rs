//! Per-document parsing state.
//!
//! [`DocumentParser`] walks the markup line by line and owns everything
//! that changes while it does: the active component offset, the stack of
//! open groups, the skip state, the graph under construction and the rooms
//! collected so far. A fresh parser is created for every document, so
//! several floors can be processed in one process without sharing state.
//!
//! Elements with an id are dispatched in priority order:
//!
//! 1. component markers update the offset,
//! 2. graph paths feed the segment extractor and the graph,
//! 3. text labels directly inside a room group become rooms,
//! 4. staircase landings nested two levels inside a staircase group become
//!    rooms as well.
//!
//! Everything inside a group marked for skipping is ignored until that
//! group closes.

use log::{debug, trace, warn};

use floornav_core::{
    geometry::Offset,
    graph::{EdgeInsertion, NavGraph},
    room::RoomInfo,
};

use crate::{
    config::MarkupConfig,
    coordinates::find_coordinate,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError, Result},
    markup::{Element, Tag, scan_line},
    path_data::{CommandKind, tokenize},
    segments::extract,
    span::Span,
};

/// The graph and rooms extracted from one document.
#[derive(Debug, Clone)]
pub struct ParsedFloor {
    graph: NavGraph,
    rooms: Vec<RoomInfo>,
    warnings: Vec<Diagnostic>,
}

impl ParsedFloor {
    /// The corridor graph, before room linking.
    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    /// Rooms in document order, all unlinked.
    pub fn rooms(&self) -> &[RoomInfo] {
        &self.rooms
    }

    /// Recoverable findings raised while parsing.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Splits the floor into graph, rooms and warnings.
    pub fn into_parts(self) -> (NavGraph, Vec<RoomInfo>, Vec<Diagnostic>) {
        (self.graph, self.rooms, self.warnings)
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenGroup<'a> {
    id: &'a str,
    span: Span,
}

#[derive(Debug, Default, Clone, Copy)]
struct Stats {
    paths: usize,
    segments: usize,
    redundant: usize,
}

/// Parser context for a single markup document.
#[derive(Debug)]
pub(crate) struct DocumentParser<'a> {
    config: &'a MarkupConfig,
    offset: Offset,
    groups: Vec<OpenGroup<'a>>,
    /// Stack depth of the skipped group currently in force.
    skip_depth: Option<usize>,
    graph: NavGraph,
    rooms: Vec<RoomInfo>,
    diagnostics: DiagnosticCollector,
    stats: Stats,
}

impl<'a> DocumentParser<'a> {
    pub(crate) fn new(config: &'a MarkupConfig) -> Self {
        Self {
            config,
            offset: Offset::default(),
            groups: Vec::new(),
            skip_depth: None,
            graph: NavGraph::new(),
            rooms: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
            stats: Stats::default(),
        }
    }

    /// Processes the whole document.
    ///
    /// Stops at the first fatal diagnostic; warnings emitted before it are
    /// returned with it.
    pub(crate) fn parse(mut self, source: &'a str) -> std::result::Result<ParsedFloor, ParseError> {
        for (span, line) in lines(source) {
            if let Err(fatal) = self.process_line(line, span) {
                let mut diagnostics = self.diagnostics.finish();
                diagnostics.push(fatal);
                return Err(ParseError::new(diagnostics));
            }
        }

        debug!(
            paths = self.stats.paths,
            segments = self.stats.segments,
            redundant = self.stats.redundant,
            vertices = self.graph.vertex_count(),
            edges = self.graph.edge_count(),
            rooms = self.rooms.len();
            "Document processed"
        );

        Ok(ParsedFloor {
            graph: self.graph,
            rooms: self.rooms,
            warnings: self.diagnostics.finish(),
        })
    }

    fn process_line(&mut self, line: &'a str, span: Span) -> Result<()> {
        let Some(element) = scan_line(line) else {
            return Ok(());
        };

        match element.tag() {
            Tag::GroupClose => {
                self.close_group();
                Ok(())
            }
            Tag::Group => {
                // Unnamed groups are not tracked, only their closing tag is.
                let Some(id) = element.id() else {
                    return Ok(());
                };
                let skipping = self.is_skipping();
                self.open_group(id, span);

                let result = if skipping {
                    Ok(())
                } else {
                    self.dispatch(&element, id, line, span)
                };

                if element.is_self_closing() {
                    self.close_group();
                }
                result
            }
            Tag::Path | Tag::Text | Tag::Rect => {
                if self.is_skipping() {
                    return Ok(());
                }
                match element.id() {
                    Some(id) => self.dispatch(&element, id, line, span),
                    None => Ok(()),
                }
            }
        }
    }

    fn dispatch(&mut self, element: &Element<'a>, id: &'a str, line: &'a str, span: Span) -> Result<()> {
        let tag = element.tag();

        if self.config.is_component(id) {
            return self.set_offset(id, span);
        }

        if self.config.is_graph(id) {
            return match (tag, element.attribute("d")) {
                (Tag::Path, Some(path_data)) => {
                    self.add_path(id, path_data, span);
                    Ok(())
                }
                (Tag::Path, None) => Err(Diagnostic::error(format!(
                    "path `{id}` is marked as graph geometry but has no path data"
                ))
                .with_code(ErrorCode::E005)
                .with_label(span, "missing `d` attribute")),
                _ => {
                    trace!(id; "Graph marker on an element without path data");
                    Ok(())
                }
            };
        }

        if tag == Tag::Text {
            let innermost = self.groups.last().copied();
            if let Some(group) = innermost.filter(|group| self.config.is_room_group(group.id)) {
                return self.add_room(id, line, span, group);
            }
        }

        if matches!(tag, Tag::Path | Tag::Text)
            && self.groups.len() > 2
            && self.config.is_staircase(id)
        {
            let group = self.groups[self.groups.len() - 2];
            if self.config.is_staircase(group.id) {
                return self.add_room(id, line, span, group);
            }
        }

        Ok(())
    }

    fn set_offset(&mut self, id: &str, span: Span) -> Result<()> {
        let tokens: Vec<&str> = id.split_whitespace().collect();
        let [_, dx, dy] = tokens[..] else {
            return Err(Diagnostic::error(format!("malformed component marker `{id}`"))
                .with_code(ErrorCode::E001)
                .with_label(span, "expected `<name> <x offset> <y offset>`")
                .with_help("component ids carry exactly three whitespace-separated tokens"));
        };

        let (Ok(dx), Ok(dy)) = (dx.parse::<f64>(), dy.parse::<f64>()) else {
            return Err(Diagnostic::error(format!(
                "component marker `{id}` has a non-numeric offset"
            ))
            .with_code(ErrorCode::E002)
            .with_label(span, "offsets must be numbers"));
        };

        self.offset = Offset::new(dx, dy);
        debug!(id, dx, dy; "Component offset updated");
        Ok(())
    }

    fn add_path(&mut self, id: &str, path_data: &str, span: Span) {
        let trace = extract(&tokenize(path_data), self.offset);

        let mut reported: Vec<CommandKind> = Vec::new();
        for &kind in trace.unsupported() {
            if reported.contains(&kind) {
                continue;
            }
            reported.push(kind);
            warn!(id, command:% = kind; "Ignoring unsupported path command");
            self.diagnostics.emit(
                Diagnostic::warning(format!("unsupported path command `{kind}` in `{id}`"))
                    .with_code(ErrorCode::W100)
                    .with_label(span, "command ignored")
                    .with_help("only absolute M, L, H, V and Z commands are interpreted"),
            );
        }

        for &segment in trace.segments() {
            if self.graph.add_segment(segment) == EdgeInsertion::Redundant {
                self.stats.redundant += 1;
            }
        }

        self.stats.paths += 1;
        self.stats.segments += trace.segments().len();
        trace!(id, segments = trace.segments().len(); "Graph path processed");
    }

    fn add_room(&mut self, id: &str, line: &str, span: Span, group: OpenGroup<'_>) -> Result<()> {
        let Some(found) = find_coordinate(line) else {
            return Err(Diagnostic::error(format!(
                "annotation `{id}` has no recognizable coordinate"
            ))
            .with_code(ErrorCode::E003)
            .with_label(span, "annotation without coordinate")
            .with_secondary_label(group.span, "inside this group")
            .with_help(
                "place the label with `translate(x y)`, `matrix(a b c d x y)`, \
                 path data starting with `M x y`, or `x`/`y` attributes",
            ));
        };

        let Some(position) = found.point() else {
            let (x, y) = found.raw();
            return Err(Diagnostic::error(format!(
                "annotation `{id}` has an invalid coordinate `{x} {y}`"
            ))
            .with_code(ErrorCode::E004)
            .with_label(span, format!("unparsable {}", found.source())));
        };

        let room = RoomInfo::new(id, position.translate(self.offset));
        trace!(number = id, position:? = room.position(); "Room collected");
        self.rooms.push(room);
        Ok(())
    }

    fn open_group(&mut self, id: &'a str, span: Span) {
        self.groups.push(OpenGroup { id, span });
        if self.skip_depth.is_none() && self.config.is_skipped(id) {
            self.skip_depth = Some(self.groups.len());
            debug!(id; "Skipping group content");
        }
    }

    fn close_group(&mut self) {
        if self.groups.pop().is_none() {
            return;
        }
        if self
            .skip_depth
            .is_some_and(|depth| self.groups.len() < depth)
        {
            self.skip_depth = None;
        }
    }

    fn is_skipping(&self) -> bool {
        self.skip_depth.is_some()
    }
}

/// Splits `source` into lines with the span of their trimmed content.
fn lines(source: &str) -> impl Iterator<Item = (Span, &str)> {
    let mut offset = 0;
    source.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();

        let line = raw.trim_end();
        let indent = line.len() - line.trim_start().len();
        (Span::new(start + indent..start + line.len()), line)
    })
}
