//! Integration tests for the FloorPlanBuilder API
//!
//! These tests run complete documents through parsing, linking and export
//! using only the public surface of the crate.

use floornav::{
    FloorPlanBuilder, FloornavError, build_graph,
    config::AppConfig,
    export::{Exporter, floor::FloorTag, navigation::NavigationExporter},
    geometry::Point,
    link_rooms,
};

const CORRIDOR: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
<g id="Component 100 0">
</g>
<g id="graph">
  <path id="graph_main" d="M0 0 H 50 H 150 H 200"/>
  <path id="graph_doors" d="M50 0 V 10 M150 0 V -10"/>
</g>
<g id="no_use_old">
  <path id="graph_old" d="M0 0 V 300"/>
</g>
<g id="rooms_numbers">
  <text id="101" transform="translate(50 14)">101</text>
  <text id="102" transform="matrix(1 0 0 1 150 0)">102</text>
  <text id="103" x="900" y="900">103</text>
</g>
</svg>
"#;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn test_builder_default() {
    let builder = FloorPlanBuilder::default();

    assert_eq!(builder.config().linking().room_link_threshold(), 40.0);
}

#[test]
fn test_build_links_door_stubs() {
    let builder = FloorPlanBuilder::new(AppConfig::default());
    let floor = builder.build(CORRIDOR).expect("Failed to build floor");

    // Corridor (100,0)-(300,0) with door stubs at x=150 and x=250.
    assert_eq!(floor.summary().linked(), 1);
    assert_eq!(floor.summary().unlinked(), 1);
    assert_eq!(floor.summary().skipped(), 1);

    let rooms = floor.rooms();
    assert_eq!(rooms[0].number(), "101");
    assert_eq!(rooms[0].position(), p(150.0, 14.0));
    assert_eq!(rooms[0].node(), Some(p(150.0, 0.0)));
    assert!(!floor.graph().contains_vertex(p(150.0, 10.0)));

    // "102" sits on the corridor junction, which is not a stub.
    assert!(rooms[1].node().is_none());
    assert!(rooms[2].node().is_none());

    assert!(floor.graph().is_forest());
    assert!(floor.graph().check_consistency().is_ok());
}

#[test]
fn test_stage_functions_compose() {
    let (graph, rooms) = build_graph(CORRIDOR).expect("Failed to parse");
    assert_eq!(graph.edge_count(), 5);
    assert_eq!(rooms.len(), 3);

    let (graph, rooms) = link_rooms(graph, rooms, 40.0).expect("Failed to link");
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(rooms.iter().filter(|room| room.is_linked()).count(), 1);
}

#[test]
fn test_parse_error_carries_source() {
    let source = "<g id=\"Component 1\">\n</g>\n";
    let builder = FloorPlanBuilder::default();

    match builder.build(source) {
        Err(FloornavError::Parse { err, src }) => {
            assert_eq!(src, source);
            assert_eq!(err.diagnostics().len(), 1);
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_build_file_names_document() {
    let builder = FloorPlanBuilder::default();
    let err = builder
        .build_file("does/not/exist.svg")
        .expect_err("Missing file should fail");

    match err {
        FloornavError::Batch { path, source } => {
            assert!(path.ends_with("exist.svg"));
            assert!(matches!(*source, FloornavError::Io(_)));
        }
        other => panic!("Expected a batch error, got {other:?}"),
    }
}

#[test]
fn test_builder_reusability() {
    let builder = FloorPlanBuilder::default();

    let first = builder.build(CORRIDOR).expect("Failed to build first floor");
    let second = builder
        .build(r#"<path id="graph" d="M 0 0 L 10 0"/>"#)
        .expect("Failed to build second floor");

    assert_eq!(first.graph().edge_count(), 4);
    assert!(second.graph().contains_vertex(p(0.0, 0.0)));
}

#[test]
fn test_documents_share_node_ids() {
    let floor = FloorPlanBuilder::default()
        .build(CORRIDOR)
        .expect("Failed to build floor");

    let navigation = floor.navigation_document();
    let routing = floor.floor_document(&FloorTag::new("1", "main"));

    let anchor = navigation.rooms[0]
        .node_id
        .clone()
        .expect("101 should be linked");
    assert_eq!(routing.names["101 main"], format!("{anchor} 1 main"));
    assert_eq!(navigation.nodes.len(), routing.graph.len());
}

#[test]
fn test_navigation_exporter_output() {
    let floor = FloorPlanBuilder::default()
        .build(CORRIDOR)
        .expect("Failed to build floor");

    let mut exporter = NavigationExporter::new(Vec::new());
    exporter
        .export(floor.graph(), floor.rooms())
        .expect("Failed to export");
    let json = String::from_utf8(exporter.into_inner()).expect("Output should be UTF-8");

    assert!(json.contains("\"node_id\": null"));
    assert!(json.contains("\"number\": \"101\""));
}
