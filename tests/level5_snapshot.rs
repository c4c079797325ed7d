//! Level 5: Snapshot & Configuration Tests
//!
//! Tests rebuilding from JSON documents, TOML configuration of styles and
//! defaults, and intent serialization.

mod common;

use solution_diagram::{
    DiagramConfig, DiagramController, DiagramError, DiagramEvent, Position, Snapshot,
};
use std::cell::RefCell;
use std::rc::Rc;

const SNAPSHOT: &str = r##"{
    "components": [
        {"_id": "web", "name": "Web"},
        {"_id": "db", "name": "Database"},
        {"id": "cache"}
    ],
    "connections": [
        {"_id": "c-1", "source": "web", "destination": "db", "color": "#00ff00"},
        {"_id": "c-2", "source": "web", "destination": "queue"}
    ],
    "layout": {
        "db": {"position": {"x": 300, "y": 40}}
    }
}"##;

#[test]
fn test_apply_json_snapshot() {
    common::init_logging();
    let ctrl = DiagramController::new();
    let deleted = Rc::new(RefCell::new(Vec::new()));
    ctrl.on_delete({
        let deleted = deleted.clone();
        move |event| deleted.borrow_mut().push(event.id.clone())
    });

    let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();
    ctrl.apply_snapshot(&snapshot);

    let graph = ctrl.graph();
    let graph = graph.borrow();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.node("db").unwrap().position, Position::new(300.0, 40.0));
    assert_eq!(graph.node("web").unwrap().position, Position::new(10.0, 10.0));
    assert_eq!(graph.node("cache").unwrap().label, "");
    assert_eq!(
        graph.edge("c-1").unwrap().color,
        slint::Color::from_rgb_u8(0, 255, 0)
    );
    assert!(!graph.contains_edge("c-2"));
    assert_eq!(*deleted.borrow(), vec!["c-2".to_string()]);
}

#[test]
fn test_invalid_connection_color_falls_back_to_default() {
    common::init_logging();
    let ctrl = DiagramController::new();
    let snapshot = Snapshot::from_json_str(
        r#"{
            "components": [{"_id": "a"}, {"_id": "b"}],
            "connections": [{"_id": "ab", "source": "a", "destination": "b", "color": "teal"}]
        }"#,
    )
    .unwrap();

    ctrl.apply_snapshot(&snapshot);

    let graph = ctrl.graph();
    let edge = graph.borrow().edge("ab").cloned().unwrap();
    assert_eq!(edge.color, slint::Color::from_rgb_u8(255, 255, 255));
}

#[test]
fn test_malformed_snapshot_is_an_error() {
    let err = Snapshot::from_json_str("{\"components\": 3}").unwrap_err();
    assert!(matches!(err, DiagramError::Snapshot(_)));
}

#[test]
fn test_toml_config_drives_rendering() {
    common::init_logging();
    let config = DiagramConfig::from_toml_str(
        r##"
        default_position = { x = 50.0, y = 60.0 }

        [node]
        width = 120.0
        height = 50.0

        [edge]
        color = "#ff8800"
        stroke_width = 3.0
        "##,
    )
    .unwrap();
    let ctrl = DiagramController::with_config(config);

    ctrl.update_graph(
        &[
            solution_diagram::Component::new("a", "A"),
            solution_diagram::Component::new("b", "B"),
        ],
        &[solution_diagram::Connection::new("ab", "a", "b")],
        &solution_diagram::Layout::new(),
    );

    let graph = ctrl.graph();
    let graph = graph.borrow();
    let node = graph.node("a").unwrap();
    assert_eq!(node.position, Position::new(50.0, 60.0));
    assert_eq!((node.size.width, node.size.height), (120.0, 50.0));
    let edge = graph.edge("ab").unwrap();
    assert_eq!(edge.color, slint::Color::from_rgb_u8(255, 136, 0));
    assert_eq!(edge.stroke_width, 3.0);
}

#[test]
fn test_bad_toml_color_rejected() {
    let err = DiagramConfig::from_toml_str("[node]\nfill = \"blue\"\n").unwrap_err();
    assert!(matches!(err, DiagramError::Config(_)));
}

#[test]
fn test_intents_serialize_for_transport() {
    let json = serde_json::to_string(&DiagramEvent::drop("web", 1.5, 2.0)).unwrap();
    assert_eq!(json, r#"{"type":"drop","id":"web","x":1.5,"y":2.0}"#);
}
