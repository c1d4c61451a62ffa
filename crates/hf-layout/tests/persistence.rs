//! Layout persistence and queries against real files.

use hf_equipment::builtin_catalog;
use hf_layout::{
    Layout, LayoutError, Position, ValidationError, downstream_nodes, from_json_str, load,
    load_json, load_yaml, save_json, save_yaml, to_json_string, upstream_nodes,
};

fn relay_layout() -> Layout {
    let catalog = builtin_catalog();
    let mut layout = Layout::new("relay");
    layout.name = Some("Relay".into());
    let src = layout
        .add_node(catalog.get("source").unwrap(), Position::new(0.0, 0.0), 2.0)
        .id
        .clone();
    let pump = layout
        .add_node(catalog.get("pump-ziegler").unwrap(), Position::new(50.0, 0.0), 2.0)
        .id
        .clone();
    let split = layout
        .add_node(catalog.get("splitter-2").unwrap(), Position::new(100.0, 0.0), 4.0)
        .id
        .clone();
    let wall = layout
        .add_node(catalog.get("terminal-wall").unwrap(), Position::new(150.0, 0.0), 6.0)
        .id
        .clone();
    layout.add_edge(&src, &pump, None, None).unwrap();
    layout.add_edge(&pump, &split, None, None).unwrap();
    layout
        .add_edge(&split, &wall, Some("out-1".into()), None)
        .unwrap();
    layout
}

#[test]
fn json_file_round_trip() {
    let layout = relay_layout();
    let path = std::env::temp_dir().join("hf_layout_roundtrip.json");

    save_json(&path, &layout).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(layout, loaded);

    let by_ext = load(&path).unwrap();
    assert_eq!(layout, by_ext);
}

#[test]
fn yaml_file_round_trip() {
    let layout = relay_layout();
    let path = std::env::temp_dir().join("hf_layout_roundtrip.yaml");

    save_yaml(&path, &layout).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(layout, loaded);
}

#[test]
fn string_round_trip_keeps_camel_case() {
    let layout = relay_layout();
    let json = to_json_string(&layout).unwrap();
    assert!(json.contains("\"equipmentId\""));
    assert!(json.contains("\"sourceHandle\": \"out-1\""));
    assert_eq!(from_json_str(&json).unwrap(), layout);
}

#[test]
fn shape_errors_surface() {
    let bad_json = r#"{"id": "x", "nodes": {}, "edges": []}"#;
    assert!(matches!(from_json_str(bad_json), Err(LayoutError::Json(_))));

    let empty_id = r#"{"id": "", "nodes": [], "edges": []}"#;
    assert!(matches!(
        from_json_str(empty_id),
        Err(LayoutError::Validation(ValidationError::EmptyLayoutId))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("hf_layout_definitely_missing.json");
    assert!(matches!(load_json(&path), Err(LayoutError::Io(_))));
}

#[test]
fn neighbour_queries() {
    let layout = relay_layout();
    let pump = &layout.nodes[1].id;
    let split = &layout.nodes[2].id;

    let down: Vec<&str> = downstream_nodes(&layout, pump)
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(down, [split.as_str()]);

    let up: Vec<&str> = upstream_nodes(&layout, pump)
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(up, [layout.nodes[0].id.as_str()]);

    assert!(downstream_nodes(&layout, "ghost").is_empty());
}
