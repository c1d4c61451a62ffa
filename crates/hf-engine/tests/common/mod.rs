//! Layout fixtures shared by the engine integration tests.

#![allow(dead_code)]

use hf_layout::{Layout, LayoutEdge, LayoutNode, Position};

/// `(node id, equipment id, elevation)`
pub type NodeSpec<'a> = (&'a str, &'a str, f64);

pub fn build(nodes: &[NodeSpec<'_>], edges: &[(&str, &str)]) -> Layout {
    Layout {
        id: "fixture".into(),
        name: None,
        nodes: nodes
            .iter()
            .enumerate()
            .map(|(i, &(id, equipment, elevation))| LayoutNode {
                id: id.into(),
                equipment_id: equipment.into(),
                position: Position::new(i as f64 * 100.0, 0.0),
                elevation,
                pressure: None,
                flow: None,
            })
            .collect(),
        edges: edges
            .iter()
            .enumerate()
            .map(|(i, &(s, t))| LayoutEdge {
                id: format!("edge-{i}"),
                source_id: s.into(),
                target_id: t.into(),
                source_handle: None,
                target_handle: None,
            })
            .collect(),
        created_at: 0,
        updated_at: 0,
    }
}

/// source -> pump -> 1.5" hose -> cannon, cannon at `cannon_elevation`.
pub fn single_line(cannon_elevation: f64) -> Layout {
    build(
        &[
            ("src", "source", 0.0),
            ("pump", "pump-ziegler", 0.0),
            ("hose", "hose-1.5", 0.0),
            ("cannon", "terminal-cannon", cannon_elevation),
        ],
        &[("src", "pump"), ("pump", "hose"), ("hose", "cannon")],
    )
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
