//! Layout data structures.
//!
//! Field names serialize in camelCase so files written by the editor load
//! unchanged.

use serde::{Deserialize, Serialize};

/// Canvas position. Only the editor reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A placed piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub id: String,
    /// Catalog id of the equipment placed here.
    pub equipment_id: String,
    pub position: Position,
    /// Meters above sea level; may be negative.
    pub elevation: f64,

    /// Last pressure shown by the editor (bar). Never read by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Last flow shown by the editor (l/min). Never read by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<f64>,
}

/// A hose coupling from `source_id` to `target_id`.
///
/// Handles name the connector port used. They are carried for the editor;
/// every outgoing edge of a node receives the same pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

/// A complete layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    /// Unix milliseconds
    #[serde(default)]
    pub created_at: i64,
    /// Unix milliseconds
    #[serde(default)]
    pub updated_at: i64,
}

impl Layout {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&LayoutEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
