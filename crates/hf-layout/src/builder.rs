//! Layout construction and mutation.
//!
//! Mirrors what the editor does to a layout: place, move, connect and
//! remove equipment. Every mutation bumps `updated_at`.

use hf_equipment::Equipment;
use uuid::Uuid;

use crate::model::{Layout, LayoutEdge, LayoutNode, Position};

/// Current wall clock as Unix milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// An empty layout; a random id is generated when `id` is `None`.
pub fn create_empty_layout(id: Option<String>) -> Layout {
    let now = now_millis();
    Layout {
        id: id.unwrap_or_else(new_id),
        name: None,
        nodes: Vec::new(),
        edges: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

/// A fresh node for `equipment` with a random id.
pub fn create_node(equipment: &Equipment, position: Position, elevation: f64) -> LayoutNode {
    LayoutNode {
        id: new_id(),
        equipment_id: equipment.id.clone(),
        position,
        elevation,
        pressure: None,
        flow: None,
    }
}

/// A fresh edge with a random id.
pub fn create_edge(
    source_id: impl Into<String>,
    target_id: impl Into<String>,
    source_handle: Option<String>,
    target_handle: Option<String>,
) -> LayoutEdge {
    LayoutEdge {
        id: new_id(),
        source_id: source_id.into(),
        target_id: target_id.into(),
        source_handle,
        target_handle,
    }
}

/// Partial update of a node's editor-controlled fields.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeUpdate {
    pub position: Option<Position>,
    pub elevation: Option<f64>,
}

impl Layout {
    pub fn new(id: impl Into<String>) -> Self {
        create_empty_layout(Some(id.into()))
    }

    fn touch(&mut self) {
        self.updated_at = now_millis().max(self.updated_at);
    }

    /// Place `equipment` and return the new node.
    pub fn add_node(
        &mut self,
        equipment: &Equipment,
        position: Position,
        elevation: f64,
    ) -> &LayoutNode {
        self.nodes.push(create_node(equipment, position, elevation));
        self.touch();
        &self.nodes[self.nodes.len() - 1]
    }

    /// Remove a node and every edge touching it. Returns false if absent.
    pub fn remove_node(&mut self, node_id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != node_id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges
            .retain(|e| e.source_id != node_id && e.target_id != node_id);
        self.touch();
        true
    }

    /// Apply a position/elevation update. Returns false if absent.
    pub fn update_node(&mut self, node_id: &str, update: NodeUpdate) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) else {
            return false;
        };
        if let Some(position) = update.position {
            node.position = position;
        }
        if let Some(elevation) = update.elevation {
            node.elevation = elevation;
        }
        self.touch();
        true
    }

    /// Connect two existing nodes.
    ///
    /// Returns `None` when either node is missing or an edge between the
    /// same pair in the same direction already exists.
    pub fn add_edge(
        &mut self,
        source_id: &str,
        target_id: &str,
        source_handle: Option<String>,
        target_handle: Option<String>,
    ) -> Option<&LayoutEdge> {
        let exists = self
            .edges
            .iter()
            .any(|e| e.source_id == source_id && e.target_id == target_id);
        if exists || self.node(source_id).is_none() || self.node(target_id).is_none() {
            return None;
        }
        self.edges
            .push(create_edge(source_id, target_id, source_handle, target_handle));
        self.touch();
        self.edges.last()
    }

    /// Remove an edge by id. Returns false if absent.
    pub fn remove_edge(&mut self, edge_id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != edge_id);
        let removed = self.edges.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Drop all nodes and edges, keeping id and name.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.touch();
    }
}
