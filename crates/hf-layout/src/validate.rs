//! Shape validation for loaded layouts.
//!
//! Only structural problems that make a file unusable are rejected.
//! Orphaned edges and unknown equipment ids are accepted; the engine
//! reports those as part of a calculation.

use std::collections::HashSet;

use crate::model::Layout;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Layout id is empty")]
    EmptyLayoutId,

    #[error("Node at position {position} has an empty id")]
    EmptyNodeId { position: usize },

    #[error("Duplicate node id: {id}")]
    DuplicateNodeId { id: String },

    #[error("Duplicate edge id: {id}")]
    DuplicateEdgeId { id: String },
}

pub fn validate_layout(layout: &Layout) -> Result<(), ValidationError> {
    if layout.id.trim().is_empty() {
        return Err(ValidationError::EmptyLayoutId);
    }

    let mut node_ids = HashSet::new();
    for (position, node) in layout.nodes.iter().enumerate() {
        if node.id.is_empty() {
            return Err(ValidationError::EmptyNodeId { position });
        }
        if !node_ids.insert(node.id.as_str()) {
            return Err(ValidationError::DuplicateNodeId {
                id: node.id.clone(),
            });
        }
    }

    let mut edge_ids = HashSet::new();
    for edge in &layout.edges {
        if !edge_ids.insert(edge.id.as_str()) {
            return Err(ValidationError::DuplicateEdgeId {
                id: edge.id.clone(),
            });
        }
    }

    Ok(())
}
