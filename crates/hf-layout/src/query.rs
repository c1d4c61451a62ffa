//! Neighbour queries on a layout.

use crate::index::LayoutIndex;
use crate::model::{Layout, LayoutNode};

/// Nodes fed directly by `node_id`, one entry per resolved outgoing edge.
pub fn downstream_nodes<'a>(layout: &'a Layout, node_id: &str) -> Vec<&'a LayoutNode> {
    let index = LayoutIndex::from_layout(layout);
    index
        .index_of(node_id)
        .map(|i| index.downstream(i).iter().map(|&t| index.node(t)).collect())
        .unwrap_or_default()
}

/// Nodes feeding `node_id`, one entry per resolved incoming edge.
pub fn upstream_nodes<'a>(layout: &'a Layout, node_id: &str) -> Vec<&'a LayoutNode> {
    let index = LayoutIndex::from_layout(layout);
    index
        .index_of(node_id)
        .map(|i| index.upstream(i).iter().map(|&s| index.node(s)).collect())
        .unwrap_or_default()
}
