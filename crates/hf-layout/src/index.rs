//! Compact indexing for traversal.
//!
//! Maps string node ids to contiguous [`NodeIndex`] values and resolves
//! edges into per-node adjacency lists. Edges whose endpoints do not name a
//! node in the layout are dropped here, so traversal never sees them.

use std::collections::HashMap;

use hf_core::NodeIndex;

use crate::model::{Layout, LayoutNode};

/// Index over one layout snapshot.
///
/// Node order follows the layout's node list. When two nodes share an id
/// only the first is indexed.
#[derive(Debug, Clone)]
pub struct LayoutIndex<'a> {
    nodes: Vec<&'a LayoutNode>,
    by_id: HashMap<&'a str, NodeIndex>,
    /// Targets of each node's outgoing edges, in edge-list order.
    outgoing: Vec<Vec<NodeIndex>>,
    /// Sources of each node's incoming edges, in edge-list order.
    incoming: Vec<Vec<NodeIndex>>,
    dropped_edges: usize,
}

impl<'a> LayoutIndex<'a> {
    pub fn from_layout(layout: &'a Layout) -> Self {
        let mut nodes = Vec::with_capacity(layout.nodes.len());
        let mut by_id = HashMap::with_capacity(layout.nodes.len());
        for node in &layout.nodes {
            if !by_id.contains_key(node.id.as_str()) {
                by_id.insert(node.id.as_str(), NodeIndex::from_index(nodes.len()));
                nodes.push(node);
            }
        }

        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut incoming = vec![Vec::new(); nodes.len()];
        let mut dropped_edges = 0;
        for edge in &layout.edges {
            match (
                by_id.get(edge.source_id.as_str()),
                by_id.get(edge.target_id.as_str()),
            ) {
                (Some(&src), Some(&dst)) => {
                    outgoing[src.index()].push(dst);
                    incoming[dst.index()].push(src);
                }
                _ => dropped_edges += 1,
            }
        }

        Self {
            nodes,
            by_id,
            outgoing,
            incoming,
            dropped_edges,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a node by index (panics if out of bounds).
    pub fn node(&self, idx: NodeIndex) -> &'a LayoutNode {
        self.nodes[idx.index()]
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    /// All indices in layout order.
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.nodes.len()).map(NodeIndex::from_index)
    }

    pub fn downstream(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.outgoing
            .get(idx.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn upstream(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.incoming
            .get(idx.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_incoming(&self, idx: NodeIndex) -> bool {
        !self.upstream(idx).is_empty()
    }

    /// Number of edges ignored because an endpoint did not resolve.
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }
}
