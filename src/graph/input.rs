//! Raw graph input and the identifier-to-position mapping
//!
//! [`GraphInput`] is the wire shape consumed from callers and JSON files:
//! a node list plus directed edges over arbitrary integer identifiers.
//! [`NodeIndex`] interns those identifiers into dense positions using an
//! FxHashMap for O(1) lookups during construction.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "nodes": [10, 20, 30],
//!   "edges": [[10, 20], [20, 30]]
//! }
//! ```
//!
//! `nodes` may be omitted, in which case the node set is derived from the
//! identifiers appearing in `edges`, in first-seen order.

use super::NodeId;
use crate::error::{RankError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A raw directed graph: node identifiers plus ordered edge pairs.
///
/// This is the boundary type; it carries whatever the caller supplied,
/// including self-loops and duplicate edges. Cleanup happens when the input
/// is indexed by [`CsrGraph::from_input`](super::csr::CsrGraph::from_input).
///
/// When `nodes` is non-empty it is authoritative: an edge endpoint missing
/// from it is rejected as [`RankError::MalformedGraph`]. When `nodes` is
/// empty the node set is derived from the edges instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphInput {
    /// Node identifiers, in the order that defines their dense positions.
    #[serde(default)]
    pub nodes: Vec<NodeId>,
    /// Directed edges as `(from, to)` pairs.
    #[serde(default)]
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GraphInput {
    /// Create an input with an explicit (authoritative) node list.
    pub fn new(nodes: Vec<NodeId>, edges: Vec<(NodeId, NodeId)>) -> Self {
        Self { nodes, edges }
    }

    /// Create an input whose node set is derived from the edges.
    pub fn from_edges(edges: Vec<(NodeId, NodeId)>) -> Self {
        Self {
            nodes: Vec::new(),
            edges,
        }
    }

    /// Parse an input from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RankError::MalformedGraph(format!("invalid graph JSON: {e}")))
    }

    /// Serialize the input to a compact JSON string.
    pub fn to_json_string(&self) -> String {
        // GraphInput contains only integers; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Number of raw node identifiers (0 when the node set is derived).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of raw edges, before deduplication and self-loop removal.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the input carries neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Maps raw identifiers to dense positions `0..N`, preserving first-seen
/// order so that repeated runs over identical input index identically.
#[derive(Debug, Default)]
pub struct NodeIndex {
    /// Maps raw identifier -> dense position.
    id_to_pos: FxHashMap<NodeId, u32>,
    /// Position -> raw identifier (inverse mapping).
    node_ids: Vec<NodeId>,
}

impl NodeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_pos: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            node_ids: Vec::with_capacity(capacity),
        }
    }

    /// Get the position for `id`, interning it if unseen.
    pub fn get_or_insert(&mut self, id: NodeId) -> u32 {
        if let Some(&pos) = self.id_to_pos.get(&id) {
            return pos;
        }
        let pos = self.node_ids.len() as u32;
        self.id_to_pos.insert(id, pos);
        self.node_ids.push(id);
        pos
    }

    /// Intern `id`, failing if it was already present.
    ///
    /// Used when ingesting an authoritative node list, where a duplicate
    /// identifier would silently skew positions.
    pub fn try_insert(&mut self, id: NodeId) -> Result<u32> {
        if self.id_to_pos.contains_key(&id) {
            return Err(RankError::MalformedGraph(format!(
                "duplicate node identifier {id} in node list"
            )));
        }
        Ok(self.get_or_insert(id))
    }

    /// Position of `id`, if interned.
    pub fn position(&self, id: NodeId) -> Option<u32> {
        self.id_to_pos.get(&id).copied()
    }

    /// Raw identifier stored at `pos`.
    pub fn id_at(&self, pos: u32) -> Option<NodeId> {
        self.node_ids.get(pos as usize).copied()
    }

    /// Number of interned identifiers.
    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    /// Whether no identifiers have been interned.
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Positions in interning order, as raw identifiers.
    pub fn ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// Consume the index, returning the position -> identifier table and
    /// the identifier -> position map.
    pub(crate) fn into_parts(self) -> (Vec<NodeId>, FxHashMap<NodeId, u32>) {
        (self.node_ids, self.id_to_pos)
    }
}
