//! Compressed Sparse Row (CSR) graph index
//!
//! CSR stores each node's neighbor list contiguously, which is exactly what
//! the ranking engines need while iterating. The index carries *two*
//! orientations of the same edge set:
//!
//! - **incoming** lists feed PageRank/PPR, which pull mass from each node's
//!   predecessors;
//! - **outgoing** lists feed PUSH, which propagates mass forward to each
//!   node's successors.
//!
//! The orientations are kept as two separate structures on purpose: they
//! encode opposite directions of mass flow, not an implementation detail.
//!
//! Construction runs in O(N+M): self-loops are discarded, duplicate ordered
//! pairs are collapsed, and per-node neighbor order is the insertion order
//! of each edge's first occurrence, so identical input always produces an
//! identical index.

use std::time::Instant;

use super::input::{GraphInput, NodeIndex};
use super::NodeId;
use crate::error::{RankError, Result};
use rustc_hash::{FxHashMap, FxHashSet};

/// One orientation of the edge set in CSR layout.
///
/// Node `v`'s neighbors live at `targets[offsets[v]..offsets[v + 1]]`.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<u32>,
}

impl Adjacency {
    /// Build from per-node counts and `(source, target)` pairs.
    ///
    /// Pairs must arrive in the order that should be preserved per node;
    /// the cursor-fill keeps each node's list in exactly that order.
    fn from_degrees(degrees: &[u32], pairs: impl Iterator<Item = (u32, u32)>) -> Self {
        let mut offsets = Vec::with_capacity(degrees.len() + 1);
        offsets.push(0usize);
        let mut total = 0usize;
        for &d in degrees {
            total += d as usize;
            offsets.push(total);
        }

        let mut targets = vec![0u32; total];
        let mut cursor: Vec<usize> = offsets[..degrees.len()].to_vec();
        for (src, dst) in pairs {
            let slot = cursor[src as usize];
            targets[slot] = dst;
            cursor[src as usize] = slot + 1;
        }

        Self { offsets, targets }
    }

    /// Neighbor positions of `v` in this orientation.
    pub fn neighbors(&self, v: u32) -> &[u32] {
        &self.targets[self.offsets[v as usize]..self.offsets[v as usize + 1]]
    }

    /// Total number of stored edges.
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }
}

/// A preprocessed directed graph, indexed by dense position.
///
/// Built once per input via [`CsrGraph::from_input`]; read-only afterwards,
/// so a single index can back any number of engine runs.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    num_nodes: usize,
    /// Position -> raw identifier.
    node_ids: Vec<NodeId>,
    /// Raw identifier -> position.
    id_to_pos: FxHashMap<NodeId, u32>,
    /// Predecessor lists: `incoming.neighbors(v)` yields `u` with `u -> v`.
    incoming: Adjacency,
    /// Successor lists: `outgoing.neighbors(u)` yields `w` with `u -> w`.
    outgoing: Adjacency,
    /// Distinct outgoing edges per position; 0 marks a dangling node.
    out_degrees: Vec<u32>,
    /// Positions with no outgoing edges.
    dangling: Vec<u32>,
    /// Wall time spent building this index, in milliseconds.
    build_time_ms: f64,
}

impl CsrGraph {
    /// Index a raw input: map identifiers to positions, drop self-loops,
    /// collapse duplicate edges, and lay out both adjacency orientations.
    ///
    /// # Errors
    ///
    /// [`RankError::MalformedGraph`] when the node list contains a duplicate
    /// identifier, or when it is non-empty (authoritative) and an edge
    /// references an identifier outside it.
    pub fn from_input(input: &GraphInput) -> Result<Self> {
        let start = Instant::now();

        let authoritative = !input.nodes.is_empty();
        let mut index = NodeIndex::with_capacity(input.nodes.len());
        if authoritative {
            for &id in &input.nodes {
                index.try_insert(id)?;
            }
        }

        // Resolve endpoints to positions, dropping self-loops and duplicate
        // ordered pairs while preserving first-occurrence order.
        let mut seen: FxHashSet<(u32, u32)> =
            FxHashSet::with_capacity_and_hasher(input.edges.len(), Default::default());
        let mut edges: Vec<(u32, u32)> = Vec::with_capacity(input.edges.len());
        for &(from, to) in &input.edges {
            let (f, t) = if authoritative {
                let f = index.position(from).ok_or_else(|| {
                    RankError::MalformedGraph(format!(
                        "edge ({from}, {to}) references unknown node {from}"
                    ))
                })?;
                let t = index.position(to).ok_or_else(|| {
                    RankError::MalformedGraph(format!(
                        "edge ({from}, {to}) references unknown node {to}"
                    ))
                })?;
                (f, t)
            } else {
                (index.get_or_insert(from), index.get_or_insert(to))
            };

            if f == t {
                continue; // self-loop
            }
            if !seen.insert((f, t)) {
                continue; // duplicate ordered pair
            }
            edges.push((f, t));
        }

        let num_nodes = index.len();
        let mut out_degrees = vec![0u32; num_nodes];
        let mut in_degrees = vec![0u32; num_nodes];
        for &(f, t) in &edges {
            out_degrees[f as usize] += 1;
            in_degrees[t as usize] += 1;
        }

        let outgoing = Adjacency::from_degrees(&out_degrees, edges.iter().copied());
        let incoming = Adjacency::from_degrees(&in_degrees, edges.iter().map(|&(f, t)| (t, f)));

        let dangling: Vec<u32> = out_degrees
            .iter()
            .enumerate()
            .filter(|(_, &d)| d == 0)
            .map(|(pos, _)| pos as u32)
            .collect();

        let (node_ids, id_to_pos) = index.into_parts();

        Ok(Self {
            num_nodes,
            node_ids,
            id_to_pos,
            incoming,
            outgoing,
            out_degrees,
            dangling,
            build_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of distinct, self-loop-free directed edges.
    pub fn num_edges(&self) -> usize {
        self.outgoing.edge_count()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Predecessors of `v`: positions `u` such that `u -> v` exists.
    pub fn in_neighbors(&self, v: u32) -> &[u32] {
        self.incoming.neighbors(v)
    }

    /// Successors of `u`: positions `w` such that `u -> w` exists.
    pub fn out_neighbors(&self, u: u32) -> &[u32] {
        self.outgoing.neighbors(u)
    }

    /// Out-degree of `u` (0 for dangling nodes).
    pub fn out_degree(&self, u: u32) -> u32 {
        self.out_degrees[u as usize]
    }

    /// Positions with no outgoing edges.
    pub fn dangling_nodes(&self) -> &[u32] {
        &self.dangling
    }

    /// Dense position for a raw identifier, if it names a node.
    pub fn position_of(&self, id: NodeId) -> Option<u32> {
        self.id_to_pos.get(&id).copied()
    }

    /// Raw identifier stored at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range; positions come from this graph's
    /// own mapping, so a bad one is a caller bug.
    pub fn node_id(&self, pos: u32) -> NodeId {
        self.node_ids[pos as usize]
    }

    /// All raw identifiers in position order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// Wall time spent in [`CsrGraph::from_input`], in milliseconds.
    ///
    /// Surfaced as the `preprocessingTimeMs` diagnostic of the push engine.
    pub fn build_time_ms(&self) -> f64 {
        self.build_time_ms
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            node_ids: Vec::new(),
            id_to_pos: FxHashMap::default(),
            incoming: Adjacency::default(),
            outgoing: Adjacency::default(),
            out_degrees: Vec::new(),
            dangling: Vec::new(),
            build_time_ms: 0.0,
        }
    }
}
