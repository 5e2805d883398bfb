//! Deterministic graph generators
//!
//! Builders for the structured and random graphs used by tests, benchmarks
//! and the CLI. Node identifiers are always `0..n`, no generator emits
//! self-loops or duplicate edges, and the random families are driven by a
//! caller-supplied seed so every run is reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use crate::error::{RankError, Result};
use crate::graph::input::GraphInput;
use crate::graph::NodeId;

fn node_range(n: usize) -> Vec<NodeId> {
    (0..n as NodeId).collect()
}

/// Linear chain `0 -> 1 -> ... -> n-1`.
pub fn chain(n: usize) -> GraphInput {
    let edges = (0..n.saturating_sub(1))
        .map(|i| (i as NodeId, (i + 1) as NodeId))
        .collect();
    GraphInput::new(node_range(n), edges)
}

/// Directed cycle: a chain closed by `n-1 -> 0`.
pub fn cycle(n: usize) -> GraphInput {
    let mut input = chain(n);
    if n > 1 {
        input.edges.push(((n - 1) as NodeId, 0));
    }
    input
}

/// Complete directed graph: every ordered pair `i -> j`, `i != j`.
pub fn complete(n: usize) -> GraphInput {
    let mut edges = Vec::with_capacity(n.saturating_sub(1) * n);
    for i in 0..n as NodeId {
        for j in 0..n as NodeId {
            if i != j {
                edges.push((i, j));
            }
        }
    }
    GraphInput::new(node_range(n), edges)
}

/// Star with hub 0: `0 <-> s` for every spoke `s`.
pub fn star(n: usize) -> GraphInput {
    let mut edges = Vec::with_capacity(2 * n.saturating_sub(1));
    for s in 1..n as NodeId {
        edges.push((0, s));
        edges.push((s, 0));
    }
    GraphInput::new(node_range(n), edges)
}

/// Erdős–Rényi `G(n, p)`: each ordered pair drawn independently.
///
/// # Errors
///
/// [`RankError::InvalidInput`] when `p` is outside `[0, 1]`.
pub fn erdos_renyi(n: usize, p: f64, seed: u64) -> Result<GraphInput> {
    if !(0.0..=1.0).contains(&p) {
        return Err(RankError::InvalidInput(format!(
            "edge probability must be in [0, 1], got {p}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for i in 0..n as NodeId {
        for j in 0..n as NodeId {
            if i != j && rng.gen_bool(p) {
                edges.push((i, j));
            }
        }
    }
    Ok(GraphInput::new(node_range(n), edges))
}

/// Scale-free graph by preferential attachment.
///
/// Nodes arrive in order; node `v` attaches `min(m, v)` out-edges to
/// distinct earlier nodes, sampled proportionally to in-degree plus one.
/// The smoothing term keeps zero-in-degree nodes reachable as targets.
///
/// # Errors
///
/// [`RankError::InvalidInput`] when `m` is zero.
pub fn preferential_attachment(n: usize, m: usize, seed: u64) -> Result<GraphInput> {
    if m == 0 {
        return Err(RankError::InvalidInput(
            "attachment count m must be at least 1".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges: Vec<(NodeId, NodeId)> = Vec::with_capacity(n.saturating_sub(1) * m);
    // Sampling pool: one entry per node (smoothing) plus one per in-edge,
    // so a uniform draw realizes the in-degree-plus-one distribution.
    let mut pool: Vec<NodeId> = Vec::with_capacity(n * (m + 1));

    for v in 0..n as NodeId {
        if v > 0 {
            let wanted = (v as usize).min(m);
            let mut targets: FxHashSet<NodeId> =
                FxHashSet::with_capacity_and_hasher(wanted, Default::default());
            while targets.len() < wanted {
                let t = pool[rng.gen_range(0..pool.len())];
                targets.insert(t);
            }
            for &t in &targets {
                edges.push((v, t));
            }
            // Re-inserting each chosen target raises its weight for later
            // arrivals.
            pool.extend(targets.iter().copied());
        }
        pool.push(v);
    }

    // Sort so the output does not depend on hash iteration order.
    edges.sort_unstable();
    Ok(GraphInput::new(node_range(n), edges))
}
