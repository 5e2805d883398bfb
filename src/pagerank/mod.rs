//! Ranking engines
//!
//! Three engines share the [`CsrGraph`](crate::graph::csr::CsrGraph) index:
//!
//! - [`standard::StandardPageRank`]: global PageRank by power iteration;
//! - [`personalized::PersonalizedPageRank`]: power iteration with teleport
//!   restricted to a seed set;
//! - [`push::PushPageRank`]: local residual propagation approximating
//!   personalized PageRank without touching the whole graph per step.
//!
//! Each engine is a small config struct with a `run` method, so one
//! configuration can be reused across graphs and seed sets.

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for one engine run (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_run {
    ($engine:expr, $nodes:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("engine_run", engine = $engine, nodes = $nodes).entered();
    };
}

pub mod personalized;
pub mod push;
pub mod standard;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};
use crate::graph::csr::CsrGraph;
use crate::graph::NodeId;

/// Result of a power-iteration ranking run.
///
/// Serializes with camelCase field names, matching the JSON emitted by the
/// CLI tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResult {
    /// Score per node, indexed by dense position.
    pub ranks: Vec<f64>,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the tolerance was reached before the iteration cap.
    pub converged: bool,
    /// L1 distance between the last two iterates.
    pub final_diff: f64,
    /// Wall time of the run, in milliseconds.
    pub execution_time_ms: f64,
}

impl RankResult {
    /// Top `n` positions by score, descending; ties broken by position.
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        top_positions(&self.ranks, n)
    }

    /// Score at `pos`, or 0.0 when out of range.
    pub fn score(&self, pos: u32) -> f64 {
        self.ranks.get(pos as usize).copied().unwrap_or(0.0)
    }

    /// Sum of all scores.
    pub fn total_mass(&self) -> f64 {
        self.ranks.iter().sum()
    }
}

/// Result of a push (residual propagation) run.
///
/// Push scores are an underestimate of personalized PageRank, so `ranks`
/// sums to at most 1 and is reported as computed, without normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushResult {
    /// Approximate score per node, indexed by dense position.
    pub ranks: Vec<f64>,
    /// Number of push operations performed.
    pub push_operations: usize,
    /// Distinct nodes that were pushed at least once.
    pub nodes_processed: usize,
    /// Total wall time: preprocessing plus propagation, in milliseconds.
    pub execution_time_ms: f64,
    /// Wall time spent building the graph index, in milliseconds.
    pub preprocessing_time_ms: f64,
    /// Wall time spent in residual propagation, in milliseconds.
    pub algorithm_time_ms: f64,
}

impl PushResult {
    /// Top `n` positions by score, descending; ties broken by position.
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        top_positions(&self.ranks, n)
    }

    /// Score at `pos`, or 0.0 when out of range.
    pub fn score(&self, pos: u32) -> f64 {
        self.ranks.get(pos as usize).copied().unwrap_or(0.0)
    }

    /// Sum of all scores; at most 1 plus rounding error.
    pub fn total_mass(&self) -> f64 {
        self.ranks.iter().sum()
    }
}

fn top_positions(ranks: &[f64], n: usize) -> Vec<(u32, f64)> {
    let mut indexed: Vec<_> = ranks
        .iter()
        .enumerate()
        .map(|(pos, &score)| (pos as u32, score))
        .collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    indexed.truncate(n);
    indexed
}

/// A validated seed set, resolved to dense positions.
///
/// Personalized engines restart random walks at these positions. Resolution
/// front-loads all input checks so the iteration loops never fail.
#[derive(Debug, Clone)]
pub struct SeedSet {
    positions: Vec<u32>,
    members: FxHashSet<u32>,
}

impl SeedSet {
    /// Resolve raw seed identifiers against a graph.
    ///
    /// # Errors
    ///
    /// - [`RankError::InvalidInput`] when `seeds` is empty or contains a
    ///   duplicate identifier;
    /// - [`RankError::NodeNotFound`] when an identifier is not in the graph.
    pub fn resolve(graph: &CsrGraph, seeds: &[NodeId]) -> Result<Self> {
        if seeds.is_empty() {
            return Err(RankError::InvalidInput("seed list is empty".to_string()));
        }

        let mut positions = Vec::with_capacity(seeds.len());
        let mut members =
            FxHashSet::with_capacity_and_hasher(seeds.len(), Default::default());
        for &id in seeds {
            let pos = graph
                .position_of(id)
                .ok_or(RankError::NodeNotFound(id))?;
            if !members.insert(pos) {
                return Err(RankError::InvalidInput(format!(
                    "duplicate seed node {id}"
                )));
            }
            positions.push(pos);
        }

        Ok(Self { positions, members })
    }

    /// Seed positions in input order.
    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    /// Number of seeds.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false: resolution rejects empty seed lists.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Teleport weight of each seed, `1 / len`.
    pub fn weight(&self) -> f64 {
        1.0 / self.positions.len() as f64
    }

    /// Whether `pos` is a seed. O(1).
    pub fn contains(&self, pos: u32) -> bool {
        self.members.contains(&pos)
    }
}
