//! Global PageRank by power iteration
//!
//! Dangling mass is redistributed uniformly every iteration, so total score
//! stays at 1 and the iteration converges for any damping factor in (0, 1].

use std::time::Instant;

use super::RankResult;
use crate::error::{check_iteration_params, Result};
use crate::graph::csr::CsrGraph;

/// Global PageRank engine.
///
/// One configuration can run against any number of graphs.
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor, the probability of following an edge.
    pub damping: f64,
    /// Iteration cap; hitting it reports `converged = false`.
    pub max_iterations: usize,
    /// L1 convergence tolerance between successive iterates.
    pub tolerance: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 1000,
            tolerance: 1e-6,
        }
    }
}

impl StandardPageRank {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the L1 convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Run PageRank on a graph.
    ///
    /// Hitting the iteration cap is not an error; the result is returned
    /// with `converged = false` and the last computed scores.
    ///
    /// # Errors
    ///
    /// [`RankError::InvalidInput`](crate::error::RankError::InvalidInput)
    /// when damping, the iteration cap, or the tolerance is out of range.
    pub fn run(&self, graph: &CsrGraph) -> Result<RankResult> {
        check_iteration_params(self.damping, self.max_iterations, self.tolerance)?;
        trace_run!("pagerank", graph.num_nodes());

        let start = Instant::now();
        let n = graph.num_nodes();
        if n == 0 {
            return Ok(RankResult {
                ranks: Vec::new(),
                iterations: 0,
                converged: true,
                final_diff: 0.0,
                execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            });
        }

        let inv_n = 1.0 / n as f64;
        let mut scores = vec![inv_n; n];
        let mut new_scores = vec![0.0; n];

        let dangling_nodes = graph.dangling_nodes();
        let teleport = (1.0 - self.damping) * inv_n;

        let mut iterations = 0;
        let mut diff = f64::MAX;

        while iterations < self.max_iterations && diff > self.tolerance {
            iterations += 1;

            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
            let base = teleport + self.damping * dangling_mass * inv_n;

            for (v, slot) in new_scores.iter_mut().enumerate() {
                let mut incoming = 0.0;
                for &u in graph.in_neighbors(v as u32) {
                    incoming += scores[u as usize] / graph.out_degree(u) as f64;
                }
                *slot = base + self.damping * incoming;
            }

            diff = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
        }

        // Mass is conserved analytically; renormalize to absorb rounding.
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        let converged = diff <= self.tolerance;

        #[cfg(feature = "tracing")]
        tracing::debug!(iterations, converged, final_diff = diff, "power iteration finished");

        Ok(RankResult {
            ranks: scores,
            iterations,
            converged,
            final_diff: diff,
            execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}
