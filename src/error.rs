//! Error taxonomy for graph construction and ranking.
//!
//! Every validation failure is raised before the first iteration of any
//! engine; no partial computation is ever returned alongside an error.
//! Failing to converge within the iteration cap is deliberately *not* an
//! error; it is reported through [`RankResult::converged`].
//!
//! [`RankResult::converged`]: crate::pagerank::RankResult

use thiserror::Error;

/// Errors produced by graph preprocessing and the ranking engines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// A caller-supplied parameter or seed list is unusable
    /// (empty seed set, duplicate seeds, out-of-range damping, ...).
    /// The message names the offending input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A seed identifier does not name any node of the graph.
    #[error("node {0} not found in graph")]
    NodeNotFound(i64),

    /// The raw graph is internally inconsistent, e.g. an edge references
    /// an identifier outside the authoritative node list.
    #[error("malformed graph: {0}")]
    MalformedGraph(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RankError>;

/// Validate the shared power-iteration parameters.
///
/// `damping` must lie in `(0, 1]`, `tolerance` must be positive and finite,
/// and at least one iteration must be allowed.
pub(crate) fn check_iteration_params(
    damping: f64,
    max_iterations: usize,
    tolerance: f64,
) -> Result<()> {
    check_damping(damping)?;
    if max_iterations == 0 {
        return Err(RankError::InvalidInput(
            "max_iterations must be at least 1".to_string(),
        ));
    }
    if !(tolerance > 0.0 && tolerance.is_finite()) {
        return Err(RankError::InvalidInput(format!(
            "tolerance must be a positive finite number, got {tolerance}"
        )));
    }
    Ok(())
}

/// Validate the damping factor shared by all three engines.
pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if !(damping > 0.0 && damping <= 1.0) {
        return Err(RankError::InvalidInput(format!(
            "damping factor must be in (0, 1], got {damping}"
        )));
    }
    Ok(())
}

/// Validate the push residual threshold.
pub(crate) fn check_epsilon(epsilon: f64) -> Result<()> {
    if !(epsilon > 0.0 && epsilon.is_finite()) {
        return Err(RankError::InvalidInput(format!(
            "epsilon must be a positive finite number, got {epsilon}"
        )));
    }
    Ok(())
}
