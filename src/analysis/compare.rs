//! Pairwise comparison of two rankings
//!
//! Distance and correlation metrics between equal-length score vectors,
//! used to quantify how closely a push approximation tracks exact PPR.

use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};

/// Distance and correlation between two score vectors.
///
/// Serializes with camelCase field names for the CLI's JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetrics {
    /// Sum of absolute per-position differences.
    pub l1_distance: f64,
    /// Euclidean distance.
    pub l2_distance: f64,
    /// Largest absolute per-position difference.
    pub max_difference: f64,
    /// Pearson correlation; 0.0 when either vector has zero variance.
    pub correlation: f64,
}

/// Compare two equal-length score vectors.
///
/// # Errors
///
/// [`RankError::InvalidInput`] when the vectors differ in length.
pub fn compare_rankings(a: &[f64], b: &[f64]) -> Result<ComparisonMetrics> {
    if a.len() != b.len() {
        return Err(RankError::InvalidInput(format!(
            "cannot compare rankings of different lengths ({} vs {})",
            a.len(),
            b.len()
        )));
    }

    let mut l1 = 0.0;
    let mut l2_sq = 0.0;
    let mut max_diff = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let diff = (x - y).abs();
        l1 += diff;
        l2_sq += diff * diff;
        max_diff = max_diff.max(diff);
    }

    Ok(ComparisonMetrics {
        l1_distance: l1,
        l2_distance: l2_sq.sqrt(),
        max_difference: max_diff,
        correlation: pearson(a, b),
    })
}

/// Pearson correlation coefficient.
///
/// A vector with zero variance has no defined correlation; 0.0 is returned
/// so downstream JSON never carries NaN.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len();
    if n == 0 {
        return 0.0;
    }

    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let da = x - mean_a;
        let db = y - mean_b;
        covariance += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denominator = (var_a * var_b).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        covariance / denominator
    }
}
