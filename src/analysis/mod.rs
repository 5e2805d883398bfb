//! Post-processing of score vectors
//!
//! Utilities consumed by drivers after an engine run, never by the engines
//! themselves: community extraction by score threshold and pairwise
//! comparison of two rankings.

pub mod community;
pub mod compare;

pub use community::{extract, CommunityMember};
pub use compare::{compare_rankings, ComparisonMetrics};
