//! # rapid-graphrank
//!
//! Node-importance ranking for directed graphs: global PageRank,
//! seed-personalized PageRank (PPR), and a local push approximation of PPR
//! that only touches the neighborhood of the seeds.
//!
//! All three engines run over one shared preprocessed index,
//! [`CsrGraph`]: arbitrary integer identifiers are mapped to dense
//! positions, self-loops and duplicate edges are dropped, and the edge set
//! is laid out in both orientations (incoming lists for the pull-based
//! power iterations, outgoing lists for push propagation).
//!
//! ```
//! use rapid_graphrank::{CsrGraph, GraphInput, StandardPageRank};
//!
//! let input = GraphInput::from_edges(vec![(0, 1), (1, 2), (2, 0)]);
//! let graph = CsrGraph::from_input(&input).unwrap();
//!
//! let result = StandardPageRank::new().run(&graph).unwrap();
//! assert!(result.converged);
//! assert_eq!(result.ranks.len(), 3);
//! ```
//!
//! Personalized rankings take a seed set and concentrate mass around it:
//!
//! ```
//! use rapid_graphrank::{CsrGraph, GraphInput, PersonalizedPageRank, PushPageRank};
//!
//! let input = GraphInput::from_edges(vec![(0, 1), (1, 2), (2, 0)]);
//! let graph = CsrGraph::from_input(&input).unwrap();
//!
//! let exact = PersonalizedPageRank::new().run(&graph, &[0]).unwrap();
//! let local = PushPageRank::new().run(&graph, &[0]).unwrap();
//! assert!(exact.ranks[0] > exact.ranks[2]);
//! assert!(local.total_mass() <= 1.0 + 1e-9);
//! ```

pub mod analysis;
pub mod error;
pub mod generate;
pub mod graph;
pub mod pagerank;

pub use analysis::{CommunityMember, ComparisonMetrics};
pub use error::{RankError, Result};
pub use graph::csr::CsrGraph;
pub use graph::input::GraphInput;
pub use graph::NodeId;
pub use pagerank::personalized::PersonalizedPageRank;
pub use pagerank::push::PushPageRank;
pub use pagerank::standard::StandardPageRank;
pub use pagerank::{PushResult, RankResult, SeedSet};
