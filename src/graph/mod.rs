//! Graph ingestion and indexing
//!
//! This module turns a raw node/edge list into the dense, position-indexed
//! structures the ranking engines iterate over. Raw identifiers are mapped
//! to contiguous positions exactly once, at this boundary; everything past
//! it works on positions.

pub mod csr;
pub mod input;

/// Raw node identifier as supplied by the caller.
///
/// Identifiers are arbitrary integers: they need not be contiguous,
/// zero-based, or even non-negative. [`csr::CsrGraph`] maps them to dense
/// `u32` positions for the iteration hot paths.
pub type NodeId = i64;
