//! Interaction graph module.
//!
//! # Overview
//!
//! Turns the canonical edge list produced by [`crate::source`] into an
//! undirected petgraph graph. The graph feeds every centrality metric and
//! is never mutated after construction.
//!
//! ## Pipeline
//!
//! ```text
//! Vec<(String, String)>  (uppercased partner pairs)
//!        ↓  build::InteractionGraph::from_edges()
//! InteractionGraph (UnGraph, deduplicated, self-loops kept)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, components, max degree, …)
//! ```

pub mod build;
pub mod stats;

pub use build::InteractionGraph;
pub use stats::GraphStats;
