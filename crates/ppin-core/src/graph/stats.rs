//! Summary statistics for an interaction graph.
//!
//! # Statistics Provided
//!
//! - **node_count**: Number of distinct proteins.
//! - **edge_count**: Number of distinct interactions, self-loops included.
//! - **self_loop_count**: Interactions of a protein with itself.
//! - **density**: Ratio of non-loop edges to the maximum possible for an
//!   undirected simple graph: `2E / (N(N-1))`. Zero for graphs with fewer
//!   than two nodes.
//! - **component_count**: Number of connected components. A value greater
//!   than 1 means some proteins cannot reach others, which lowers their
//!   closeness.
//! - **max_degree**: Highest degree of any node (self-loop counts twice).

use petgraph::algo::connected_components;
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::graph::build::InteractionGraph;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for an [`InteractionGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of proteins (nodes).
    pub node_count: usize,
    /// Number of distinct interactions (edges).
    pub edge_count: usize,
    /// Number of self-interactions.
    pub self_loop_count: usize,
    /// `2E / (N(N-1))` over non-loop edges.
    pub density: f64,
    /// Number of connected components.
    pub component_count: usize,
    /// Highest node degree.
    pub max_degree: usize,
}

impl GraphStats {
    /// Compute statistics from an [`InteractionGraph`].
    #[must_use]
    pub fn from_graph(g: &InteractionGraph) -> Self {
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let self_loop_count = g
            .graph
            .edge_references()
            .filter(|e| e.source() == e.target())
            .count();

        let density = compute_density(node_count, edge_count - self_loop_count);
        let component_count = connected_components(&g.graph);
        let max_degree = g.degrees().into_iter().max().unwrap_or(0);

        Self {
            node_count,
            edge_count,
            self_loop_count,
            density,
            component_count,
            max_degree,
        }
    }

    /// Return `true` if every protein can reach every other.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.component_count <= 1
    }
}

fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64 / 2.0;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
