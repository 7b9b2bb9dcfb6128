//! Interaction graph construction from a canonical edge list.
//!
//! # Overview
//!
//! Builds an undirected [`petgraph`] graph whose nodes are protein
//! identifiers and whose edges are observed interactions. Providers often
//! report the same interaction several times (different experiments, both
//! orientations), so edges are deduplicated: `(A, B)` and `(B, A)` are one
//! edge. Self-interactions `(A, A)` are kept as self-loops.
//!
//! ## Fingerprint
//!
//! The graph carries a BLAKE3 hash of its canonical edge set (each pair
//! ordered, list sorted). Two requests that produce the same interaction
//! network yield the same fingerprint regardless of row order or
//! orientation, which lets a presentation layer cache rendered output.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use crate::error::PpiError;

// ---------------------------------------------------------------------------
// InteractionGraph
// ---------------------------------------------------------------------------

/// An undirected simple interaction graph.
///
/// Node weights are protein identifiers. Node indices are dense
/// (`0..node_count`) because nodes are never removed, so metrics index
/// score vectors directly by `NodeIndex::index()`.
#[derive(Debug, Clone)]
pub struct InteractionGraph {
    /// Undirected graph: nodes = protein ids, edges = interactions.
    pub graph: UnGraph<String, ()>,
    /// Mapping from protein id to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// BLAKE3 hash of the canonical edge set.
    pub content_hash: String,
}

impl InteractionGraph {
    /// Build a graph from interaction pairs.
    ///
    /// Nodes are added in order of first appearance. Duplicate pairs, in
    /// either orientation, collapse to a single edge.
    ///
    /// # Errors
    ///
    /// Returns [`PpiError::EmptyGraph`] if `edges` is empty.
    #[instrument(skip(edges), fields(pairs = edges.len()))]
    pub fn from_edges(edges: &[(String, String)]) -> Result<Self, PpiError> {
        if edges.is_empty() {
            return Err(PpiError::EmptyGraph);
        }

        let mut graph = UnGraph::<String, ()>::default();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        for (a, b) in edges {
            let ia = *node_map
                .entry(a.clone())
                .or_insert_with(|| graph.add_node(a.clone()));
            let ib = *node_map
                .entry(b.clone())
                .or_insert_with(|| graph.add_node(b.clone()));

            // Undirected `contains_edge` matches either orientation.
            if !graph.contains_edge(ia, ib) {
                graph.add_edge(ia, ib, ());
            }
        }

        let content_hash = compute_edge_hash(&graph);

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            duplicates = edges.len() - graph.edge_count(),
            "built interaction graph"
        );

        Ok(Self {
            graph,
            node_map,
            content_hash,
        })
    }

    /// Return the number of proteins in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of distinct interactions in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a protein id.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Return `true` if `id` is a node of the graph.
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Return `true` if `a` and `b` interact (in either orientation).
    #[must_use]
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.node_index(a), self.node_index(b)) {
            (Some(ia), Some(ib)) => self.graph.contains_edge(ia, ib),
            _ => false,
        }
    }

    /// Iterate protein ids in node-index order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Degree of `id`, counting a self-loop twice. `None` for unknown ids.
    #[must_use]
    pub fn degree(&self, id: &str) -> Option<usize> {
        self.node_index(id).map(|idx| self.degrees()[idx.index()])
    }

    /// Degree of every node, indexed by `NodeIndex::index()`.
    ///
    /// A self-loop contributes 2 to its node's degree, so the degrees sum to
    /// twice the edge count.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        let mut deg = vec![0_usize; self.node_count()];
        for edge in self.graph.edge_references() {
            deg[edge.source().index()] += 1;
            deg[edge.target().index()] += 1;
        }
        deg
    }

    /// Neighbor lists indexed by `NodeIndex::index()`.
    ///
    /// With `self_loops = false` a node never lists itself, which is what
    /// shortest-path measures need. With `self_loops = true` a looped node
    /// lists itself once, matching a 1 on the adjacency-matrix diagonal.
    #[must_use]
    pub fn neighbor_lists(&self, self_loops: bool) -> Vec<Vec<usize>> {
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); self.node_count()];
        for edge in self.graph.edge_references() {
            let (s, t) = (edge.source().index(), edge.target().index());
            if s == t {
                if self_loops {
                    adj[s].push(s);
                }
            } else {
                adj[s].push(t);
                adj[t].push(s);
            }
        }
        adj
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// BLAKE3 hash over the sorted list of orientation-free edges.
fn compute_edge_hash(graph: &UnGraph<String, ()>) -> String {
    let mut pairs: Vec<(&str, &str)> = graph
        .edge_references()
        .map(|e| {
            let a = graph[e.source()].as_str();
            let b = graph[e.target()].as_str();
            if a <= b { (a, b) } else { (b, a) }
        })
        .collect();
    pairs.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    for (a, b) in pairs {
        hasher.update(a.as_bytes());
        hasher.update(b"\x00");
        hasher.update(b.as_bytes());
        hasher.update(b"\n");
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
