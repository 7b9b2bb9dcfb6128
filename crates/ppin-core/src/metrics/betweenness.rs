//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a protein lies on shortest
//! paths between other pairs of proteins. High-betweenness proteins connect
//! otherwise distant modules of the network.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes
//!    first). When several shortest paths lead to a node, its dependency is
//!    split in proportion to the path counts.
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E).
//!
//! # Normalization
//!
//! In an undirected graph every unordered pair `{s, t}` is visited twice
//! (once from each end), and there are `(N-1)(N-2)/2` pairs not involving
//! `v`. Both factors combine into a single scale of `1 / ((N-1)(N-2))`,
//! so every score lies in `[0, 1]`. Graphs with two or fewer nodes have no
//! intermediate nodes and score 0 everywhere.

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::InteractionGraph;
use crate::metrics::{Scores, label_scores};

/// Compute normalized betweenness centrality for every node.
///
/// Unreachable pairs contribute nothing. Self-loops never lie on a shortest
/// path and are ignored.
#[must_use]
#[instrument(skip(g))]
pub fn betweenness_centrality(g: &InteractionGraph) -> Scores {
    let n = g.node_count();
    let neighbors = g.neighbor_lists(false);

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in 0..n {
        // Stack: nodes in order of discovery (farthest popped first).
        let mut stack: Vec<usize> = Vec::with_capacity(n);

        // predecessors[w] = nodes immediately preceding w on shortest paths from s.
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[s] = 1.0;

        // dist[t]: distance from s to t (None = unvisited).
        let mut dist: Vec<Option<usize>> = vec![None; n];
        dist[s] = Some(0);

        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let Some(dv) = dist[v] else { continue };

            for &w in &neighbors[v] {
                // First visit to w?
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }

            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for x in &mut cb {
            *x *= scale;
        }
    } else {
        cb.iter_mut().for_each(|x| *x = 0.0);
    }

    label_scores(g, &cb)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
