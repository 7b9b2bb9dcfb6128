//! Closeness centrality with the Wasserman-Faust correction.
//!
//! # Definition
//!
//! For node `v` with `r` nodes reachable (counting `v` itself) and total
//! BFS distance `D` to them:
//!
//! ```text
//! C_C(v) = (r - 1) / D  ×  (r - 1) / (N - 1)
//! ```
//!
//! The first factor is classic closeness restricted to `v`'s component. The
//! second scales it by the fraction of the graph that component covers, so a
//! protein in a small satellite cluster does not outrank one in the main
//! network just because its few partners are close.
//!
//! A node that reaches nothing else scores 0.

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::InteractionGraph;
use crate::metrics::{Scores, label_scores};

/// Compute closeness centrality for every node.
#[must_use]
#[instrument(skip(g))]
pub fn closeness_centrality(g: &InteractionGraph) -> Scores {
    let n = g.node_count();
    let neighbors = g.neighbor_lists(false);

    let values: Vec<f64> = (0..n)
        .map(|v| {
            let (reached, total) = bfs_distance_sum(&neighbors, v);
            if total == 0 || n < 2 {
                return 0.0;
            }
            let others = (reached - 1) as f64;
            (others / total as f64) * (others / (n - 1) as f64)
        })
        .collect();

    label_scores(g, &values)
}

/// BFS from `source`: number of nodes reached (including `source`) and the
/// sum of their hop distances.
fn bfs_distance_sum(neighbors: &[Vec<usize>], source: usize) -> (usize, usize) {
    let mut dist: Vec<Option<usize>> = vec![None; neighbors.len()];
    dist[source] = Some(0);

    let mut queue = VecDeque::from([source]);
    let mut reached = 0;
    let mut total = 0;

    while let Some(v) = queue.pop_front() {
        let Some(dv) = dist[v] else { continue };
        reached += 1;
        total += dv;

        for &w in &neighbors[v] {
            if dist[w].is_none() {
                dist[w] = Some(dv + 1);
                queue.push_back(w);
            }
        }
    }

    (reached, total)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> InteractionGraph {
        let pairs: Vec<(String, String)> = edges
            .iter()
            .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
            .collect();
        InteractionGraph::from_edges(&pairs).unwrap()
    }

    #[test]
    fn triangle_is_one_everywhere() {
        let cc = closeness_centrality(&graph(&[("A", "B"), ("B", "C"), ("C", "A")]));
        for id in ["A", "B", "C"] {
            assert!((cc[id] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn path_of_three() {
        // B reaches both at distance 1: 2/2 = 1.0
        // A reaches B at 1, C at 2: 2/3
        let cc = closeness_centrality(&graph(&[("A", "B"), ("B", "C")]));
        assert!((cc["B"] - 1.0).abs() < 1e-12);
        assert!((cc["A"] - 2.0 / 3.0).abs() < 1e-12);
        assert!((cc["C"] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn disconnected_pairs_are_penalized() {
        // A — B and C — D: each node reaches 1 of 3 others at distance 1.
        // (1/1) * (1/3) = 1/3
        let cc = closeness_centrality(&graph(&[("A", "B"), ("C", "D")]));
        for id in ["A", "B", "C", "D"] {
            assert!((cc[id] - 1.0 / 3.0).abs() < 1e-12, "{id} = {}", cc[id]);
        }
    }

    #[test]
    fn larger_component_wins() {
        // Path A — B — C plus a separate pair D — E.
        let cc = closeness_centrality(&graph(&[("A", "B"), ("B", "C"), ("D", "E")]));
        // B: (2/2) * (2/4) = 0.5; D: (1/1) * (1/4) = 0.25
        assert!((cc["B"] - 0.5).abs() < 1e-12);
        assert!((cc["D"] - 0.25).abs() < 1e-12);
        assert!(cc["B"] > cc["D"]);
    }

    #[test]
    fn isolated_looped_node_scores_zero() {
        let cc = closeness_centrality(&graph(&[("A", "B"), ("C", "C")]));
        assert!(cc["C"].abs() < 1e-12);
        assert!(cc["A"] > 0.0);
    }
}
