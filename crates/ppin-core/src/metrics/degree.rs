//! Degree centrality.
//!
//! The fraction of all other proteins a protein interacts with:
//!
//! ```text
//! C_D(v) = deg(v) / (N - 1)
//! ```
//!
//! A self-loop adds 2 to `deg(v)` (one per endpoint), so a looped node can
//! score above 1.0. On loop-free graphs every score lies in `[0, 1]`.

use tracing::instrument;

use crate::error::PpiError;
use crate::graph::InteractionGraph;
use crate::metrics::{Scores, label_scores};

/// Compute normalized degree centrality for every node.
///
/// # Errors
///
/// Returns [`PpiError::DegenerateGraph`] if the graph has fewer than two
/// nodes, where `N - 1` would be zero.
#[instrument(skip(g))]
pub fn degree_centrality(g: &InteractionGraph) -> Result<Scores, PpiError> {
    let n = g.node_count();
    if n < 2 {
        return Err(PpiError::DegenerateGraph { node_count: n });
    }

    let scale = 1.0 / (n - 1) as f64;
    let values: Vec<f64> = g
        .degrees()
        .into_iter()
        .map(|d| d as f64 * scale)
        .collect();

    Ok(label_scores(g, &values))
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
    fn triangle_is_fully_connected() {
        let dc = degree_centrality(&graph(&[("A", "B"), ("B", "C"), ("C", "A")])).unwrap();
        for id in ["A", "B", "C"] {
            assert!((dc[id] - 1.0).abs() < 1e-12, "{id} = {}", dc[id]);
        }
    }

    #[test]
    fn path_middle_is_full_ends_are_half() {
        let dc = degree_centrality(&graph(&[("A", "B"), ("B", "C")])).unwrap();
        assert!((dc["B"] - 1.0).abs() < 1e-12);
        assert!((dc["A"] - 0.5).abs() < 1e-12);
        assert!((dc["C"] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn single_edge_is_well_defined() {
        let dc = degree_centrality(&graph(&[("A", "B")])).unwrap();
        assert!((dc["A"] - 1.0).abs() < 1e-12);
        assert!((dc["B"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn duplicate_rows_do_not_inflate_degree() {
        let dc = degree_centrality(&graph(&[("A", "B"), ("B", "A"), ("A", "B"), ("B", "C")]))
            .unwrap();
        assert!((dc["A"] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn lone_self_loop_is_degenerate() {
        let err = degree_centrality(&graph(&[("A", "A")])).unwrap_err();
        assert_eq!(err, PpiError::DegenerateGraph { node_count: 1 });
    }

    #[test]
    fn self_loop_counts_twice() {
        // A: loop (2) + A-B (1) = 3 over N-1 = 1
        let dc = degree_centrality(&graph(&[("A", "A"), ("A", "B")])).unwrap();
        assert!((dc["A"] - 3.0).abs() < 1e-12);
        assert!((dc["B"] - 1.0).abs() < 1e-12);
    }
}
