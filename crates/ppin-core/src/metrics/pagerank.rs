//! PageRank over the interaction graph.
//!
//! # Overview
//!
//! PageRank models a random walk that follows an interaction with
//! probability `d` and jumps to a uniformly random protein otherwise. A
//! protein's score is the long-run fraction of time the walk spends there.
//!
//! # Algorithm
//!
//! The undirected graph is read as a symmetric directed graph: each edge
//! `A — B` becomes `A → B` and `B → A`, a self-loop becomes a single
//! `A → A`. Then the power method:
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) / out_degree(u)   for each u → v
//!                     + d * Σ PR(w) / N               for each dangling w
//! ```
//!
//! where `d` is the damping factor (default 0.85). Nodes built from edges
//! always have an out-edge, so the dangling term is zero in practice; it is
//! kept so the scores always sum to 1.
//!
//! Iteration stops once the L1 change drops below `N × tolerance`.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::PpiError;
use crate::graph::InteractionGraph;
use crate::metrics::{Measure, Scores, label_scores};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Damping factor (probability of following an edge vs teleporting).
    /// Default: 0.85.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Per-node convergence threshold. Default: 1e-6.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Maximum number of iterations. Default: 100.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// PageRank scores: protein id → score. Sums to 1.
    pub scores: Scores,
    /// Number of iterations performed.
    pub iterations: usize,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute PageRank for every node.
///
/// # Errors
///
/// Returns [`PpiError::ConvergenceFailure`] if `config.max_iter` iterations
/// pass without meeting the tolerance.
#[instrument(skip(g, config))]
pub fn pagerank(g: &InteractionGraph, config: &PageRankConfig) -> Result<PageRankResult, PpiError> {
    let n = g.node_count();

    if n == 0 {
        return Ok(PageRankResult {
            scores: Scores::new(),
            iterations: 0,
        });
    }

    // Out-edges of the symmetric directed reading.
    let out = g.neighbor_lists(true);

    let n_f64 = n as f64;
    let base = (1.0 - config.damping) / n_f64;
    let threshold = n_f64 * config.tolerance;

    // Initialize ranks uniformly.
    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    for iter in 0..config.max_iter {
        let dangling: f64 = out
            .iter()
            .zip(ranks.iter())
            .filter(|(targets, _)| targets.is_empty())
            .map(|(_, r)| r)
            .sum();

        // Reset new_ranks to teleportation plus redistributed dangling mass.
        let floor = config.damping.mul_add(dangling / n_f64, base);
        for r in &mut new_ranks {
            *r = floor;
        }

        // Distribute rank from each node to its out-neighbors.
        for (idx, targets) in out.iter().enumerate() {
            if targets.is_empty() {
                continue;
            }
            let share = config.damping * ranks[idx] / targets.len() as f64;
            for &t in targets {
                new_ranks[t] += share;
            }
        }

        // Check convergence: L1 norm of delta.
        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < threshold {
            return Ok(PageRankResult {
                scores: label_scores(g, &ranks),
                iterations: iter + 1,
            });
        }
    }

    warn!(max_iter = config.max_iter, "PageRank did not converge");
    Err(PpiError::ConvergenceFailure {
        measure: Measure::PageRank,
        iterations: config.max_iter,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
