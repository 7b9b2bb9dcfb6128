//! Centrality metrics for the interaction graph.
//!
//! # Overview
//!
//! Five measures, each answering a different question about a protein's
//! importance in the network:
//!
//! - **Degree** (`degree`): How many partners does it interact with?
//! - **Betweenness** (`betweenness`): How often does it sit on the shortest
//!   route between two other proteins?
//! - **Closeness** (`closeness`): How few hops does it take to reach the
//!   rest of its component?
//! - **Eigenvector** (`eigenvector`): Is it connected to other
//!   well-connected proteins?
//! - **PageRank** (`pagerank`): Where does a damped random walk over the
//!   interactions spend its time?
//!
//! # Usage
//!
//! Every metric takes an [`InteractionGraph`] reference and returns
//! [`Scores`] keyed by protein id, covering every node exactly once. None of
//! them mutates the graph, so they may run in any order.
//!
//! ```rust,ignore
//! use ppin_core::metrics::{compute_centralities, CentralityConfig, Measure};
//!
//! let all = compute_centralities(&graph, &CentralityConfig::default())?;
//! let pr = all.get(Measure::PageRank);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::PpiError;
use crate::graph::InteractionGraph;

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;
pub mod pagerank;

pub use eigenvector::EigenvectorConfig;
pub use pagerank::PageRankConfig;

/// Per-node scores for one measure, ordered by protein id.
pub type Scores = BTreeMap<String, f64>;

// ---------------------------------------------------------------------------
// Measure
// ---------------------------------------------------------------------------

/// The five centrality measures, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Degree,
    Betweenness,
    Closeness,
    Eigenvector,
    #[serde(rename = "pagerank")]
    PageRank,
}

impl Measure {
    pub const ALL: [Self; 5] = [
        Self::Degree,
        Self::Betweenness,
        Self::Closeness,
        Self::Eigenvector,
        Self::PageRank,
    ];

    /// Short machine name, matching the serde form.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Betweenness => "betweenness",
            Self::Closeness => "closeness",
            Self::Eigenvector => "eigenvector",
            Self::PageRank => "pagerank",
        }
    }

    /// Display label, e.g. `"Degree Centrality"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Degree => "Degree Centrality",
            Self::Betweenness => "Betweenness Centrality",
            Self::Closeness => "Closeness Centrality",
            Self::Eigenvector => "Eigenvector Centrality",
            Self::PageRank => "PageRank Centrality",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning for the iterative measures. Degree, betweenness and closeness
/// are exact and take no parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralityConfig {
    #[serde(default)]
    pub eigenvector: EigenvectorConfig,
    #[serde(default)]
    pub pagerank: PageRankConfig,
}

// ---------------------------------------------------------------------------
// Centralities
// ---------------------------------------------------------------------------

/// All five score maps for one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Centralities {
    pub degree: Scores,
    pub betweenness: Scores,
    pub closeness: Scores,
    pub eigenvector: Scores,
    pub pagerank: Scores,
}

impl Centralities {
    /// Scores for one measure.
    #[must_use]
    pub const fn get(&self, measure: Measure) -> &Scores {
        match measure {
            Measure::Degree => &self.degree,
            Measure::Betweenness => &self.betweenness,
            Measure::Closeness => &self.closeness,
            Measure::Eigenvector => &self.eigenvector,
            Measure::PageRank => &self.pagerank,
        }
    }

    /// Iterate `(measure, scores)` in [`Measure::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Measure, &Scores)> + '_ {
        Measure::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

/// Compute all five measures.
///
/// # Errors
///
/// - [`PpiError::DegenerateGraph`] if the graph has fewer than two nodes.
/// - [`PpiError::ConvergenceFailure`] if eigenvector centrality or PageRank
///   reaches its iteration cap.
#[instrument(skip(g, config), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn compute_centralities(
    g: &InteractionGraph,
    config: &CentralityConfig,
) -> Result<Centralities, PpiError> {
    let degree = degree::degree_centrality(g)?;
    let betweenness = betweenness::betweenness_centrality(g);
    let closeness = closeness::closeness_centrality(g);
    let ev = eigenvector::eigenvector_centrality(g, &config.eigenvector)?;
    let pr = pagerank::pagerank(g, &config.pagerank)?;

    debug!(
        eigenvector_iterations = ev.iterations,
        pagerank_iterations = pr.iterations,
        "computed centralities"
    );

    Ok(Centralities {
        degree,
        betweenness,
        closeness,
        eigenvector: ev.scores,
        pagerank: pr.scores,
    })
}

/// Map a node-indexed score vector back to protein ids.
pub(crate) fn label_scores(g: &InteractionGraph, values: &[f64]) -> Scores {
    g.node_ids()
        .zip(values.iter().copied())
        .map(|(id, score)| (id.to_string(), score))
        .collect()
}
