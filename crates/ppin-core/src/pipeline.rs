//! End-to-end analysis of one provider response.
//!
//! ```text
//! provider records
//!        ↓  Provider::normalize()
//! Vec<(String, String)>
//!        ↓  InteractionGraph::from_edges()
//! InteractionGraph ──→ GraphStats
//!        ↓  compute_centralities()
//! Centralities
//!        ↓  find_consensus_with()
//! Consensus
//! ```
//!
//! Each stage either succeeds or returns its error; nothing partial is
//! handed back.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::consensus::{Consensus, TOP_K, find_consensus_with};
use crate::error::PpiError;
use crate::graph::{GraphStats, InteractionGraph};
use crate::metrics::{Centralities, CentralityConfig, compute_centralities};
use crate::source::{Provider, Record};

/// Tuning for a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Nodes kept per measure before intersecting. Default: 5.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(flatten)]
    pub centrality: CentralityConfig,
}

const fn default_top_k() -> usize {
    TOP_K
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            centrality: CentralityConfig::default(),
        }
    }
}

/// Everything derived from one provider response.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub provider: Provider,
    /// Normalized interaction rows in response order, duplicates included.
    pub edges: Vec<(String, String)>,
    pub graph: InteractionGraph,
    pub stats: GraphStats,
    pub centralities: Centralities,
    pub consensus: Consensus,
}

/// Normalize, build, score and rank one provider response.
///
/// # Errors
///
/// Propagates the first failing stage's [`PpiError`]: `SchemaMismatch`,
/// `EmptyGraph`, `DegenerateGraph` or `ConvergenceFailure`.
#[instrument(skip_all, fields(provider = %provider, rows = records.len()))]
pub fn analyze(
    provider: Provider,
    records: &[Record],
    config: &AnalysisConfig,
) -> Result<Analysis, PpiError> {
    let edges = provider.normalize(records)?;
    analyze_edges(provider, &edges, config)
}

/// Same as [`analyze`] for an already-normalized edge list.
///
/// # Errors
///
/// `EmptyGraph`, `DegenerateGraph` or `ConvergenceFailure`.
pub fn analyze_edges(
    provider: Provider,
    edges: &[(String, String)],
    config: &AnalysisConfig,
) -> Result<Analysis, PpiError> {
    let graph = InteractionGraph::from_edges(edges)?;
    let stats = GraphStats::from_graph(&graph);
    let centralities = compute_centralities(&graph, &config.centrality)?;
    let consensus = find_consensus_with(&centralities, config.top_k);

    info!(
        nodes = stats.node_count,
        edges = stats.edge_count,
        common = consensus.common.len(),
        "analysis complete"
    );

    Ok(Analysis {
        provider,
        edges: edges.to_vec(),
        graph,
        stats,
        centralities,
        consensus,
    })
}
