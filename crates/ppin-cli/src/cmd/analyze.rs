//! `ppin analyze`: centrality ranking and consensus for one network.

use std::io::{self, Read as _, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;
use ppin_core::consensus::RankedNode;
use ppin_core::{Analysis, GraphStats, Measure, Provider, analyze, parse_records};
use serde::Serialize;
use tracing::info;

use crate::config::PpinConfig;
use crate::fetch;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `ppin analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Database the data comes from (biogrid or string).
    #[arg(short, long)]
    pub provider: Provider,

    /// Saved provider response to analyze; `-` reads stdin.
    #[arg(
        short,
        long,
        value_name = "FILE",
        conflicts_with = "protein",
        required_unless_present = "protein"
    )]
    pub input: Option<PathBuf>,

    /// Fetch the network of this protein from the provider.
    #[arg(long, value_name = "ID")]
    pub protein: Option<String>,

    /// Nodes ranked per measure (overrides `analysis.top_k`).
    #[arg(short = 'k', long, value_name = "K")]
    pub top: Option<usize>,

    /// Include the retrieved interaction rows in the report.
    #[arg(long)]
    pub edges: bool,
}

/// One normalized interaction row.
#[derive(Debug, Serialize)]
pub struct Interaction {
    pub a: String,
    pub b: String,
}

/// Network-level summary.
#[derive(Debug, Serialize)]
pub struct NetworkSummary {
    #[serde(flatten)]
    pub stats: GraphStats,
    pub fingerprint: String,
}

/// Ranked nodes under one measure.
#[derive(Debug, Serialize)]
pub struct MeasureReport {
    pub measure: Measure,
    pub label: &'static str,
    pub top: Vec<RankedNode>,
    pub interpretation: String,
}

/// Report payload for `ppin analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeReport {
    pub provider: Provider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub source: String,
    pub generated_at: String,
    pub top_k: usize,
    /// Normalized rows in response order; present only with `--edges`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactions: Option<Vec<Interaction>>,
    pub network: NetworkSummary,
    pub measures: Vec<MeasureReport>,
    /// Nodes in the top set of every measure, sorted by id.
    pub common: Vec<String>,
}

/// What a high rank under `measure` says about a protein.
const fn meaning(measure: Measure) -> &'static str {
    match measure {
        Measure::Degree => {
            "interact directly with many partners; such hub proteins are often essential \
             for survival or sit in disease pathways"
        }
        Measure::Betweenness => {
            "lie on many shortest paths between other proteins, bridging modules and \
             regulating the flow of signals across the network"
        }
        Measure::Closeness => {
            "reach the rest of the network in few steps, so they can affect many regions \
             quickly, as in signal transduction and regulation"
        }
        Measure::Eigenvector => {
            "are connected to other highly connected proteins, marking the core of densely \
             active or essential functional regions"
        }
        Measure::PageRank => {
            "attract a random walk over the interactions, highlighting proteins central to \
             signaling pathways or disease-related clusters"
        }
    }
}

fn interpretation(measure: Measure, top: &[RankedNode]) -> String {
    if top.is_empty() {
        return format!("No proteins ranked by {measure}.");
    }
    let names: Vec<&str> = top.iter().map(|r| r.node.as_str()).collect();
    format!(
        "{} rank highest by {measure}: they {}.",
        names.join(", "),
        meaning(measure)
    )
}

impl AnalyzeReport {
    fn new(analysis: &Analysis, query: Option<String>, source: String, top_k: usize) -> Self {
        let measures = analysis
            .consensus
            .top_sets
            .iter()
            .map(|set| MeasureReport {
                measure: set.measure,
                label: set.measure.label(),
                interpretation: interpretation(set.measure, &set.ranked),
                top: set.ranked.clone(),
            })
            .collect();

        Self {
            provider: analysis.provider,
            query,
            source,
            generated_at: chrono::Utc::now().to_rfc3339(),
            top_k,
            interactions: None,
            network: NetworkSummary {
                stats: analysis.stats.clone(),
                fingerprint: analysis.graph.content_hash.clone(),
            },
            measures,
            common: analysis.consensus.common.iter().cloned().collect(),
        }
    }

    fn with_interactions(&mut self, edges: &[(String, String)]) {
        self.interactions = Some(
            edges
                .iter()
                .map(|(a, b)| Interaction {
                    a: a.clone(),
                    b: b.clone(),
                })
                .collect(),
        );
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut body = String::new();
        io::stdin()
            .read_to_string(&mut body)
            .context("failed to read provider response from stdin")?;
        return Ok(body);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Execute `ppin analyze`.
pub fn run_analyze(args: &AnalyzeArgs, config: &PpinConfig, output: OutputMode) -> Result<()> {
    let (body, source) = match (&args.input, &args.protein) {
        (Some(path), _) => (read_input(path)?, path.display().to_string()),
        (None, Some(protein)) => (
            fetch::fetch_body(args.provider, protein, &config.providers)?,
            args.provider.name().to_string(),
        ),
        (None, None) => anyhow::bail!("missing required flag: --input <FILE> or --protein <ID>"),
    };

    let records = parse_records(&body)?;

    let mut analysis_config = config.analysis.clone();
    if let Some(k) = args.top {
        analysis_config.top_k = k;
    }

    let analysis = analyze(args.provider, &records, &analysis_config)?;
    info!(
        fingerprint = %analysis.graph.content_hash,
        "analyzed {} network",
        args.provider
    );

    let mut report = AnalyzeReport::new(
        &analysis,
        args.protein.clone(),
        source,
        analysis_config.top_k,
    );
    if args.edges {
        report.with_interactions(&analysis.edges);
    }
    render_mode(output, &report, render_text, render_pretty)
}

/// Tab-separated rows: `edge` rows (with `--edges`), network fields, then
/// `rank` rows, then `common` rows.
fn render_text(report: &AnalyzeReport, w: &mut dyn Write) -> io::Result<()> {
    let stats = &report.network.stats;
    writeln!(w, "provider\t{}", report.provider.name())?;
    if let Some(query) = &report.query {
        writeln!(w, "query\t{query}")?;
    }
    for edge in report.interactions.iter().flatten() {
        writeln!(w, "edge\t{}\t{}", edge.a, edge.b)?;
    }
    writeln!(w, "nodes\t{}", stats.node_count)?;
    writeln!(w, "edges\t{}", stats.edge_count)?;
    writeln!(w, "density\t{:.4}", stats.density)?;
    writeln!(w, "components\t{}", stats.component_count)?;
    writeln!(w, "fingerprint\t{}", report.network.fingerprint)?;
    for m in &report.measures {
        for r in &m.top {
            let key = m.measure.key();
            writeln!(w, "rank\t{key}\t{}\t{}\t{:.4}", r.rank, r.node, r.score)?;
        }
    }
    for node in &report.common {
        writeln!(w, "common\t{node}")?;
    }
    Ok(())
}

fn render_pretty(report: &AnalyzeReport, w: &mut dyn Write) -> io::Result<()> {
    let stats = &report.network.stats;

    if let Some(interactions) = &report.interactions {
        pretty_section(w, "Interactions")?;
        for (i, edge) in interactions.iter().enumerate() {
            writeln!(w, "{:>5}  {:<16} {}", i + 1, edge.a, edge.b)?;
        }
        writeln!(w)?;
    }

    pretty_section(w, "Network")?;
    pretty_kv(w, "provider", report.provider.name())?;
    if let Some(query) = &report.query {
        pretty_kv(w, "query", query)?;
    }
    pretty_kv(w, "nodes", stats.node_count.to_string())?;
    pretty_kv(w, "edges", stats.edge_count.to_string())?;
    pretty_kv(w, "density", format!("{:.4}", stats.density))?;
    pretty_kv(w, "components", stats.component_count.to_string())?;
    pretty_kv(w, "fingerprint", &report.network.fingerprint)?;

    for m in &report.measures {
        writeln!(w)?;
        pretty_section(w, m.label)?;
        for r in &m.top {
            writeln!(w, "{:>3}. {:<16} {:.4}", r.rank, r.node, r.score)?;
        }
        writeln!(w, "     {}", m.interpretation)?;
    }

    writeln!(w)?;
    if report.common.is_empty() {
        pretty_section(w, "No Common Top Nodes")?;
        writeln!(
            w,
            "No protein ranks in the top {} under every centrality measure.",
            report.top_k
        )?;
    } else {
        pretty_section(w, "Common Top Nodes")?;
        writeln!(w, "{}", report.common.join(", "))?;
        writeln!(
            w,
            "These proteins rank in the top {} under every measure and likely play \
             critical roles in the network.",
            report.top_k
        )?;
    }
    Ok(())
}
