#![forbid(unsafe_code)]
//! ppin-core library.
//!
//! Builds a protein-protein interaction graph from a provider response,
//! scores every protein under five centrality measures and finds the
//! proteins that rank in the top 5 of all of them.
//!
//! # Conventions
//!
//! - **Errors**: Every fallible operation returns [`error::PpiError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).
//! - **Purity**: No I/O. Fetching data and rendering results belong to the
//!   caller.

pub mod consensus;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod source;

pub use consensus::{Consensus, RankedNode, TOP_K, TopSet, find_consensus};
pub use error::{ErrorCode, PpiError};
pub use graph::{GraphStats, InteractionGraph};
pub use metrics::{Centralities, CentralityConfig, Measure, Scores, compute_centralities};
pub use pipeline::{Analysis, AnalysisConfig, analyze, analyze_edges};
pub use source::{Provider, Record, parse_records};
