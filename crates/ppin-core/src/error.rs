//! Error types for the analysis pipeline.
//!
//! Every stage either succeeds completely or returns one [`PpiError`]; no
//! stage hands back partial results. Each variant maps to a stable
//! [`ErrorCode`] so the presentation layer can render machine-readable
//! failures without matching on message text.

use std::fmt;

use thiserror::Error;

use crate::metrics::Measure;
use crate::source::Provider;

/// Machine-readable error codes for callers that branch on failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    SchemaMismatch,
    MalformedResponse,
    EmptyGraph,
    DegenerateGraph,
    ConvergenceFailure,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::SchemaMismatch => "E1001",
            Self::MalformedResponse => "E1002",
            Self::EmptyGraph => "E2001",
            Self::DegenerateGraph => "E2002",
            Self::ConvergenceFailure => "E3001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SchemaMismatch => "Provider schema mismatch",
            Self::MalformedResponse => "Malformed provider response",
            Self::EmptyGraph => "No interactions found",
            Self::DegenerateGraph => "Graph too small for centrality",
            Self::ConvergenceFailure => "Iterative centrality did not converge",
        }
    }

    /// Remediation hint that can be surfaced to the end user.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::SchemaMismatch => {
                "Check that --provider matches the database the data came from."
            }
            Self::MalformedResponse => {
                "The provider returned an error or an unexpected payload; inspect it with `ppin fetch`."
            }
            Self::EmptyGraph => "Verify the protein identifier and organism; the provider returned no PPI data.",
            Self::DegenerateGraph => "Centrality needs at least two distinct proteins in the network.",
            Self::ConvergenceFailure => {
                "Raise max_iter or loosen tolerance in the [analysis] section of ppin.toml."
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failure of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PpiError {
    /// A record lacks one of the provider's identifier columns.
    #[error("{provider} record {row} has no usable `{column}` column")]
    SchemaMismatch {
        provider: Provider,
        column: &'static str,
        row: usize,
    },

    /// The provider body is not a table of interaction records.
    #[error("provider response is not a table of interaction records: {reason}")]
    MalformedResponse { reason: String },

    /// The edge list was empty.
    #[error("no interactions to build a graph from")]
    EmptyGraph,

    /// Fewer than two nodes; degree centrality is undefined.
    #[error("graph has {node_count} node(s), centrality needs at least 2")]
    DegenerateGraph { node_count: usize },

    /// An iterative measure reached its iteration cap.
    #[error("{measure} did not converge within {iterations} iterations")]
    ConvergenceFailure { measure: Measure, iterations: usize },
}

impl PpiError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::SchemaMismatch { .. } => ErrorCode::SchemaMismatch,
            Self::MalformedResponse { .. } => ErrorCode::MalformedResponse,
            Self::EmptyGraph => ErrorCode::EmptyGraph,
            Self::DegenerateGraph { .. } => ErrorCode::DegenerateGraph,
            Self::ConvergenceFailure { .. } => ErrorCode::ConvergenceFailure,
        }
    }

    /// User-facing suggestion for this failure.
    #[must_use]
    pub fn suggestion(&self) -> String {
        match self {
            Self::SchemaMismatch { provider, .. } => {
                let (a, b) = provider.columns();
                format!(
                    "{provider} data must carry `{a}` and `{b}` on every record. {}",
                    self.error_code().hint()
                )
            }
            _ => self.error_code().hint().to_string(),
        }
    }
}
