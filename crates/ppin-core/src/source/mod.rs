//! Provider responses → canonical edge lists.
//!
//! # Overview
//!
//! Each supported PPI database reports an interaction as a record with two
//! partner columns, but the column names differ per database. The caller
//! names the [`Provider`] explicitly and this module extracts that
//! provider's column pair from every record:
//!
//! | Provider | Partner A            | Partner B            |
//! |----------|----------------------|----------------------|
//! | BioGRID  | `OFFICIAL_SYMBOL_A`  | `OFFICIAL_SYMBOL_B`  |
//! | STRING   | `preferredName_A`    | `preferredName_B`    |
//!
//! Identifiers are uppercased so that `tp53` and `TP53` name the same node.
//!
//! ## Response shapes
//!
//! STRING returns a JSON array of records. BioGRID returns a JSON object
//! keyed by interaction id whose values are the records. [`parse_records`]
//! accepts either shape and keeps record order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::PpiError;

/// One row of a provider response.
pub type Record = Map<String, Value>;

/// An interaction between two uppercased protein identifiers.
pub type EdgePair = (String, String);

/// A PPI database with a known record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// BioGRID (`webservice.thebiogrid.org`).
    #[serde(rename = "biogrid")]
    BioGrid,
    /// STRING (`string-db.org`).
    #[serde(rename = "string")]
    StringDb,
}

impl Provider {
    pub const ALL: [Self; 2] = [Self::BioGrid, Self::StringDb];

    /// The two partner-identifier columns for this provider.
    #[must_use]
    pub const fn columns(self) -> (&'static str, &'static str) {
        match self {
            Self::BioGrid => ("OFFICIAL_SYMBOL_A", "OFFICIAL_SYMBOL_B"),
            Self::StringDb => ("preferredName_A", "preferredName_B"),
        }
    }

    /// Display name as the database brands itself.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BioGrid => "BioGRID",
            Self::StringDb => "STRING",
        }
    }

    /// Extract the partner pair of every record, uppercased, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`PpiError::SchemaMismatch`] for the first record that lacks
    /// either column or carries a non-scalar value in it.
    #[instrument(skip(records), fields(provider = self.name(), rows = records.len()))]
    pub fn normalize(self, records: &[Record]) -> Result<Vec<EdgePair>, PpiError> {
        let (col_a, col_b) = self.columns();

        let edges = records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let a = identifier(record, col_a).ok_or(PpiError::SchemaMismatch {
                    provider: self,
                    column: col_a,
                    row,
                })?;
                let b = identifier(record, col_b).ok_or(PpiError::SchemaMismatch {
                    provider: self,
                    column: col_b,
                    row,
                })?;
                Ok((a, b))
            })
            .collect::<Result<Vec<_>, PpiError>>()?;

        debug!(edges = edges.len(), "normalized provider records");
        Ok(edges)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "biogrid" => Ok(Self::BioGrid),
            "string" | "string-db" => Ok(Self::StringDb),
            other => Err(format!(
                "unknown provider '{other}' (expected 'biogrid' or 'string')"
            )),
        }
    }
}

/// Read one identifier cell. Strings and numbers are accepted.
fn identifier(record: &Record, column: &str) -> Option<String> {
    match record.get(column)? {
        Value::String(s) => Some(s.to_uppercase()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a raw provider body into records.
///
/// # Errors
///
/// Returns [`PpiError::MalformedResponse`] when the body is not JSON, or is
/// neither an array of objects nor an object whose values are all objects.
pub fn parse_records(body: &str) -> Result<Vec<Record>, PpiError> {
    let value: Value = serde_json::from_str(body).map_err(|e| PpiError::MalformedResponse {
        reason: format!("invalid JSON: {e}"),
    })?;

    let rows: Vec<Value> = match value {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        other => {
            return Err(PpiError::MalformedResponse {
                reason: format!("expected an array or object, found {}", kind(&other)),
            });
        }
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Object(record) => Ok(record),
            other => Err(PpiError::MalformedResponse {
                reason: format!("entry {i} is {}, not a record", kind(&other)),
            }),
        })
        .collect()
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
