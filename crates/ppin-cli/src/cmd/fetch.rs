//! `ppin fetch`: download a raw provider response for offline analysis.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use ppin_core::Provider;
use serde::Serialize;

use crate::config::PpinConfig;
use crate::fetch;
use crate::output::{OutputMode, pretty_kv, render_mode};

/// Arguments for `ppin fetch`.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Database to query (biogrid or string).
    #[arg(short, long)]
    pub provider: Provider,

    /// Protein whose interaction network to download.
    #[arg(long, value_name = "ID")]
    pub protein: String,

    /// Write the body here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Report payload for `ppin fetch --output`.
#[derive(Debug, Serialize)]
pub struct FetchReport {
    pub provider: Provider,
    pub protein: String,
    pub path: String,
    pub bytes: usize,
    pub fetched_at: String,
}

/// Execute `ppin fetch`.
///
/// Without `--output` the raw body goes to stdout unchanged, regardless of
/// output mode, so it can be piped into `ppin analyze --input -`.
pub fn run_fetch(args: &FetchArgs, config: &PpinConfig, output: OutputMode) -> Result<()> {
    let body = fetch::fetch_body(args.provider, &args.protein, &config.providers)?;

    let Some(path) = &args.output else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        out.write_all(body.as_bytes())?;
        if !body.ends_with('\n') {
            writeln!(out)?;
        }
        return Ok(());
    };

    std::fs::write(path, &body).with_context(|| format!("failed to write {}", path.display()))?;

    let report = FetchReport {
        provider: args.provider,
        protein: args.protein.clone(),
        path: path.display().to_string(),
        bytes: body.len(),
        fetched_at: chrono::Utc::now().to_rfc3339(),
    };

    render_mode(
        output,
        &report,
        |r, w| {
            writeln!(
                w,
                "{}\t{}\t{}\t{}",
                r.provider.name(),
                r.protein,
                r.bytes,
                r.path
            )
        },
        |r, w| {
            writeln!(w, "Saved {} response", r.provider.name())?;
            pretty_kv(w, "protein", &r.protein)?;
            pretty_kv(w, "bytes", r.bytes.to_string())?;
            pretty_kv(w, "path", &r.path)?;
            pretty_kv(w, "fetched", &r.fetched_at)
        },
    )
}
