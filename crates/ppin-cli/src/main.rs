#![forbid(unsafe_code)]

mod cmd;
mod config;
mod fetch;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error};
use ppin_core::PpiError;
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ppin: protein-protein interaction network centrality",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (default: ./ppin.toml, then the user config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Rank proteins by five centrality measures and find the common top nodes",
        after_help = "EXAMPLES:\n    # Analyze a saved STRING response\n    ppin analyze --provider string --input tp53.json\n\n    # Fetch and analyze in one step\n    ppin analyze --provider biogrid --protein TP53\n\n    # Top 10 per measure as JSON\n    ppin analyze -p string -i tp53.json -k 10 --format json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Download a raw provider response",
        after_help = "EXAMPLES:\n    # Save a STRING network for offline analysis\n    ppin fetch --provider string --protein TP53 --output tp53.json"
    )]
    Fetch(cmd::fetch::FetchArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("PPIN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "ppin=debug,info"
        } else {
            "ppin=info,warn"
        })
    });

    let format = env::var("PPIN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Render `err` in `output` mode on stderr and exit with status 1.
fn fail(output: OutputMode, err: &anyhow::Error) -> anyhow::Result<()> {
    let cli_error = err
        .downcast_ref::<PpiError>()
        .map_or_else(|| CliError::new(format!("{err:#}")), CliError::from);
    render_error(output, &cli_error)?;
    std::process::exit(1);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Config errors are rendered with the flag/env mode; the file's own
    // `output` key is unavailable.
    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let output = output::resolve_output_mode(cli.format, cli.json, None);
            return fail(output, &err);
        }
    };
    let output = output::resolve_output_mode(cli.format, cli.json, config.output.as_deref());
    debug!(?output, "resolved output mode");

    let result = match &cli.command {
        Commands::Analyze(args) => cmd::analyze::run_analyze(args, &config, output),
        Commands::Fetch(args) => cmd::fetch::run_fetch(args, &config, output),
    };

    if let Err(err) = result {
        return fail(output, &err);
    }

    Ok(())
}
