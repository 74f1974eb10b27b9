#![forbid(unsafe_code)]

mod cmd;
mod loader;
mod output;
mod timing;

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use between_core::AnalysisConfig;
use between_core::config::resolve_config;
use clap::{Parser, Subcommand};
use cmd::{DisconnectedArg, MethodArg, RunContext};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "between: shortest paths and betweenness centrality for undirected graphs",
    long_about = None
)]
struct Cli {
    /// Enable debug logging for between crates.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit a per-stage timing report to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Output format (default: pretty on a terminal, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Alias for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (default: ./between.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Scoring algorithm.
    #[arg(long, global = true, value_enum)]
    method: Option<MethodArg>,

    /// How centrality treats vertex pairs with no connecting path.
    #[arg(long, global = true, value_enum)]
    disconnected: Option<DisconnectedArg>,

    /// Scores within EPS of the maximum tie with it (0 = exact).
    #[arg(long, global = true, value_name = "EPS")]
    tie_tolerance: Option<f64>,

    /// Worker threads (default: one per core).
    #[arg(long, global = true, value_name = "N")]
    threads: Option<usize>,

    /// Run on the calling thread only.
    #[arg(long, global = true)]
    sequential: bool,

    /// Abort path enumeration and scoring after MS milliseconds.
    #[arg(long, global = true, value_name = "MS")]
    deadline_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }

    /// Apply command-line overrides on top of the resolved config.
    fn apply_overrides(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(method) = self.method {
            config.method = method.into();
        }
        if let Some(policy) = self.disconnected {
            config.disconnected = policy.into();
        }
        if let Some(eps) = self.tie_tolerance {
            config.tie_tolerance = eps;
        }
        if let Some(threads) = self.threads {
            config.threads = Some(threads);
        }
        if self.sequential {
            config.parallel = false;
        }
        if let Some(ms) = self.deadline_ms {
            config.deadline_ms = Some(ms);
        }
        config
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Paths",
        about = "Shortest distance between two vertices",
        long_about = "Print the number of vertices on a shortest path between two vertices, \
                      endpoints included.",
        after_help = "EXAMPLES:\n    # Distance from 1 to 6\n    between distance graph.json 1 6\n\n    # Emit machine-readable output\n    between distance graph.json 1 6 --json"
    )]
    Distance(cmd::distance::DistanceArgs),

    #[command(
        next_help_heading = "Paths",
        about = "Every shortest path between two vertices",
        long_about = "Enumerate all shortest paths between two vertices, one per line.",
        after_help = "EXAMPLES:\n    # All shortest paths from 1 to 6\n    between paths graph.json 1 6\n\n    # Give up after one second\n    between paths big.json 1 900 --deadline-ms 1000"
    )]
    Paths(cmd::paths::PathsArgs),

    #[command(
        next_help_heading = "Centrality",
        about = "Betweenness centrality of one vertex",
        long_about = "Sum, over pairs of other vertices, of the fraction of their shortest \
                      paths that pass through the vertex.",
        after_help = "EXAMPLES:\n    # Raw score\n    between centrality graph.json 2\n\n    # Normalized to [0, 1]\n    between centrality graph.json 2 --normalized"
    )]
    Centrality(cmd::centrality::CentralityArgs),

    #[command(
        next_help_heading = "Centrality",
        about = "Vertices with maximum betweenness",
        after_help = "EXAMPLES:\n    # Exact ties\n    between top graph.json\n\n    # Treat near-equal scores as ties\n    between top graph.json --tie-tolerance 1e-9"
    )]
    Top(cmd::top::TopArgs),

    #[command(
        next_help_heading = "Centrality",
        about = "Betweenness of every vertex",
        after_help = "EXAMPLES:\n    # Ten highest scores via Brandes\n    between scores graph.json --method brandes --sort --limit 10"
    )]
    Scores(cmd::scores::ScoresArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Structural summary of a graph file",
        after_help = "EXAMPLES:\n    between stats graph.toml --json"
    )]
    Stats(cmd::stats::StatsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("BETWEEN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "between=debug,info"
        } else {
            "between=info,warn"
        })
    });

    let format = env::var("BETWEEN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

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

fn run(cli: &Cli, ctx: &RunContext) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Distance(args) => {
            timing::timed("cmd.distance", || cmd::distance::run_distance(args, ctx))
        }
        Commands::Paths(args) => timing::timed("cmd.paths", || cmd::paths::run_paths(args, ctx)),
        Commands::Centrality(args) => timing::timed("cmd.centrality", || {
            cmd::centrality::run_centrality(args, ctx)
        }),
        Commands::Top(args) => timing::timed("cmd.top", || cmd::top::run_top(args, ctx)),
        Commands::Scores(args) => {
            timing::timed("cmd.scores", || cmd::scores::run_scores(args, ctx))
        }
        Commands::Stats(args) => timing::timed("cmd.stats", || cmd::stats::run_stats(args, ctx)),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let timing_enabled = cli.timing || timing::enabled_from_env();
    timing::set_enabled(timing_enabled);

    let output = cli.output_mode();

    let command_result = env::current_dir()
        .context("Failed to determine working directory")
        .and_then(|cwd| resolve_config(&cwd, cli.config.as_deref()))
        .map(|config| cli.apply_overrides(config))
        .and_then(|config| {
            debug!(?config, "resolved analysis config");
            if cli.verbose {
                info!(method = ?config.method, disconnected = ?config.disconnected, "analysis settings");
            }
            run(&cli, &RunContext { output, config })
        });

    if timing_enabled {
        let report = timing::collect_report();
        if output == OutputMode::Json {
            eprintln!("{}", serde_json::to_string_pretty(&report.to_json())?);
        } else if report.is_empty() {
            eprintln!("timing report: no stages recorded");
        } else {
            eprint!("{}", report.display_table());
        }
    }

    if let Err(err) = command_result {
        render_error(output, &CliError::from_anyhow(&err))?;
        std::process::exit(1);
    }
    Ok(())
}
