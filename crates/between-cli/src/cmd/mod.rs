pub mod centrality;
pub mod distance;
pub mod paths;
pub mod scores;
pub mod stats;
pub mod top;

use std::path::{Path, PathBuf};

use between_core::{AnalysisConfig, DisconnectedPolicy, Method, UndirectedGraph};
use clap::{Args, ValueEnum};

use crate::loader::{self, GraphFile};
use crate::output::OutputMode;
use crate::timing;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub output: OutputMode,
    pub config: AnalysisConfig,
}

/// Positional graph file argument.
#[derive(Args, Debug, Clone)]
pub struct GraphArg {
    /// Graph file: JSON, or TOML when the extension is `.toml`. `-` reads JSON from stdin.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// Enumerate every shortest path.
    Enumerate,
    /// Brandes' accumulation, O(V·E).
    Brandes,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Enumerate => Self::Enumerate,
            MethodArg::Brandes => Self::Brandes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisconnectedArg {
    /// Disconnected pairs contribute 0.
    Skip,
    /// Disconnected pairs abort the query.
    Fail,
}

impl From<DisconnectedArg> for DisconnectedPolicy {
    fn from(arg: DisconnectedArg) -> Self {
        match arg {
            DisconnectedArg::Skip => Self::Skip,
            DisconnectedArg::Fail => Self::Fail,
        }
    }
}

/// Load and validate the graph, timed as the `load` stage.
pub fn load(path: &Path) -> anyhow::Result<(GraphFile, UndirectedGraph)> {
    timing::timed("load", || loader::load_graph(path))
}

/// Join vertex identifiers with `sep`.
pub fn join_ids(ids: &[between_core::VertexId], sep: &str) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}
