//! `between paths`: every shortest path between two vertices.

use std::io::Write;

use between_core::{Analyzer, VertexId};
use clap::Args;
use serde::Serialize;

use crate::cmd::{GraphArg, RunContext, join_ids, load};
use crate::output::{pretty_kv, pretty_section, render};
use crate::timing;

#[derive(Args, Debug)]
pub struct PathsArgs {
    #[command(flatten)]
    pub graph: GraphArg,

    /// Start vertex.
    #[arg(allow_negative_numbers = true)]
    pub from: VertexId,

    /// End vertex.
    #[arg(allow_negative_numbers = true)]
    pub to: VertexId,
}

#[derive(Debug, Serialize)]
struct PathsReport {
    from: VertexId,
    to: VertexId,
    distance: usize,
    count: usize,
    paths: Vec<Vec<VertexId>>,
}

pub fn run_paths(args: &PathsArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let (_, graph) = load(&args.graph.file)?;
    let analyzer = Analyzer::new(&graph, ctx.config.clone())?;

    let paths = timing::timed("enumerate", || analyzer.all_shortest_paths(args.from, args.to))?;

    let report = PathsReport {
        from: args.from,
        to: args.to,
        distance: paths.first().map_or(0, Vec::len),
        count: paths.len(),
        paths,
    };

    render(
        ctx.output,
        &report,
        |r, w| {
            for path in &r.paths {
                writeln!(w, "{}", join_ids(path, " "))?;
            }
            Ok(())
        },
        |r, w| {
            pretty_section(w, &format!("Shortest paths {} → {}", r.from, r.to))?;
            pretty_kv(w, "vertices", r.distance.to_string())?;
            pretty_kv(w, "paths", r.count.to_string())?;
            writeln!(w)?;
            for (i, path) in r.paths.iter().enumerate() {
                writeln!(w, "{:>4}. {}", i + 1, join_ids(path, " - "))?;
            }
            Ok(())
        },
    )
}
