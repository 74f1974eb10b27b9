//! `between centrality`: betweenness of one vertex.

use std::io::Write;

use between_core::{Analyzer, VertexId};
use clap::Args;
use serde::Serialize;

use crate::cmd::{GraphArg, RunContext, load};
use crate::output::{pretty_kv, pretty_section, render};
use crate::timing;

#[derive(Args, Debug)]
pub struct CentralityArgs {
    #[command(flatten)]
    pub graph: GraphArg,

    /// Vertex to score.
    #[arg(allow_negative_numbers = true)]
    pub vertex: VertexId,

    /// Report the score divided by (N-1)(N-2)/2.
    #[arg(long)]
    pub normalized: bool,
}

#[derive(Debug, Serialize)]
struct CentralityReport {
    vertex: VertexId,
    betweenness: f64,
    normalized: f64,
    #[serde(skip)]
    show_normalized: bool,
}

pub fn run_centrality(args: &CentralityArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let (_, graph) = load(&args.graph.file)?;
    let analyzer = Analyzer::new(&graph, ctx.config.clone())?;

    let betweenness = timing::timed("betweenness", || analyzer.betweenness(args.vertex))?;
    let normalized =
        between_core::metrics::normalized_betweenness(betweenness, graph.vertex_count());

    let report = CentralityReport {
        vertex: args.vertex,
        betweenness,
        normalized,
        show_normalized: args.normalized,
    };

    render(
        ctx.output,
        &report,
        |r, w| {
            let value = if r.show_normalized {
                r.normalized
            } else {
                r.betweenness
            };
            writeln!(w, "{value}")
        },
        |r, w| {
            pretty_section(w, &format!("Betweenness of {}", r.vertex))?;
            pretty_kv(w, "raw", format!("{:.6}", r.betweenness))?;
            if r.show_normalized {
                pretty_kv(w, "normalized", format!("{:.6}", r.normalized))?;
            }
            Ok(())
        },
    )
}
