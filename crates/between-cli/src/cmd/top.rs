//! `between top`: vertices with maximum betweenness.

use std::io::Write;

use between_core::metrics::select_top;
use between_core::{Analyzer, VertexId};
use clap::Args;
use serde::Serialize;

use crate::cmd::{GraphArg, RunContext, join_ids, load};
use crate::output::{pretty_kv, pretty_section, render};
use crate::timing;

#[derive(Args, Debug)]
pub struct TopArgs {
    #[command(flatten)]
    pub graph: GraphArg,
}

#[derive(Debug, Serialize)]
struct TopReport {
    vertices: Vec<VertexId>,
    /// Maximum raw score, absent for an empty graph.
    score: Option<f64>,
    normalized: Option<f64>,
}

pub fn run_top(args: &TopArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let (_, graph) = load(&args.graph.file)?;
    let analyzer = Analyzer::new(&graph, ctx.config.clone())?;

    let scores = timing::timed("scores", || analyzer.scores())?;
    let vertices = select_top(&scores, ctx.config.tie_policy());
    let best = scores
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .copied();

    let report = TopReport {
        vertices,
        score: best.map(|s| s.score),
        normalized: best.map(|s| s.normalized),
    };

    render(
        ctx.output,
        &report,
        |r, w| writeln!(w, "{}", join_ids(&r.vertices, " ")),
        |r, w| {
            pretty_section(w, "Most central vertices")?;
            pretty_kv(w, "vertices", join_ids(&r.vertices, ", "))?;
            if let (Some(score), Some(normalized)) = (r.score, r.normalized) {
                pretty_kv(w, "betweenness", format!("{score:.6}"))?;
                pretty_kv(w, "normalized", format!("{normalized:.6}"))?;
            }
            Ok(())
        },
    )
}
