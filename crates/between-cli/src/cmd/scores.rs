//! `between scores`: raw and normalized betweenness of every vertex.

use std::io::Write;

use between_core::{Analyzer, VertexScore};
use clap::Args;

use crate::cmd::{GraphArg, RunContext, load};
use crate::output::{pretty_rule, render};
use crate::timing;

#[derive(Args, Debug)]
pub struct ScoresArgs {
    #[command(flatten)]
    pub graph: GraphArg,

    /// Order by descending score instead of input order.
    #[arg(long)]
    pub sort: bool,

    /// Show only the first N rows.
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

pub fn run_scores(args: &ScoresArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let (_, graph) = load(&args.graph.file)?;
    let analyzer = Analyzer::new(&graph, ctx.config.clone())?;

    let mut scores = timing::timed("scores", || analyzer.scores())?;
    if args.sort {
        // Stable, so equal scores keep input order.
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    }
    if let Some(limit) = args.limit {
        scores.truncate(limit);
    }

    render(
        ctx.output,
        &scores,
        |s, w| write_text(s, w),
        |s, w| write_pretty(s, w),
    )
}

fn write_text(scores: &[VertexScore], w: &mut dyn Write) -> std::io::Result<()> {
    for s in scores {
        writeln!(w, "{} {} {}", s.vertex, s.score, s.normalized)?;
    }
    Ok(())
}

fn write_pretty(scores: &[VertexScore], w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{:>12}  {:>14}  {:>10}", "vertex", "betweenness", "normalized")?;
    pretty_rule(w)?;
    for s in scores {
        writeln!(w, "{:>12}  {:>14.6}  {:>10.6}", s.vertex, s.score, s.normalized)?;
    }
    Ok(())
}
