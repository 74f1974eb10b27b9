//! `between distance`: shortest distance between two vertices.

use std::io::Write;

use between_core::VertexId;
use between_core::paths::{distance, shortest_path};
use clap::Args;
use serde::Serialize;

use crate::cmd::{GraphArg, RunContext, join_ids, load};
use crate::output::{pretty_kv, pretty_section, render};
use crate::timing;

#[derive(Args, Debug)]
pub struct DistanceArgs {
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
struct DistanceReport {
    from: VertexId,
    to: VertexId,
    /// Vertices on a shortest path, endpoints included.
    distance: usize,
    hops: usize,
    path: Vec<VertexId>,
}

pub fn run_distance(args: &DistanceArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let (_, graph) = load(&args.graph.file)?;

    let (count, path) = timing::timed("distance", || {
        anyhow::Ok((
            distance(&graph, args.from, args.to)?,
            shortest_path(&graph, args.from, args.to)?,
        ))
    })?;

    let report = DistanceReport {
        from: args.from,
        to: args.to,
        distance: count,
        hops: count - 1,
        path,
    };

    render(
        ctx.output,
        &report,
        |r, w| writeln!(w, "{}", r.distance),
        |r, w| {
            pretty_section(w, &format!("Distance {} → {}", r.from, r.to))?;
            pretty_kv(w, "vertices", r.distance.to_string())?;
            pretty_kv(w, "hops", r.hops.to_string())?;
            pretty_kv(w, "path", join_ids(&r.path, " - "))
        },
    )
}
