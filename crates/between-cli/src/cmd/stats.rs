//! `between stats`: structural summary of a graph file.

use std::io::Write;

use between_core::graph::GraphStats;
use clap::Args;
use serde::Serialize;

use crate::cmd::{GraphArg, RunContext, load};
use crate::output::{pretty_kv, pretty_section, render};

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub graph: GraphArg,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(flatten)]
    stats: GraphStats,
}

pub fn run_stats(args: &StatsArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let (file, graph) = load(&args.graph.file)?;
    let report = StatsReport {
        name: file.name,
        stats: GraphStats::of(&graph),
    };

    render(ctx.output, &report, write_text, write_pretty)
}

fn write_text(r: &StatsReport, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &r.stats;
    if let Some(name) = &r.name {
        writeln!(w, "name {name}")?;
    }
    writeln!(w, "vertices {}", s.vertex_count)?;
    writeln!(w, "edges {}", s.edge_count)?;
    writeln!(w, "density {}", s.density)?;
    writeln!(w, "components {}", s.component_count)?;
    writeln!(w, "isolated {}", s.isolated_vertex_count)?;
    writeln!(w, "max_degree {}", s.max_degree)?;
    writeln!(w, "min_degree {}", s.min_degree)?;
    writeln!(w, "fingerprint {}", s.fingerprint)
}

fn write_pretty(r: &StatsReport, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &r.stats;
    pretty_section(w, r.name.as_deref().unwrap_or("Graph"))?;
    pretty_kv(w, "vertices", s.vertex_count.to_string())?;
    pretty_kv(w, "edges", s.edge_count.to_string())?;
    pretty_kv(w, "density", format!("{:.4}", s.density))?;
    pretty_kv(w, "components", s.component_count.to_string())?;
    pretty_kv(w, "isolated", s.isolated_vertex_count.to_string())?;
    pretty_kv(w, "degree", format!("{}..={}", s.min_degree, s.max_degree))?;
    pretty_kv(w, "fingerprint", &s.fingerprint)
}
