//! Basic statistics for an undirected graph.
//!
//! # Statistics Provided
//!
//! - `vertex_count` / `edge_count`: sizes of the vertex and edge sets.
//! - `density`: `2E / (V * (V - 1))` for an undirected simple graph. A
//!   complete graph has density 1.0; graphs with fewer than two vertices
//!   have density 0.0.
//! - `component_count`: number of connected components. Any value above 1
//!   means some vertex pairs have no shortest path at all.
//! - `isolated_vertex_count`: vertices with no incident edge.
//! - `max_degree` / `min_degree`: extreme vertex degrees (0 when empty).
//! - `fingerprint`: BLAKE3 content hash from [`UndirectedGraph::fingerprint`].

use serde::Serialize;

use crate::graph::build::UndirectedGraph;
use crate::graph::components::Components;

/// Summary statistics for an [`UndirectedGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    /// `2E / (V * (V - 1))`, zero for graphs with 0 or 1 vertex.
    pub density: f64,
    pub component_count: usize,
    pub isolated_vertex_count: usize,
    pub max_degree: usize,
    pub min_degree: usize,
    pub fingerprint: String,
}

impl GraphStats {
    /// Compute statistics for `graph`.
    #[must_use]
    pub fn of(graph: &UndirectedGraph) -> Self {
        let vertex_count = graph.vertex_count();
        let edge_count = graph.edge_count();

        let degrees: Vec<usize> = (0..vertex_count)
            .map(|i| graph.neighbor_indices(i).len())
            .collect();

        Self {
            vertex_count,
            edge_count,
            density: compute_density(vertex_count, edge_count),
            component_count: Components::of(graph).count(),
            isolated_vertex_count: degrees.iter().filter(|&&d| d == 0).count(),
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            min_degree: degrees.iter().copied().min().unwrap_or(0),
            fingerprint: graph.fingerprint(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(vertex_count: usize, edge_count: usize) -> f64 {
    if vertex_count < 2 {
        return 0.0;
    }
    let max_edges = vertex_count * (vertex_count - 1) / 2;
    edge_count as f64 / max_edges as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_stats() {
        let g = UndirectedGraph::new(&[], &[]).expect("valid");
        let s = GraphStats::of(&g);
        assert_eq!(s.vertex_count, 0);
        assert_eq!(s.component_count, 0);
        assert_eq!(s.max_degree, 0);
        assert!((s.density - 0.0).abs() < 1e-12);
    }

    #[test]
    fn complete_graph_has_unit_density() {
        let g = UndirectedGraph::new(&[1, 2, 3], &[(1, 2), (1, 3), (2, 3)]).expect("valid");
        let s = GraphStats::of(&g);
        assert!((s.density - 1.0).abs() < 1e-12);
        assert_eq!(s.component_count, 1);
        assert_eq!(s.min_degree, 2);
    }

    #[test]
    fn isolated_vertices_counted() {
        let g = UndirectedGraph::new(&[1, 2, 3, 4], &[(1, 2)]).expect("valid");
        let s = GraphStats::of(&g);
        assert_eq!(s.isolated_vertex_count, 2);
        assert_eq!(s.component_count, 3);
        assert_eq!(s.max_degree, 1);
        assert_eq!(s.min_degree, 0);
        assert!((s.density - 1.0 / 6.0).abs() < 1e-12);
    }
}
