//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Brandes (2001) avoids materializing paths: one BFS per source vertex
//! counts shortest paths (`sigma`) and a reverse sweep accumulates each
//! vertex's dependency on the source. Complexity is O(V·E) for unweighted
//! graphs, against the exponential worst case of path enumeration.
//!
//! # Semantics
//!
//! Scores match [`crate::metrics::betweenness`] up to floating-point
//! rounding:
//!
//! - The graph is undirected, so every unordered pair is reached once from
//!   each endpoint. The accumulated sum is halved.
//! - Unreachable pairs contribute 0. Callers that need the `fail` policy
//!   check connectivity first (see [`crate::Analyzer`]).
//!
//! Because summation order differs from the enumeration method, scores that
//! tie exactly under one method may differ in the last bits under the
//! other.

use std::collections::VecDeque;

use petgraph::graph::UnGraph;
use petgraph::visit::{IntoNodeIdentifiers, NodeIndexable};
use tracing::instrument;

use crate::cancel::Cancellation;
use crate::error::Result;
use crate::graph::{UndirectedGraph, VertexId};
use crate::metrics::betweenness::{VertexScore, normalized_betweenness};

/// Betweenness of every vertex, in input vertex order.
#[must_use]
#[instrument(skip(graph))]
pub fn brandes_scores(graph: &UndirectedGraph) -> Vec<VertexScore> {
    let g = graph.as_petgraph();
    let n = g.node_count();

    let mut cb: Vec<f64> = vec![0.0; n];
    for s in g.node_identifiers() {
        accumulate_source(g, g.to_index(s), &mut cb);
    }

    halve(cb)
        .into_iter()
        .enumerate()
        .map(|(i, score)| VertexScore {
            vertex: graph.vertex_at(i),
            score,
            normalized: normalized_betweenness(score, n),
        })
        .collect()
}

/// Raw scores indexed by dense vertex index. `cancel` is checked once per
/// source vertex.
pub(crate) fn brandes_raw(graph: &UndirectedGraph, cancel: &Cancellation) -> Result<Vec<f64>> {
    let g = graph.as_petgraph();

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; g.node_count()];
    for s in g.node_identifiers() {
        cancel.check()?;
        accumulate_source(g, g.to_index(s), &mut cb);
    }

    Ok(halve(cb))
}

/// Add the dependencies of every vertex on source `si` into `cb`.
fn accumulate_source(g: &UnGraph<VertexId, ()>, si: usize, cb: &mut [f64]) {
    let n = g.node_count();

    // Vertices in order of discovery (farthest popped first).
    let mut stack: Vec<usize> = Vec::with_capacity(n);

    // predecessors[w]: vertices immediately before w on shortest paths from s.
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];

    // sigma[t]: number of shortest paths from s to t.
    let mut sigma: Vec<f64> = vec![0.0; n];
    sigma[si] = 1.0;

    // dist[t]: hop distance from s to t.
    let mut dist: Vec<Option<usize>> = vec![None; n];
    dist[si] = Some(0);

    let mut queue: VecDeque<usize> = VecDeque::from([si]);

    while let Some(vi) = queue.pop_front() {
        stack.push(vi);
        let next = dist[vi].map_or(0, |d| d + 1);

        for w in g.neighbors(g.from_index(vi)) {
            let wi = g.to_index(w);

            // First visit to w?
            if dist[wi].is_none() {
                dist[wi] = Some(next);
                queue.push_back(wi);
            }

            // Shortest path to w via v?
            if dist[wi] == Some(next) {
                sigma[wi] += sigma[vi];
                predecessors[wi].push(vi);
            }
        }
    }

    // Accumulate dependencies in reverse BFS order.
    let mut delta: Vec<f64> = vec![0.0; n];

    while let Some(wi) = stack.pop() {
        for &vi in &predecessors[wi] {
            if sigma[wi] > 0.0 {
                delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
            }
        }

        if wi != si {
            cb[wi] += delta[wi];
        }
    }
}

/// Each unordered pair was counted from both endpoints.
fn halve(mut cb: Vec<f64>) -> Vec<f64> {
    for score in &mut cb {
        *score /= 2.0;
    }
    cb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisconnectedPolicy;
    use crate::metrics::betweenness::all_scores;

    fn graph(vertices: &[VertexId], edges: &[(VertexId, VertexId)]) -> UndirectedGraph {
        UndirectedGraph::new(vertices, edges).expect("valid graph")
    }

    fn assert_matches_enumeration(g: &UndirectedGraph) {
        let fast = brandes_scores(g);
        let slow = all_scores(g, DisconnectedPolicy::Skip).expect("scores");
        for (f, s) in fast.iter().zip(&slow) {
            assert_eq!(f.vertex, s.vertex);
            assert!(
                (f.score - s.score).abs() < 1e-9,
                "vertex {}: brandes {} vs enumeration {}",
                f.vertex,
                f.score,
                s.score
            );
        }
    }

    #[test]
    fn empty_graph_returns_empty() {
        assert!(brandes_scores(&graph(&[], &[])).is_empty());
    }

    #[test]
    fn single_vertex_zero_betweenness() {
        let scores = brandes_scores(&graph(&[7], &[]));
        assert_eq!(scores.len(), 1);
        assert!(scores[0].score.abs() < 1e-12);
    }

    #[test]
    fn linear_chain_middle_vertex() {
        let scores = brandes_scores(&graph(&[1, 2, 3], &[(1, 2), (2, 3)]));
        assert!(scores[0].score.abs() < 1e-12);
        assert!((scores[1].score - 1.0).abs() < 1e-12);
        assert!(scores[2].score.abs() < 1e-12);
    }

    #[test]
    fn star_center_carries_every_pair() {
        let scores = brandes_scores(&graph(&[0, 1, 2, 3], &[(0, 1), (0, 2), (0, 3)]));
        assert!((scores[0].score - 3.0).abs() < 1e-12);
        assert!((scores[0].normalized - 1.0).abs() < 1e-12);
        for leaf in &scores[1..] {
            assert!(leaf.score.abs() < 1e-12);
        }
    }

    #[test]
    fn agrees_with_enumeration_on_sample() {
        assert_matches_enumeration(&graph(
            &[1, 2, 3, 4, 5, 6],
            &[
                (1, 2),
                (1, 5),
                (2, 3),
                (2, 5),
                (3, 4),
                (3, 6),
                (4, 5),
                (4, 6),
            ],
        ));
    }

    #[test]
    fn agrees_with_enumeration_when_disconnected() {
        // Two triangles joined by nothing, plus a pendant path.
        assert_matches_enumeration(&graph(
            &[1, 2, 3, 4, 5, 6, 7, 8],
            &[(1, 2), (2, 3), (1, 3), (4, 5), (5, 6), (4, 6), (6, 7), (7, 8)],
        ));
    }

    #[test]
    fn cancelled_handle_aborts() {
        let g = graph(&[1, 2, 3], &[(1, 2), (2, 3)]);
        let cancel = Cancellation::new();
        cancel.cancel();
        assert!(brandes_raw(&g, &cancel).is_err());
    }

    #[test]
    fn uncancelled_raw_scores_match_public_scores() {
        let g = graph(
            &[10, 20, 30, 40, 50],
            &[(10, 20), (20, 30), (30, 40), (40, 50), (20, 40)],
        );
        let raw = brandes_raw(&g, &Cancellation::new()).expect("never cancelled");
        let scores = brandes_scores(&g);
        assert_eq!(raw.len(), scores.len());
        for (r, s) in raw.iter().zip(&scores) {
            assert_eq!(r.to_bits(), s.score.to_bits());
        }
        assert!(scores.iter().any(|s| s.score > 0.0));
    }
}
