//! Shortest distance via breadth-first search.
//!
//! Distances are reported as the **number of vertices** on a shortest path
//! (hop count + 1), so `distance(g, u, u) == 1`.
//!
//! The search keeps a predecessor map, stops as soon as the end vertex is
//! discovered and rebuilds the path by walking predecessors back to the
//! start. An unreachable end vertex is reported as [`GraphError::NoPath`].

use std::collections::{BTreeMap, VecDeque};

use fixedbitset::FixedBitSet;
use tracing::instrument;

use crate::error::{GraphError, Result};
use crate::graph::{UndirectedGraph, VertexId};

/// Number of vertices on a shortest path from `start` to `end`.
///
/// # Errors
///
/// - [`GraphError::UnknownVertex`] if either vertex is not in the graph.
/// - [`GraphError::NoPath`] if `end` is unreachable from `start`.
#[instrument(skip(graph))]
pub fn distance(graph: &UndirectedGraph, start: VertexId, end: VertexId) -> Result<usize> {
    shortest_path(graph, start, end).map(|path| path.len())
}

/// One shortest path from `start` to `end`, both endpoints included.
///
/// Among several shortest paths this returns the one BFS discovers first
/// (neighbours are expanded in ascending identifier order).
///
/// # Errors
///
/// Same as [`distance`].
pub fn shortest_path(
    graph: &UndirectedGraph,
    start: VertexId,
    end: VertexId,
) -> Result<Vec<VertexId>> {
    let s = graph.require_index(start)?;
    let e = graph.require_index(end)?;

    let path = bfs_path(graph, s, e).ok_or(GraphError::NoPath {
        from: start,
        to: end,
    })?;

    Ok(path.into_iter().map(|i| graph.vertex_at(i)).collect())
}

/// Hop distance from `from` to every vertex reachable from it.
///
/// Unlike [`distance`], values are edge counts: `from` maps to 0.
///
/// # Errors
///
/// [`GraphError::UnknownVertex`] if `from` is not in the graph.
pub fn hop_distances(graph: &UndirectedGraph, from: VertexId) -> Result<BTreeMap<VertexId, usize>> {
    let s = graph.require_index(from)?;
    Ok(hop_layers(graph, s)
        .into_iter()
        .enumerate()
        .filter_map(|(i, hops)| hops.map(|h| (graph.vertex_at(i), h)))
        .collect())
}

/// BFS from `s` that stops once `e` is discovered, returning the vertex
/// indices of the reconstructed path or `None` if `e` is unreachable.
pub(crate) fn bfs_path(graph: &UndirectedGraph, s: usize, e: usize) -> Option<Vec<usize>> {
    if s == e {
        return Some(vec![s]);
    }

    let n = graph.vertex_count();
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut visited = FixedBitSet::with_capacity(n);
    visited.insert(s);

    let mut queue = VecDeque::from([s]);

    'search: while let Some(v) = queue.pop_front() {
        for &w in graph.neighbor_indices(v) {
            if visited.put(w) {
                continue;
            }
            predecessor[w] = Some(v);
            if w == e {
                break 'search;
            }
            queue.push_back(w);
        }
    }

    if !visited.contains(e) {
        return None;
    }

    let mut path = vec![e];
    let mut cur = e;
    while let Some(prev) = predecessor[cur] {
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    Some(path)
}

/// Full BFS from `s`: hop count to each vertex index, `None` if unreachable.
pub(crate) fn hop_layers(graph: &UndirectedGraph, s: usize) -> Vec<Option<usize>> {
    let mut hops: Vec<Option<usize>> = vec![None; graph.vertex_count()];
    hops[s] = Some(0);

    let mut queue = VecDeque::from([(s, 0_usize)]);
    while let Some((v, d)) = queue.pop_front() {
        for &w in graph.neighbor_indices(v) {
            if hops[w].is_none() {
                hops[w] = Some(d + 1);
                queue.push_back((w, d + 1));
            }
        }
    }
    hops
}
