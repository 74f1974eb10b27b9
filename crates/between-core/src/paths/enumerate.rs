//! Exhaustive enumeration of all shortest paths between two vertices.
//!
//! # Algorithm
//!
//! 1. `target_len = distance(start, end)` (vertex count, see [`super::distance`]).
//! 2. Depth-first search from `start` over simple paths. A path is recorded
//!    when it holds exactly `target_len` vertices and ends at `end`.
//!
//! Since no path to `end` is shorter than `target_len`, the recorded set is
//! exactly the set of shortest paths. The search never extends a path past
//! `target_len` vertices and skips any neighbour whose BFS distance to `end`
//! exceeds the remaining budget; both cuts only discard branches that could
//! never be recorded.
//!
//! Visited state and the path buffer belong to one [`PathSearch`] value,
//! created per call, so concurrent enumerations never share mutable state.
//! Neighbours are expanded in ascending identifier order, which fixes the
//! order paths are reported in.
//!
//! Worst-case cost is exponential (the number of shortest paths itself can
//! be), hence the [`Cancellation`] hook.

use fixedbitset::FixedBitSet;
use tracing::{instrument, trace};

use crate::cancel::{Cancellation, Ticker};
use crate::error::{GraphError, Result};
use crate::graph::{UndirectedGraph, VertexId};
use crate::paths::distance::{bfs_path, hop_layers};

/// Every shortest path from `start` to `end`, each exactly once, in
/// depth-first discovery order.
///
/// `all_shortest_paths(g, u, u)` is `[[u]]`.
///
/// # Errors
///
/// - [`GraphError::UnknownVertex`] if either vertex is not in the graph.
/// - [`GraphError::NoPath`] if `end` is unreachable from `start`.
#[instrument(skip(graph))]
pub fn all_shortest_paths(
    graph: &UndirectedGraph,
    start: VertexId,
    end: VertexId,
) -> Result<Vec<Vec<VertexId>>> {
    all_shortest_paths_cancellable(graph, start, end, &Cancellation::new())
}

/// [`all_shortest_paths`] with cooperative cancellation.
///
/// # Errors
///
/// As [`all_shortest_paths`], plus [`GraphError::Cancelled`] and
/// [`GraphError::DeadlineExceeded`] from `cancel`.
pub fn all_shortest_paths_cancellable(
    graph: &UndirectedGraph,
    start: VertexId,
    end: VertexId,
    cancel: &Cancellation,
) -> Result<Vec<Vec<VertexId>>> {
    let s = graph.require_index(start)?;
    let e = graph.require_index(end)?;

    let paths = shortest_path_indices(graph, s, e, cancel)?.ok_or(GraphError::NoPath {
        from: start,
        to: end,
    })?;

    Ok(paths
        .into_iter()
        .map(|path| path.into_iter().map(|i| graph.vertex_at(i)).collect())
        .collect())
}

/// Index-space enumeration used by the centrality aggregator.
///
/// Returns `Ok(None)` when `e` is unreachable from `s`.
pub(crate) fn shortest_path_indices(
    graph: &UndirectedGraph,
    s: usize,
    e: usize,
    cancel: &Cancellation,
) -> Result<Option<Vec<Vec<usize>>>> {
    // Short searches never reach a ticker interval; scoring runs one per pair.
    cancel.check()?;

    let Some(target_len) = bfs_path(graph, s, e).map(|path| path.len()) else {
        return Ok(None);
    };

    let mut search = PathSearch {
        graph,
        end: e,
        target_len,
        to_end: hop_layers(graph, e),
        visited: FixedBitSet::with_capacity(graph.vertex_count()),
        path: Vec::with_capacity(target_len),
        found: Vec::new(),
        ticker: Ticker::new(cancel),
    };
    search.visit(s)?;

    trace!(s, e, target_len, found = search.found.len(), "enumerated shortest paths");
    Ok(Some(search.found))
}

/// Per-call DFS state.
struct PathSearch<'a> {
    graph: &'a UndirectedGraph,
    end: usize,
    target_len: usize,
    /// Hop distance from each vertex to `end`.
    to_end: Vec<Option<usize>>,
    visited: FixedBitSet,
    path: Vec<usize>,
    found: Vec<Vec<usize>>,
    ticker: Ticker<'a>,
}

impl PathSearch<'_> {
    fn visit(&mut self, node: usize) -> Result<()> {
        self.ticker.tick()?;

        self.path.push(node);
        self.visited.insert(node);

        if self.path.len() == self.target_len {
            if node == self.end {
                self.found.push(self.path.clone());
            }
        } else {
            // Vertices still to place after `node`.
            let remaining = self.target_len - self.path.len();
            let graph = self.graph;
            for &next in graph.neighbor_indices(node) {
                if self.visited.contains(next) {
                    continue;
                }
                if self.to_end[next].is_some_and(|hops| hops < remaining) {
                    self.visit(next)?;
                }
            }
        }

        self.visited.set(node, false);
        self.path.pop();
        Ok(())
    }
}
