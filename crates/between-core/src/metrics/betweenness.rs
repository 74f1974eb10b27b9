//! Betweenness centrality by shortest-path enumeration.
//!
//! # Overview
//!
//! The betweenness of a target vertex `t` is
//!
//! ```text
//! C(t) = Σ over unordered pairs {a, b} ⊆ V \ {t}, a ≠ b, of  σ_ab(t) / σ_ab
//! ```
//!
//! where `σ_ab` is the number of shortest paths between `a` and `b` and
//! `σ_ab(t)` the number of those that visit `t`. Each pair is considered
//! once, so scores are **not** doubled the way an ordered-pair sum would be.
//!
//! # Algorithm
//!
//! For every pair (in input vertex order, `a` before `b`) we enumerate all
//! shortest paths with [`crate::paths::enumerate`] and count those that
//! contain `t`. The fraction is accumulated into a running sum. Cost is
//! dominated by the enumeration, which is exponential in the worst case;
//! [`crate::metrics::brandes`] computes the same scores in O(V·E).
//!
//! # Disconnected pairs
//!
//! A pair with no path has `σ_ab = 0`. [`DisconnectedPolicy::Skip`] scores
//! it as 0; [`DisconnectedPolicy::Fail`] aborts with
//! [`GraphError::Disconnected`] naming the first such pair.
//!
//! # Normalization
//!
//! [`normalized_betweenness`] divides by `(N-1)(N-2)/2`, the number of
//! pairs that could route through a single vertex of an `N`-vertex graph.

use serde::Serialize;
use tracing::{instrument, trace};

use crate::cancel::Cancellation;
use crate::config::DisconnectedPolicy;
use crate::error::{GraphError, Result};
use crate::graph::{UndirectedGraph, VertexId};
use crate::paths::enumerate::shortest_path_indices;

/// Raw and normalized betweenness of one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VertexScore {
    pub vertex: VertexId,
    pub score: f64,
    pub normalized: f64,
}

/// Betweenness centrality of `target`.
///
/// # Errors
///
/// - [`GraphError::UnknownVertex`] if `target` is not in the graph.
/// - [`GraphError::Disconnected`] under [`DisconnectedPolicy::Fail`].
#[instrument(skip(graph))]
pub fn betweenness_centrality(
    graph: &UndirectedGraph,
    target: VertexId,
    policy: DisconnectedPolicy,
) -> Result<f64> {
    betweenness_centrality_cancellable(graph, target, policy, &Cancellation::new())
}

/// [`betweenness_centrality`] with cooperative cancellation.
///
/// # Errors
///
/// As [`betweenness_centrality`], plus cancellation errors from `cancel`.
pub fn betweenness_centrality_cancellable(
    graph: &UndirectedGraph,
    target: VertexId,
    policy: DisconnectedPolicy,
    cancel: &Cancellation,
) -> Result<f64> {
    let t = graph.require_index(target)?;
    score_index(graph, t, policy, cancel)
}

/// Betweenness of every vertex, in input vertex order.
///
/// # Errors
///
/// [`GraphError::Disconnected`] under [`DisconnectedPolicy::Fail`].
#[instrument(skip(graph))]
pub fn all_scores(graph: &UndirectedGraph, policy: DisconnectedPolicy) -> Result<Vec<VertexScore>> {
    let cancel = Cancellation::new();
    let n = graph.vertex_count();
    (0..n)
        .map(|t| {
            let score = score_index(graph, t, policy, &cancel)?;
            Ok(VertexScore {
                vertex: graph.vertex_at(t),
                score,
                normalized: normalized_betweenness(score, n),
            })
        })
        .collect()
}

/// `(N-1)(N-2)/2`: the number of vertex pairs that exclude a given vertex.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn normalization_divisor(vertex_count: usize) -> f64 {
    if vertex_count < 3 {
        return 0.0;
    }
    ((vertex_count - 1) * (vertex_count - 2)) as f64 / 2.0
}

/// Scale a raw score into `[0, 1]` by [`normalization_divisor`].
///
/// Graphs with fewer than three vertices have no pair that can route
/// through a third vertex; their normalized score is 0.
#[must_use]
pub fn normalized_betweenness(raw: f64, vertex_count: usize) -> f64 {
    let divisor = normalization_divisor(vertex_count);
    if divisor > 0.0 { raw / divisor } else { 0.0 }
}

// ---------------------------------------------------------------------------
// Internal helpers shared with the analyzer
// ---------------------------------------------------------------------------

/// Sequential score of the vertex at index `t`.
pub(crate) fn score_index(
    graph: &UndirectedGraph,
    t: usize,
    policy: DisconnectedPolicy,
    cancel: &Cancellation,
) -> Result<f64> {
    let fractions = pairs_excluding(graph.vertex_count(), t)
        .map(|(a, b)| pair_fraction(graph, t, a, b, policy, cancel));
    let mut total = 0.0;
    for fraction in fractions {
        total += fraction?;
    }
    Ok(total)
}

/// Every unordered pair `(a, b)`, `a < b`, of indices in `0..n` other than `t`.
pub(crate) fn pairs_excluding(n: usize, t: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n)
        .filter(move |&a| a != t)
        .flat_map(move |a| (a + 1..n).filter(move |&b| b != t).map(move |b| (a, b)))
}

/// Fraction of shortest `a`–`b` paths that contain `t`.
pub(crate) fn pair_fraction(
    graph: &UndirectedGraph,
    t: usize,
    a: usize,
    b: usize,
    policy: DisconnectedPolicy,
    cancel: &Cancellation,
) -> Result<f64> {
    let Some(paths) = shortest_path_indices(graph, a, b, cancel)? else {
        return match policy {
            DisconnectedPolicy::Skip => {
                trace!(a, b, "disconnected pair scored as 0");
                Ok(0.0)
            }
            DisconnectedPolicy::Fail => Err(GraphError::Disconnected {
                a: graph.vertex_at(a),
                b: graph.vertex_at(b),
            }),
        };
    };

    let through = paths.iter().filter(|path| path.contains(&t)).count();
    Ok(ratio(through, paths.len()))
}

#[allow(clippy::cast_precision_loss)]
fn ratio(through: usize, total: usize) -> f64 {
    through as f64 / total as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
