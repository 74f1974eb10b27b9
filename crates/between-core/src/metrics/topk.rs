//! Selection of the vertices with maximum betweenness.
//!
//! Every vertex whose score ties the maximum is returned, in input vertex
//! order, so the result is never empty for a non-empty graph.
//!
//! Ties are decided by a [`TiePolicy`]. The default, [`TiePolicy::Exact`],
//! compares accumulated `f64` sums with `==`. Sums of fractions such as
//! `1/3 + 1/3 + 1/3` and `1.0` can differ in the last bit, so two vertices
//! with mathematically equal scores may not tie; [`TiePolicy::Tolerance`]
//! accepts any score within `eps` of the maximum instead.

use tracing::{debug, instrument};

use crate::config::DisconnectedPolicy;
use crate::error::Result;
use crate::graph::{UndirectedGraph, VertexId};
use crate::metrics::betweenness::{VertexScore, all_scores};

/// How scores are compared against the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TiePolicy {
    /// `score == max`.
    #[default]
    Exact,
    /// `max - score <= eps`.
    Tolerance(f64),
}

impl TiePolicy {
    /// Returns `true` if `score` ties `max` under this policy.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_tie(self, score: f64, max: f64) -> bool {
        match self {
            Self::Exact => score == max,
            Self::Tolerance(eps) => max - score <= eps,
        }
    }
}

/// Vertices attaining the maximum betweenness.
///
/// # Errors
///
/// [`crate::GraphError::Disconnected`] under [`DisconnectedPolicy::Fail`].
#[instrument(skip(graph))]
pub fn top_by_centrality(
    graph: &UndirectedGraph,
    policy: DisconnectedPolicy,
    ties: TiePolicy,
) -> Result<Vec<VertexId>> {
    let scores = all_scores(graph, policy)?;
    Ok(select_top(&scores, ties))
}

/// Pick the vertices of `scores` tying the maximum, preserving order.
#[must_use]
pub fn select_top(scores: &[VertexScore], ties: TiePolicy) -> Vec<VertexId> {
    let max = scores
        .iter()
        .map(|s| s.score)
        .fold(f64::NEG_INFINITY, f64::max);

    let top: Vec<VertexId> = scores
        .iter()
        .filter(|s| ties.is_tie(s.score, max))
        .map(|s| s.vertex)
        .collect();

    debug!(max, selected = top.len(), "selected top vertices");
    top
}
