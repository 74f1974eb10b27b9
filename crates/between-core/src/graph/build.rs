//! Validated undirected graph construction.
//!
//! # Overview
//!
//! [`UndirectedGraph::new`] takes a vertex list and an edge list, checks the
//! input contract and builds an immutable graph. Validation order:
//!
//! 1. duplicate vertex identifiers,
//! 2. edge endpoints that are not vertices,
//! 3. self-loops,
//! 4. duplicate edges (an edge and its reverse are the same edge).
//!
//! The first violation aborts construction; no partial graph is returned.
//!
//! ## Index Space
//!
//! Vertex identifiers are arbitrary `i64` values. They are translated to a
//! dense `0..n` index space in input order, so index `i` is the `i`-th entry
//! of the vertex list. Traversal code works on indices only.
//!
//! ## Adjacency
//!
//! The graph is stored three ways:
//!
//! - a `petgraph` [`UnGraph`] whose node indices match the dense indices,
//! - one [`FixedBitSet`] row per vertex (the symmetric adjacency relation),
//! - neighbour lists sorted by ascending vertex identifier, which fixes the
//!   order in which searches discover paths.
//!
//! ## Fingerprint
//!
//! [`UndirectedGraph::fingerprint`] is a BLAKE3 hash of the sorted vertex
//! and edge sets. Two inputs that list the same graph in a different order
//! share a fingerprint.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap};

use fixedbitset::FixedBitSet;
use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, instrument};

use crate::error::{GraphError, Result};

/// Vertex identifier as supplied by the caller.
pub type VertexId = i64;

// ---------------------------------------------------------------------------
// UndirectedGraph
// ---------------------------------------------------------------------------

/// An immutable, validated, undirected and unweighted graph.
///
/// Invariants:
/// - vertex identifiers are unique;
/// - adjacency is symmetric and has no self-loops;
/// - each unordered pair is an edge at most once.
#[derive(Debug, Clone)]
pub struct UndirectedGraph {
    graph: UnGraph<VertexId, ()>,
    index: HashMap<VertexId, usize>,
    neighbors: Vec<Vec<usize>>,
    adjacency: Vec<FixedBitSet>,
    edges: Vec<(VertexId, VertexId)>,
}

impl UndirectedGraph {
    /// Validate `vertices` and `edges` and build the graph.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateVertex`] if a vertex identifier repeats.
    /// - [`GraphError::UnknownEndpoint`] if an edge endpoint is not a vertex.
    /// - [`GraphError::SelfLoop`] if an edge joins a vertex to itself.
    /// - [`GraphError::DuplicateEdge`] if an unordered pair repeats.
    #[instrument(skip_all, fields(vertices = vertices.len(), edges = edges.len()))]
    pub fn new(vertices: &[VertexId], edges: &[(VertexId, VertexId)]) -> Result<Self> {
        let index = index_vertices(vertices)?;
        let normalized = normalize_edges(&index, edges)?;

        let n = vertices.len();
        let mut graph = UnGraph::<VertexId, ()>::with_capacity(n, normalized.len());
        for &id in vertices {
            graph.add_node(id);
        }

        let mut adjacency = vec![FixedBitSet::with_capacity(n); n];
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];

        for &(a, b) in &normalized {
            let ia = index[&a];
            let ib = index[&b];
            graph.add_edge(NodeIndex::new(ia), NodeIndex::new(ib), ());
            adjacency[ia].insert(ib);
            adjacency[ib].insert(ia);
            neighbors[ia].push(ib);
            neighbors[ib].push(ia);
        }

        for list in &mut neighbors {
            list.sort_unstable_by_key(|&i| vertices[i]);
        }

        debug!(
            vertex_count = n,
            edge_count = normalized.len(),
            "graph constructed"
        );

        Ok(Self {
            graph,
            index,
            neighbors,
            adjacency,
            edges: normalized,
        })
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of (undirected) edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Vertex identifiers in input order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        self.graph.raw_nodes().iter().map(|node| node.weight)
    }

    /// Edges as `(min, max)` pairs, sorted.
    #[must_use]
    pub fn edges(&self) -> &[(VertexId, VertexId)] {
        &self.edges
    }

    /// Returns `true` if `id` is a vertex of the graph.
    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        self.index.contains_key(&id)
    }

    /// Dense index of `id`, if it is a vertex.
    #[must_use]
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Vertex identifier at dense index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= vertex_count()`.
    #[must_use]
    pub fn vertex_at(&self, idx: usize) -> VertexId {
        self.graph[NodeIndex::new(idx)]
    }

    /// Neighbours of `id` in ascending identifier order, or `None` if `id`
    /// is not a vertex.
    #[must_use]
    pub fn neighbors(&self, id: VertexId) -> Option<Vec<VertexId>> {
        let idx = self.index_of(id)?;
        Some(
            self.neighbors[idx]
                .iter()
                .map(|&i| self.vertex_at(i))
                .collect(),
        )
    }

    /// Number of neighbours of `id`, or `None` if `id` is not a vertex.
    #[must_use]
    pub fn degree(&self, id: VertexId) -> Option<usize> {
        self.index_of(id).map(|idx| self.neighbors[idx].len())
    }

    /// Returns `true` if `{a, b}` is an edge. Unknown vertices are never adjacent.
    #[must_use]
    pub fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(ia), Some(ib)) => self.adjacency[ia].contains(ib),
            _ => false,
        }
    }

    /// BLAKE3 content hash of the sorted vertex and edge sets.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut vertices: Vec<VertexId> = self.vertices().collect();
        vertices.sort_unstable();

        let mut hasher = blake3::Hasher::new();
        hasher.update(b"v");
        for v in vertices {
            hasher.update(&v.to_le_bytes());
        }
        hasher.update(b"e");
        for (a, b) in &self.edges {
            hasher.update(&a.to_le_bytes());
            hasher.update(&b.to_le_bytes());
        }
        format!("blake3:{}", hasher.finalize().to_hex())
    }

    /// The underlying `petgraph` graph. Node index `i` holds the vertex at
    /// dense index `i`.
    #[must_use]
    pub const fn as_petgraph(&self) -> &UnGraph<VertexId, ()> {
        &self.graph
    }

    /// Dense index of `id`, or [`GraphError::UnknownVertex`].
    pub(crate) fn require_index(&self, id: VertexId) -> Result<usize> {
        self.index_of(id).ok_or(GraphError::UnknownVertex(id))
    }

    /// Neighbour indices of `idx`, sorted by ascending vertex identifier.
    pub(crate) fn neighbor_indices(&self, idx: usize) -> &[usize] {
        &self.neighbors[idx]
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Map each identifier to its position, rejecting duplicates.
fn index_vertices(vertices: &[VertexId]) -> Result<HashMap<VertexId, usize>> {
    let mut index = HashMap::with_capacity(vertices.len());
    let mut duplicates = BTreeSet::new();

    for (i, &id) in vertices.iter().enumerate() {
        if index.insert(id, i).is_some() {
            duplicates.insert(id);
        }
    }

    if duplicates.is_empty() {
        Ok(index)
    } else {
        Err(GraphError::DuplicateVertex {
            duplicates: duplicates.into_iter().collect(),
        })
    }
}

/// Normalize edges to sorted `(min, max)` pairs, rejecting unknown
/// endpoints, self-loops and duplicate pairs.
fn normalize_edges(
    index: &HashMap<VertexId, usize>,
    edges: &[(VertexId, VertexId)],
) -> Result<Vec<(VertexId, VertexId)>> {
    if let Some(&(a, b)) = edges
        .iter()
        .find(|(a, b)| !index.contains_key(a) || !index.contains_key(b))
    {
        return Err(GraphError::UnknownEndpoint { a, b });
    }

    if let Some(&(vertex, _)) = edges.iter().find(|(a, b)| a == b) {
        return Err(GraphError::SelfLoop { vertex });
    }

    let mut normalized: Vec<(VertexId, VertexId)> =
        edges.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();
    normalized.sort_unstable();

    let duplicates: BTreeSet<(VertexId, VertexId)> = normalized
        .windows(2)
        .filter(|w| w[0] == w[1])
        .map(|w| w[0])
        .collect();

    if !duplicates.is_empty() {
        return Err(GraphError::DuplicateEdge {
            duplicates: duplicates.into_iter().collect(),
        });
    }

    Ok(normalized)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UndirectedGraph {
        UndirectedGraph::new(
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
        )
        .expect("valid graph")
    }

    #[test]
    fn builds_symmetric_adjacency() {
        let g = sample();
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.edge_count(), 8);
        for &(a, b) in g.edges() {
            assert!(g.are_adjacent(a, b));
            assert!(g.are_adjacent(b, a));
        }
        assert!(!g.are_adjacent(1, 6));
        assert!(!g.are_adjacent(1, 1));
    }

    #[test]
    fn neighbors_sorted_by_identifier() {
        let g = UndirectedGraph::new(&[9, 3, 7, 1], &[(9, 7), (9, 1), (3, 9)]).expect("valid");
        assert_eq!(g.neighbors(9), Some(vec![1, 3, 7]));
        assert_eq!(g.degree(9), Some(3));
        assert_eq!(g.neighbors(42), None);
    }

    #[test]
    fn sparse_identifiers_use_dense_indices() {
        let g = UndirectedGraph::new(&[1000, -5, 42], &[(1000, -5)]).expect("valid");
        assert_eq!(g.index_of(1000), Some(0));
        assert_eq!(g.index_of(-5), Some(1));
        assert_eq!(g.index_of(42), Some(2));
        assert_eq!(g.vertex_at(2), 42);
        assert_eq!(g.vertices().collect::<Vec<_>>(), vec![1000, -5, 42]);
    }

    #[test]
    fn edges_are_normalized_and_sorted() {
        let g = UndirectedGraph::new(&[1, 2, 3], &[(3, 2), (2, 1)]).expect("valid");
        assert_eq!(g.edges(), &[(1, 2), (2, 3)]);
    }

    #[test]
    fn duplicate_vertices_rejected() {
        let err = UndirectedGraph::new(&[1, 1, 2], &[]).expect_err("duplicate");
        assert_eq!(
            err,
            GraphError::DuplicateVertex {
                duplicates: vec![1]
            }
        );
    }

    #[test]
    fn unknown_endpoint_rejected() {
        let err = UndirectedGraph::new(&[1, 2], &[(1, 3)]).expect_err("unknown endpoint");
        assert_eq!(err, GraphError::UnknownEndpoint { a: 1, b: 3 });
    }

    #[test]
    fn reversed_duplicate_edge_rejected() {
        let err = UndirectedGraph::new(&[1, 2], &[(1, 2), (2, 1)]).expect_err("duplicate edge");
        assert_eq!(
            err,
            GraphError::DuplicateEdge {
                duplicates: vec![(1, 2)]
            }
        );
    }

    #[test]
    fn self_loop_rejected() {
        let err = UndirectedGraph::new(&[1, 2], &[(2, 2)]).expect_err("self-loop");
        assert_eq!(err, GraphError::SelfLoop { vertex: 2 });
    }

    #[test]
    fn duplicate_vertices_reported_before_bad_edges() {
        let err = UndirectedGraph::new(&[1, 1], &[(1, 9)]).expect_err("invalid");
        assert!(matches!(err, GraphError::DuplicateVertex { .. }));
    }

    #[test]
    fn empty_graph_is_valid() {
        let g = UndirectedGraph::new(&[], &[]).expect("valid");
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn fingerprint_ignores_input_order() {
        let a = UndirectedGraph::new(&[1, 2, 3], &[(1, 2), (2, 3)]).expect("valid");
        let b = UndirectedGraph::new(&[3, 1, 2], &[(3, 2), (2, 1)]).expect("valid");
        let c = UndirectedGraph::new(&[1, 2, 3], &[(1, 2), (1, 3)]).expect("valid");
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert!(a.fingerprint().starts_with("blake3:"));
    }
}
