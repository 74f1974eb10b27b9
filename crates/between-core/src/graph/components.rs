//! Connected components of an [`UndirectedGraph`].
//!
//! Two vertices are in the same component iff some path joins them, so a
//! pair `{a, b}` has at least one shortest path exactly when
//! [`Components::same_component`] holds. Centrality queries use this to
//! decide the disconnected-pair policy up front instead of discovering a
//! missing path halfway through a run.

use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

use crate::graph::build::{UndirectedGraph, VertexId};

/// Component label for every vertex, indexed by dense vertex index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    labels: Vec<usize>,
    count: usize,
}

impl Components {
    /// Label the connected components of `graph`.
    ///
    /// Labels are `0..count`, assigned in order of each component's first
    /// vertex in the input vertex list.
    #[must_use]
    pub fn of(graph: &UndirectedGraph) -> Self {
        let g = graph.as_petgraph();
        let n = g.node_count();

        let mut sets = UnionFind::<usize>::new(n);
        for edge in g.edge_references() {
            sets.union(edge.source().index(), edge.target().index());
        }

        let mut label_of_root = vec![usize::MAX; n];
        let mut labels = Vec::with_capacity(n);
        let mut count = 0;

        for i in 0..n {
            let root = sets.find(i);
            if label_of_root[root] == usize::MAX {
                label_of_root[root] = count;
                count += 1;
            }
            labels.push(label_of_root[root]);
        }

        Self { labels, count }
    }

    /// Number of connected components.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Component label of the vertex at dense index `idx`.
    #[must_use]
    pub fn label(&self, idx: usize) -> usize {
        self.labels[idx]
    }

    /// Returns `true` if dense indices `a` and `b` are connected.
    #[must_use]
    pub fn same_component(&self, a: usize, b: usize) -> bool {
        self.labels[a] == self.labels[b]
    }

    /// Size of each component, indexed by label.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.count];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// First unordered pair of vertices other than `excluded` that lies in
    /// different components, in the pair order used by centrality queries.
    ///
    /// Returns `None` when every pair of other vertices is connected.
    #[must_use]
    pub fn first_disconnected_pair(
        &self,
        graph: &UndirectedGraph,
        excluded: usize,
    ) -> Option<(VertexId, VertexId)> {
        let n = self.labels.len();
        for a in (0..n).filter(|&a| a != excluded) {
            for b in (a + 1..n).filter(|&b| b != excluded) {
                if !self.same_component(a, b) {
                    return Some((graph.vertex_at(a), graph.vertex_at(b)));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_graph_has_one_component() {
        let g = UndirectedGraph::new(&[1, 2, 3], &[(1, 2), (2, 3)]).expect("valid");
        let c = Components::of(&g);
        assert_eq!(c.count(), 1);
        assert_eq!(c.sizes(), vec![3]);
        assert_eq!(c.first_disconnected_pair(&g, 0), None);
    }

    #[test]
    fn labels_follow_input_order() {
        let g = UndirectedGraph::new(&[5, 6, 7, 8], &[(6, 8)]).expect("valid");
        let c = Components::of(&g);
        assert_eq!(c.count(), 3);
        assert_eq!(c.label(0), 0);
        assert_eq!(c.label(1), 1);
        assert_eq!(c.label(2), 2);
        assert_eq!(c.label(3), 1);
        assert!(c.same_component(1, 3));
        assert!(!c.same_component(0, 1));
    }

    #[test]
    fn first_disconnected_pair_skips_excluded_vertex() {
        // 1 - 2    3 (isolated)
        let g = UndirectedGraph::new(&[1, 2, 3], &[(1, 2)]).expect("valid");
        let c = Components::of(&g);
        assert_eq!(c.first_disconnected_pair(&g, 0), Some((2, 3)));
        assert_eq!(c.first_disconnected_pair(&g, 2), None);
    }
}
