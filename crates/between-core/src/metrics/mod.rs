//! Centrality metrics over an [`crate::UndirectedGraph`].
//!
//! # Overview
//!
//! - **Betweenness** (`betweenness`): per-vertex sum, over unordered pairs
//!   of other vertices, of the fraction of shortest paths through the
//!   vertex. Computed by enumerating every shortest path.
//! - **Brandes** (`brandes`): the same scores via dependency accumulation,
//!   O(V·E).
//! - **Top-k** (`topk`): the vertices attaining the maximum score.
//!
//! # Usage
//!
//! ```rust
//! use between_core::{DisconnectedPolicy, TiePolicy, UndirectedGraph};
//! use between_core::metrics::{betweenness_centrality, top_by_centrality};
//!
//! let g = UndirectedGraph::new(&[1, 2, 3], &[(1, 2), (2, 3)])?;
//! let bc = betweenness_centrality(&g, 2, DisconnectedPolicy::Skip)?;
//! assert!((bc - 1.0).abs() < 1e-12);
//! assert_eq!(top_by_centrality(&g, DisconnectedPolicy::Skip, TiePolicy::Exact)?, vec![2]);
//! # Ok::<(), between_core::GraphError>(())
//! ```

pub mod betweenness;
pub mod brandes;
pub mod topk;

pub use betweenness::{
    VertexScore, all_scores, betweenness_centrality, betweenness_centrality_cancellable,
    normalization_divisor, normalized_betweenness,
};
pub use brandes::brandes_scores;
pub use topk::{TiePolicy, select_top, top_by_centrality};
