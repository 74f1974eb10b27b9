//! Graph store.
//!
//! # Overview
//!
//! An [`UndirectedGraph`] is built once from a vertex list and an edge list
//! and never mutated afterwards. Every other component borrows it read-only,
//! so a single graph can be shared across worker threads without locking.
//!
//! ## Pipeline
//!
//! ```text
//! (vertices, edges)
//!        ↓  build::UndirectedGraph::new()   (validation, dense indices)
//! UndirectedGraph
//!        ├─ components::Components::of()    (connectivity labels)
//!        └─ stats::GraphStats::of()         (density, components, degrees)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use between_core::graph::{GraphStats, UndirectedGraph};
//!
//! let g = UndirectedGraph::new(&[1, 2, 3], &[(1, 2), (2, 3)])?;
//! let stats = GraphStats::of(&g);
//! assert_eq!(stats.component_count, 1);
//! # Ok::<(), between_core::GraphError>(())
//! ```

pub mod build;
pub mod components;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use build::{UndirectedGraph, VertexId};
pub use components::Components;
pub use stats::GraphStats;
