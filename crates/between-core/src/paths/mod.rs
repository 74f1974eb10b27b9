//! Shortest-path queries.
//!
//! - [`distance`]: BFS minimum distance, counted in vertices.
//! - [`shortest_path`]: one reconstructed shortest path.
//! - [`hop_distances`]: BFS hop counts to every reachable vertex.
//! - [`all_shortest_paths`]: DFS enumeration of every shortest path.

pub mod distance;
pub mod enumerate;

pub use distance::{distance, hop_distances, shortest_path};
pub use enumerate::{all_shortest_paths, all_shortest_paths_cancellable};
