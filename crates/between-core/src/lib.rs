#![forbid(unsafe_code)]
//! between-core library.
//!
//! Shortest-path enumeration and betweenness centrality for undirected,
//! unweighted graphs.
//!
//! # Conventions
//!
//! - **Errors**: Library functions return [`error::Result`] with a typed
//!   [`GraphError`]. Config loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//!
//! # Pipeline
//!
//! ```text
//! (vertices, edges)
//!        ↓  graph::UndirectedGraph::new()
//! UndirectedGraph (validated, immutable)
//!        ↓  paths::distance() / paths::all_shortest_paths()
//! shortest paths per vertex pair
//!        ↓  metrics::betweenness_centrality()
//! per-vertex scores
//!        ↓  metrics::top_by_centrality()
//! vertices attaining the maximum
//! ```
//!
//! [`Analyzer`] bundles a graph with an [`AnalysisConfig`] and runs the same
//! queries on a `rayon` pool.

pub mod analyzer;
pub mod cancel;
pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod paths;

pub use analyzer::Analyzer;
pub use cancel::Cancellation;
pub use config::{AnalysisConfig, DisconnectedPolicy, Method};
pub use error::{ErrorCode, GraphError};
pub use graph::{UndirectedGraph, VertexId};
pub use metrics::{TiePolicy, VertexScore};
