//! Configured, parallel front end to the centrality queries.
//!
//! An [`Analyzer`] borrows an immutable graph and applies one
//! [`AnalysisConfig`] to every query: method, disconnected-pair policy, tie
//! policy, worker pool and deadline.
//!
//! # Parallelism
//!
//! The graph is read-only and every search owns its working state, so work
//! fans out without locks:
//!
//! - a single-vertex score evaluates its vertex pairs in parallel;
//! - all-vertex scores (and top-k) evaluate one vertex per task.
//!
//! Per-pair fractions are collected in pair order and summed sequentially,
//! so parallel and sequential runs produce bit-identical scores. Exact tie
//! detection depends on that.
//!
//! # Disconnected pairs
//!
//! Under [`DisconnectedPolicy::Fail`] connectivity is checked up front from
//! component labels, so the reported pair is always the first disconnected
//! pair in pair order regardless of scheduling or method.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, instrument};

use crate::cancel::Cancellation;
use crate::config::{AnalysisConfig, DisconnectedPolicy, Method};
use crate::error::{GraphError, Result};
use crate::graph::{Components, UndirectedGraph, VertexId};
use crate::metrics::betweenness::{
    VertexScore, normalized_betweenness, pair_fraction, pairs_excluding, score_index,
};
use crate::metrics::brandes::brandes_raw;
use crate::metrics::topk::select_top;
use crate::paths;

/// Runs centrality queries against one graph under one configuration.
#[derive(Debug)]
pub struct Analyzer<'g> {
    graph: &'g UndirectedGraph,
    config: AnalysisConfig,
    pool: Option<ThreadPool>,
    components: Components,
    cancel: Cancellation,
}

impl<'g> Analyzer<'g> {
    /// Validate `config` and prepare the worker pool.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidConfig`] if the config fails validation.
    /// - [`GraphError::ThreadPool`] if the pool cannot be built.
    pub fn new(graph: &'g UndirectedGraph, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let pool = if config.parallel {
            let pool = ThreadPoolBuilder::new()
                .num_threads(config.threads.unwrap_or(0))
                .thread_name(|i| format!("between-worker-{i}"))
                .build()
                .map_err(|e| GraphError::ThreadPool(e.to_string()))?;
            debug!(threads = pool.current_num_threads(), "worker pool ready");
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            graph,
            components: Components::of(graph),
            config,
            pool,
            cancel: Cancellation::new(),
        })
    }

    /// The analyzed graph.
    #[must_use]
    pub const fn graph(&self) -> &'g UndirectedGraph {
        self.graph
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// A handle that cancels every running and future query of this analyzer.
    #[must_use]
    pub fn cancel_handle(&self) -> Cancellation {
        self.cancel.clone()
    }

    /// See [`paths::distance`].
    ///
    /// # Errors
    ///
    /// As [`paths::distance`].
    pub fn distance(&self, start: VertexId, end: VertexId) -> Result<usize> {
        paths::distance(self.graph, start, end)
    }

    /// See [`paths::shortest_path`].
    ///
    /// # Errors
    ///
    /// As [`paths::shortest_path`].
    pub fn shortest_path(&self, start: VertexId, end: VertexId) -> Result<Vec<VertexId>> {
        paths::shortest_path(self.graph, start, end)
    }

    /// See [`paths::all_shortest_paths`]; honours the configured deadline.
    ///
    /// # Errors
    ///
    /// As [`paths::all_shortest_paths_cancellable`].
    pub fn all_shortest_paths(&self, start: VertexId, end: VertexId) -> Result<Vec<Vec<VertexId>>> {
        let cancel = self.query_cancellation();
        paths::all_shortest_paths_cancellable(self.graph, start, end, &cancel)
    }

    /// Raw betweenness of `target`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownVertex`] if `target` is not in the graph.
    /// - [`GraphError::Disconnected`] under [`DisconnectedPolicy::Fail`].
    /// - Cancellation and deadline errors.
    #[instrument(skip(self))]
    pub fn betweenness(&self, target: VertexId) -> Result<f64> {
        let t = self.graph.require_index(target)?;
        self.check_connectivity(t)?;
        let cancel = self.query_cancellation();

        match self.config.method {
            Method::Brandes => Ok(brandes_raw(self.graph, &cancel)?[t]),
            Method::Enumerate => self.score_pairs_parallel(t, &cancel),
        }
    }

    /// Betweenness of `target` divided by `(N-1)(N-2)/2`.
    ///
    /// # Errors
    ///
    /// As [`Analyzer::betweenness`].
    pub fn normalized_betweenness(&self, target: VertexId) -> Result<f64> {
        let raw = self.betweenness(target)?;
        Ok(normalized_betweenness(raw, self.graph.vertex_count()))
    }

    /// Raw and normalized betweenness of every vertex, in input order.
    ///
    /// # Errors
    ///
    /// - [`GraphError::Disconnected`] under [`DisconnectedPolicy::Fail`].
    /// - Cancellation and deadline errors.
    #[instrument(skip(self))]
    pub fn scores(&self) -> Result<Vec<VertexScore>> {
        let n = self.graph.vertex_count();
        for t in 0..n {
            self.check_connectivity(t)?;
        }
        let cancel = self.query_cancellation();

        let raw: Vec<f64> = match self.config.method {
            Method::Brandes => brandes_raw(self.graph, &cancel)?,
            Method::Enumerate => {
                let policy = self.config.disconnected;
                let score = |t: usize| score_index(self.graph, t, policy, &cancel);
                match &self.pool {
                    Some(pool) => pool.install(|| {
                        (0..n).into_par_iter().map(score).collect::<Result<Vec<f64>>>()
                    })?,
                    None => (0..n).map(score).collect::<Result<Vec<f64>>>()?,
                }
            }
        };

        info!(
            vertices = n,
            method = ?self.config.method,
            "scored all vertices"
        );

        Ok(raw
            .into_iter()
            .enumerate()
            .map(|(i, score)| VertexScore {
                vertex: self.graph.vertex_at(i),
                score,
                normalized: normalized_betweenness(score, n),
            })
            .collect())
    }

    /// Vertices attaining the maximum betweenness, under the configured
    /// tie policy.
    ///
    /// # Errors
    ///
    /// As [`Analyzer::scores`].
    pub fn top(&self) -> Result<Vec<VertexId>> {
        let scores = self.scores()?;
        Ok(select_top(&scores, self.config.tie_policy()))
    }

    /// Fresh deadline for one query, sharing the analyzer's cancel flag.
    fn query_cancellation(&self) -> Cancellation {
        self.cancel.deadline_from_now(self.config.deadline())
    }

    fn check_connectivity(&self, t: usize) -> Result<()> {
        if self.config.disconnected == DisconnectedPolicy::Skip || self.components.count() <= 1 {
            return Ok(());
        }
        match self.components.first_disconnected_pair(self.graph, t) {
            Some((a, b)) => Err(GraphError::Disconnected { a, b }),
            None => Ok(()),
        }
    }

    fn score_pairs_parallel(&self, t: usize, cancel: &Cancellation) -> Result<f64> {
        let Some(pool) = &self.pool else {
            return score_index(self.graph, t, self.config.disconnected, cancel);
        };

        let policy = self.config.disconnected;
        let pairs: Vec<(usize, usize)> = pairs_excluding(self.graph.vertex_count(), t).collect();
        let fractions: Vec<f64> = pool.install(|| {
            pairs
                .par_iter()
                .map(|&(a, b)| pair_fraction(self.graph, t, a, b, policy, cancel))
                .collect::<Result<Vec<f64>>>()
        })?;

        let mut total = 0.0;
        for fraction in fractions {
            total += fraction;
        }
        Ok(total)
    }
}
