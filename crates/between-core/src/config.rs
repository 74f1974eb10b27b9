//! Analysis configuration.
//!
//! Resolution order (later wins):
//!
//! 1. [`AnalysisConfig::default`]
//! 2. `between.toml` in the working directory, or an explicit `--config` path
//! 3. `BETWEEN_THREADS` environment variable
//! 4. command-line flags (applied by the CLI)
//!
//! ```toml
//! method = "enumerate"      # or "brandes"
//! disconnected = "skip"     # or "fail"
//! tie_tolerance = 0.0       # 0.0 = exact float equality
//! parallel = true
//! threads = 4
//! deadline_ms = 30000
//! ```

use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::metrics::TiePolicy;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "between.toml";

/// Environment variable overriding the worker thread count.
pub const THREADS_ENV: &str = "BETWEEN_THREADS";

/// How a centrality query treats a pair of vertices with no connecting path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisconnectedPolicy {
    /// The pair contributes 0 to the score.
    #[default]
    Skip,
    /// The query fails with [`GraphError::Disconnected`].
    Fail,
}

/// Which algorithm scores vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Enumerate every shortest path per pair and count those through the target.
    #[default]
    Enumerate,
    /// Brandes' dependency accumulation. Same scores up to float rounding.
    Brandes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub method: Method,
    #[serde(default)]
    pub disconnected: DisconnectedPolicy,
    /// Scores within this distance of the maximum tie with it.
    #[serde(default)]
    pub tie_tolerance: f64,
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Worker threads; `None` lets rayon pick one per core.
    #[serde(default)]
    pub threads: Option<usize>,
    /// Per-query deadline in milliseconds.
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            disconnected: DisconnectedPolicy::default(),
            tie_tolerance: 0.0,
            parallel: default_true(),
            threads: None,
            deadline_ms: None,
        }
    }
}

impl AnalysisConfig {
    /// Tie policy derived from `tie_tolerance`.
    #[must_use]
    pub fn tie_policy(&self) -> TiePolicy {
        if self.tie_tolerance > 0.0 {
            TiePolicy::Tolerance(self.tie_tolerance)
        } else {
            TiePolicy::Exact
        }
    }

    /// Per-query deadline, if configured.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidConfig`] if `tie_tolerance` is negative or not
    /// finite, or `threads` is zero.
    pub fn validate(&self) -> Result<(), GraphError> {
        if !self.tie_tolerance.is_finite() || self.tie_tolerance < 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "tie_tolerance must be a finite value >= 0, got {}",
                self.tie_tolerance
            )));
        }
        if self.threads == Some(0) {
            return Err(GraphError::InvalidConfig(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

const fn default_true() -> bool {
    true
}

/// Parse a config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`AnalysisConfig`].
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the effective config for a run rooted at `dir`.
///
/// An explicit path must exist; otherwise `dir/between.toml` is used when
/// present and defaults apply when it is not. `BETWEEN_THREADS` then
/// overrides `threads`.
///
/// # Errors
///
/// Returns an error if a config file fails to load, `BETWEEN_THREADS` is
/// not a positive integer, or the result fails [`AnalysisConfig::validate`].
pub fn resolve_config(dir: &Path, explicit: Option<&Path>) -> Result<AnalysisConfig> {
    let base = match explicit {
        Some(path) => load_config(path)?,
        None => {
            let path = dir.join(CONFIG_FILE_NAME);
            if path.exists() {
                load_config(&path)?
            } else {
                AnalysisConfig::default()
            }
        }
    };

    let config = apply_env(base, env::var(THREADS_ENV).ok().as_deref())?;
    config.validate()?;
    Ok(config)
}

/// Apply environment overrides, separated from I/O for testability.
fn apply_env(mut config: AnalysisConfig, threads_env: Option<&str>) -> Result<AnalysisConfig> {
    if let Some(raw) = threads_env {
        let threads = raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{THREADS_ENV} must be a positive integer, got {raw:?}"))?;
        config.threads = Some(threads);
    }
    Ok(config)
}
