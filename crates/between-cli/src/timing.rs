//! Opt-in per-stage timing for CLI runs.
//!
//! Stages wrapped in [`timed`] record their wall time when timing is enabled
//! (`--timing` or `BETWEEN_TIMING=1`). [`collect_report`] drains them into a
//! [`TimingReport`] that lists stages in the order they first ran, with the
//! number of calls and the total time spent. Stages nest: `cmd.top` includes
//! the `load` and `scores` stages it runs.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde_json::json;

/// Environment variable that enables timing without the flag.
pub const TIMING_ENV: &str = "BETWEEN_TIMING";

/// Every stage recorded during one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimingReport {
    pub stages: Vec<StageTiming>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTiming {
    pub name: String,
    pub calls: usize,
    pub total: Duration,
}

thread_local! {
    static REPORT: RefCell<TimingReport> = RefCell::new(TimingReport::default());
}

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Returns true when `BETWEEN_TIMING` holds a truthy value
/// (`1`, `true`, `yes`, `on`).
#[must_use]
pub fn enabled_from_env() -> bool {
    std::env::var(TIMING_ENV)
        .ok()
        .is_some_and(|value| is_truthy(&value))
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
    if !enabled {
        REPORT.with(|report| report.borrow_mut().stages.clear());
    }
}

#[must_use]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Run `f`, adding its duration to stage `name` when timing is enabled.
pub fn timed<R>(name: &str, f: impl FnOnce() -> R) -> R {
    if !is_enabled() {
        return f();
    }

    let started = Instant::now();
    let result = f();
    let elapsed = started.elapsed();
    REPORT.with(|report| report.borrow_mut().record(name, elapsed));
    result
}

/// Take this thread's report, leaving an empty one behind.
#[must_use]
pub fn collect_report() -> TimingReport {
    REPORT.with(|report| std::mem::take(&mut *report.borrow_mut()))
}

impl TimingReport {
    fn record(&mut self, name: &str, elapsed: Duration) {
        match self.stages.iter_mut().find(|stage| stage.name == name) {
            Some(stage) => {
                stage.calls += 1;
                stage.total += elapsed;
            }
            None => self.stages.push(StageTiming {
                name: name.to_string(),
                calls: 1,
                total: elapsed,
            }),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let stages: Vec<_> = self
            .stages
            .iter()
            .map(|stage| {
                json!({
                    "name": stage.name,
                    "calls": stage.calls,
                    "total_us": stage.total.as_micros(),
                })
            })
            .collect();

        json!({ "stages": stages })
    }

    #[must_use]
    pub fn display_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:<20} {:>5} {:>10}", "stage", "calls", "total");
        for stage in &self.stages {
            let _ = writeln!(
                out,
                "{:<20} {:>5} {:>10}",
                stage.name,
                stage.calls,
                format_duration(stage.total)
            );
        }
        out
    }
}

fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();
    if micros >= 1_000_000 {
        format!("{}.{:03}s", micros / 1_000_000, (micros % 1_000_000) / 1_000)
    } else if micros >= 1_000 {
        format!("{}.{:03}ms", micros / 1_000, micros % 1_000)
    } else {
        format!("{micros}us")
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
