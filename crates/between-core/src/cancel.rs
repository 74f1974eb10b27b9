//! Cooperative cancellation and deadlines for long-running queries.
//!
//! Shortest-path enumeration is exponential in the worst case, so every
//! query accepts a [`Cancellation`] handle. The handle is cheap to clone;
//! clones share the same cancel flag, so any thread holding one can stop a
//! running query. Every enumeration calls [`Cancellation::check`] on entry
//! and then every [`CHECK_INTERVAL`] expansions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{GraphError, Result};

/// Number of search steps between two cancellation checks.
pub const CHECK_INTERVAL: u32 = 1024;

/// Shared cancel flag plus an optional deadline.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
    deadline: Option<Deadline>,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Cancellation {
    /// A handle that is never cancelled unless [`Cancellation::cancel`] is called.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle whose deadline expires `budget` from now.
    #[must_use]
    pub fn with_deadline(budget: Duration) -> Self {
        Self::new().deadline_from_now(Some(budget))
    }

    /// Clone this handle (sharing its cancel flag) with a fresh deadline
    /// starting now. `None` clears any deadline.
    #[must_use]
    pub fn deadline_from_now(&self, budget: Option<Duration>) -> Self {
        Self {
            flag: Arc::clone(&self.flag),
            deadline: budget.map(|budget| Deadline {
                at: Instant::now() + budget,
                budget,
            }),
        }
    }

    /// Request cancellation of every query sharing this handle.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`Cancellation::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Fail if the handle was cancelled or its deadline has passed.
    ///
    /// # Errors
    ///
    /// [`GraphError::Cancelled`] or [`GraphError::DeadlineExceeded`].
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(GraphError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline.at {
                return Err(GraphError::DeadlineExceeded(deadline.budget));
            }
        }
        Ok(())
    }
}

/// Step counter that consults a [`Cancellation`] every [`CHECK_INTERVAL`] ticks.
#[derive(Debug)]
pub(crate) struct Ticker<'a> {
    cancel: &'a Cancellation,
    steps: u32,
}

impl<'a> Ticker<'a> {
    pub(crate) const fn new(cancel: &'a Cancellation) -> Self {
        Self { cancel, steps: 0 }
    }

    pub(crate) fn tick(&mut self) -> Result<()> {
        self.steps = self.steps.wrapping_add(1);
        if self.steps % CHECK_INTERVAL == 0 {
            self.cancel.check()
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_handle_passes() {
        assert_eq!(Cancellation::new().check(), Ok(()));
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let a = Cancellation::new();
        let b = a.clone();
        b.cancel();
        assert!(a.is_cancelled());
        assert_eq!(a.check(), Err(GraphError::Cancelled));
    }

    #[test]
    fn zero_budget_expires_immediately() {
        let c = Cancellation::with_deadline(Duration::ZERO);
        assert_eq!(
            c.check(),
            Err(GraphError::DeadlineExceeded(Duration::ZERO))
        );
    }

    #[test]
    fn deadline_from_now_keeps_flag() {
        let base = Cancellation::new();
        let timed = base.deadline_from_now(Some(Duration::from_secs(3600)));
        assert_eq!(timed.check(), Ok(()));
        base.cancel();
        assert_eq!(timed.check(), Err(GraphError::Cancelled));
    }

    #[test]
    fn ticker_checks_on_interval() {
        let c = Cancellation::new();
        c.cancel();
        let mut ticker = Ticker::new(&c);
        for _ in 1..CHECK_INTERVAL {
            assert_eq!(ticker.tick(), Ok(()));
        }
        assert_eq!(ticker.tick(), Err(GraphError::Cancelled));
    }
}
