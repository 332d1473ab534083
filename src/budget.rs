//! The search budget: when the main loop stops.
//!
//! A budget has two independent limits, wall-clock time and iteration count. Either
//! may be disabled. The loop stops as soon as an enabled limit is reached, and it is
//! always checked *after* an iteration so at least one iteration runs.

use std::time::{Duration, Instant};

/// Why a search loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The wall-clock limit was reached
    TimeLimit,
    /// The iteration limit was reached
    IterationLimit,
    /// Both limits were disabled, so the single mandatory iteration was run
    Fallback,
}

/// Time and iteration limits for one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchBudget {
    /// Wall-clock limit, `None` when disabled
    pub max_time: Option<Duration>,
    /// Iteration limit, `None` when disabled
    pub max_iterations: Option<usize>,
}

impl SearchBudget {
    /// Creates a budget from already-validated limits
    pub fn new(max_time: Option<Duration>, max_iterations: Option<usize>) -> Self {
        SearchBudget {
            max_time: max_time.filter(|d| !d.is_zero()),
            max_iterations: max_iterations.filter(|&n| n > 0),
        }
    }

    /// Builds a budget from raw values: a time in seconds and an iteration count
    ///
    /// Non-positive values (and a non-finite time) disable the matching limit.
    pub fn from_raw(time_secs: f64, iterations: i64) -> Self {
        let max_time = if time_secs > 0.0 {
            Duration::try_from_secs_f64(time_secs).ok()
        } else {
            None
        };
        let max_iterations = usize::try_from(iterations).ok().filter(|&n| n > 0);
        SearchBudget::new(max_time, max_iterations)
    }

    /// Returns true if neither limit is enabled
    pub fn is_unbounded(&self) -> bool {
        self.max_time.is_none() && self.max_iterations.is_none()
    }

    /// Starts the clock for a new search
    pub fn start(&self) -> BudgetClock {
        BudgetClock {
            budget: *self,
            started: Instant::now(),
        }
    }
}

/// A running budget, measured with the monotonic clock
#[derive(Debug, Clone, Copy)]
pub struct BudgetClock {
    budget: SearchBudget,
    started: Instant,
}

impl BudgetClock {
    /// Time elapsed since the search started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Checks the limits after `completed` iterations
    ///
    /// Returns the reason to stop, or `None` to keep searching.
    pub fn exhausted(&self, completed: usize) -> Option<StopReason> {
        if self.budget.is_unbounded() {
            return (completed >= 1).then_some(StopReason::Fallback);
        }

        if let Some(max_iterations) = self.budget.max_iterations {
            if completed >= max_iterations {
                return Some(StopReason::IterationLimit);
            }
        }

        if let Some(max_time) = self.budget.max_time {
            if self.elapsed() >= max_time {
                return Some(StopReason::TimeLimit);
            }
        }

        None
    }
}
