//! Configuration options for the engine
//!
//! This module defines the parameters that control a search: the budget, the
//! final move-selection policy, the rollout mode and the reporting level.

use std::time::Duration;

use crate::budget::SearchBudget;

/// Criteria for selecting the move to play after search is complete
///
/// Only the root's direct children are considered. Ties go to the child that was
/// created first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// "Robust" child: the one with the most visits
    ///
    /// This is the standard choice: it relies on statistical confidence rather than
    /// on possibly noisy value estimates.
    Robust,

    /// "Max" child: the one with the highest average reward
    ///
    /// Children that were never visited count as an average of 0. More aggressive
    /// than [`BestChildCriteria::Robust`].
    Max,
}

/// How moves are chosen during rollouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloutMode {
    /// Every move is drawn uniformly at random among the legal ones
    Random,

    /// Play a move that wins immediately for the computer if there is one,
    /// otherwise a random one. Only looks one ply ahead and never blocks the human.
    WinSeeking,
}

/// Configuration for the engine
///
/// # Example
///
/// ```
/// use connect_four_uct::{MCTSConfig, BestChildCriteria, RolloutMode};
/// use std::time::Duration;
///
/// let config = MCTSConfig::default()
///     .with_max_time(Duration::from_millis(500))
///     .with_iteration_budget(10_000)
///     .with_best_child_criteria(BestChildCriteria::Max)
///     .with_rollout(RolloutMode::Random)
///     .with_verbosity(0);
///
/// assert_eq!(config.max_iterations, Some(10_000));
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Exploration constant `C` of the UCB1 formula (√2 by default)
    pub exploration_constant: f64,

    /// Wall-clock limit for one search, `None` when disabled
    pub max_time: Option<Duration>,

    /// Iteration limit for one search, `None` when disabled
    pub max_iterations: Option<usize>,

    /// How the final move is picked among the root's children
    pub best_child_criteria: BestChildCriteria,

    /// How rollouts choose their moves
    pub rollout: RolloutMode,

    /// Reporting level after each search
    ///
    /// - 0: nothing
    /// - 1: the move played, the number of simulations and the estimated
    ///   probability that the computer wins
    /// - 2: also the number of simulations of every root move
    /// - 3: also the average reward of every root move
    pub verbosity: u8,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: 1.4142, // sqrt(2)
            max_time: Some(Duration::from_secs(5)),
            max_iterations: None,
            best_child_criteria: BestChildCriteria::Robust,
            rollout: RolloutMode::WinSeeking,
            verbosity: 1,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the maximum time to run the search; a zero duration disables the limit
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration).filter(|d| !d.is_zero());
        self
    }

    /// Sets the time limit in seconds; a non-positive value disables it
    pub fn with_time_budget_secs(mut self, seconds: f64) -> Self {
        self.max_time = SearchBudget::from_raw(seconds, 0).max_time;
        self
    }

    /// Removes the time limit
    pub fn without_time_limit(mut self) -> Self {
        self.max_time = None;
        self
    }

    /// Sets the maximum number of iterations; zero disables the limit
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations).filter(|&n| n > 0);
        self
    }

    /// Sets the iteration limit; a non-positive value disables it
    pub fn with_iteration_budget(mut self, iterations: i64) -> Self {
        self.max_iterations = SearchBudget::from_raw(0.0, iterations).max_iterations;
        self
    }

    /// Sets the criteria for selecting the move to play
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Sets the rollout mode
    pub fn with_rollout(mut self, rollout: RolloutMode) -> Self {
        self.rollout = rollout;
        self
    }

    /// Sets the reporting level
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// The budget a search with this configuration runs under
    pub fn budget(&self) -> SearchBudget {
        SearchBudget::new(self.max_time, self.max_iterations)
    }
}
