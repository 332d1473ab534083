//! Statistics collection for MCTS searches
//!
//! This module provides the report produced by every search: how long it ran,
//! how big the tree grew, and what the root's children looked like when the move
//! was chosen. Building the report only reads node fields.

use std::time::Duration;

use crate::{
    board::Move,
    budget::StopReason,
    tree::{NodeId, SearchTree},
    utils::win_rate,
};

/// Statistics of one root child at the end of a search
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStatistics {
    /// The move leading to this child
    pub action: Move,

    /// Number of simulations through this child
    pub visits: u64,

    /// Average reward, `None` if the child was never visited
    pub average_reward: Option<f64>,

    /// Number of those simulations won by the computer
    pub wins: u64,
}

/// Statistics collected during an MCTS search
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of iterations performed
    pub iterations: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Total number of nodes in the tree
    pub tree_size: usize,

    /// Maximum depth reached in the tree
    pub max_depth: usize,

    /// Visits of the root, which equal the number of simulations
    pub root_visits: u64,

    /// Which limit ended the search, `None` before any search ran
    pub stop_reason: Option<StopReason>,

    /// The root's children, in creation order
    pub children: Vec<ChildStatistics>,

    /// The move the search picked
    pub best_move: Option<Move>,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1, // Start with root node
            max_depth: 0,
            root_visits: 0,
            stop_reason: None,
            children: Vec::new(),
            best_move: None,
        }
    }

    /// Records the state of the root's children and the chosen move
    pub fn record_root(&mut self, tree: &SearchTree, best: NodeId) {
        let root = tree.get(tree.root());
        self.tree_size = tree.len();
        self.root_visits = root.visits();
        self.best_move = tree.get(best).action;
        self.children = root
            .children
            .iter()
            .filter_map(|&id| {
                let child = tree.get(id);
                child.action.map(|action| ChildStatistics {
                    action,
                    visits: child.visits(),
                    average_reward: (child.visits() > 0).then(|| child.value()),
                    wins: child.wins(),
                })
            })
            .collect();
    }

    /// Statistics of the chosen child, if a move was chosen
    pub fn best_child(&self) -> Option<&ChildStatistics> {
        let best = self.best_move?;
        self.children.iter().find(|child| child.action == best)
    }

    /// Estimated probability (in percent) that the computer wins after the chosen move
    ///
    /// `None` when the chosen child was never visited.
    pub fn win_probability(&self) -> Option<f64> {
        self.best_child()
            .filter(|child| child.visits > 0)
            .map(|child| win_rate(child.wins, child.visits) * 100.0)
    }

    /// Returns the average time per iteration in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Returns the number of iterations per second
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        let best_move = self
            .best_move
            .map_or_else(|| "none".to_string(), |mv| mv.to_string());
        let win_probability = self
            .win_probability()
            .map_or_else(|| "none".to_string(), |p| format!("{:.2} %", p));

        format!(
            "MCTS Search Statistics:\n\
             - Iterations: {}\n\
             - Total time: {:.3} seconds\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Avg time per iteration: {:.3} µs\n\
             - Iterations per second: {:.1}\n\
             - Stop reason: {:?}\n\
             - Best move: {}\n\
             - Computer win probability: {}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.avg_time_per_iteration_us(),
            self.iterations_per_second(),
            self.stop_reason,
            best_move,
            win_probability
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
