//! Selection policy for the MCTS algorithm
//!
//! The selection phase walks down from the root through fully expanded nodes,
//! following at each level the child with the best UCB1 score, until it reaches a
//! terminal node or one that still has an untried move.

use crate::{
    board::Player,
    tree::{MCTSNode, NodeId, SearchTree},
    utils::{average_reward, exploration_term},
};

/// Upper Confidence Bound 1 (UCB1) selection policy
///
/// Children are scored with:
///
/// ```text
/// UCB1 = ± average_reward + C * sqrt(ln(parent_visits) / child_visits)
/// ```
///
/// Rewards are always counted from the computer's point of view. The average is
/// negated for children reached by a human move (the parent is a "min" node), so
/// each side picks the child that is best for itself. A child that has never been
/// visited is picked as soon as it is found, before any score is compared.
#[derive(Debug, Clone)]
pub struct UCB1Policy {
    /// Exploration constant that controls the balance between exploration and exploitation.
    /// Higher values favor exploration of less-visited nodes.
    pub exploration_constant: f64,
}

impl UCB1Policy {
    /// Creates a new UCB1 policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCB1Policy {
            exploration_constant,
        }
    }

    /// Calculates the UCB1 value of a visited child
    ///
    /// Returns infinity for an unvisited child, although [`UCB1Policy::select_child`]
    /// never compares those.
    pub fn ucb1_value(&self, child: &MCTSNode, parent_visits: u64) -> f64 {
        if child.visits() == 0 {
            return f64::INFINITY;
        }

        let mut exploitation = average_reward(child.total_reward(), child.visits());
        if child.player == Some(Player::Human) {
            exploitation = -exploitation;
        }

        exploitation + exploration_term(parent_visits, child.visits(), self.exploration_constant)
    }

    /// Picks the child of `node` with the highest UCB1 value
    ///
    /// The first unvisited child wins outright. Among visited children ties go to
    /// the one created first. Returns `None` for a leaf.
    pub fn select_child(&self, tree: &SearchTree, node: NodeId) -> Option<NodeId> {
        let parent = tree.get(node);
        let parent_visits = parent.visits();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &parent.children {
            let child = tree.get(child_id);
            if child.visits() == 0 {
                return Some(child_id);
            }

            let value = self.ucb1_value(child, parent_visits);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((child_id, value)),
            }
        }

        best.map(|(id, _)| id)
    }

    /// Descends from the root and returns the node to expand
    ///
    /// Stops at the first node that is terminal or not fully expanded.
    pub fn select(&self, tree: &SearchTree) -> NodeId {
        let mut current = tree.root();

        while !tree.get(current).is_terminal() && tree.is_fully_expanded(current) {
            match self.select_child(tree, current) {
                Some(child) => current = child,
                None => break,
            }
        }

        current
    }
}

impl Default for UCB1Policy {
    fn default() -> Self {
        Self::new(1.4142)
    }
}
