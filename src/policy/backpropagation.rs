//! Backpropagation policy for the MCTS algorithm
//!
//! After a simulation, its outcome is added to every node on the path from the node
//! the simulation started from back up to the root.

use crate::{
    board::GameOutcome,
    tree::{MCTSNode, NodeId, SearchTree},
};

/// Reward for a simulation the computer won
pub const REWARD_COMPUTER_WIN: f64 = 1.0;

/// Reward for a drawn simulation
pub const REWARD_DRAW: f64 = 0.5;

/// Reward for a simulation the human won
pub const REWARD_HUMAN_WIN: f64 = 0.0;

/// Standard backpropagation policy
///
/// Each node on the path gets one more visit and the outcome's reward, counted from
/// the computer's point of view. Computer wins are also tallied separately for the
/// search report.
#[derive(Debug, Clone)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }

    /// Reward of a terminal outcome; an ongoing game is worth nothing
    pub fn reward(outcome: GameOutcome) -> f64 {
        match outcome {
            GameOutcome::ComputerWins => REWARD_COMPUTER_WIN,
            GameOutcome::Draw => REWARD_DRAW,
            GameOutcome::HumanWins | GameOutcome::Ongoing => REWARD_HUMAN_WIN,
        }
    }

    /// Updates one node's statistics with an outcome
    pub fn update_stats(&self, node: &mut MCTSNode, outcome: GameOutcome) {
        node.visits += 1;
        node.total_reward += Self::reward(outcome);
        if outcome == GameOutcome::ComputerWins {
            node.wins += 1;
        }
    }

    /// Updates `from` and each of its ancestors once, up to and including the root
    ///
    /// Returns the number of nodes updated.
    pub fn backpropagate(
        &self,
        tree: &mut SearchTree,
        from: NodeId,
        outcome: GameOutcome,
    ) -> usize {
        let mut updated = 0;
        let mut current = Some(from);

        while let Some(id) = current {
            let node = tree.get_mut(id);
            self.update_stats(node, outcome);
            updated += 1;
            current = node.parent;
        }

        updated
    }
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self::new()
    }
}
