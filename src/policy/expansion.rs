//! Expansion policy: which untried move becomes the next child.

use log::trace;
use rand::{prelude::IteratorRandom, RngCore};

use crate::{
    tree::{NodeId, SearchTree},
    Result,
};

/// Random expansion policy
///
/// Picks uniformly at random among the moves of a node that have no child yet.
#[derive(Debug, Clone)]
pub struct RandomExpansionPolicy;

impl RandomExpansionPolicy {
    /// Creates a new random expansion policy
    pub fn new() -> Self {
        RandomExpansionPolicy
    }

    /// Adds one new child to `node` and returns it
    ///
    /// A terminal node is returned unchanged. A non-terminal node with untried moves
    /// always gains a child.
    pub fn expand(
        &self,
        tree: &mut SearchTree,
        node: NodeId,
        rng: &mut dyn RngCore,
    ) -> Result<NodeId> {
        if tree.get(node).is_terminal() {
            return Ok(node);
        }

        let untried = tree.untried_moves(node);
        let Some(action) = untried.iter().choose(rng) else {
            // Fully expanded nodes are never handed to expansion by the selection phase.
            trace!("Node {} has no untried move left", node);
            return Ok(node);
        };

        tree.add_child(node, action)
    }
}

impl Default for RandomExpansionPolicy {
    fn default() -> Self {
        Self::new()
    }
}
