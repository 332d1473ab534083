//! Tree data structures for Monte Carlo Tree Search
//!
//! Nodes are stored in an arena and addressed by [`NodeId`]. Each node keeps the
//! index of its parent and the indices of its children, so the tree can be walked in
//! both directions without shared pointers. The arena lives for exactly one search
//! and is released in one go by [`SearchTree::dispose`].

use std::fmt;

use log::trace;

use crate::{
    board::{Board, Move, MoveSet, Player, WIDTH},
    MCTSError, Result,
};

/// Index of a node in a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the search tree
///
/// Each node holds the position it represents, the move that led there, and the
/// statistics gathered by the simulations that went through it.
#[derive(Debug, Clone)]
pub struct MCTSNode {
    /// The position at this node
    pub state: Board,

    /// The move that led to this position (`None` for the root)
    pub action: Option<Move>,

    /// Player who made that move (`None` for the root)
    pub player: Option<Player>,

    /// Parent node (`None` for the root)
    pub parent: Option<NodeId>,

    /// Children in creation order, at most one per column
    pub children: Vec<NodeId>,

    /// Number of simulations that went through this node
    pub visits: u64,

    /// Sum of the rewards of those simulations
    pub total_reward: f64,

    /// Number of those simulations the computer won
    pub wins: u64,
}

impl MCTSNode {
    fn new(
        state: Board,
        action: Option<Move>,
        player: Option<Player>,
        parent: Option<NodeId>,
    ) -> Self {
        MCTSNode {
            state,
            action,
            player,
            parent,
            children: Vec::with_capacity(WIDTH),
            visits: 0,
            total_reward: 0.0,
            wins: 0,
        }
    }

    /// Returns the number of visits to this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Returns the total reward accumulated at this node
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Returns the number of computer wins recorded at this node
    pub fn wins(&self) -> u64 {
        self.wins
    }

    /// Returns the average reward of this node, 0 when unvisited
    pub fn value(&self) -> f64 {
        crate::utils::average_reward(self.total_reward, self.visits)
    }

    /// Returns true if this node's position is a finished game
    pub fn is_terminal(&self) -> bool {
        self.state.outcome().is_terminal()
    }
}

/// An arena-allocated search tree
///
/// The root is always the first node of the arena.
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<MCTSNode>,
}

impl SearchTree {
    /// Creates a tree whose root holds a copy of `state`
    pub fn new(state: &Board) -> Self {
        SearchTree {
            nodes: vec![MCTSNode::new(*state, None, None, None)],
        }
    }

    /// The root node's id
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node with the given id
    ///
    /// Ids are only ever handed out by this tree, so they are always in bounds.
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.0]
    }

    /// Returns the node with the given id, mutably
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.0]
    }

    /// Total number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges between the node and the root
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).parent;
        }
        depth
    }

    /// Moves of the node's position that have no child yet
    pub fn untried_moves(&self, id: NodeId) -> MoveSet {
        let node = self.get(id);
        let mut moves = node.state.legal_moves();
        for &child in &node.children {
            if let Some(action) = self.get(child).action {
                moves.remove(action);
            }
        }
        moves
    }

    /// Returns true if every legal move of the node already has a child
    pub fn is_fully_expanded(&self, id: NodeId) -> bool {
        let node = self.get(id);
        node.children.len() == node.state.legal_move_count()
    }

    /// Creates the child reached by playing `action` from `parent`
    ///
    /// The move must be legal in the parent's position and must not have a child yet.
    pub fn add_child(&mut self, parent: NodeId, action: Move) -> Result<NodeId> {
        let parent_node = self.get(parent);
        let column = action.column();

        if parent_node.children.len() >= WIDTH {
            return Err(MCTSError::IllegalChild {
                column,
                reason: format!("node {} already has {} children", parent, WIDTH),
            });
        }
        if !self.untried_moves(parent).contains(action) {
            let reason = if parent_node.state.is_legal(action) {
                format!("node {} already has a child for it", parent)
            } else {
                format!("the move is not legal at node {}", parent)
            };
            return Err(MCTSError::IllegalChild { column, reason });
        }

        let mover = parent_node.state.player_to_move();
        let mut state = parent_node.state;
        state.apply_move(action)?;

        let id = NodeId(self.nodes.len());
        self.nodes
            .push(MCTSNode::new(state, Some(action), Some(mover), Some(parent)));
        self.get_mut(parent).children.push(id);

        trace!("Added node {} for {} under {}", id, action, parent);
        Ok(id)
    }

    /// Releases the whole tree and returns how many nodes it held
    pub fn dispose(self) -> usize {
        let released = self.nodes.len();
        trace!("Disposing search tree of {} nodes", released);
        drop(self);
        released
    }
}
