//! # connect-four-uct
//!
//! A Connect Four engine that picks its moves with Monte Carlo Tree Search (MCTS) under the
//! Upper Confidence Bound for Trees (UCT) policy.
//!
//! The crate is organised around the classic four phases of MCTS:
//!
//! 1. **Selection**: starting from the root, descend through fully expanded nodes by
//!    picking the child with the best UCB1 score.
//! 2. **Expansion**: add one untried move of the selected node as a new child.
//! 3. **Simulation**: play the game out from the new child, either uniformly at random or
//!    by taking an immediate computer win whenever one exists.
//! 4. **Backpropagation**: walk back to the root, adding the outcome to every node on the way.
//!
//! Once the search budget (time and/or iterations) is exhausted, the engine plays the root
//! child picked by the configured [`BestChildCriteria`](config::BestChildCriteria) and
//! discards the tree.
//!
//! ## Basic Usage
//!
//! ```
//! use connect_four_uct::{Board, MCTSConfig, Player, MCTS};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! fn main() -> Result<(), connect_four_uct::MCTSError> {
//!     let mut board = Board::new(Player::Computer);
//!
//!     let config = MCTSConfig::default()
//!         .without_time_limit()
//!         .with_iteration_budget(200)
//!         .with_verbosity(0);
//!
//!     let mut mcts = MCTS::with_rng(config, StdRng::seed_from_u64(7));
//!     let played = mcts.play(&mut board)?;
//!
//!     assert_eq!(board.column_height(played.column()), 1);
//!     assert_eq!(board.player_to_move(), Player::Human);
//!     println!("{}", mcts.get_statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Playing a game
//!
//! An interactive game against the engine ships as a cargo example:
//!
//! ```bash
//! cargo run --example connect_four
//! ```

pub mod board;
pub mod budget;
pub mod config;
pub mod mcts;
pub mod policy;
pub mod stats;
pub mod tree;
pub mod utils;

pub use board::{Board, GameOutcome, Move, MoveSet, Player, HEIGHT, WIDTH};
pub use budget::{SearchBudget, StopReason};
pub use config::{BestChildCriteria, MCTSConfig, RolloutMode};
pub use mcts::MCTS;
pub use policy::{SimulationPolicy, UCB1Policy};
pub use stats::{ChildStatistics, SearchStatistics};
pub use tree::{MCTSNode, NodeId, SearchTree};

/// Error types for the engine and the board model
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MCTSError {
    /// The column lies outside the board
    #[error("Column {0} is out of range (expected < {})", WIDTH)]
    ColumnOutOfRange(usize),

    /// The column has no empty cell left
    #[error("Column {0} is full")]
    ColumnFull(usize),

    /// A board description could not be turned into a valid board
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// No legal actions are available from the current state
    #[error("No legal actions available from current state")]
    NoLegalActions,

    /// A child was requested for a move the parent cannot take
    #[error("Cannot add a child for column {column}: {reason}")]
    IllegalChild {
        /// Column of the rejected move
        column: usize,
        /// Why the move was rejected
        reason: String,
    },
}

/// Result type for engine and board operations
pub type Result<T> = std::result::Result<T, MCTSError>;
