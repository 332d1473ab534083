//! Policies for the different phases of the MCTS algorithm
//!
//! - Selection: how to walk down the tree (UCB1)
//! - Expansion: which untried move becomes a new node
//! - Simulation: how games are played out from a node
//! - Backpropagation: how node statistics are updated

pub mod backpropagation;
pub mod expansion;
pub mod selection;
pub mod simulation;

pub use backpropagation::StandardPolicy;
pub use expansion::RandomExpansionPolicy;
pub use selection::UCB1Policy;
pub use simulation::{RandomPolicy, SimulationPolicy, WinSeekingPolicy};
