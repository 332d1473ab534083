//! Main implementation of the Monte Carlo Tree Search algorithm
//!
//! This module contains the engine, which builds a fresh tree for every call,
//! runs the four phases of selection, expansion, simulation and backpropagation
//! until the budget runs out, and then plays the best root move.

use log::{debug, info, trace, warn};
use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::{
    board::{Board, GameOutcome, Move},
    config::{BestChildCriteria, MCTSConfig},
    policy::{
        backpropagation::StandardPolicy,
        expansion::RandomExpansionPolicy,
        selection::UCB1Policy,
        simulation::{policy_for, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{NodeId, SearchTree},
    MCTSError, Result,
};

/// Picks a child of `node` according to `criteria`
///
/// Ties go to the child created first. Returns `None` if the node has no child.
pub fn best_child(
    tree: &SearchTree,
    node: NodeId,
    criteria: BestChildCriteria,
) -> Option<NodeId> {
    let children = &tree.get(node).children;
    let (&first, rest) = children.split_first()?;

    let best = match criteria {
        // Most visits (robust choice)
        BestChildCriteria::Robust => {
            let mut best = first;
            for &id in rest {
                if tree.get(id).visits() > tree.get(best).visits() {
                    best = id;
                }
            }
            best
        }

        // Highest average reward; unvisited children count as 0
        BestChildCriteria::Max => {
            let mut best = first;
            for &id in rest {
                if tree.get(id).value() > tree.get(best).value() {
                    best = id;
                }
            }
            best
        }
    };

    Some(best)
}

/// The Monte Carlo Tree Search engine
///
/// The engine owns its configuration and its random source. Each call to
/// [`MCTS::search`] or [`MCTS::play`] builds a new tree from a copy of the given
/// board and disposes of it before returning, so nothing is shared between calls
/// except the random source and the latest statistics.
pub struct MCTS<R: RngCore = StdRng> {
    /// Configuration for the search
    config: MCTSConfig,

    /// Source of every random choice made by the search
    rng: R,

    /// Statistics gathered during the last search
    statistics: SearchStatistics,

    /// Policy for descending the tree during the selection phase
    selection_policy: UCB1Policy,

    /// Policy for choosing which move to expand
    expansion_policy: RandomExpansionPolicy,

    /// Policy for simulating games during the simulation phase
    simulation_policy: Box<dyn SimulationPolicy>,

    /// Policy for backpropagating results
    backpropagation_policy: StandardPolicy,
}

impl MCTS<StdRng> {
    /// Creates an engine whose random source is seeded from the operating system
    pub fn new(config: MCTSConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: RngCore> MCTS<R> {
    /// Creates an engine drawing its random choices from `rng`
    ///
    /// Passing a seeded generator makes searches reproducible.
    pub fn with_rng(config: MCTSConfig, rng: R) -> Self {
        let selection_policy = UCB1Policy::new(config.exploration_constant);
        let simulation_policy = policy_for(config.rollout);

        MCTS {
            config,
            rng,
            statistics: SearchStatistics::new(),
            selection_policy,
            expansion_policy: RandomExpansionPolicy::new(),
            simulation_policy,
            backpropagation_policy: StandardPolicy::new(),
        }
    }

    /// Returns the configuration
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Returns the statistics of the last search
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Searches `board` and plays the chosen move on it
    ///
    /// On error the board is left untouched.
    pub fn play(&mut self, board: &mut Board) -> Result<Move> {
        let action = self.search(board)?;
        board.apply_move(action)?;
        Ok(action)
    }

    /// Runs a search from `board` and returns the move to play
    ///
    /// Fails with [`MCTSError::NoLegalActions`] only when every column is full. A
    /// board that is already won but still has open columns is searched like any
    /// other: every iteration stops at the terminal root, and the move is picked
    /// among its unvisited children.
    pub fn search(&mut self, board: &Board) -> Result<Move> {
        // Reset statistics
        self.statistics = SearchStatistics::new();

        if board.legal_move_count() == 0 {
            return Err(MCTSError::NoLegalActions);
        }

        // Every root move gets a node before the loop starts
        let mut tree = SearchTree::new(board);
        let root = tree.root();
        for action in board.legal_moves().iter() {
            tree.add_child(root, action)?;
        }

        let budget = self.config.budget();
        if budget.is_unbounded() {
            warn!("Both the time and the iteration budget are disabled; running a single iteration");
        }
        debug!(
            "Starting search: {} root moves, budget {:?}",
            tree.get(root).children.len(),
            budget
        );

        let clock = budget.start();
        let mut iterations = 0;
        let stop_reason = loop {
            self.execute_iteration(&mut tree)?;
            iterations += 1;

            if let Some(reason) = clock.exhausted(iterations) {
                break reason;
            }
        };

        self.statistics.iterations = iterations;
        self.statistics.total_time = clock.elapsed();
        self.statistics.stop_reason = Some(stop_reason);
        debug!(
            "Search stopped after {} iterations ({:?}, {:.3}s)",
            iterations,
            stop_reason,
            self.statistics.total_time.as_secs_f64()
        );

        let best = best_child(&tree, root, self.config.best_child_criteria)
            .ok_or(MCTSError::NoLegalActions)?;
        let action = tree.get(best).action.ok_or(MCTSError::NoLegalActions)?;

        self.statistics.record_root(&tree, best);
        self.report();

        tree.dispose();
        Ok(action)
    }

    /// Execute a single iteration of the MCTS algorithm
    fn execute_iteration(&mut self, tree: &mut SearchTree) -> Result<()> {
        // 1. Selection phase
        let selected = self.selection_policy.select(tree);

        // 2. Expansion phase
        let expanded = self
            .expansion_policy
            .expand(tree, selected, &mut self.rng)?;

        let depth = tree.depth(expanded);
        self.statistics.max_depth = self.statistics.max_depth.max(depth);

        // 3. Simulation phase, on a private copy of the node's position
        let outcome = self.simulation(tree.get(expanded).state);

        // 4. Backpropagation phase
        self.backpropagation_policy
            .backpropagate(tree, expanded, outcome);

        trace!(
            "Iteration: selected {}, expanded {} at depth {}, outcome {:?}",
            selected,
            expanded,
            depth,
            outcome
        );
        Ok(())
    }

    /// Simulation phase: Play out the game from the expanded node
    fn simulation(&mut self, state: Board) -> GameOutcome {
        self.simulation_policy.simulate(state, &mut self.rng)
    }

    /// Logs the report of the last search according to the verbosity level
    fn report(&self) {
        let verbosity = self.config.verbosity;
        if verbosity == 0 {
            return;
        }

        if verbosity >= 2 {
            for child in &self.statistics.children {
                info!(
                    "Move in column {}: {} simulations",
                    child.action.column(),
                    child.visits
                );
                if verbosity >= 3 {
                    match child.average_reward {
                        Some(average) => info!("    average reward: {:.4}", average),
                        None => info!("    average reward: none"),
                    }
                }
            }
        }

        if let Some(best_move) = self.statistics.best_move {
            info!("Computer plays in column {}", best_move.column());
        }
        info!("Total simulations: {}", self.statistics.root_visits);
        match self.statistics.win_probability() {
            Some(probability) => info!("Estimated computer win probability: {:.2} %", probability),
            None => info!("Estimated computer win probability: none"),
        }
    }
}
