//! Simulation policies for the MCTS algorithm
//!
//! A simulation (rollout) plays a game from a given position to its end and
//! reports the outcome. Policies only decide which move to play at each step.

use rand::{seq::IteratorRandom, RngCore};

use crate::{
    board::{Board, GameOutcome, Move, MoveSet},
    config::RolloutMode,
};

/// Trait for policies that play out games
pub trait SimulationPolicy: Send + Sync {
    /// Chooses the next move among `legal`, which is never empty
    fn choose_move(&self, state: &Board, legal: MoveSet, rng: &mut dyn RngCore) -> Move;

    /// Plays the game out from `state` and returns its terminal outcome
    ///
    /// `state` is the rollout's private copy: it is consumed and never written back
    /// into the tree.
    fn simulate(&self, mut state: Board, rng: &mut dyn RngCore) -> GameOutcome {
        loop {
            let outcome = state.outcome();
            if outcome.is_terminal() {
                return outcome;
            }

            let legal = state.legal_moves();
            if legal.is_empty() {
                // Unreachable for boards built through `apply_move`: a full board is a draw.
                return GameOutcome::Draw;
            }

            let action = self.choose_move(&state, legal, rng);
            if state.apply_move(action).is_err() {
                return GameOutcome::Draw;
            }
        }
    }
}

/// Random simulation policy
///
/// This policy plays random legal moves until the game ends.
#[derive(Debug, Clone)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationPolicy for RandomPolicy {
    fn choose_move(&self, _state: &Board, legal: MoveSet, rng: &mut dyn RngCore) -> Move {
        random_move(legal, rng)
    }
}

/// Win-seeking simulation policy
///
/// Plays a move that wins the game for the computer on the spot if there is one,
/// and a random move otherwise. The look-ahead is a single ply and only ever looks
/// for computer wins: it does not block the human's threats.
#[derive(Debug, Clone)]
pub struct WinSeekingPolicy;

impl WinSeekingPolicy {
    /// Creates a new win-seeking policy
    pub fn new() -> Self {
        WinSeekingPolicy
    }

    /// The first legal move that immediately wins for the computer, if any
    pub fn winning_move(state: &Board, legal: MoveSet) -> Option<Move> {
        legal.iter().find(|&action| {
            let mut trial = *state;
            trial.apply_move(action).is_ok() && trial.outcome() == GameOutcome::ComputerWins
        })
    }
}

impl Default for WinSeekingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationPolicy for WinSeekingPolicy {
    fn choose_move(&self, state: &Board, legal: MoveSet, rng: &mut dyn RngCore) -> Move {
        Self::winning_move(state, legal).unwrap_or_else(|| random_move(legal, rng))
    }
}

/// Returns the simulation policy matching a rollout mode
pub fn policy_for(mode: RolloutMode) -> Box<dyn SimulationPolicy> {
    match mode {
        RolloutMode::Random => Box::new(RandomPolicy::new()),
        RolloutMode::WinSeeking => Box::new(WinSeekingPolicy::new()),
    }
}

fn random_move(legal: MoveSet, rng: &mut dyn RngCore) -> Move {
    legal.iter().choose(rng).unwrap_or_else(|| Move::new(0))
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl SimulationPolicy for Box<dyn SimulationPolicy> {
    fn choose_move(&self, state: &Board, legal: MoveSet, rng: &mut dyn RngCore) -> Move {
        (**self).choose_move(state, legal, rng)
    }

    fn simulate(&self, state: Board, rng: &mut dyn RngCore) -> GameOutcome {
        (**self).simulate(state, rng)
    }
}
