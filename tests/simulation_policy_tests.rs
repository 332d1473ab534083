use connect_four_uct::{
    policy::{simulation::policy_for, RandomPolicy, SimulationPolicy, WinSeekingPolicy},
    Board, GameOutcome, Move, Player, RolloutMode,
};
use rand::{rngs::StdRng, SeedableRng};

/// Computer to move, with three in a row on the bottom and column 3 open
fn computer_threat() -> Board {
    Board::from_rows(
        [
            ".......",
            ".......",
            ".......",
            ".......",
            "XXX....",
            "OOO....",
        ],
        Player::Computer,
    )
    .unwrap()
}

#[test]
fn test_random_rollouts_reach_the_end() {
    let policy = RandomPolicy::new();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..200 {
        let outcome = policy.simulate(Board::new(Player::Human), &mut rng);
        assert!(outcome.is_terminal());
    }
}

#[test]
fn test_rollout_does_not_touch_callers_board() {
    let board = computer_threat();
    let policy = RandomPolicy::new();
    let mut rng = StdRng::seed_from_u64(11);

    policy.simulate(board, &mut rng);

    assert_eq!(board, computer_threat());
}

#[test]
fn test_terminal_state_returns_its_outcome() {
    let mut board = computer_threat();
    board.apply_move(Move::new(3)).unwrap();

    let mut rng = StdRng::seed_from_u64(11);
    assert_eq!(RandomPolicy::new().simulate(board, &mut rng), GameOutcome::ComputerWins);
    assert_eq!(WinSeekingPolicy::new().simulate(board, &mut rng), GameOutcome::ComputerWins);
}

#[test]
fn test_win_seeking_finds_the_winning_move() {
    let board = computer_threat();

    assert_eq!(
        WinSeekingPolicy::winning_move(&board, board.legal_moves()),
        Some(Move::new(3))
    );

    let policy = WinSeekingPolicy::new();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        assert_eq!(
            policy.choose_move(&board, board.legal_moves(), &mut rng),
            Move::new(3)
        );
        assert_eq!(policy.simulate(board, &mut rng), GameOutcome::ComputerWins);
    }
}

#[test]
fn test_win_seeking_ignores_human_wins() {
    // The human to move could win in column 3, but the policy only looks for computer wins
    let board = Board::from_rows(
        [
            ".......",
            ".......",
            ".......",
            ".......",
            "OOO....",
            "XXX....",
        ],
        Player::Human,
    )
    .unwrap();

    assert_eq!(WinSeekingPolicy::winning_move(&board, board.legal_moves()), None);
}

#[test]
fn test_random_policy_plays_legal_moves() {
    let board = computer_threat();
    let legal = board.legal_moves();
    let policy = RandomPolicy::new();
    let mut rng = StdRng::seed_from_u64(9);

    let mut seen = [false; connect_four_uct::WIDTH];
    for _ in 0..500 {
        let action = policy.choose_move(&board, legal, &mut rng);
        assert!(legal.contains(action));
        seen[action.column()] = true;
    }
    assert!(seen.iter().all(|&s| s), "Every column should come up eventually");
}

#[test]
fn test_rollouts_are_reproducible_with_a_seed() {
    let policy = policy_for(RolloutMode::Random);

    let run = |seed: u64| -> Vec<GameOutcome> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..20)
            .map(|_| policy.simulate(Board::new(Player::Human), &mut rng))
            .collect()
    };

    assert_eq!(run(17), run(17));
}
