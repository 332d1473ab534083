use std::sync::Mutex;

use connect_four_uct::{
    Board, ChildStatistics, MCTSConfig, Move, Player, SearchStatistics, SearchTree, MCTS, WIDTH,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use rand::{rngs::StdRng, SeedableRng};

/// Keeps the engine's info-level messages
struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() == Level::Info && metadata.target().starts_with("connect_four_uct")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push(record.args().to_string());
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};

// The logger is global, so searches that read it run one at a time
static SERIAL: Mutex<()> = Mutex::new(());

/// Runs one search and returns the move, the statistics and the logged report
fn search_with_report(
    board: &Board,
    verbosity: u8,
    iterations: usize,
) -> (Move, SearchStatistics, Vec<String>) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Info);
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    LOGGER.lines.lock().unwrap().clear();

    let config = MCTSConfig::default()
        .without_time_limit()
        .with_max_iterations(iterations)
        .with_verbosity(verbosity);
    let mut mcts = MCTS::with_rng(config, StdRng::seed_from_u64(21));
    let action = mcts.search(board).unwrap();

    let lines = std::mem::take(&mut *LOGGER.lines.lock().unwrap());
    (action, mcts.get_statistics().clone(), lines)
}

fn visits_line(child: &ChildStatistics) -> String {
    format!(
        "Move in column {}: {} simulations",
        child.action.column(),
        child.visits
    )
}

#[test]
fn test_verbosity_zero_logs_nothing() {
    let (_, _, lines) = search_with_report(&Board::new(Player::Computer), 0, 100);
    assert!(lines.is_empty(), "Unexpected report: {:?}", lines);
}

#[test]
fn test_verbosity_one_reports_move_simulations_and_win_probability() {
    let (action, stats, lines) = search_with_report(&Board::new(Player::Computer), 1, 200);

    let probability = stats.win_probability().unwrap();
    assert_eq!(
        lines,
        vec![
            format!("Computer plays in column {}", action.column()),
            "Total simulations: 200".to_string(),
            format!("Estimated computer win probability: {:.2} %", probability),
        ]
    );
}

#[test]
fn test_verbosity_two_adds_visits_per_root_move() {
    let (_, stats, lines) = search_with_report(&Board::new(Player::Computer), 2, 200);

    assert_eq!(stats.children.len(), WIDTH);
    assert_eq!(lines.len(), WIDTH + 3);
    for (line, child) in lines.iter().zip(&stats.children) {
        assert_eq!(*line, visits_line(child));
    }
    assert!(lines.iter().all(|line| !line.contains("average reward")));
}

#[test]
fn test_verbosity_three_adds_average_rewards() {
    let (_, stats, lines) = search_with_report(&Board::new(Player::Computer), 3, 200);

    assert_eq!(lines.len(), 2 * WIDTH + 3);
    for (pair, child) in lines.chunks(2).zip(&stats.children) {
        let average = child.average_reward.unwrap();
        assert_eq!(pair[0], visits_line(child));
        assert_eq!(pair[1], format!("    average reward: {:.4}", average));
    }
}

#[test]
fn test_unvisited_moves_are_reported_as_none() {
    // Already won, so no iteration gets past the root
    let board = Board::from_rows(
        [
            ".......",
            ".......",
            ".......",
            ".......",
            "XXX....",
            "OOOO...",
        ],
        Player::Human,
    )
    .unwrap();

    let (action, _, lines) = search_with_report(&board, 3, 20);

    let averages: Vec<&String> = lines
        .iter()
        .filter(|line| line.contains("average reward"))
        .collect();
    assert_eq!(averages.len(), WIDTH);
    assert!(averages.iter().all(|line| *line == "    average reward: none"));

    assert_eq!(
        lines[lines.len() - 3..],
        [
            format!("Computer plays in column {}", action.column()),
            "Total simulations: 20".to_string(),
            "Estimated computer win probability: none".to_string(),
        ]
    );
}

#[test]
fn test_record_root_reads_child_statistics() {
    let mut tree = SearchTree::new(&Board::new(Player::Computer));
    let root = tree.root();
    tree.get_mut(root).visits = 4;

    let visited = tree.add_child(root, Move::new(2)).unwrap();
    let unvisited = tree.add_child(root, Move::new(5)).unwrap();
    {
        let node = tree.get_mut(visited);
        node.visits = 4;
        node.total_reward = 3.0;
        node.wins = 3;
    }

    let mut stats = SearchStatistics::new();
    stats.record_root(&tree, visited);

    assert_eq!(stats.tree_size, 3);
    assert_eq!(stats.root_visits, 4);
    assert_eq!(stats.best_move, Some(Move::new(2)));
    assert_eq!(
        stats.children,
        vec![
            ChildStatistics {
                action: Move::new(2),
                visits: 4,
                average_reward: Some(0.75),
                wins: 3,
            },
            ChildStatistics {
                action: Move::new(5),
                visits: 0,
                average_reward: None,
                wins: 0,
            },
        ]
    );
    assert_eq!(stats.win_probability(), Some(75.0));

    // Choosing the unvisited child leaves nothing to estimate from
    stats.record_root(&tree, unvisited);
    assert_eq!(stats.best_move, Some(Move::new(5)));
    assert_eq!(stats.win_probability(), None);
}
