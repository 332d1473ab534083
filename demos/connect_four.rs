//! Connect Four against the engine
//!
//! The human plays `X`, the computer plays `O`. The engine runs with the default
//! configuration: a 5 second budget, robust move selection and win-seeking rollouts.
//! Set `RUST_LOG=debug` for details about each search.

use std::io::{self, BufRead, Write};

use connect_four_uct::{Board, GameOutcome, MCTSConfig, Move, Player, MCTS, WIDTH};

fn main() -> io::Result<()> {
    // Initialize logging; the engine's report is logged at info level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    println!("MCTS Connect Four");
    println!("=================");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let starting_player = loop {
        print!("Who starts (0: human, 1: computer)? ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        match line?.trim().parse::<usize>().ok().and_then(Player::from_index) {
            Some(player) => break player,
            None => println!("Please answer 0 or 1."),
        }
    };

    let mut board = Board::new(starting_player);
    let mut mcts = MCTS::new(MCTSConfig::default());

    // Main game loop
    while !board.outcome().is_terminal() {
        println!();
        println!("{}", board);

        match board.player_to_move() {
            Player::Human => {
                print!("Which column (0-{})? ", WIDTH - 1);
                io::stdout().flush()?;

                let Some(line) = lines.next() else {
                    return Ok(());
                };
                let column = match line?.trim().parse::<usize>() {
                    Ok(column) => column,
                    Err(_) => {
                        println!("Please enter a column number.");
                        continue;
                    }
                };

                if let Err(e) = board.apply_move(Move::new(column)) {
                    println!("{}. Choose another column.", e);
                }
            }
            Player::Computer => {
                println!("Computer is thinking...");

                if let Err(e) = mcts.play(&mut board) {
                    println!("Error: {}", e);
                    break;
                }
            }
        }
    }

    // Display final state
    println!();
    println!("{}", board);

    match board.outcome() {
        GameOutcome::ComputerWins => println!("** The computer wins **"),
        GameOutcome::HumanWins => println!("** Well done, the computer lost **"),
        GameOutcome::Draw => println!("Draw!"),
        GameOutcome::Ongoing => {}
    }

    Ok(())
}
