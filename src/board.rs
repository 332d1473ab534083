//! The Connect Four board model.
//!
//! The board is a fixed 6x7 grid filled under gravity. Row 0 is the top row and
//! row `HEIGHT - 1` the bottom one, so a move drops into the highest-numbered empty
//! row of its column. This module is the only place that knows the rules: the
//! search tree and the rollout policies go through [`Board::apply_move`],
//! [`Board::legal_moves`] and [`Board::outcome`].

use std::fmt;

use crate::{MCTSError, Result};

/// Number of rows on the board
pub const HEIGHT: usize = 6;

/// Number of columns on the board, which is also the maximum branching factor
pub const WIDTH: usize = 7;

/// Length of a winning run
const RUN: usize = 4;

/// Row/column steps checked from every occupied cell: horizontal, vertical, ↘, ↗.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// The two sides of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Player 0, marked `X`
    Human,
    /// Player 1, marked `O`; the side the engine plays and the one rewards are counted for
    Computer,
}

impl Player {
    /// Returns the other player
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Returns the player with the given index, if any
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Player::Human),
            1 => Some(Player::Computer),
            _ => None,
        }
    }

    /// The character used for this player's pieces
    pub fn mark(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Computer => 'O',
        }
    }
}

/// A move: the column a piece is dropped into
///
/// Creating a move never fails; legality is checked when it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    column: usize,
}

impl Move {
    /// Creates a move for the given 0-indexed column
    pub fn new(column: usize) -> Self {
        Move { column }
    }

    /// The column this move drops a piece into
    pub fn column(self) -> usize {
        self.column
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.column)
    }
}

/// A set of columns, stored as a bitmask
///
/// Iteration always yields moves in ascending column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveSet {
    bits: u16,
}

impl MoveSet {
    /// Creates an empty set
    pub fn empty() -> Self {
        MoveSet { bits: 0 }
    }

    /// Adds a move; columns outside the board are ignored
    pub fn insert(&mut self, mv: Move) {
        if mv.column < WIDTH {
            self.bits |= 1 << mv.column;
        }
    }

    /// Removes a move if present
    pub fn remove(&mut self, mv: Move) {
        if mv.column < WIDTH {
            self.bits &= !(1 << mv.column);
        }
    }

    /// Returns true if the move is in the set
    pub fn contains(&self, mv: Move) -> bool {
        mv.column < WIDTH && self.bits & (1 << mv.column) != 0
    }

    /// Number of moves in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if the set holds no move
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns the `n`-th move in ascending column order
    pub fn nth(&self, n: usize) -> Option<Move> {
        self.iter().nth(n)
    }

    /// Iterates over the moves in ascending column order
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        (0..WIDTH)
            .filter(move |&column| self.bits & (1 << column) != 0)
            .map(Move::new)
    }
}

impl FromIterator<Move> for MoveSet {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut set = MoveSet::empty();
        for mv in iter {
            set.insert(mv);
        }
        set
    }
}

/// Result of the terminal test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    /// The game goes on
    Ongoing,
    /// The board is full and nobody has four in a row
    Draw,
    /// The computer has four in a row
    ComputerWins,
    /// The human has four in a row
    HumanWins,
}

impl GameOutcome {
    /// Returns true unless the game is still going on
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::Ongoing
    }

    /// The outcome in which the given player has won
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::Human => GameOutcome::HumanWins,
            Player::Computer => GameOutcome::ComputerWins,
        }
    }
}

/// A Connect Four position: the grid plus the player to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Player>; WIDTH]; HEIGHT],
    to_move: Player,
}

impl Board {
    /// Creates an empty board with `starting_player` to move
    pub fn new(starting_player: Player) -> Self {
        Board {
            cells: [[None; WIDTH]; HEIGHT],
            to_move: starting_player,
        }
    }

    /// Builds a board from its rows, top row first
    ///
    /// Each row holds exactly `WIDTH` characters: `X` for the human, `O` for the
    /// computer and `.` (or a space) for an empty cell. Boards with a piece floating
    /// above an empty cell are rejected.
    ///
    /// ```
    /// use connect_four_uct::{Board, Player};
    ///
    /// let board = Board::from_rows(
    ///     [
    ///         ".......",
    ///         ".......",
    ///         ".......",
    ///         ".......",
    ///         "X......",
    ///         "OO.X...",
    ///     ],
    ///     Player::Computer,
    /// )
    /// .unwrap();
    /// assert_eq!(board.column_height(0), 2);
    /// ```
    pub fn from_rows(rows: [&str; HEIGHT], to_move: Player) -> Result<Self> {
        let mut board = Board::new(to_move);

        for (row, text) in rows.iter().enumerate() {
            let chars: Vec<char> = text.chars().collect();
            if chars.len() != WIDTH {
                return Err(MCTSError::InvalidBoard(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    chars.len(),
                    WIDTH
                )));
            }

            for (col, ch) in chars.into_iter().enumerate() {
                board.cells[row][col] = match ch {
                    'X' | 'x' => Some(Player::Human),
                    'O' | 'o' => Some(Player::Computer),
                    '.' | ' ' => None,
                    other => {
                        return Err(MCTSError::InvalidBoard(format!(
                            "unexpected character {:?} at row {}, column {}",
                            other, row, col
                        )))
                    }
                };
            }
        }

        for col in 0..WIDTH {
            for row in 0..HEIGHT - 1 {
                if board.cells[row][col].is_some() && board.cells[row + 1][col].is_none() {
                    return Err(MCTSError::InvalidBoard(format!(
                        "piece at row {}, column {} is floating",
                        row, col
                    )));
                }
            }
        }

        Ok(board)
    }

    /// The player whose turn it is
    pub fn player_to_move(&self) -> Player {
        self.to_move
    }

    /// The content of a cell, `None` when empty or outside the board
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Number of pieces in a column (0 for columns outside the board)
    pub fn column_height(&self, col: usize) -> usize {
        if col >= WIDTH {
            return 0;
        }
        (0..HEIGHT)
            .filter(|&row| self.cells[row][col].is_some())
            .count()
    }

    /// Returns true if the move can be played: in range and its column not full
    pub fn is_legal(&self, mv: Move) -> bool {
        mv.column < WIDTH && self.cells[0][mv.column].is_none()
    }

    /// Drops the current player's piece into the move's column and passes the turn
    ///
    /// Fails, leaving the board untouched, if the column is out of range or full.
    pub fn apply_move(&mut self, mv: Move) -> Result<()> {
        let column = mv.column;
        if column >= WIDTH {
            return Err(MCTSError::ColumnOutOfRange(column));
        }

        let row = (0..HEIGHT)
            .rev()
            .find(|&row| self.cells[row][column].is_none())
            .ok_or(MCTSError::ColumnFull(column))?;

        self.cells[row][column] = Some(self.to_move);
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Columns whose top cell is empty
    pub fn legal_moves(&self) -> MoveSet {
        (0..WIDTH)
            .filter(|&col| self.cells[0][col].is_none())
            .map(Move::new)
            .collect()
    }

    /// Number of legal moves, without building the set
    pub fn legal_move_count(&self) -> usize {
        self.cells[0].iter().filter(|cell| cell.is_none()).count()
    }

    /// Terminal test: a win for either side, a draw, or an ongoing game
    ///
    /// Every occupied cell is checked for a run of four starting there in each of
    /// the four directions, which is linear in the board size.
    pub fn outcome(&self) -> GameOutcome {
        let mut occupied = 0;

        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                let Some(player) = self.cells[row][col] else {
                    continue;
                };
                occupied += 1;

                for &(d_row, d_col) in &DIRECTIONS {
                    if self.run_length(row, col, d_row, d_col, player) >= RUN {
                        return GameOutcome::win_for(player);
                    }
                }
            }
        }

        if occupied == HEIGHT * WIDTH {
            GameOutcome::Draw
        } else {
            GameOutcome::Ongoing
        }
    }

    /// Counts up to `RUN` consecutive pieces of `player` from (row, col) along a direction
    fn run_length(
        &self,
        row: usize,
        col: usize,
        d_row: isize,
        d_col: isize,
        player: Player,
    ) -> usize {
        let mut length = 0;
        let (mut r, mut c) = (row as isize, col as isize);

        while length < RUN
            && (0..HEIGHT as isize).contains(&r)
            && (0..WIDTH as isize).contains(&c)
            && self.cells[r as usize][c as usize] == Some(player)
        {
            length += 1;
            r += d_row;
            c += d_col;
        }

        length
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(Player::Human)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Column numbers
        write!(f, " ")?;
        for col in 0..WIDTH {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;

        for row in 0..HEIGHT {
            write!(f, "|")?;
            for col in 0..WIDTH {
                let symbol = self.cells[row][col].map_or(' ', Player::mark);
                write!(f, "{}|", symbol)?;
            }
            writeln!(f)?;
        }

        write!(f, "+")?;
        for _ in 0..WIDTH {
            write!(f, "-+")?;
        }
        writeln!(f)
    }
}
