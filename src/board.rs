use std::fmt;

use anyhow::{anyhow, Result};
use thiserror::Error;

use crate::{HEIGHT, WIDTH};

// directions a line can run in, as (row, column) steps:
// down, right, down-right, down-left
pub(crate) const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }
}

/// One of the two sides. Red is the human, minimizing side and always moves
/// first; Yellow is the engine, maximizing side.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    /// The opposing player
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// The cell value this player's pieces occupy
    pub fn cell(self) -> Cell {
        match self {
            Player::Red => Cell::Red,
            Player::Yellow => Cell::Yellow,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Yellow => "Yellow",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A resolved move: the column a piece is dropped in and the row it lands on
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub row: usize,
    pub column: usize,
}

/// A rejected column request. The board is left untouched; callers are
/// expected to discard the attempt and ask for another.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum MoveError {
    #[error("column {0} is out of range, columns run 0 to {max}", max = WIDTH - 1)]
    OutOfRange(usize),
    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// The playing grid: `HEIGHT` rows of `WIDTH` columns, row 0 at the top.
///
/// Within a column, occupied cells always form a contiguous run up from the
/// bottom row. The invariant holds because pieces enter the board only at
/// the row `drop_row` picks, the lowest empty cell of the column.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [Cell; WIDTH * HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
        }
    }

    /// Builds a position from a string of 0-indexed column digits, dropping
    /// pieces alternately with Red first
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut player = Player::Red;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column < WIDTH => {
                    let row = board
                        .drop_row(column)
                        .ok_or_else(|| anyhow!("Invalid move, column {} full", column))?;
                    board.place(row, column, player);
                    player = player.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    fn index(row: usize, column: usize) -> usize {
        row * WIDTH + column
    }

    /// The cell at (row, column)
    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[Self::index(row, column)]
    }

    // the cell at a coordinate that may lie off the board
    pub(crate) fn cell_at(&self, row: i32, column: i32) -> Option<Cell> {
        if row < 0 || row >= HEIGHT as i32 || column < 0 || column >= WIDTH as i32 {
            None
        } else {
            Some(self.get(row as usize, column as usize))
        }
    }

    /// The row a piece dropped in `column` would land on: the lowest empty
    /// cell. `None` means the column cannot be played, because it is full
    /// or out of range.
    pub fn drop_row(&self, column: usize) -> Option<usize> {
        if column >= WIDTH {
            return None;
        }
        (0..HEIGHT)
            .rev()
            .find(|&row| self.get(row, column).is_empty())
    }

    /// Sets the cell at (row, column) to `player`'s piece. The caller must
    /// have validated the location with `drop_row`.
    pub fn place(&mut self, row: usize, column: usize, player: Player) {
        self.cells[Self::index(row, column)] = player.cell();
    }

    /// Returns the cell at (row, column) to empty, undoing a `place`
    pub fn clear(&mut self, row: usize, column: usize) {
        self.cells[Self::index(row, column)] = Cell::Empty;
    }

    /// True when no column can accept another piece
    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|column| !self.get(0, column).is_empty())
    }

    /// True when `player` holds four consecutive cells in any direction
    pub fn has_line(&self, player: Player) -> bool {
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                if self.get(row, column) == player.cell() {
                    for &(row_step, column_step) in DIRECTIONS.iter() {
                        if self.check_direction(row, column, row_step, column_step, player) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    fn check_direction(
        &self,
        row: usize,
        column: usize,
        row_step: i32,
        column_step: i32,
        player: Player,
    ) -> bool {
        for i in 0..4 {
            let r = row as i32 + i * row_step;
            let c = column as i32 + i * column_step;
            if self.cell_at(r, c) != Some(player.cell()) {
                return false;
            }
        }
        true
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
