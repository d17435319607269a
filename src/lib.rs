//! A depth-bounded minimax agent for gravity-drop four-in-a-row
//!
//! This agent searches the game tree to a configurable depth, scoring
//! positions with a windowed pattern heuristic, and can run with or
//! without alpha-beta pruning. Both modes always pick the same move;
//! pruning only reduces the number of nodes visited.
//!
//! # Basic Usage
//!
//! ```
//! use dropfour_ai::board::{Board, Player};
//! use dropfour_ai::search::{SearchConfig, Searcher};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // Yellow holds the bottom of columns 0-2 and moves next
//! let mut board = Board::from_moves("5051626")?;
//! let mut searcher = Searcher::new(SearchConfig::default());
//! let result = searcher.choose_move(&mut board, Player::Yellow)?;
//!
//! assert_eq!(result.best_move.column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod evaluator;

pub mod search;

pub mod session;

mod test;

pub use board::{Board, Cell, Move, MoveError, Player};
pub use evaluator::evaluate;
pub use search::{Algorithm, ConfigError, SearchConfig, SearchError, SearchResult, Searcher};
pub use session::{GameSession, SessionError, SessionEvent};

/// The width of the game board in columns
pub const WIDTH: usize = 8;

/// The height of the game board in rows
pub const HEIGHT: usize = 7;

// ensure that a line of four fits on the board in every direction
const_assert!(WIDTH >= 4 && HEIGHT >= 4);
// moves are written as single decimal digits
const_assert!(WIDTH <= 10);
