//! Depth-bounded game tree search

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Board, Move, Player};
use crate::evaluator::evaluate;
use crate::{HEIGHT, WIDTH};

/// A score bound the static evaluation can never reach: every cell scoring
/// its window maximum in all four directions still falls one short
pub const INF: i32 = (WIDTH * HEIGHT * 4 * 1000 + 1) as i32;

/// The score of a position with no playable column and no line on it
pub const DRAW_SCORE: i32 = 0;

/// Tree walk strategy
///
/// Both strategies back the same value up to the root and therefore pick
/// the same move; `AlphaBeta` just proves it while visiting fewer nodes.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Algorithm {
    /// Plain minimax, visiting every node down to the depth limit
    Minimax,
    /// Minimax with alpha-beta pruning
    AlphaBeta,
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimax" => Ok(Algorithm::Minimax),
            "alphabeta" => Ok(Algorithm::AlphaBeta),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "minimax"),
            Algorithm::AlphaBeta => write!(f, "alphabeta"),
        }
    }
}

/// A rejected search parameter
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum ConfigError {
    #[error("search depth must be at least 1 ply")]
    ZeroPly,
    #[error("unknown algorithm '{0}', expected 'minimax' or 'alphabeta'")]
    UnknownAlgorithm(String),
}

/// Search parameters, validated at construction so a `Searcher` never has
/// to second-guess them
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchConfig {
    ply: usize,
    algorithm: Algorithm,
}

impl SearchConfig {
    /// The lookahead depth used by `Default`
    pub const DEFAULT_PLY: usize = 4;

    pub fn new(ply: usize, algorithm: Algorithm) -> Result<Self, ConfigError> {
        if ply == 0 {
            return Err(ConfigError::ZeroPly);
        }
        Ok(Self { ply, algorithm })
    }

    /// Lookahead depth in plies
    pub fn ply(&self) -> usize {
        self.ply
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Changes the lookahead depth, rejecting zero
    pub fn set_ply(&mut self, ply: usize) -> Result<(), ConfigError> {
        if ply == 0 {
            return Err(ConfigError::ZeroPly);
        }
        self.ply = ply;
        Ok(())
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ply: Self::DEFAULT_PLY,
            algorithm: Algorithm::AlphaBeta,
        }
    }
}

/// A search that could not produce a move
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum SearchError {
    #[error("no legal move, every column is full")]
    NoLegalMove,
}

/// The outcome of a root search
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    /// The chosen move
    pub best_move: Move,
    /// The value backed up to the chosen move, positive favoring Yellow
    pub score: i32,
    /// Positions visited beneath the root
    pub nodes: usize,
}

/// An agent that picks moves by depth-bounded minimax
///
/// # Notes
/// The searcher explores a position by placing and retracting pieces on the
/// caller's board, so probing costs no allocation; every probe is undone
/// before the search returns.
///
/// # Position Scoring
/// Leaves are scored by [`evaluate`], so the search maximizes pattern
/// pressure for Yellow and minimizes it for Red rather than proving wins.
/// A position someone has already won on is a leaf no matter how much
/// depth remains, scored where it stands; a full board with no line is a
/// leaf worth [`DRAW_SCORE`].
pub struct Searcher {
    config: SearchConfig,

    /// The number of nodes visited by the last search (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a new `Searcher` with the given parameters
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            node_count: 0,
        }
    }

    /// Searches the position and picks the strongest column for `to_move`.
    ///
    /// Columns are tried left to right and a later column must score
    /// strictly better to displace an earlier one, so ties resolve to the
    /// leftmost candidate. Returns an error only when every column is
    /// full.
    pub fn choose_move(
        &mut self,
        board: &mut Board,
        to_move: Player,
    ) -> Result<SearchResult, SearchError> {
        self.node_count = 0;

        let maximizing = to_move == Player::Yellow;
        let mut alpha = -INF;
        let mut beta = INF;
        let mut best_score = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for column in 0..WIDTH {
            let row = match board.drop_row(column) {
                Some(row) => row,
                None => continue,
            };

            board.place(row, column, to_move);
            let score = self.score_at(board, self.config.ply() - 1, !maximizing, alpha, beta);
            board.clear(row, column);

            let improved = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improved {
                best_score = score;
                best_move = Some(Move { row, column });
            }

            if self.config.algorithm() == Algorithm::AlphaBeta {
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
                if beta <= alpha {
                    break;
                }
            }
        }

        match best_move {
            Some(best_move) => Ok(SearchResult {
                best_move,
                score: best_score,
                nodes: self.node_count,
            }),
            None => Err(SearchError::NoLegalMove),
        }
    }

    // the value of the position searched `depth` plies deeper, with Yellow
    // to move when `maximizing`
    fn score_at(
        &mut self,
        board: &mut Board,
        depth: usize,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.node_count += 1;

        // decided and exhausted positions are scored where they stand
        if depth == 0 || board.has_line(Player::Yellow) || board.has_line(Player::Red) {
            return evaluate(board);
        }
        if board.is_full() {
            return DRAW_SCORE;
        }

        let player = if maximizing {
            Player::Yellow
        } else {
            Player::Red
        };
        let mut best = if maximizing { -INF } else { INF };

        for column in 0..WIDTH {
            let row = match board.drop_row(column) {
                Some(row) => row,
                None => continue,
            };

            board.place(row, column, player);
            let score = self.score_at(board, depth - 1, !maximizing, alpha, beta);
            board.clear(row, column);

            if maximizing {
                if score > best {
                    best = score;
                }
            } else if score < best {
                best = score;
            }

            if self.config.algorithm() == Algorithm::AlphaBeta {
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
                if beta <= alpha {
                    break;
                }
            }
        }

        best
    }
}
