//! A human-versus-engine game loop.
//!
//! Red is the human and always moves first; Yellow is the engine. A
//! session owns the board and the search parameters, applies the human's
//! move, answers with the engine's, and reports everything that happened
//! as a list of [`SessionEvent`]s for the front end to render.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::board::{Board, Move, MoveError, Player};
use crate::search::{Algorithm, ConfigError, SearchConfig, SearchError, SearchResult, Searcher};
use crate::WIDTH;

/// Something that happened during a turn, in the order it happened
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SessionEvent {
    /// A piece landed or the board was cleared; carries the new position
    BoardChanged(Board),
    /// The engine picked a move, with search diagnostics and wall time
    AiMove {
        result: SearchResult,
        elapsed: Duration,
    },
    /// The named player completed a line of four
    Win(Player),
    /// The board filled up with no line on it
    Draw,
    /// The game went back to an empty board with Red to move
    Reset,
}

/// A turn that could not be taken. The session is left exactly as it was.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// One game of gravity-drop four-in-a-row against the engine.
///
/// A finished game resets itself: after a win or a draw the events report
/// the outcome and the session is already back at an empty board.
pub struct GameSession {
    board: Board,
    current_player: Player,
    config: SearchConfig,
}

impl GameSession {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Red,
            config,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_position(board: Board, current_player: Player, config: SearchConfig) -> Self {
        Self {
            board,
            current_player,
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Changes the engine's lookahead depth for subsequent turns
    pub fn set_ply(&mut self, ply: usize) -> Result<(), ConfigError> {
        self.config.set_ply(ply)
    }

    /// Changes the engine's tree walk strategy for subsequent turns
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.set_algorithm(algorithm)
    }

    /// Plays the human's piece into `column` and carries the turn through
    /// to its end: win and draw bookkeeping, and the engine's answer when
    /// the game goes on. A rejected column changes nothing.
    pub fn play(&mut self, column: usize) -> Result<Vec<SessionEvent>, SessionError> {
        self.apply_move(column)?;

        let mut events = vec![SessionEvent::BoardChanged(self.board.clone())];
        self.after_move(&mut events)?;
        Ok(events)
    }

    /// Abandons the current game and starts over
    pub fn reset(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.do_reset(&mut events);
        events
    }

    fn apply_move(&mut self, column: usize) -> Result<Move, MoveError> {
        if column >= WIDTH {
            return Err(MoveError::OutOfRange(column));
        }
        let row = self
            .board
            .drop_row(column)
            .ok_or(MoveError::ColumnFull(column))?;
        self.board.place(row, column, self.current_player);
        Ok(Move { row, column })
    }

    // win and draw checks for the move just played, then the hand-off to
    // the engine when the mover was Red
    fn after_move(&mut self, events: &mut Vec<SessionEvent>) -> Result<(), SessionError> {
        if self.board.has_line(self.current_player) {
            events.push(SessionEvent::Win(self.current_player));
            self.do_reset(events);
            return Ok(());
        }
        if self.board.is_full() {
            events.push(SessionEvent::Draw);
            self.do_reset(events);
            return Ok(());
        }

        self.current_player = self.current_player.opponent();
        if self.current_player == Player::Yellow {
            self.ai_move(events)?;
        }
        Ok(())
    }

    fn ai_move(&mut self, events: &mut Vec<SessionEvent>) -> Result<(), SessionError> {
        let start = Instant::now();
        let result = Searcher::new(self.config).choose_move(&mut self.board, Player::Yellow)?;
        let elapsed = start.elapsed();

        let Move { row, column } = result.best_move;
        self.board.place(row, column, Player::Yellow);
        events.push(SessionEvent::AiMove { result, elapsed });
        events.push(SessionEvent::BoardChanged(self.board.clone()));

        if self.board.has_line(Player::Yellow) {
            events.push(SessionEvent::Win(Player::Yellow));
            self.do_reset(events);
        } else if self.board.is_full() {
            events.push(SessionEvent::Draw);
            self.do_reset(events);
        }

        // the turn always comes back to the human
        self.current_player = Player::Red;
        Ok(())
    }

    fn do_reset(&mut self, events: &mut Vec<SessionEvent>) {
        self.board = Board::new();
        self.current_player = Player::Red;
        events.push(SessionEvent::Reset);
        events.push(SessionEvent::BoardChanged(self.board.clone()));
    }
}
