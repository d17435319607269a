//! Static evaluation of board positions.
//!
//! A position is scored by pattern windows. Every cell a player occupies
//! anchors four windows, one per line direction, each covering the anchor
//! and the next three cells along the direction. A window is worth points
//! by how many of its in-bounds cells belong to the player, counted
//! wherever they sit in the window:
//!
//! | pieces in window | value |
//! |------------------|-------|
//! | 2                | 10    |
//! | 3                | 100   |
//! | 4                | 1000  |
//!
//! Windows that run off the board edge are not discarded, the cells that
//! remain in bounds still count. Overlapping anchors rescore the same
//! pieces, so a connected run is worth more than the sum of its pairs.

use crate::board::{Board, Player, DIRECTIONS};
use crate::{HEIGHT, WIDTH};

/// Scores `board` from Yellow's point of view: Yellow's pattern windows
/// add, Red's subtract. Positive favors Yellow, negative favors Red.
pub fn evaluate(board: &Board) -> i32 {
    position_score(board, Player::Yellow) - position_score(board, Player::Red)
}

// sum of window values over every (occupied cell, direction) pair
fn position_score(board: &Board, player: Player) -> i32 {
    let mut score = 0;
    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            if board.get(row, column) == player.cell() {
                for &(row_step, column_step) in DIRECTIONS.iter() {
                    let count =
                        count_in_window(board, row, column, row_step, column_step, player);
                    score += window_value(count);
                }
            }
        }
    }
    score
}

// how many of the window's in-bounds cells hold `player`'s pieces; gaps
// and opponent pieces are skipped over, not run-breaking
fn count_in_window(
    board: &Board,
    row: usize,
    column: usize,
    row_step: i32,
    column_step: i32,
    player: Player,
) -> usize {
    let mut count = 0;
    for i in 0..4 {
        let r = row as i32 + i * row_step;
        let c = column as i32 + i * column_step;
        if board.cell_at(r, c) == Some(player.cell()) {
            count += 1;
        }
    }
    count
}

fn window_value(count: usize) -> i32 {
    match count {
        2 => 10,
        3 => 100,
        4 => 1000,
        _ => 0,
    }
}
