//! Pluggable board evaluation.
//!
//! Search stays independent of the heuristic by scoring leaves through the
//! `BoardScorer` trait.

use crate::game_state::board::Board;
use crate::game_state::checkers_rules::{BOARD_SIZE, KING_VALUE, PAWN_VALUE};
use crate::game_state::checkers_types::{Cell, Player};

pub trait BoardScorer: Send + Sync {
    /// Score from `perspective`'s point of view; positive is good for it.
    fn score(&self, board: &Board, perspective: Player) -> i32;
}

/// Material plus pawn advancement.
///
/// Pawn = 10 plus the number of rows it has advanced from its back rank
/// (0..=7), king = 30 with no positional term. Opponent pieces count with
/// the opposite sign.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub fn piece_value(cell: Cell, row: i8) -> i32 {
        match cell {
            Cell::Empty => 0,
            Cell::Pawn(owner) => PAWN_VALUE + i32::from(Self::advancement(owner, row)),
            Cell::King(_) => KING_VALUE,
        }
    }

    /// Rows travelled toward promotion.
    #[inline]
    pub const fn advancement(owner: Player, row: i8) -> i8 {
        match owner {
            Player::White => BOARD_SIZE - 1 - row,
            Player::Black => row,
        }
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board, perspective: Player) -> i32 {
        let mut score = 0i32;
        for player in [Player::White, Player::Black] {
            let sign = if player == perspective { 1 } else { -1 };
            for (pos, cell) in board.pieces(player) {
                score += sign * Self::piece_value(cell, pos.row);
            }
        }
        score
    }
}
