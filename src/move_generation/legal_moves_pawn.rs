use std::collections::BTreeSet;

use crate::game_state::board::{enemy_owns, Board};
use crate::game_state::checkers_types::{Player, Position};
use crate::move_generation::legal_move_shared::pawn_directions;

/// Jumps over an adjacent enemy onto the empty square directly behind it.
/// Pawns only capture forward.
pub fn generate_pawn_captures(
    from: Position,
    board: &Board,
    player: Player,
    out: &mut BTreeSet<Position>,
) {
    for (d_row, d_col) in pawn_directions(player) {
        let over = from.offset(d_row, d_col);
        let landing = from.offset(2 * d_row, 2 * d_col);
        if landing.is_on_board() && enemy_owns(over, player, board) && board.is_empty_at(landing) {
            out.insert(landing);
        }
    }
}

/// Single diagonal steps forward onto empty squares.
pub fn generate_pawn_steps(
    from: Position,
    board: &Board,
    player: Player,
    out: &mut BTreeSet<Position>,
) {
    for (d_row, d_col) in pawn_directions(player) {
        let to = from.offset(d_row, d_col);
        if board.is_empty_at(to) {
            out.insert(to);
        }
    }
}
