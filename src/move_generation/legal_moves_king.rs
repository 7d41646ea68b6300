use std::collections::BTreeSet;

use crate::game_state::board::{enemy_owns, Board};
use crate::game_state::checkers_types::{Player, Position};
use crate::move_generation::legal_move_shared::{king_directions, ray};

/// Long-range king captures.
///
/// Along each diagonal the king may pass over empty squares until it meets
/// exactly one enemy piece; every empty square directly behind that piece
/// is a landing square, up to the next occupied square. A friendly piece,
/// or a second enemy, ends the ray.
pub fn generate_king_captures(
    from: Position,
    board: &Board,
    player: Player,
    out: &mut BTreeSet<Position>,
) {
    for dir in king_directions() {
        let mut jumped = false;
        for pos in ray(from, dir) {
            if board.is_empty_at(pos) {
                if jumped {
                    out.insert(pos);
                }
                continue;
            }
            if enemy_owns(pos, player, board) && !jumped {
                jumped = true;
                continue;
            }
            break;
        }
    }
}

/// Slides over any number of empty squares in all four directions.
pub fn generate_king_slides(
    from: Position,
    board: &Board,
    _player: Player,
    out: &mut BTreeSet<Position>,
) {
    for dir in king_directions() {
        for pos in ray(from, dir) {
            if !board.is_empty_at(pos) {
                break;
            }
            out.insert(pos);
        }
    }
}
