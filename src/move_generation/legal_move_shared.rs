use crate::game_state::checkers_rules::DIAGONALS;
use crate::game_state::checkers_types::{Player, Position};

/// The two forward diagonals for `player`'s pawns.
#[inline]
pub fn pawn_directions(player: Player) -> [(i8, i8); 2] {
    let forward = player.forward();
    [(forward, -1), (forward, 1)]
}

/// All four diagonals, used by kings.
#[inline]
pub fn king_directions() -> [(i8, i8); 4] {
    DIAGONALS
}

/// Squares along a diagonal starting one step from `from`, stopping at the
/// board edge.
pub fn ray(from: Position, (d_row, d_col): (i8, i8)) -> impl Iterator<Item = Position> {
    (1..)
        .map(move |step| from.offset(d_row * step, d_col * step))
        .take_while(|pos| pos.is_on_board())
}
