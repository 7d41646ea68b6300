//! Plain-text board renderer for the terminal front-end and diagnostics.

use crate::game_state::board::Board;
use crate::game_state::checkers_rules::BOARD_SIZE;
use crate::game_state::checkers_types::{Cell, Player, Position};

const FILES: &str = "  a b c d e f g h";

/// Render the board with White at the bottom.
///
/// `w`/`b` are pawns, `W`/`B` kings, `.` an empty dark square and a blank
/// a light square.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    out.push_str(FILES);
    out.push('\n');

    for row in 0..BOARD_SIZE {
        let rank = char::from(b'0' + (BOARD_SIZE - row) as u8);
        out.push(rank);
        out.push(' ');

        for col in 0..BOARD_SIZE {
            let pos = Position::new(row, col);
            out.push(cell_char(pos, board.cell(pos).unwrap_or_default()));
            if col < BOARD_SIZE - 1 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str(FILES);
    out
}

fn cell_char(pos: Position, cell: Cell) -> char {
    match cell {
        Cell::Pawn(Player::White) => 'w',
        Cell::Pawn(Player::Black) => 'b',
        Cell::King(Player::White) => 'W',
        Cell::King(Player::Black) => 'B',
        Cell::Empty if pos.is_dark() => '.',
        Cell::Empty => ' ',
    }
}
