//! Square and move text, e.g. `c3` and `c3d4`.
//!
//! Files `a`..`h` are columns 0..7. Rank 1 is row 7 (White's back row) and
//! rank 8 is row 0.

use crate::errors::NotationError;
use crate::game_state::checkers_rules::BOARD_SIZE;
use crate::game_state::checkers_types::{Move, Position};

pub fn square_to_text(pos: Position) -> Result<String, NotationError> {
    if pos.is_on_board() {
        Ok(pos.to_string())
    } else {
        Err(NotationError::InvalidSquare(pos.to_string()))
    }
}

pub fn text_to_square(text: &str) -> Result<Position, NotationError> {
    let invalid = || NotationError::InvalidSquare(text.to_owned());
    let bytes = text.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(invalid());
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(invalid());
    }

    let col = (file - b'a') as i8;
    let row = BOARD_SIZE - (rank - b'0') as i8;
    Ok(Position::new(row, col))
}

pub fn move_to_text(mv: Move) -> Result<String, NotationError> {
    Ok(format!("{}{}", square_to_text(mv.start)?, square_to_text(mv.end)?))
}

/// Accepts `c3d4`, `c3-d4`, `c3xd4` and `c3 d4`.
pub fn parse_move(text: &str) -> Result<Move, NotationError> {
    let compact: String = text
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != 'x' && *c != 'X')
        .collect();
    if compact.len() != 4 || !compact.is_ascii() {
        return Err(NotationError::InvalidMove(text.to_owned()));
    }

    let start = text_to_square(&compact[0..2])
        .map_err(|_| NotationError::InvalidMove(text.to_owned()))?;
    let end = text_to_square(&compact[2..4])
        .map_err(|_| NotationError::InvalidMove(text.to_owned()))?;
    Ok(Move::new(start, end))
}
