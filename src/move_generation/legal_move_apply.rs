//! Move execution: captures, promotion and capture-chain continuation.
//!
//! `apply_move` is the only place that decides whether a capture chain goes
//! on. The live controller, the search, perft and the match harness all go
//! through it so play and lookahead follow identical rules.

use crate::game_state::board::{enemy_owns, Board};
use crate::game_state::checkers_types::{Cell, Move, Player, Position};
use crate::move_generation::legal_move_generator::capture_destinations;

/// Result of applying one jump or step to a board copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub board: Board,
    /// Same as the mover while a continuation is pending.
    pub next_player: Player,
    /// Square of the piece that must keep capturing, if any.
    pub continuation: Option<Position>,
    pub was_capture: bool,
    pub captured: Option<Position>,
    pub promoted: bool,
}

/// Apply `mv` for `player` on a copy of `board`.
///
/// The move is assumed to come from move generation. A move longer than one
/// step whose path holds no enemy piece is a plain relocation.
pub fn apply_move(board: &Board, mv: Move, player: Player) -> AppliedMove {
    let mut next = *board;
    let moving = next.cell(mv.start).unwrap_or(Cell::Empty);

    // King slides are also longer than one step; they simply find nothing.
    let captured = if mv.distance() > 1 {
        find_captured_piece(&next, mv, player)
    } else {
        None
    };
    if let Some(square) = captured {
        next.set(square, Cell::Empty);
    }

    let promoted = matches!(moving, Cell::Pawn(owner) if mv.end.row == owner.promotion_row());
    let landed = match moving {
        Cell::Pawn(owner) if promoted => Cell::King(owner),
        other => other,
    };
    next.set(mv.start, Cell::Empty);
    next.set(mv.end, landed);

    let was_capture = captured.is_some();
    let continuation = if was_capture && !capture_destinations(mv.end, &next, player).is_empty() {
        Some(mv.end)
    } else {
        None
    };

    AppliedMove {
        board: next,
        next_player: if continuation.is_some() {
            player
        } else {
            player.opposite()
        },
        continuation,
        was_capture,
        captured,
        promoted,
    }
}

/// First enemy piece strictly between start and end, walking one diagonal
/// step at a time. Any other occupied square on the way voids the capture.
fn find_captured_piece(board: &Board, mv: Move, player: Player) -> Option<Position> {
    let (d_row, d_col) = mv.direction();
    let mut pos = mv.start.offset(d_row, d_col);
    while pos != mv.end && pos.is_on_board() {
        if enemy_owns(pos, player, board) {
            return Some(pos);
        }
        if !board.is_empty_at(pos) {
            return None;
        }
        pos = pos.offset(d_row, d_col);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(pieces: &[(i8, i8, Cell)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, cell) in pieces {
            board.set(Position::new(row, col), cell);
        }
        board
    }

    fn mv(from: (i8, i8), to: (i8, i8)) -> Move {
        Move::new(Position::new(from.0, from.1), Position::new(to.0, to.1))
    }

    #[test]
    fn simple_step_relocates_and_passes_turn() {
        let board = Board::starting();
        let applied = apply_move(&board, mv((5, 0), (4, 1)), Player::White);
        assert_eq!(applied.board.cell(Position::new(5, 0)), Some(Cell::Empty));
        assert_eq!(
            applied.board.cell(Position::new(4, 1)),
            Some(Cell::Pawn(Player::White))
        );
        assert_eq!(applied.next_player, Player::Black);
        assert!(!applied.was_capture);
        assert_eq!(applied.continuation, None);
        assert_eq!(board, Board::starting(), "input board must not change");
    }

    #[test]
    fn jump_removes_the_enemy_piece() {
        let board = board_with(&[
            (5, 2, Cell::Pawn(Player::White)),
            (4, 3, Cell::Pawn(Player::Black)),
        ]);
        let applied = apply_move(&board, mv((5, 2), (3, 4)), Player::White);
        assert!(applied.was_capture);
        assert_eq!(applied.captured, Some(Position::new(4, 3)));
        assert_eq!(applied.board.count(Player::Black), 0);
        assert_eq!(applied.next_player, Player::Black);
    }

    #[test]
    fn chain_keeps_the_turn_and_points_at_the_piece() {
        let board = board_with(&[
            (5, 2, Cell::Pawn(Player::White)),
            (4, 3, Cell::Pawn(Player::Black)),
            (2, 5, Cell::Pawn(Player::Black)),
        ]);
        let applied = apply_move(&board, mv((5, 2), (3, 4)), Player::White);
        assert_eq!(applied.continuation, Some(Position::new(3, 4)));
        assert_eq!(applied.next_player, Player::White);

        let second = apply_move(&applied.board, mv((3, 4), (1, 6)), Player::White);
        assert_eq!(second.continuation, None);
        assert_eq!(second.next_player, Player::Black);
        assert_eq!(second.board.count(Player::Black), 0);
    }

    #[test]
    fn white_pawn_promotes_on_row_zero() {
        let board = board_with(&[(1, 2, Cell::Pawn(Player::White))]);
        let applied = apply_move(&board, mv((1, 2), (0, 1)), Player::White);
        assert!(applied.promoted);
        assert_eq!(
            applied.board.cell(Position::new(0, 1)),
            Some(Cell::King(Player::White))
        );
    }

    #[test]
    fn black_pawn_promotes_by_capture_on_row_seven() {
        let board = board_with(&[
            (5, 2, Cell::Pawn(Player::Black)),
            (6, 3, Cell::Pawn(Player::White)),
        ]);
        let applied = apply_move(&board, mv((5, 2), (7, 4)), Player::Black);
        assert!(applied.promoted);
        assert!(applied.was_capture);
        assert_eq!(
            applied.board.cell(Position::new(7, 4)),
            Some(Cell::King(Player::Black))
        );
        assert_eq!(applied.next_player, Player::White);
    }

    #[test]
    fn kings_are_never_repromoted_or_demoted() {
        let board = board_with(&[(1, 2, Cell::King(Player::White))]);
        let to_edge = apply_move(&board, mv((1, 2), (0, 1)), Player::White);
        assert!(!to_edge.promoted);
        assert_eq!(
            to_edge.board.cell(Position::new(0, 1)),
            Some(Cell::King(Player::White))
        );

        let away = apply_move(&to_edge.board, mv((0, 1), (5, 6)), Player::White);
        assert_eq!(
            away.board.cell(Position::new(5, 6)),
            Some(Cell::King(Player::White))
        );
    }

    #[test]
    fn king_long_jump_removes_piece_mid_path() {
        let board = board_with(&[
            (7, 0, Cell::King(Player::White)),
            (4, 3, Cell::Pawn(Player::Black)),
        ]);
        let applied = apply_move(&board, mv((7, 0), (1, 6)), Player::White);
        assert!(applied.was_capture);
        assert_eq!(applied.captured, Some(Position::new(4, 3)));
        assert_eq!(applied.board.count(Player::Black), 0);
    }

    #[test]
    fn jump_without_enemy_degrades_to_relocation() {
        let board = board_with(&[(7, 0, Cell::King(Player::White))]);
        let applied = apply_move(&board, mv((7, 0), (4, 3)), Player::White);
        assert!(!applied.was_capture);
        assert_eq!(applied.captured, None);
        assert_eq!(applied.continuation, None);
        assert_eq!(applied.next_player, Player::Black);
        assert_eq!(
            applied.board.cell(Position::new(4, 3)),
            Some(Cell::King(Player::White))
        );
    }

    #[test]
    fn own_piece_on_path_voids_the_capture() {
        let board = board_with(&[
            (7, 0, Cell::King(Player::White)),
            (6, 1, Cell::Pawn(Player::White)),
            (5, 2, Cell::Pawn(Player::Black)),
        ]);
        let applied = apply_move(&board, mv((7, 0), (4, 3)), Player::White);
        assert!(!applied.was_capture);
        assert_eq!(applied.board.count(Player::Black), 1);
    }
}
