//! Legal move generation with the mandatory-capture rule.
//!
//! Per piece, captures strictly dominate ordinary moves. Per player, as soon
//! as any piece can capture only capturing pieces are reported.

use std::collections::{BTreeMap, BTreeSet};

use crate::game_state::board::{owns, Board};
use crate::game_state::checkers_types::{Cell, Move, Player, Position};
use crate::move_generation::legal_moves_king::{generate_king_captures, generate_king_slides};
use crate::move_generation::legal_moves_pawn::{generate_pawn_captures, generate_pawn_steps};

/// Destinations for one piece.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceMoves {
    pub destinations: BTreeSet<Position>,
    pub is_capture: bool,
}

/// Every legal move of one player, keyed by start square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerMoves {
    pub moves: BTreeMap<Position, BTreeSet<Position>>,
    /// True only when the map holds captures (and nothing else).
    pub must_capture: bool,
}

impl PlayerMoves {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Number of (start, end) pairs.
    pub fn len(&self) -> usize {
        self.moves.values().map(BTreeSet::len).sum()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.moves
            .get(&mv.start)
            .is_some_and(|ends| ends.contains(&mv.end))
    }

    pub fn destinations_from(&self, start: Position) -> Option<&BTreeSet<Position>> {
        self.moves.get(&start)
    }

    /// Moves in deterministic order: start squares ascending, then ends.
    pub fn iter_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves
            .iter()
            .flat_map(|(&start, ends)| ends.iter().map(move |&end| Move::new(start, end)))
    }
}

/// Capture landing squares for the piece on `pos`, empty when the square
/// holds no piece of `player`.
pub fn capture_destinations(pos: Position, board: &Board, player: Player) -> BTreeSet<Position> {
    let mut out = BTreeSet::new();
    match board.cell(pos) {
        Some(Cell::Pawn(owner)) if owner == player => {
            generate_pawn_captures(pos, board, player, &mut out)
        }
        Some(Cell::King(owner)) if owner == player => {
            generate_king_captures(pos, board, player, &mut out)
        }
        _ => {}
    }
    out
}

/// Legal destinations for the piece on `pos`, captures first.
pub fn generate(pos: Position, board: &Board, player: Player) -> PieceMoves {
    let captures = capture_destinations(pos, board, player);
    if !captures.is_empty() {
        return PieceMoves {
            destinations: captures,
            is_capture: true,
        };
    }

    let mut destinations = BTreeSet::new();
    match board.cell(pos) {
        Some(Cell::Pawn(owner)) if owner == player => {
            generate_pawn_steps(pos, board, player, &mut destinations)
        }
        Some(Cell::King(owner)) if owner == player => {
            generate_king_slides(pos, board, player, &mut destinations)
        }
        _ => {}
    }
    PieceMoves {
        destinations,
        is_capture: false,
    }
}

/// All legal moves for `player`.
///
/// With `forced_piece` set only that square is considered (a capture chain
/// in progress). Otherwise, if any piece can capture, the result holds only
/// the capturing pieces and their capture destinations.
pub fn collect_player_moves(
    board: &Board,
    player: Player,
    forced_piece: Option<Position>,
) -> PlayerMoves {
    let mut captures = BTreeMap::new();
    let mut ordinary = BTreeMap::new();

    let mut consider = |pos: Position| {
        let piece_moves = generate(pos, board, player);
        if piece_moves.destinations.is_empty() {
            return;
        }
        if piece_moves.is_capture {
            captures.insert(pos, piece_moves.destinations);
        } else {
            ordinary.insert(pos, piece_moves.destinations);
        }
    };

    match forced_piece {
        Some(pos) => {
            if owns(pos, player, board) {
                consider(pos);
            }
        }
        None => board.pieces(player).for_each(|(pos, _)| consider(pos)),
    }

    if captures.is_empty() {
        PlayerMoves {
            moves: ordinary,
            must_capture: false,
        }
    } else {
        PlayerMoves {
            moves: captures,
            must_capture: true,
        }
    }
}
