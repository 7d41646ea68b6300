//! Perft: exhaustive leaf counts for validating move generation.
//!
//! Depth counts completed turns, so a whole capture chain is one ply. Two
//! chains that reach the same square by different jump paths are different
//! leaves.

use std::thread;

use crate::game_state::board::Board;
use crate::game_state::checkers_types::{Move, Player, Position};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::collect_player_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    /// Leaf turns that captured at least once.
    pub captures: u64,
    /// Leaf turns that promoted a pawn.
    pub promotions: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TurnFlags {
    capture: bool,
    promotion: bool,
}

pub fn perft(board: &Board, player: Player, forced: Option<Position>, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    perft_recurse(board, player, forced, depth, TurnFlags::default(), &mut total);
    total
}

/// Counts under each first step, in move order.
pub fn divide(
    board: &Board,
    player: Player,
    forced: Option<Position>,
    depth: u8,
) -> Vec<(Move, PerftCounts)> {
    if depth == 0 {
        return Vec::new();
    }
    collect_player_moves(board, player, forced)
        .iter_moves()
        .map(|mv| (mv, perft_after_step(board, mv, player, depth)))
        .collect()
}

/// Same totals as [`perft`], one scoped worker per first step.
pub fn perft_multi_threaded(board: &Board, player: Player, depth: u8) -> PerftCounts {
    if depth == 0 {
        return perft(board, player, None, depth);
    }

    let root_moves: Vec<Move> = collect_player_moves(board, player, None)
        .iter_moves()
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .iter()
            .map(|&mv| scope.spawn(move || perft_after_step(board, mv, player, depth)))
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        total
    })
}

fn perft_after_step(board: &Board, mv: Move, player: Player, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    descend(board, mv, player, depth, TurnFlags::default(), &mut counts);
    counts
}

fn perft_recurse(
    board: &Board,
    player: Player,
    forced: Option<Position>,
    depth: u8,
    turn: TurnFlags,
    counts: &mut PerftCounts,
) {
    let moves = collect_player_moves(board, player, forced);
    for mv in moves.iter_moves() {
        descend(board, mv, player, depth, turn, counts);
    }
}

fn descend(
    board: &Board,
    mv: Move,
    player: Player,
    depth: u8,
    turn: TurnFlags,
    counts: &mut PerftCounts,
) {
    let applied = apply_move(board, mv, player);
    let turn = TurnFlags {
        capture: turn.capture || applied.was_capture,
        promotion: turn.promotion || applied.promoted,
    };

    match applied.continuation {
        Some(piece) => perft_recurse(&applied.board, player, Some(piece), depth, turn, counts),
        None if depth <= 1 => {
            counts.nodes += 1;
            if turn.capture {
                counts.captures += 1;
            }
            if turn.promotion {
                counts.promotions += 1;
            }
        }
        None => perft_recurse(
            &applied.board,
            applied.next_player,
            None,
            depth - 1,
            TurnFlags::default(),
            counts,
        ),
    }
}
