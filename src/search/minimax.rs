//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Depth is consumed when the turn passes, not per jump: while a capture
//! chain continues the search re-enters at the same depth with the same
//! side maximizing, so a whole multi-jump is one ply.

use std::thread;

use tracing::{debug, trace};

use crate::game_state::board::Board;
use crate::game_state::checkers_types::{Move, Player, Position};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::collect_player_moves;
use crate::search::board_scoring::BoardScorer;

/// Bound used for the initial alpha-beta window.
pub const SCORE_INFINITY: i32 = i32::MAX / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Worker threads for the root split; 1 searches on the caller's thread.
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            threads: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

impl SearchStats {
    fn merge(&mut self, rhs: SearchStats) {
        self.nodes += rhs.nodes;
        self.cutoffs += rhs.cutoffs;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub stats: SearchStats,
    /// Exact score of every root candidate, in enumeration order.
    pub root_scores: Vec<(Move, i32)>,
}

struct Searcher<'a, S: BoardScorer> {
    ai_player: Player,
    scorer: &'a S,
    stats: SearchStats,
}

impl<'a, S: BoardScorer> Searcher<'a, S> {
    fn new(ai_player: Player, scorer: &'a S) -> Self {
        Self {
            ai_player,
            scorer,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    fn side_to_move(&self, maximizing: bool) -> Player {
        if maximizing {
            self.ai_player
        } else {
            self.ai_player.opposite()
        }
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        forced_piece: Option<Position>,
    ) -> i32 {
        self.stats.nodes += 1;
        if depth == 0 {
            return self.scorer.score(board, self.ai_player);
        }

        let side = self.side_to_move(maximizing);
        let moves = collect_player_moves(board, side, forced_piece);
        if moves.is_empty() {
            return self.scorer.score(board, self.ai_player);
        }

        if maximizing {
            let mut best = -SCORE_INFINITY;
            for mv in moves.iter_moves() {
                let applied = apply_move(board, mv, side);
                let score = match applied.continuation {
                    Some(piece) => {
                        self.alpha_beta(&applied.board, depth, true, alpha, beta, Some(piece))
                    }
                    None => self.alpha_beta(&applied.board, depth - 1, false, alpha, beta, None),
                };
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = SCORE_INFINITY;
            for mv in moves.iter_moves() {
                let applied = apply_move(board, mv, side);
                let score = match applied.continuation {
                    Some(piece) => {
                        self.alpha_beta(&applied.board, depth, false, alpha, beta, Some(piece))
                    }
                    None => self.alpha_beta(&applied.board, depth - 1, true, alpha, beta, None),
                };
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        forced_piece: Option<Position>,
    ) -> i32 {
        self.stats.nodes += 1;
        if depth == 0 {
            return self.scorer.score(board, self.ai_player);
        }

        let side = self.side_to_move(maximizing);
        let moves = collect_player_moves(board, side, forced_piece);
        if moves.is_empty() {
            return self.scorer.score(board, self.ai_player);
        }

        let scores = moves.iter_moves().map(|mv| {
            let applied = apply_move(board, mv, side);
            match applied.continuation {
                Some(piece) => self.minimax(&applied.board, depth, maximizing, Some(piece)),
                None => self.minimax(&applied.board, depth - 1, !maximizing, None),
            }
        });
        let scores: Vec<i32> = scores.collect();
        if maximizing {
            scores.into_iter().max().unwrap_or(-SCORE_INFINITY)
        } else {
            scores.into_iter().min().unwrap_or(SCORE_INFINITY)
        }
    }

    /// Exact score of one root candidate, searched with a full window.
    fn score_root_move(&mut self, board: &Board, mv: Move, depth: u8) -> i32 {
        let applied = apply_move(board, mv, self.ai_player);
        match applied.continuation {
            Some(piece) => self.alpha_beta(
                &applied.board,
                depth,
                true,
                -SCORE_INFINITY,
                SCORE_INFINITY,
                Some(piece),
            ),
            None => self.alpha_beta(
                &applied.board,
                depth.saturating_sub(1),
                false,
                -SCORE_INFINITY,
                SCORE_INFINITY,
                None,
            ),
        }
    }
}

/// Alpha-beta value of `board` for `ai_player`.
///
/// The side to move is `ai_player` when `maximizing`, otherwise its
/// opponent. `forced_piece` restricts the side to move to one capturing
/// piece while a chain is in progress.
#[allow(clippy::too_many_arguments)]
pub fn alpha_beta<S: BoardScorer>(
    board: &Board,
    depth: u8,
    maximizing: bool,
    alpha: i32,
    beta: i32,
    ai_player: Player,
    forced_piece: Option<Position>,
    scorer: &S,
    stats: &mut SearchStats,
) -> i32 {
    let mut searcher = Searcher::new(ai_player, scorer);
    let score = searcher.alpha_beta(board, depth, maximizing, alpha, beta, forced_piece);
    stats.merge(searcher.stats);
    score
}

/// Plain minimax over the same tree as [`alpha_beta`], without pruning.
pub fn minimax<S: BoardScorer>(
    board: &Board,
    depth: u8,
    maximizing: bool,
    ai_player: Player,
    forced_piece: Option<Position>,
    scorer: &S,
    stats: &mut SearchStats,
) -> i32 {
    let mut searcher = Searcher::new(ai_player, scorer);
    let score = searcher.minimax(board, depth, maximizing, forced_piece);
    stats.merge(searcher.stats);
    score
}

/// Pick the best move for `player`.
///
/// Candidates come from [`collect_player_moves`], so a mandatory capture
/// (or a pending chain on `forced_piece`) restricts the root. They are
/// scored in sorted order and the first best one wins ties.
pub fn choose_move<S: BoardScorer>(
    board: &Board,
    player: Player,
    forced_piece: Option<Position>,
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    let candidates: Vec<Move> = collect_player_moves(board, player, forced_piece)
        .iter_moves()
        .collect();

    if candidates.is_empty() {
        return SearchResult {
            best_move: None,
            best_score: scorer.score(board, player),
            stats: SearchStats {
                nodes: 1,
                cutoffs: 0,
            },
            root_scores: Vec::new(),
        };
    }

    let (root_scores, stats) = if config.threads > 1 && candidates.len() > 1 {
        score_candidates_parallel(board, player, scorer, &candidates, config)
    } else {
        let mut searcher = Searcher::new(player, scorer);
        let scores = candidates
            .iter()
            .map(|&mv| (mv, searcher.score_root_move(board, mv, config.max_depth)))
            .collect::<Vec<_>>();
        (scores, searcher.stats)
    };

    let mut best_move = None;
    let mut best_score = -SCORE_INFINITY;
    for &(mv, score) in &root_scores {
        debug!(%mv, score, "root move scored");
        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }
    trace!(nodes = stats.nodes, cutoffs = stats.cutoffs, "search finished");

    SearchResult {
        best_move,
        best_score,
        stats,
        root_scores,
    }
}

/// Split the root candidates into contiguous chunks, one per worker. Each
/// worker owns its board copies; scores come back in candidate order.
fn score_candidates_parallel<S: BoardScorer>(
    board: &Board,
    player: Player,
    scorer: &S,
    candidates: &[Move],
    config: SearchConfig,
) -> (Vec<(Move, i32)>, SearchStats) {
    let workers = config.threads.min(candidates.len());
    let chunk_len = candidates.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = candidates
            .chunks(chunk_len)
            .map(|chunk| {
                scope.spawn(move || {
                    let mut searcher = Searcher::new(player, scorer);
                    let scores: Vec<(Move, i32)> = chunk
                        .iter()
                        .map(|&mv| (mv, searcher.score_root_move(board, mv, config.max_depth)))
                        .collect();
                    (scores, searcher.stats)
                })
            })
            .collect();

        let mut root_scores = Vec::with_capacity(candidates.len());
        let mut stats = SearchStats::default();
        for handle in handles {
            match handle.join() {
                Ok((scores, local)) => {
                    root_scores.extend(scores);
                    stats.merge(local);
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        (root_scores, stats)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::checkers_types::Cell;
    use crate::search::board_scoring::MaterialScorer;

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

    fn config(max_depth: u8) -> SearchConfig {
        SearchConfig {
            max_depth,
            threads: 1,
        }
    }

    /// A few opening moves so the equivalence checks see captures.
    fn middlegame_board() -> Board {
        let mut board = Board::starting();
        for (step, player) in [
            (mv((5, 2), (4, 3)), Player::White),
            (mv((2, 5), (3, 4)), Player::Black),
        ] {
            board = apply_move(&board, step, player).board;
        }
        board
    }

    #[test]
    fn ties_resolve_to_first_enumerated_move() {
        let result = choose_move(
            &Board::starting(),
            Player::White,
            None,
            &MaterialScorer,
            config(1),
        );
        assert_eq!(result.root_scores.len(), 7);
        assert!(result.root_scores.iter().all(|&(_, score)| score == 1));
        assert_eq!(result.best_move, Some(mv((5, 0), (4, 1))));
        assert_eq!(result.best_score, 1);
    }

    #[test]
    fn depth_two_avoids_hanging_a_pawn() {
        let board = board_with(&[
            (5, 4, Cell::Pawn(Player::White)),
            (3, 2, Cell::Pawn(Player::Black)),
        ]);
        let shallow = choose_move(&board, Player::White, None, &MaterialScorer, config(1));
        assert_eq!(shallow.best_move, Some(mv((5, 4), (4, 3))));

        let deeper = choose_move(&board, Player::White, None, &MaterialScorer, config(2));
        assert_eq!(deeper.best_move, Some(mv((5, 4), (4, 5))));
        assert_eq!(deeper.best_score, -1);
    }

    #[test]
    fn capture_chain_counts_as_a_single_ply() {
        let board = board_with(&[
            (5, 2, Cell::Pawn(Player::White)),
            (4, 3, Cell::Pawn(Player::Black)),
            (2, 5, Cell::Pawn(Player::Black)),
        ]);
        let result = choose_move(&board, Player::White, None, &MaterialScorer, config(1));
        assert_eq!(result.best_move, Some(mv((5, 2), (3, 4))));

        let first = apply_move(&board, mv((5, 2), (3, 4)), Player::White);
        let second = apply_move(&first.board, mv((3, 4), (1, 6)), Player::White);
        assert_eq!(
            result.best_score,
            MaterialScorer.score(&second.board, Player::White)
        );
    }

    #[test]
    fn forced_piece_limits_root_candidates() {
        let board = board_with(&[
            (5, 2, Cell::Pawn(Player::White)),
            (4, 3, Cell::Pawn(Player::Black)),
            (5, 6, Cell::Pawn(Player::White)),
            (4, 5, Cell::Pawn(Player::Black)),
        ]);
        let result = choose_move(
            &board,
            Player::White,
            Some(Position::new(5, 6)),
            &MaterialScorer,
            config(3),
        );
        assert!(result
            .root_scores
            .iter()
            .all(|(candidate, _)| candidate.start == Position::new(5, 6)));
        assert_eq!(result.best_move.map(|m| m.start), Some(Position::new(5, 6)));
    }

    #[test]
    fn no_moves_reports_none() {
        let board = board_with(&[
            (0, 1, Cell::Pawn(Player::White)),
            (7, 0, Cell::Pawn(Player::Black)),
        ]);
        let result = choose_move(&board, Player::White, None, &MaterialScorer, config(3));
        assert_eq!(result.best_move, None);
        assert!(result.root_scores.is_empty());
    }

    #[test]
    fn alpha_beta_matches_plain_minimax() {
        let boards = [
            Board::starting(),
            middlegame_board(),
            board_with(&[
                (7, 0, Cell::King(Player::White)),
                (5, 2, Cell::Pawn(Player::Black)),
                (2, 5, Cell::Pawn(Player::Black)),
                (1, 2, Cell::King(Player::Black)),
                (6, 5, Cell::Pawn(Player::White)),
            ]),
        ];

        for board in &boards {
            for player in [Player::White, Player::Black] {
                for depth in 0..=4 {
                    let mut pruned = SearchStats::default();
                    let mut full = SearchStats::default();
                    let a = alpha_beta(
                        board,
                        depth,
                        true,
                        -SCORE_INFINITY,
                        SCORE_INFINITY,
                        player,
                        None,
                        &MaterialScorer,
                        &mut pruned,
                    );
                    let b = minimax(board, depth, true, player, None, &MaterialScorer, &mut full);
                    assert_eq!(a, b, "{player} depth {depth}");
                    assert!(pruned.nodes <= full.nodes);
                }
            }
        }
    }

    #[test]
    fn alpha_beta_matches_minimax_from_minimizing_nodes() {
        for board in [Board::starting(), middlegame_board()] {
            for ai_player in [Player::White, Player::Black] {
                for depth in 1..=4 {
                    let mut pruned = SearchStats::default();
                    let mut full = SearchStats::default();
                    let a = alpha_beta(
                        &board,
                        depth,
                        false,
                        -SCORE_INFINITY,
                        SCORE_INFINITY,
                        ai_player,
                        None,
                        &MaterialScorer,
                        &mut pruned,
                    );
                    let b = minimax(&board, depth, false, ai_player, None, &MaterialScorer, &mut full);
                    assert_eq!(a, b, "{ai_player} depth {depth}");
                }
            }
        }
    }

    #[test]
    fn alpha_beta_matches_minimax_mid_chain() {
        // White just landed on (3, 2) and can jump again either way.
        let board = board_with(&[
            (3, 2, Cell::Pawn(Player::White)),
            (2, 1, Cell::Pawn(Player::Black)),
            (2, 3, Cell::Pawn(Player::Black)),
            (0, 5, Cell::Pawn(Player::Black)),
            (1, 6, Cell::Pawn(Player::Black)),
            (6, 5, Cell::Pawn(Player::White)),
            (5, 0, Cell::Pawn(Player::White)),
        ]);
        let forced = Some(Position::new(3, 2));

        // White to move: maximizing for White, minimizing for Black.
        for (ai_player, maximizing) in [(Player::White, true), (Player::Black, false)] {
            for depth in 1..=4 {
                let mut pruned = SearchStats::default();
                let mut full = SearchStats::default();
                let a = alpha_beta(
                    &board,
                    depth,
                    maximizing,
                    -SCORE_INFINITY,
                    SCORE_INFINITY,
                    ai_player,
                    forced,
                    &MaterialScorer,
                    &mut pruned,
                );
                let b = minimax(
                    &board,
                    depth,
                    maximizing,
                    ai_player,
                    forced,
                    &MaterialScorer,
                    &mut full,
                );
                assert_eq!(a, b, "{ai_player} depth {depth}");
                assert!(pruned.nodes <= full.nodes);
            }
        }
    }

    #[test]
    fn pruning_skips_work_at_depth_four() {
        let mut pruned = SearchStats::default();
        let mut full = SearchStats::default();
        let board = Board::starting();
        alpha_beta(
            &board,
            4,
            true,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            Player::White,
            None,
            &MaterialScorer,
            &mut pruned,
        );
        minimax(&board, 4, true, Player::White, None, &MaterialScorer, &mut full);
        assert!(pruned.cutoffs > 0);
        assert!(pruned.nodes < full.nodes);
    }

    #[test]
    fn parallel_root_split_matches_single_thread() {
        let board = middlegame_board();
        let single = choose_move(&board, Player::White, None, &MaterialScorer, config(3));
        let parallel = choose_move(
            &board,
            Player::White,
            None,
            &MaterialScorer,
            SearchConfig {
                max_depth: 3,
                threads: 3,
            },
        );
        assert_eq!(single.best_move, parallel.best_move);
        assert_eq!(single.best_score, parallel.best_score);
        assert_eq!(single.root_scores, parallel.root_scores);
        assert_eq!(single.stats.nodes, parallel.stats.nodes);
    }
}
