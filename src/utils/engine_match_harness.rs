//! Minimal head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other without any text
//! I/O, with an optional seeded random opening prefix so deterministic
//! engines still produce varied games.

use std::time::Instant;

use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::engines::engine_trait::{Engine, SearchParams};
use crate::errors::MatchError;
use crate::game_state::checkers_types::{Move, Player};
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWin,
    BlackWin,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, color: Player },
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Completed turns before the game is called a draw.
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub params: SearchParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_min_plies: 0,
            opening_max_plies: 4,
            params: SearchParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening_moves: Vec<String>,
    /// One entry per turn; chain steps are joined, e.g. `c3e5g7`.
    pub played_moves: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match from the opening.
pub fn play_engine_match(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    seed: u64,
    config: &MatchConfig,
) -> Result<MatchResult, MatchError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (state, opening_moves) = apply_seeded_random_opening(
        GameState::default(),
        &mut rng,
        config.opening_min_plies,
        config.opening_max_plies,
    );
    play_from_state(state, engine_white, engine_black, opening_moves, config)
}

/// Play from a caller-provided position, skipping the random opening.
pub fn play_engine_match_from_state(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    start_state: GameState,
    config: &MatchConfig,
) -> Result<MatchResult, MatchError> {
    play_from_state(start_state, engine_white, engine_black, Vec::new(), config)
}

fn play_from_state(
    mut state: GameState,
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    opening_moves: Vec<String>,
    config: &MatchConfig,
) -> Result<MatchResult, MatchError> {
    engine_white.new_game();
    engine_black.new_game();

    let mut played_moves = Vec::<String>::new();
    let mut white_move_count = 0u32;
    let mut black_move_count = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;
    let mut outcome = MatchOutcome::DrawMaxPlies;

    for _ in 0..config.max_plies {
        if let Some(winner) = state.winner() {
            outcome = match winner {
                Player::White => MatchOutcome::WhiteWin,
                Player::Black => MatchOutcome::BlackWin,
            };
            break;
        }

        let mover = state.current_player;
        let engine: &mut dyn Engine = match mover {
            Player::White => &mut *engine_white,
            Player::Black => &mut *engine_black,
        };

        let started = Instant::now();
        let turn = play_turn(&mut state, engine, &config.params)?;
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Player::White => {
                white_move_count = white_move_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
            Player::Black => {
                black_move_count = black_move_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
        }
        played_moves.push(turn);
    }

    if outcome == MatchOutcome::DrawMaxPlies {
        if let Some(winner) = state.winner() {
            outcome = match winner {
                Player::White => MatchOutcome::WhiteWin,
                Player::Black => MatchOutcome::BlackWin,
            };
        }
    }
    debug!(?outcome, turns = played_moves.len(), "match finished");

    Ok(MatchResult {
        outcome,
        final_state: state,
        opening_moves,
        played_moves,
        white_move_count,
        black_move_count,
        white_total_time_ns,
        black_total_time_ns,
    })
}

/// Ask `engine` for steps until the turn passes. Returns the turn's text.
fn play_turn(
    state: &mut GameState,
    engine: &mut dyn Engine,
    params: &SearchParams,
) -> Result<String, MatchError> {
    let mover = state.current_player;
    let mut text = String::new();

    loop {
        let legal = state.legal_moves();
        let out = engine.choose_move(state, params)?;
        let Some(chosen) = out.best_move.or_else(|| legal.iter_moves().next()) else {
            break;
        };
        if !legal.contains(chosen) {
            return Err(MatchError::IllegalMove {
                engine: engine.name().to_owned(),
                player: mover,
                mv: chosen,
            });
        }

        push_step(&mut text, chosen);
        if state.apply(chosen).continuation.is_none() {
            break;
        }
    }
    Ok(text)
}

/// `c3e5` then `e5g7` becomes `c3e5g7`.
fn push_step(text: &mut String, mv: Move) {
    if text.is_empty() {
        text.push_str(&mv.start.to_string());
    }
    text.push_str(&mv.end.to_string());
}

/// Play a series and aggregate win/loss/draw statistics. Player 1 takes
/// White in even-numbered games and Black in odd-numbered ones.
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: &MatchSeriesConfig,
) -> Result<MatchSeriesStats, MatchError>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };

    for i in 0..config.games {
        let player1_is_white = i % 2 == 0;
        let seed = config.base_seed.wrapping_add(u64::from(i / 2));
        let mut player1 = player1_factory();
        let mut player2 = player2_factory();

        let result = if player1_is_white {
            play_engine_match(player1.as_mut(), player2.as_mut(), seed, &config.per_game)?
        } else {
            play_engine_match(player2.as_mut(), player1.as_mut(), seed, &config.per_game)?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_white {
            (
                result.white_move_count,
                result.black_move_count,
                result.white_total_time_ns,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.white_move_count,
                result.black_total_time_ns,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let winner_color = match result.outcome {
            MatchOutcome::WhiteWin => Some(Player::White),
            MatchOutcome::BlackWin => Some(Player::Black),
            MatchOutcome::DrawMaxPlies => None,
        };
        let mapped = match winner_color {
            Some(color) => {
                let player1_won = (color == Player::White) == player1_is_white;
                if player1_won {
                    stats.player1_wins += 1;
                } else {
                    stats.player2_wins += 1;
                }
                SeriesOutcome::PlayerWin {
                    player: if player1_won {
                        PlayerId::Player1
                    } else {
                        PlayerId::Player2
                    },
                    color,
                }
            }
            None => {
                stats.draws += 1;
                SeriesOutcome::DrawMaxPlies
            }
        };
        stats.outcomes.push(mapped);

        info!(
            game = i + 1,
            of = config.games,
            seed,
            player1_white = player1_is_white,
            result = ?mapped,
            p1_wins = stats.player1_wins,
            p2_wins = stats.player2_wins,
            draws = stats.draws,
            "series game finished"
        );
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    mut state: GameState,
    rng: &mut StdRng,
    min_plies: u8,
    max_plies: u8,
) -> (GameState, Vec<String>) {
    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    let mut opening_moves = Vec::new();
    for _ in 0..target_plies {
        if state.winner().is_some() {
            break;
        }
        let mut text = String::new();
        loop {
            let legal: Vec<Move> = state.legal_moves().iter_moves().collect();
            let Some(&chosen) = legal.choose(rng) else {
                break;
            };
            push_step(&mut text, chosen);
            if state.apply(chosen).continuation.is_none() {
                break;
            }
        }
        opening_moves.push(text);
    }
    (state, opening_moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_alpha_beta::AlphaBetaEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::EngineOutput;
    use crate::errors::EngineResult;
    use crate::game_state::board::Board;
    use crate::game_state::checkers_types::{Cell, Position};

    struct StubbornEngine;

    impl Engine for StubbornEngine {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn set_option(&mut self, _name: &str, _value: &str) -> EngineResult<()> {
            Ok(())
        }

        fn choose_move(
            &mut self,
            _game_state: &GameState,
            _params: &SearchParams,
        ) -> EngineResult<EngineOutput> {
            Ok(EngineOutput {
                best_move: Some(Move::new(Position::new(5, 0), Position::new(2, 3))),
                ..EngineOutput::default()
            })
        }
    }

    #[test]
    fn random_vs_alpha_beta_runs() {
        let mut white = RandomEngine::with_seed(1);
        let mut black = AlphaBetaEngine::new(2);
        let result = play_engine_match(
            &mut white,
            &mut black,
            42,
            &MatchConfig {
                max_plies: 40,
                opening_min_plies: 2,
                opening_max_plies: 4,
                ..MatchConfig::default()
            },
        )
        .expect("match should run");

        assert!(!result.opening_moves.is_empty());
        assert!(result.white_move_count + result.black_move_count > 0);
        assert_eq!(
            result.played_moves.len() as u32,
            result.white_move_count + result.black_move_count
        );
    }

    #[test]
    fn finished_position_is_scored_immediately() {
        let mut board = Board::empty();
        board.set(Position::new(0, 1), Cell::Pawn(Player::White));
        board.set(Position::new(6, 1), Cell::Pawn(Player::Black));
        let start = GameState::from_board(board, Player::White, Player::White);

        let result = play_engine_match_from_state(
            &mut RandomEngine::with_seed(0),
            &mut RandomEngine::with_seed(0),
            start,
            &MatchConfig::default(),
        )
        .expect("match should run");
        assert_eq!(result.outcome, MatchOutcome::BlackWin);
        assert!(result.played_moves.is_empty());
    }

    #[test]
    fn chain_is_recorded_as_one_turn() {
        let mut board = Board::empty();
        board.set(Position::new(5, 2), Cell::Pawn(Player::White));
        board.set(Position::new(4, 3), Cell::Pawn(Player::Black));
        board.set(Position::new(2, 5), Cell::Pawn(Player::Black));
        let start = GameState::from_board(board, Player::White, Player::White);

        let result = play_engine_match_from_state(
            &mut AlphaBetaEngine::new(1),
            &mut AlphaBetaEngine::new(1),
            start,
            &MatchConfig::default(),
        )
        .expect("match should run");
        assert_eq!(result.played_moves, vec!["c3e5g7".to_owned()]);
        assert_eq!(result.outcome, MatchOutcome::WhiteWin);
    }

    #[test]
    fn illegal_engine_move_is_an_error() {
        let err = play_engine_match(
            &mut StubbornEngine,
            &mut RandomEngine::with_seed(3),
            0,
            &MatchConfig {
                opening_min_plies: 0,
                opening_max_plies: 0,
                ..MatchConfig::default()
            },
        )
        .expect_err("illegal move must be rejected");
        assert!(matches!(err, MatchError::IllegalMove { player: Player::White, .. }));
    }

    #[test]
    fn series_alternates_colors() {
        let stats = play_engine_match_series(
            || Box::new(AlphaBetaEngine::new(1)),
            || Box::new(RandomEngine::with_seed(9)),
            &MatchSeriesConfig {
                games: 4,
                base_seed: 777,
                per_game: MatchConfig {
                    max_plies: 16,
                    opening_min_plies: 1,
                    opening_max_plies: 3,
                    ..MatchConfig::default()
                },
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 4);
        assert_eq!(stats.outcomes.len(), 4);
        assert_eq!(stats.player1_wins + stats.player2_wins + stats.draws, 4);
        assert!(stats.overall_avg_move_time_ms >= 0.0);
        for (i, outcome) in stats.outcomes.iter().enumerate() {
            if let SeriesOutcome::PlayerWin { player, color } = outcome {
                let player1_white = i % 2 == 0;
                let expected = if (*color == Player::White) == player1_white {
                    PlayerId::Player1
                } else {
                    PlayerId::Player2
                };
                assert_eq!(*player, expected);
            }
        }
    }
}
