use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use plum_checkers::game_state::board::Board;
use plum_checkers::game_state::checkers_types::{Move, Player, Position};
use plum_checkers::move_generation::legal_move_apply::apply_move;
use plum_checkers::search::board_scoring::MaterialScorer;
use plum_checkers::search::minimax::{
    alpha_beta, choose_move, minimax, SearchConfig, SearchStats, SCORE_INFINITY,
};

#[derive(Clone, Copy)]
struct PerfCase {
    name: &'static str,
    /// Opening steps from the start position, applied alternately.
    opening: &'static [((i8, i8), (i8, i8))],
}

const CASES: &[PerfCase] = &[
    PerfCase {
        name: "startpos",
        opening: &[],
    },
    PerfCase {
        name: "exchange",
        opening: &[((5, 2), (4, 3)), ((2, 5), (3, 4))],
    },
];

fn board_for(case: &PerfCase) -> (Board, Player) {
    let mut board = Board::starting();
    let mut player = Player::White;
    for &((sr, sc), (er, ec)) in case.opening {
        let mv = Move::new(Position::new(sr, sc), Position::new(er, ec));
        let applied = apply_move(&board, mv, player);
        board = applied.board;
        player = applied.next_player;
    }
    (board, player)
}

fn search_depth() -> u8 {
    std::env::var("PLUM_SEARCH_DEPTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5)
}

fn bench_pruning(c: &mut Criterion) {
    let depth = search_depth();
    let mut group = c.benchmark_group("alpha_beta_vs_minimax");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for case in CASES {
        let (board, player) = board_for(case);

        // Correctness guard: pruning must not change the value.
        let mut pruned = SearchStats::default();
        let mut full = SearchStats::default();
        let pruned_score = alpha_beta(
            &board,
            depth,
            true,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            player,
            None,
            &MaterialScorer,
            &mut pruned,
        );
        let full_score = minimax(&board, depth, true, player, None, &MaterialScorer, &mut full);
        assert_eq!(pruned_score, full_score, "score mismatch for {}", case.name);
        println!(
            "{} depth {}: alpha_beta nodes {} minimax nodes {}",
            case.name, depth, pruned.nodes, full.nodes
        );

        group.bench_with_input(BenchmarkId::new("alpha_beta", case.name), &board, |b, board| {
            b.iter(|| {
                let mut stats = SearchStats::default();
                black_box(alpha_beta(
                    black_box(board),
                    depth,
                    true,
                    -SCORE_INFINITY,
                    SCORE_INFINITY,
                    player,
                    None,
                    &MaterialScorer,
                    &mut stats,
                ))
            });
        });
        group.bench_with_input(BenchmarkId::new("minimax", case.name), &board, |b, board| {
            b.iter(|| {
                let mut stats = SearchStats::default();
                black_box(minimax(
                    black_box(board),
                    depth,
                    true,
                    player,
                    None,
                    &MaterialScorer,
                    &mut stats,
                ))
            });
        });
    }

    group.finish();
}

fn bench_root_threads(c: &mut Criterion) {
    let depth = search_depth();
    let mut group = c.benchmark_group("choose_move_threads");
    group.sample_size(10);

    let (board, player) = board_for(&CASES[0]);
    let single = choose_move(
        &board,
        player,
        None,
        &MaterialScorer,
        SearchConfig {
            max_depth: depth,
            threads: 1,
        },
    );

    for threads in [1usize, 2, 4] {
        let config = SearchConfig {
            max_depth: depth,
            threads,
        };
        let result = choose_move(&board, player, None, &MaterialScorer, config);
        assert_eq!(result.best_move, single.best_move);

        group.bench_with_input(BenchmarkId::from_parameter(threads), &config, |b, config| {
            b.iter(|| black_box(choose_move(black_box(&board), player, None, &MaterialScorer, *config)))
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_pruning, bench_root_threads);
criterion_main!(search_benches);
