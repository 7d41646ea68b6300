//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --depth-a 5 --depth-b 3 --verbose`

use clap::Parser;

use plum_checkers::engines::engine_alpha_beta::AlphaBetaEngine;
use plum_checkers::engines::engine_random::RandomEngine;
use plum_checkers::engines::engine_trait::Engine;
use plum_checkers::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};
use plum_checkers::utils::logging::init_tracing;

/// Play a series of games between two engine configurations
#[derive(Parser, Debug)]
#[command(name = "engine_match_series")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of games; player 1 alternates between White and Black
    #[arg(long, default_value_t = 10)]
    games: u16,

    /// Search depth of player 1
    #[arg(long, default_value_t = 5)]
    depth_a: u8,

    /// Search depth of player 2
    #[arg(long, default_value_t = 3)]
    depth_b: u8,

    /// Make player 2 a random mover instead of an alpha-beta engine
    #[arg(long)]
    random_b: bool,

    /// Turns before a game is called a draw
    #[arg(long, default_value_t = 200)]
    max_plies: u16,

    /// Base seed for the random openings
    #[arg(long, default_value_t = 1234)]
    seed: u64,

    /// Log every finished game
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose.then_some("info"))?;

    let depth_a = cli.depth_a;
    let depth_b = cli.depth_b;
    let random_b = cli.random_b;
    let seed = cli.seed;

    let player1 = || Box::new(AlphaBetaEngine::new(depth_a)) as Box<dyn Engine>;
    let player2 = || {
        if random_b {
            Box::new(RandomEngine::with_seed(seed)) as Box<dyn Engine>
        } else {
            Box::new(AlphaBetaEngine::new(depth_b)) as Box<dyn Engine>
        }
    };

    let stats = play_engine_match_series(
        player1,
        player2,
        &MatchSeriesConfig {
            games: cli.games,
            base_seed: seed,
            per_game: MatchConfig {
                max_plies: cli.max_plies,
                opening_min_plies: 1,
                opening_max_plies: 4,
                ..MatchConfig::default()
            },
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
