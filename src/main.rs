//! Plum Checkers: play checkers against the alpha-beta engine in a terminal.
//!
//! ## Usage
//!
//! - `plum_checkers` - medium difficulty, you play White
//! - `plum_checkers --difficulty hard --color black`
//! - `RUST_LOG=info plum_checkers` - log engine decisions to stderr

use anyhow::Context;
use clap::Parser;

use plum_checkers::game_state::checkers_rules::Difficulty;
use plum_checkers::game_state::checkers_types::Player;
use plum_checkers::protocol::text_protocol::{run_stdio_loop, ProtocolOptions};
use plum_checkers::utils::logging::init_tracing;

/// Play checkers against a minimax engine from the terminal
#[derive(Parser, Debug)]
#[command(name = "plum_checkers")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Engine strength (search depth 1, 3 or 5)
    #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Color you play; White moves first
    #[arg(short, long, value_enum, default_value_t = Player::White)]
    color: Player,

    /// Worker threads for the engine's root search
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=64))]
    threads: u16,

    /// Log filter, e.g. `info` or `plum_checkers=debug` (defaults to RUST_LOG, then `warn`)
    #[arg(long)]
    log_level: Option<String>,

    /// Do not let the engine answer automatically after your move
    #[arg(long)]
    no_auto_reply: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    run_stdio_loop(ProtocolOptions {
        difficulty: cli.difficulty,
        human_color: cli.color,
        threads: usize::from(cli.threads),
        auto_reply: !cli.no_auto_reply,
    })
    .context("text protocol loop failed")
}
