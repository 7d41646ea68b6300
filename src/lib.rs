//! Crate root module declarations for the Plum Checkers engine project.
//!
//! This file exposes all top-level subsystems (board model, move generation,
//! search, engines, the game controller, the text protocol and utility
//! helpers) so binaries, tests and benchmarks can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod checkers_rules;
    pub mod checkers_types;
    pub mod game_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod engines {
    pub mod engine_alpha_beta;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod controller {
    pub mod game_controller;
}

pub mod protocol {
    pub mod text_protocol;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod logging;
    pub mod notation;
    pub mod render_game_state;
}
