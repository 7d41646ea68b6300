//! Engine abstraction layer used by the controller and the text front-end.
//!
//! Defines common input parameters and output payloads so different move
//! pickers can be selected at runtime behind a single trait interface.

use crate::engines::engine_alpha_beta::AlphaBetaEngine;
use crate::errors::EngineResult;
use crate::game_state::checkers_rules::Difficulty;
use crate::game_state::checkers_types::Move;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Overrides the engine's configured depth for one request.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// One step of the turn; a capture chain needs one request per jump.
    pub best_move: Option<Move>,
    pub score: Option<i32>,
    pub nodes: u64,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, value: &str) -> EngineResult<()>;

    /// Pick a move for `game_state.current_player`, honoring any pending
    /// capture chain.
    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &SearchParams,
    ) -> EngineResult<EngineOutput>;
}

/// Computer opponent for a difficulty level.
pub fn build_engine(difficulty: Difficulty, threads: usize) -> Box<dyn Engine> {
    Box::new(AlphaBetaEngine::new(difficulty.search_depth()).with_threads(threads))
}
