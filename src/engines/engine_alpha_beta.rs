//! Fixed-depth alpha-beta engine.
//!
//! Wraps `search::minimax::choose_move` with material scoring. The default
//! depth comes from the difficulty level and applies only when a request
//! carries no depth of its own; `Depth` and `Threads` options tune it at
//! runtime.

use tracing::info;

use crate::engines::engine_trait::{Engine, EngineOutput, SearchParams};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::MaterialScorer;
use crate::search::minimax::{choose_move, SearchConfig};

pub const MAX_DEPTH: u8 = 12;
pub const MAX_THREADS: usize = 64;

pub struct AlphaBetaEngine {
    default_depth: u8,
    threads: usize,
    scorer: MaterialScorer,
}

impl AlphaBetaEngine {
    pub fn new(default_depth: u8) -> Self {
        Self {
            default_depth: default_depth.clamp(1, MAX_DEPTH),
            threads: 1,
            scorer: MaterialScorer,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.clamp(1, MAX_THREADS);
        self
    }

    pub fn default_depth(&self) -> u8 {
        self.default_depth
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

fn parse_in_range<T>(name: &str, value: &str, range: std::ops::RangeInclusive<T>) -> EngineResult<T>
where
    T: std::str::FromStr + PartialOrd,
{
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|parsed| range.contains(parsed))
        .ok_or_else(|| EngineError::InvalidOptionValue {
            name: name.to_owned(),
            value: value.to_owned(),
        })
}

impl Engine for AlphaBetaEngine {
    fn name(&self) -> &str {
        "Plum Checkers AlphaBeta"
    }

    fn set_option(&mut self, name: &str, value: &str) -> EngineResult<()> {
        if name.eq_ignore_ascii_case("Depth") {
            self.default_depth = parse_in_range(name, value, 1..=MAX_DEPTH)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Threads") {
            self.threads = parse_in_range(name, value, 1..=MAX_THREADS)?;
            return Ok(());
        }
        Err(EngineError::UnknownOption(name.to_owned()))
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &SearchParams,
    ) -> EngineResult<EngineOutput> {
        let depth = params.depth.unwrap_or(self.default_depth).max(1);
        let result = choose_move(
            &game_state.board,
            game_state.current_player,
            game_state.forced_capture,
            &self.scorer,
            SearchConfig {
                max_depth: depth,
                threads: self.threads,
            },
        );

        if let Some(mv) = result.best_move {
            info!(
                player = %game_state.current_player,
                %mv,
                score = result.best_score,
                depth,
                nodes = result.stats.nodes,
                "engine chose move"
            );
        }

        let mut out = EngineOutput {
            best_move: result.best_move,
            score: result.best_move.map(|_| result.best_score),
            nodes: result.stats.nodes,
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} score {} nodes {} cutoffs {}",
            depth, result.best_score, result.stats.nodes, result.stats.cutoffs
        ));
        out.info_lines.push(format!(
            "info string alpha_beta candidates {} threads {}",
            result.root_scores.len(),
            self.threads
        ));
        Ok(out)
    }
}
