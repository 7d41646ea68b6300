//! Turn state machine around the authoritative `GameState`.
//!
//! The controller validates and commits moves for whoever is to move, keeps
//! the forced-capture bookkeeping consistent, and asks the configured engine
//! for the computer side's moves. Presentation layers talk only to this type.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::engines::engine_alpha_beta::MAX_DEPTH;
use crate::engines::engine_trait::{build_engine, Engine, SearchParams};
use crate::errors::{MoveError, MoveResult};
use crate::game_state::board::Board;
use crate::game_state::checkers_rules::Difficulty;
use crate::game_state::checkers_types::{Move, Player, Position};
use crate::game_state::game_state::{game_over_message, turn_message, GameState, TurnPhase};

const CONTINUE_CAPTURING: &str = "You must continue capturing!";
const PROMOTION_NOTE: &str = "Pawn promoted to king!";

/// What a committed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub was_capture: bool,
    pub promoted: bool,
    /// Square the same piece must capture from next, if the chain goes on.
    pub continuation: Option<Position>,
    pub next_player: Player,
    pub winner: Option<Player>,
}

pub struct GameController {
    state: GameState,
    engine: Box<dyn Engine>,
}

impl GameController {
    pub fn new_game(difficulty: Difficulty, human_color: Player) -> Self {
        info!(%difficulty, human = %human_color, "new game");
        Self {
            state: GameState::new(difficulty, human_color),
            engine: build_engine(difficulty, 1),
        }
    }

    /// Take over an existing position with a custom engine.
    pub fn from_state(state: GameState, engine: Box<dyn Engine>) -> Self {
        Self { state, engine }
    }

    pub fn reset(&mut self, difficulty: Difficulty, human_color: Player) {
        info!(%difficulty, human = %human_color, "game reset");
        self.state = GameState::new(difficulty, human_color);
        self.engine = build_engine(difficulty, 1);
        self.engine.new_game();
    }

    pub fn set_engine(&mut self, mut engine: Box<dyn Engine>) {
        engine.new_game();
        self.engine = engine;
    }

    pub fn engine_mut(&mut self) -> &mut dyn Engine {
        self.engine.as_mut()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board_snapshot(&self) -> Board {
        self.state.board
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player
    }

    pub fn human_color(&self) -> Player {
        self.state.player_color
    }

    pub fn engine_color(&self) -> Player {
        self.state.ai_color
    }

    pub fn status_message(&self) -> &str {
        &self.state.status_message
    }

    pub fn forced_capture(&self) -> Option<Position> {
        self.state.forced_capture
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    /// Plies the engine searches; starts at the difficulty's depth.
    pub fn search_depth(&self) -> u8 {
        self.state.ai_search_depth
    }

    pub fn set_search_depth(&mut self, depth: u8) {
        self.state.ai_search_depth = depth.clamp(1, MAX_DEPTH);
        debug!(depth = self.state.ai_search_depth, "search depth set");
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    pub fn is_game_over(&self) -> Option<Player> {
        self.state.winner()
    }

    /// Destinations to highlight for the piece on `pos`. Empty when the
    /// piece is not allowed to move under the capture rules.
    pub fn legal_destinations(&self, pos: Position) -> BTreeSet<Position> {
        self.state
            .legal_moves()
            .destinations_from(pos)
            .cloned()
            .unwrap_or_default()
    }

    /// First half of a move. The piece is remembered only when it has
    /// somewhere to go.
    pub fn select_piece(&mut self, pos: Position) -> MoveResult<BTreeSet<Position>> {
        let checked = self.check_source(pos).and_then(|()| {
            let destinations = self.legal_destinations(pos);
            if destinations.is_empty() && self.state.legal_moves().must_capture {
                Err(MoveError::CaptureRequired)
            } else {
                Ok(destinations)
            }
        });

        match checked {
            Ok(destinations) => {
                self.state.selected = (!destinations.is_empty()).then_some(pos);
                Ok(destinations)
            }
            Err(err) => {
                self.state.selected = None;
                self.state.status_message = err.to_string();
                Err(err)
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.state.selected = None;
    }

    /// Check a candidate move without applying it. A refusal also becomes
    /// the status message.
    pub fn validate_move(&mut self, start: Position, end: Position) -> MoveResult<()> {
        let checked = self.check_move(start, end);
        if let Err(err) = &checked {
            debug!(%start, %end, reason = %err, "move refused");
            self.state.status_message = err.to_string();
        }
        checked
    }

    /// Validate and apply one jump or step for the side to move.
    pub fn commit_move(&mut self, start: Position, end: Position) -> MoveResult<MoveOutcome> {
        self.validate_move(start, end)?;

        let mover = self.state.current_player;
        let mv = Move::new(start, end);
        let applied = self.state.apply(mv);

        let winner = self.state.winner();
        let mut message = match (applied.continuation, winner) {
            (Some(_), _) => CONTINUE_CAPTURING.to_owned(),
            (None, Some(winner)) => game_over_message(winner),
            (None, None) => turn_message(applied.next_player),
        };
        if applied.promoted {
            message = format!("{PROMOTION_NOTE} {message}");
        }
        self.state.status_message = message;

        info!(
            player = %mover,
            %mv,
            capture = applied.was_capture,
            promoted = applied.promoted,
            "move committed"
        );
        if let Some(square) = applied.continuation {
            debug!(%square, "capture chain continues");
        }
        if let Some(winner) = winner {
            info!(%winner, "game over");
        }

        Ok(MoveOutcome {
            mv,
            was_capture: applied.was_capture,
            promoted: applied.promoted,
            continuation: applied.continuation,
            next_player: applied.next_player,
            winner,
        })
    }

    /// Ask the engine for the side to move. `None` once the game is over or
    /// when the engine fails.
    pub fn engine_choose_move(&mut self) -> Option<Move> {
        if self.state.winner().is_some() {
            return None;
        }
        let params = SearchParams {
            depth: Some(self.state.ai_search_depth),
        };
        match self.engine.choose_move(&self.state, &params) {
            Ok(output) => output.best_move,
            Err(err) => {
                warn!(engine = self.engine.name(), %err, "engine failed to choose a move");
                None
            }
        }
    }

    /// Choose and commit one engine step.
    pub fn play_engine_move(&mut self) -> Option<MoveOutcome> {
        let mv = self.engine_choose_move()?;
        match self.commit_move(mv.start, mv.end) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                warn!(%mv, %err, "engine proposed an illegal move");
                None
            }
        }
    }

    /// Play engine steps until the turn passes, covering a whole capture
    /// chain.
    pub fn play_engine_turn(&mut self) -> Vec<MoveOutcome> {
        let mut steps = Vec::new();
        while let Some(outcome) = self.play_engine_move() {
            steps.push(outcome);
            if outcome.continuation.is_none() {
                break;
            }
        }
        steps
    }

    fn check_source(&self, pos: Position) -> MoveResult<()> {
        check_on_board(pos)?;
        let owner = self
            .state
            .board
            .cell(pos)
            .and_then(|cell| cell.owner())
            .ok_or(MoveError::EmptySource(pos))?;
        if owner != self.state.current_player {
            return Err(MoveError::NotYourPiece(pos));
        }
        match self.state.forced_capture {
            Some(required) if required != pos => {
                Err(MoveError::ForcedCaptureViolation { required })
            }
            _ => Ok(()),
        }
    }

    fn check_move(&self, start: Position, end: Position) -> MoveResult<()> {
        check_on_board(start)?;
        check_on_board(end)?;

        let owner = self
            .state
            .board
            .cell(start)
            .and_then(|cell| cell.owner())
            .ok_or(MoveError::EmptySource(start))?;
        if owner != self.state.current_player {
            return Err(MoveError::NotYourPiece(start));
        }
        if !self.state.board.is_empty_at(end) {
            return Err(MoveError::DestinationOccupied(end));
        }
        if let Some(required) = self.state.forced_capture {
            if required != start {
                return Err(MoveError::ForcedCaptureViolation { required });
            }
        }

        let moves = self.state.legal_moves();
        if moves.contains(Move::new(start, end)) {
            Ok(())
        } else if moves.must_capture {
            Err(MoveError::CaptureRequired)
        } else {
            Err(MoveError::NotALegalDestination { start, end })
        }
    }
}

fn check_on_board(pos: Position) -> MoveResult<()> {
    if pos.is_on_board() {
        Ok(())
    } else {
        Err(MoveError::OutOfBounds {
            row: pos.row,
            col: pos.col,
        })
    }
}
