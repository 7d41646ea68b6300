//! Authoritative state of one checkers game.
//!
//! `GameState` owns the live board plus the turn bookkeeping around it: who
//! moves, which piece must keep capturing, and the status line shown to the
//! player. Only the controller mutates it; engines receive `&GameState`.

use crate::game_state::board::Board;
use crate::game_state::checkers_rules::Difficulty;
use crate::game_state::checkers_types::{Move, Player, Position};
use crate::move_generation::legal_move_apply::{apply_move, AppliedMove};
use crate::move_generation::legal_move_generator::{collect_player_moves, PlayerMoves};

/// Where the turn state machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingSelection,
    AwaitingDestination(Position),
    /// The winner; the side to move has nothing left to play.
    GameOver(Player),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub current_player: Player,
    /// Piece that must continue a capture chain before the turn can pass.
    pub forced_capture: Option<Position>,
    pub status_message: String,
    pub player_color: Player,
    pub ai_color: Player,
    pub ai_search_depth: u8,
    pub difficulty: Difficulty,
    pub selected: Option<Position>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Difficulty::default(), Player::White)
    }
}

impl GameState {
    /// Standard layout, White to move.
    pub fn new(difficulty: Difficulty, human_color: Player) -> Self {
        Self {
            board: Board::starting(),
            current_player: Player::White,
            forced_capture: None,
            status_message: turn_message(Player::White),
            player_color: human_color,
            ai_color: human_color.opposite(),
            ai_search_depth: difficulty.search_depth(),
            difficulty,
            selected: None,
        }
    }

    /// Arbitrary position, used by tests and position setup.
    pub fn from_board(board: Board, side_to_move: Player, human_color: Player) -> Self {
        Self {
            board,
            current_player: side_to_move,
            status_message: turn_message(side_to_move),
            ..Self::new(Difficulty::default(), human_color)
        }
    }

    /// Legal moves of the side to move, honoring the pending chain.
    pub fn legal_moves(&self) -> PlayerMoves {
        collect_player_moves(&self.board, self.current_player, self.forced_capture)
    }

    /// Winner, once the side to move has no move and no chain is pending.
    pub fn winner(&self) -> Option<Player> {
        if self.forced_capture.is_none() && self.legal_moves().is_empty() {
            Some(self.current_player.opposite())
        } else {
            None
        }
    }

    pub fn phase(&self) -> TurnPhase {
        if let Some(winner) = self.winner() {
            return TurnPhase::GameOver(winner);
        }
        match self.selected.or(self.forced_capture) {
            Some(pos) => TurnPhase::AwaitingDestination(pos),
            None => TurnPhase::AwaitingSelection,
        }
    }

    /// Apply an already validated step for the side to move and advance
    /// the turn bookkeeping. The status line is left to the caller.
    pub fn apply(&mut self, mv: Move) -> AppliedMove {
        let applied = apply_move(&self.board, mv, self.current_player);
        self.board = applied.board;
        self.forced_capture = applied.continuation;
        self.current_player = applied.next_player;
        self.selected = None;
        applied
    }

    #[inline]
    pub fn is_human_turn(&self) -> bool {
        self.current_player == self.player_color
    }
}

pub(crate) fn turn_message(player: Player) -> String {
    format!("{} to move.", player.name())
}

pub(crate) fn game_over_message(winner: Player) -> String {
    format!(
        "Game over! {} wins! {} has no moves.",
        winner.name(),
        winner.opposite().name()
    )
}
