//! Errors used throughout the checkers engine.
//!
//! Every variant is recoverable: the rules engine refuses an illegal move
//! by returning one of these values, it never panics on bad input.

use crate::game_state::checkers_types::{Move, Player, Position};

/// Reasons a candidate move is refused by the game controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// A coordinate lies outside the 8×8 grid.
    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: i8, col: i8 },

    /// No piece on the chosen source square.
    #[error("there is no piece on {0}")]
    EmptySource(Position),

    /// The source square holds an opponent piece.
    #[error("the piece on {0} is not yours")]
    NotYourPiece(Position),

    /// Moves always land on an empty square.
    #[error("destination {0} is occupied")]
    DestinationOccupied(Position),

    /// A capture chain is pending and a different piece was chosen.
    #[error("you must continue capturing with the piece on {required}")]
    ForcedCaptureViolation { required: Position },

    /// A non-capturing move was chosen while a capture is available.
    #[error("a capture is available and must be taken")]
    CaptureRequired,

    /// Structurally valid but not allowed by the movement rules.
    #[error("{start} to {end} is not a legal move")]
    NotALegalDestination { start: Position, end: Position },
}

pub type MoveResult<T> = Result<T, MoveError>;

/// Engine configuration and selection failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown engine option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOptionValue { name: String, value: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Malformed square or move text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid move '{0}'")]
    InvalidMove(String),
}

/// Failures while two engines play each other.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("{engine} playing {player} proposed illegal move {mv}")]
    IllegalMove {
        engine: String,
        player: Player,
        mv: Move,
    },
}

/// A text command that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    InvalidArgument(String),
}
