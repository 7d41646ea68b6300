//! Core value types shared by the rules engine, search and controller.
//!
//! Everything here is `Copy` so boards and moves can be duplicated freely
//! between the live game and search simulations.

use std::fmt;
use std::str::FromStr;

use crate::game_state::checkers_rules::BOARD_SIZE;

/// Side to move. White starts and moves toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Player {
    White,
    Black,
}

impl Player {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Row delta of a forward step.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Player::White => -1,
            Player::Black => 1,
        }
    }

    /// Row on which this player's pawns are promoted.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        match self {
            Player::White => 0,
            Player::Black => BOARD_SIZE - 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Player::White => "White",
            Player::Black => "Black",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Player::White),
            "black" | "b" => Ok(Player::Black),
            other => Err(format!("unknown color '{other}'")),
        }
    }
}

/// Content of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Pawn(Player),
    King(Player),
}

impl Cell {
    #[inline]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Pawn(p) | Cell::King(p) => Some(p),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self, Cell::King(_))
    }
}

/// Board coordinate. Signed so direction arithmetic can step off the board
/// and be rejected by [`Position::is_on_board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// Only dark squares ever hold pieces.
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            let file = char::from(b'a' + self.col as u8);
            write!(f, "{}{}", file, BOARD_SIZE - self.row)
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}

/// A single jump or step. Whether it captures is derived from its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub start: Position,
    pub end: Position,
}

impl Move {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Number of diagonal steps between start and end.
    #[inline]
    pub fn distance(self) -> i8 {
        (self.end.row - self.start.row)
            .abs()
            .max((self.end.col - self.start.col).abs())
    }

    /// Unit step from start toward end.
    #[inline]
    pub fn direction(self) -> (i8, i8) {
        (
            (self.end.row - self.start.row).signum(),
            (self.end.col - self.start.col).signum(),
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)
    }
}
