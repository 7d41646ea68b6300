//! 8×8 board model and the ownership predicates the rules are built on.
//!
//! A `Board` is a plain `Copy` value. The live game owns one instance and
//! every search branch works on its own copy, so nothing is ever aliased
//! between play and lookahead.

use crate::game_state::checkers_rules::{BLACK_START_ROWS, BOARD_SIZE, WHITE_START_ROWS};
use crate::game_state::checkers_types::{Cell, Player, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Standard layout: Black pawns on the dark squares of rows 0–2, White
    /// pawns on rows 5–7.
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                if !pos.is_dark() {
                    continue;
                }
                if BLACK_START_ROWS.contains(&row) {
                    board.set(pos, Cell::Pawn(Player::Black));
                } else if WHITE_START_ROWS.contains(&row) {
                    board.set(pos, Cell::Pawn(Player::White));
                }
            }
        }
        board
    }

    /// Cell at `pos`, or `None` off the board.
    #[inline]
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if pos.is_on_board() {
            Some(self.cells[pos.row as usize][pos.col as usize])
        } else {
            None
        }
    }

    /// Overwrite a square. Off-board writes are ignored.
    #[inline]
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if pos.is_on_board() {
            self.cells[pos.row as usize][pos.col as usize] = cell;
        }
    }

    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        matches!(self.cell(pos), Some(Cell::Empty))
    }

    /// Squares holding `player`'s pieces, in row-major order.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.squares()
            .filter_map(move |pos| match self.cell(pos) {
                Some(cell) if cell.owner() == Some(player) => Some((pos, cell)),
                _ => None,
            })
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces(player).count()
    }

    pub fn count_kings(&self, player: Player) -> usize {
        self.pieces(player).filter(|(_, cell)| cell.is_king()).count()
    }

    fn squares(&self) -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

/// True if `pos` holds a pawn or king of `player`. False off the board.
#[inline]
pub fn owns(pos: Position, player: Player, board: &Board) -> bool {
    board.cell(pos).and_then(Cell::owner) == Some(player)
}

/// True if `pos` holds a piece of `player`'s opponent. False off the board.
#[inline]
pub fn enemy_owns(pos: Position, player: Player, board: &Board) -> bool {
    owns(pos, player.opposite(), board)
}
