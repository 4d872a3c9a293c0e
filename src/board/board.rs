//! Board storage: 81 cells of optional pieces, copied by value

use serde::{Deserialize, Serialize};

use super::{Piece, Pos, Side, BOARD_SIZE, TOTAL_CELLS};
use crate::error::DamaError;

/// Game board.
///
/// Cells are indexed by `Pos::to_index`. The board is `Copy` so search
/// branches each get their own value and nothing is shared with the game
/// being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "BoardRows", try_from = "BoardRows")]
pub struct Board {
    cells: [Option<Piece>; TOTAL_CELLS],
}

/// Row-major nested encoding used for persistence
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct BoardRows(Vec<Vec<Option<Piece>>>);

impl Board {
    /// Empty board
    pub const fn new() -> Self {
        Self {
            cells: [None; TOTAL_CELLS],
        }
    }

    /// Starting setup: four home rows per side plus four squares of the
    /// middle row each, leaving only the center (4,4) empty.
    pub fn initial() -> Self {
        let mut board = Self::new();
        let mid = (BOARD_SIZE / 2) as u8;
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let side = if row < mid || (row == mid && col < mid) {
                    Side::Black
                } else if row > mid || (row == mid && col > mid) {
                    Side::White
                } else {
                    continue;
                };
                board.place(Pos::new(row, col), Piece::regular(side));
            }
        }
        board
    }

    /// Get piece at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        self.cells[pos.to_index()]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cells[pos.to_index()].is_none()
    }

    /// Put a piece on a square, replacing whatever was there
    #[inline]
    pub fn place(&mut self, pos: Pos, piece: Piece) {
        self.cells[pos.to_index()] = Some(piece);
    }

    /// Remove and return the piece on a square
    #[inline]
    pub fn take(&mut self, pos: Pos) -> Option<Piece> {
        self.cells[pos.to_index()].take()
    }

    /// Remove a piece
    #[inline]
    pub fn remove(&mut self, pos: Pos) {
        self.cells[pos.to_index()] = None;
    }

    /// Iterate over occupied squares
    pub fn pieces(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|piece| (Pos::from_index(idx), piece)))
    }

    /// Iterate over one side's pieces
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.side == side)
    }

    /// Number of pieces a side has left
    #[inline]
    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Some(p) if p.side == side))
            .count()
    }

    /// Total pieces on board
    #[inline]
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Board> for BoardRows {
    fn from(board: Board) -> Self {
        BoardRows(
            board
                .cells
                .chunks(BOARD_SIZE)
                .map(|row| row.to_vec())
                .collect(),
        )
    }
}

impl TryFrom<BoardRows> for Board {
    type Error = DamaError;

    fn try_from(rows: BoardRows) -> Result<Self, Self::Error> {
        if rows.0.len() != BOARD_SIZE {
            return Err(DamaError::MalformedBoard {
                message: format!("expected {} rows, found {}", BOARD_SIZE, rows.0.len()),
            });
        }
        let mut board = Board::new();
        for (row, cells) in rows.0.into_iter().enumerate() {
            if cells.len() != BOARD_SIZE {
                return Err(DamaError::MalformedBoard {
                    message: format!("row {} has {} cells", row, cells.len()),
                });
            }
            for (col, cell) in cells.into_iter().enumerate() {
                if let Some(piece) = cell {
                    board.place(Pos::new(row as u8, col as u8), piece);
                }
            }
        }
        Ok(board)
    }
}
