//! Position: everything the rules need to generate and apply moves
//!
//! A `Position` is a plain `Copy` value. The recorded game (`GameState`)
//! wraps one together with its history and outcome; the search engine
//! copies positions freely and never touches the game it was asked about.

use serde::{Deserialize, Serialize};

use crate::board::{Bitboard, Board, Pos, Side};

use super::win::{check_winner, Outcome};

/// Where the side to move stands within its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Any piece of the side to move may move
    #[default]
    Normal,
    /// A capture chain is under way: only the piece on `square` may move,
    /// and only by capturing. `captured` holds the squares taken earlier in
    /// this chain; a sultan may pass over them but never lands on them.
    ForcedContinuation { square: Pos, captured: Bitboard },
}

impl TurnPhase {
    /// Square of the piece mid-chain, if any
    #[inline]
    pub fn jumping_piece(&self) -> Option<Pos> {
        match self {
            TurnPhase::Normal => None,
            TurnPhase::ForcedContinuation { square, .. } => Some(*square),
        }
    }

    /// Squares excluded from further capture this turn
    #[inline]
    pub fn captured(&self) -> Bitboard {
        match self {
            TurnPhase::Normal => Bitboard::new(),
            TurnPhase::ForcedContinuation { captured, .. } => *captured,
        }
    }
}

/// Board plus turn bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    pub turn: Side,
    pub phase: TurnPhase,
    /// Enemy pieces removed by each side
    pub black_captures: u8,
    pub white_captures: u8,
}

impl Position {
    /// Starting position with `starting_side` to move
    pub fn initial(starting_side: Side) -> Self {
        Self::from_board(Board::initial(), starting_side)
    }

    /// Arbitrary setup with no chain in progress and no captures counted
    pub fn from_board(board: Board, turn: Side) -> Self {
        Self {
            board,
            turn,
            phase: TurnPhase::Normal,
            black_captures: 0,
            white_captures: 0,
        }
    }

    /// Get capture count for a side
    #[inline]
    pub fn captures(&self, side: Side) -> u8 {
        match side {
            Side::Black => self.black_captures,
            Side::White => self.white_captures,
        }
    }

    /// Add one capture for a side (saturating)
    #[inline]
    pub fn add_capture(&mut self, side: Side) {
        match side {
            Side::Black => self.black_captures = self.black_captures.saturating_add(1),
            Side::White => self.white_captures = self.white_captures.saturating_add(1),
        }
    }

    /// Outcome by elimination, if any
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        check_winner(&self.board)
    }

    /// Check the mid-chain marker invariant: the marked square holds a piece
    /// of the side to move.
    pub fn is_consistent(&self) -> bool {
        match self.phase.jumping_piece() {
            None => true,
            Some(square) => {
                square.is_on_board()
                    && matches!(self.board.get(square), Some(p) if p.side == self.turn)
            }
        }
    }
}
