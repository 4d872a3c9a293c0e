//! Applying one step to a position
//!
//! The turn phase is a two-state machine: `Normal` and
//! `ForcedContinuation(square)`. A capture that leaves the same piece with
//! another capture keeps the turn and enters (or stays in) the continuation
//! phase; anything else returns to `Normal`, promotes the piece if it ended
//! on the far row, and passes the turn. Promotion is therefore never granted
//! in the middle of a chain.

use crate::board::{Piece, Pos};

use super::movegen::{find_move, has_capture_from, Move};
use super::position::{Position, TurnPhase};

impl Position {
    /// Apply a move taken from `legal_moves(self)`.
    ///
    /// No legality check is done here; use [`Position::try_play`] for
    /// untrusted input.
    #[must_use]
    pub fn play(&self, mv: &Move) -> Position {
        let mut next = *self;
        let Some(mut piece) = next.board.take(mv.from) else {
            return *self;
        };

        let mut captured = self.phase.captured();
        if let Some(square) = mv.captured {
            next.board.remove(square);
            next.add_capture(mv.side);
            captured.set(square);
        }
        next.board.place(mv.to, piece);

        let continues = mv.captured.is_some() && has_capture_from(&next.board, mv.to, captured);
        if continues {
            next.phase = TurnPhase::ForcedContinuation {
                square: mv.to,
                captured,
            };
            debug_assert!(next.is_consistent());
            return next;
        }

        if !piece.sultan && mv.to.row == piece.side.promotion_row() {
            piece = Piece::sultan(piece.side);
            next.board.place(mv.to, piece);
        }
        next.phase = TurnPhase::Normal;
        next.turn = self.turn.opponent();
        next
    }

    /// Validate `from` -> `to` against the legal set and apply it.
    ///
    /// Returns `None` for anything not currently legal, including
    /// coordinates off the board.
    pub fn try_play(&self, from: Pos, to: Pos) -> Option<(Move, Position)> {
        let mv = find_move(self, from, to)?;
        Some((mv, self.play(&mv)))
    }
}
