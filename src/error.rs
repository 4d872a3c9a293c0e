//! Error types for the Dama engine
//!
//! Expected control flow (an illegal click, a side with no moves) is not an
//! error at the engine level: `apply_move` hands back the unchanged state and
//! `best_move` returns `None`. These variants are what the controller,
//! persistence and configuration layers report to their callers.

use thiserror::Error;

use crate::board::{Pos, Side};

/// Errors that can occur around the Dama engine
#[derive(Error, Debug)]
pub enum DamaError {
    /// Coordinates outside the 9x9 board
    #[error("Square ({row}, {col}) is off the board")]
    OffBoard { row: u8, col: u8 },

    /// Move not in the current legal set
    #[error("Illegal move: from {from} to {to}")]
    IllegalMove { from: Pos, to: Pos },

    /// Game already has an outcome
    #[error("Game is over")]
    GameOver,

    /// Move attempted by the side that is not on turn
    #[error("Not {side}'s turn")]
    NotYourTurn { side: Side },

    /// Recorded history stops applying at some step
    #[error("Recorded move #{step} does not apply to the replayed position")]
    ReplayDiverged { step: usize },

    /// Replay applied cleanly but ended on a different board
    #[error("Replayed board does not match the stored final board")]
    BoardMismatch,

    /// Persisted board could not be decoded
    #[error("Malformed board: {message}")]
    MalformedBoard { message: String },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Dama operations
pub type DamaResult<T> = Result<T, DamaError>;
