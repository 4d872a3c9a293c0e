//! Game outcome
//!
//! The engine itself only ever decides a game by elimination: a side with
//! no pieces left loses on the transition that removed its last piece.
//! Timeouts, resignations and agreed draws are decided outside and written
//! into the state as an `Outcome`.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Side};

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Side),
    Draw,
}

impl Outcome {
    /// Winning side, `None` for a draw
    #[inline]
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Win(side) => Some(side),
            Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win(side) => write!(f, "{} wins", side),
            Outcome::Draw => f.write_str("Draw"),
        }
    }
}

/// Outcome by elimination, if one side has no pieces left
pub fn check_winner(board: &Board) -> Option<Outcome> {
    let black = board.count(Side::Black);
    let white = board.count(Side::White);
    match (black, white) {
        (0, 0) => None,
        (_, 0) => Some(Outcome::Win(Side::Black)),
        (0, _) => Some(Outcome::Win(Side::White)),
        _ => None,
    }
}
