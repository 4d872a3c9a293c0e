//! Scoring weights for Dama evaluation

/// Piece and outcome scores
pub struct PieceScore;

impl PieceScore {
    /// Decided game, from the winner's point of view
    pub const WIN: i32 = 10_000;
    /// Agreed draw
    pub const DRAW: i32 = 0;

    /// Regular piece
    pub const REGULAR: i32 = 15;
    /// Sultan, roughly five regular pieces
    pub const SULTAN: i32 = 80;
    /// Piece on column 0 or 8 cannot be jumped sideways
    pub const FLANK: i32 = 2;
    /// Per row advanced toward promotion (regular pieces only)
    pub const PROGRESS: i32 = 1;
}
