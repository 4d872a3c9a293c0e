//! Static evaluation
//!
//! Scores are from the perspective of the requested side and symmetric:
//! `evaluate_position(p, Black) == -evaluate_position(p, White)`, which the
//! negamax search relies on.

use crate::board::{Piece, Pos, Side, BOARD_SIZE};
use crate::game::GameState;
use crate::rules::{Outcome, Position};

use super::weights::PieceScore;

/// Evaluate a recorded game state for `side`.
///
/// A decided game scores `±PieceScore::WIN`, an agreed draw 0; otherwise the
/// material/positional balance of the board.
#[must_use]
pub fn evaluate(state: &GameState, side: Side) -> i32 {
    match state.winner {
        Some(outcome) => outcome_score(outcome, side),
        None => evaluate_position(&state.position, side),
    }
}

/// Evaluate a bare position for `side`, treating elimination as decided.
#[must_use]
pub fn evaluate_position(position: &Position, side: Side) -> i32 {
    if let Some(outcome) = position.outcome() {
        return outcome_score(outcome, side);
    }

    position.board.pieces().fold(0, |score, (pos, piece)| {
        let value = piece_value(pos, piece);
        if piece.side == side {
            score + value
        } else {
            score - value
        }
    })
}

/// Value of one piece standing on `pos`
#[inline]
pub fn piece_value(pos: Pos, piece: Piece) -> i32 {
    let mut value = if piece.sultan {
        PieceScore::SULTAN
    } else {
        PieceScore::REGULAR
    };

    if pos.col == 0 || pos.col as usize == BOARD_SIZE - 1 {
        value += PieceScore::FLANK;
    }

    if !piece.sultan {
        let progress = match piece.side {
            Side::Black => pos.row as i32,
            Side::White => (BOARD_SIZE - 1) as i32 - pos.row as i32,
        };
        value += progress * PieceScore::PROGRESS;
    }

    value
}

#[inline]
fn outcome_score(outcome: Outcome, side: Side) -> i32 {
    match outcome {
        Outcome::Win(winner) if winner == side => PieceScore::WIN,
        Outcome::Win(_) => -PieceScore::WIN,
        Outcome::Draw => PieceScore::DRAW,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_initial_position_is_balanced() {
        let pos = Position::initial(Side::Black);
        assert_eq!(evaluate_position(&pos, Side::Black), 0);
        assert_eq!(evaluate_position(&pos, Side::White), 0);
    }

    #[test]
    fn test_evaluation_is_symmetric() {
        let mut board = Board::new();
        board.place(Pos::new(2, 3), Piece::regular(Side::Black));
        board.place(Pos::new(6, 0), Piece::sultan(Side::White));
        board.place(Pos::new(7, 7), Piece::regular(Side::White));
        let pos = Position::from_board(board, Side::Black);

        assert_eq!(
            evaluate_position(&pos, Side::Black),
            -evaluate_position(&pos, Side::White)
        );
    }

    #[test]
    fn test_piece_values() {
        // Black regular on row 3, inner column: 15 + 3
        assert_eq!(piece_value(Pos::new(3, 4), Piece::regular(Side::Black)), 18);
        // White regular on row 3 has advanced 5 rows, flank column
        assert_eq!(piece_value(Pos::new(3, 8), Piece::regular(Side::White)), 15 + 2 + 5);
        // Sultans get no progress bonus
        assert_eq!(piece_value(Pos::new(8, 4), Piece::sultan(Side::Black)), 80);
        assert_eq!(piece_value(Pos::new(8, 0), Piece::sultan(Side::Black)), 82);
    }

    #[test]
    fn test_sultan_worth_about_five_regulars() {
        let sultan = piece_value(Pos::new(4, 4), Piece::sultan(Side::Black));
        let regular = PieceScore::REGULAR;
        assert!(sultan >= 5 * regular && sultan < 6 * regular);
    }

    #[test]
    fn test_eliminated_side_scores_as_loss() {
        let mut board = Board::new();
        board.place(Pos::new(0, 0), Piece::regular(Side::Black));
        let pos = Position::from_board(board, Side::White);

        assert_eq!(evaluate_position(&pos, Side::Black), PieceScore::WIN);
        assert_eq!(evaluate_position(&pos, Side::White), -PieceScore::WIN);
    }

    #[test]
    fn test_recorded_outcomes() {
        let state = GameState::new(Side::Black);
        assert_eq!(evaluate(&state, Side::Black), 0);

        let drawn = state.with_outcome(Outcome::Draw);
        assert_eq!(evaluate(&drawn, Side::White), 0);

        let resigned = state.with_outcome(Outcome::Win(Side::White));
        assert_eq!(evaluate(&resigned, Side::White), PieceScore::WIN);
        assert_eq!(evaluate(&resigned, Side::Black), -PieceScore::WIN);
    }
}
