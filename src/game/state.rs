//! Recorded game state and the pure engine contract
//!
//! `GameState` is what callers render and persist: the current position,
//! the outcome (if decided) and every step played since the initial
//! position. All functions here are pure: they take a state and hand back a
//! new one, leaving the input untouched.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Side};
use crate::rules::{self, Move, Outcome, Position};

/// History entry: one step and the side that played it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Pos,
    pub to: Pos,
    pub captured: Option<Pos>,
    pub side: Side,
}

impl From<Move> for MoveRecord {
    fn from(mv: Move) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
            captured: mv.captured,
            side: mv.side,
        }
    }
}

/// Authoritative state of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub position: Position,
    /// Set once, then the state is terminal
    pub winner: Option<Outcome>,
    pub history: Vec<MoveRecord>,
    /// Side that moved first, needed to rebuild the initial position
    pub starting_side: Side,
}

impl GameState {
    /// Fresh game with `starting_side` to move
    pub fn new(starting_side: Side) -> Self {
        Self {
            position: Position::initial(starting_side),
            winner: None,
            history: Vec::new(),
            starting_side,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.position.board
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.position.turn
    }

    #[inline]
    pub fn captures(&self, side: Side) -> u8 {
        self.position.captures(side)
    }

    /// Square of the piece in the middle of a capture chain
    #[inline]
    pub fn jumping_piece(&self) -> Option<Pos> {
        self.position.phase.jumping_piece()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Legal steps for the side to move; none once the game is decided
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        rules::legal_moves(&self.position)
    }

    /// Apply and record `from` -> `to` if it is legal right now.
    ///
    /// Piece counts are re-derived after the step and the winner set when
    /// one side has been eliminated. Draws are never derived here.
    pub fn try_apply(&self, from: Pos, to: Pos) -> Option<(Move, GameState)> {
        if self.is_over() {
            return None;
        }
        let (mv, position) = self.position.try_play(from, to)?;

        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend_from_slice(&self.history);
        history.push(MoveRecord::from(mv));

        let next = GameState {
            position,
            winner: position.outcome(),
            history,
            starting_side: self.starting_side,
        };
        Some((mv, next))
    }

    /// Copy of this state with an externally decided outcome (timeout,
    /// resignation, agreed draw). A state that is already terminal is
    /// returned unchanged.
    #[must_use]
    pub fn with_outcome(&self, outcome: Outcome) -> GameState {
        if self.is_over() {
            return self.clone();
        }
        GameState {
            winner: Some(outcome),
            ..self.clone()
        }
    }
}

/// Fresh game state
pub fn initial_state(starting_side: Side) -> GameState {
    GameState::new(starting_side)
}

/// Legal moves of the given state
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    state.legal_moves()
}

/// Apply `from` -> `to`; illegal input returns the state unchanged.
pub fn apply_move(state: &GameState, from: Pos, to: Pos) -> GameState {
    match state.try_apply(from, to) {
        Some((_, next)) => next,
        None => state.clone(),
    }
}

/// Fold `apply_move` over a recorded history
pub fn replay(initial: &GameState, history: &[MoveRecord]) -> GameState {
    history
        .iter()
        .fold(initial.clone(), |state, rec| apply_move(&state, rec.from, rec.to))
}

/// Play a seeded random game from the opening until someone wins or
/// `max_plies` steps have been made.
#[cfg(test)]
pub(crate) fn seeded_playout(seed: u64, max_plies: usize) -> GameState {
    let mut rng = seed;
    let mut state = initial_state(Side::Black);
    for _ in 0..max_plies {
        let mut moves = state.legal_moves();
        if moves.is_empty() {
            break;
        }
        moves.sort_by_key(|m| (m.from, m.to));
        rng = rng
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let mv = moves[(rng >> 33) as usize % moves.len()];
        state = apply_move(&state, mv.from, mv.to);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    fn state_with(pieces: &[((u8, u8), Piece)], turn: Side) -> GameState {
        let mut board = Board::new();
        for &((r, c), piece) in pieces {
            board.place(Pos::new(r, c), piece);
        }
        GameState {
            position: Position::from_board(board, turn),
            winner: None,
            history: Vec::new(),
            starting_side: turn,
        }
    }

    const B: Piece = Piece::regular(Side::Black);
    const W: Piece = Piece::regular(Side::White);

    #[test]
    fn test_initial_state() {
        let state = initial_state(Side::White);
        assert_eq!(state.turn(), Side::White);
        assert_eq!(state.board().piece_count(), 80);
        assert_eq!(state.captures(Side::Black), 0);
        assert!(state.winner.is_none());
        assert!(state.history.is_empty());
        assert!(state.jumping_piece().is_none());
    }

    #[test]
    fn test_apply_records_history() {
        let state = initial_state(Side::Black);
        let next = apply_move(&state, Pos::new(3, 4), Pos::new(4, 4));

        assert_eq!(next.history.len(), 1);
        assert_eq!(
            next.history[0],
            MoveRecord {
                from: Pos::new(3, 4),
                to: Pos::new(4, 4),
                captured: None,
                side: Side::Black,
            }
        );
        assert_eq!(next.turn(), Side::White);
        // Input untouched
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_illegal_move_is_noop() {
        let state = initial_state(Side::Black);
        assert_eq!(apply_move(&state, Pos::new(0, 0), Pos::new(1, 0)), state);
        assert_eq!(apply_move(&state, Pos::new(5, 4), Pos::new(4, 4)), state);
        assert_eq!(
            apply_move(&state, Pos { row: 3, col: 4 }, Pos { row: 9, col: 4 }),
            state
        );
    }

    #[test]
    fn test_chain_scenario_removes_two_pieces() {
        let state = state_with(
            &[((2, 0), B), ((3, 0), W), ((5, 0), W), ((0, 8), B), ((1, 8), W)],
            Side::Black,
        );
        let moves = legal_moves(&state);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].total_captures, 2);

        let mid = apply_move(&state, Pos::new(2, 0), Pos::new(4, 0));
        assert_eq!(mid.turn(), Side::Black);
        assert_eq!(mid.jumping_piece(), Some(Pos::new(4, 0)));

        let done = apply_move(&mid, Pos::new(4, 0), Pos::new(6, 0));
        assert_eq!(
            state.board().count(Side::White) - done.board().count(Side::White),
            2
        );
        assert_eq!(done.captures(Side::Black), 2);
        assert_eq!(done.turn(), Side::White);
        assert_eq!(done.history.len(), 2);
    }

    #[test]
    fn test_last_capture_sets_winner() {
        let state = state_with(&[((2, 4), B), ((3, 4), W)], Side::Black);
        let next = apply_move(&state, Pos::new(2, 4), Pos::new(4, 4));

        assert_eq!(next.board().count(Side::White), 0);
        assert_eq!(next.winner, Some(Outcome::Win(Side::Black)));
        assert!(next.legal_moves().is_empty());
        // Terminal: nothing applies any more
        assert_eq!(apply_move(&next, Pos::new(4, 4), Pos::new(5, 4)), next);
    }

    #[test]
    fn test_with_outcome_does_not_overwrite() {
        let state = initial_state(Side::Black);
        let drawn = state.with_outcome(Outcome::Draw);
        assert_eq!(drawn.winner, Some(Outcome::Draw));

        let again = drawn.with_outcome(Outcome::Win(Side::White));
        assert_eq!(again.winner, Some(Outcome::Draw));
        assert!(state.winner.is_none());
    }

    #[test]
    fn test_replay_reproduces_final_board() {
        let initial = initial_state(Side::Black);
        let mut state = initial.clone();
        for _ in 0..12 {
            let Some(mv) = state.legal_moves().into_iter().next() else {
                break;
            };
            state = apply_move(&state, mv.from, mv.to);
        }

        let replayed = replay(&initial, &state.history);
        assert_eq!(replayed.position, state.position);
        assert_eq!(replayed.history, state.history);
    }

    #[test]
    fn test_replay_reproduces_finished_game() {
        let finished = seeded_playout(10, 1000);
        assert!(matches!(finished.winner, Some(Outcome::Win(_))));

        // Longest run of steps by one side, i.e. the longest capture chain
        let longest_run = finished
            .history
            .chunk_by(|a, b| a.side == b.side)
            .map(<[MoveRecord]>::len)
            .max()
            .unwrap_or(0);
        assert!(longest_run >= 2);

        let replayed = replay(&initial_state(Side::Black), &finished.history);
        assert_eq!(replayed.position, finished.position);
        assert_eq!(replayed.winner, finished.winner);
    }

    #[test]
    fn test_state_json_round_trip() {
        let state = apply_move(&initial_state(Side::Black), Pos::new(3, 3), Pos::new(4, 4));
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
