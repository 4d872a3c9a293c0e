//! AI engine facade
//!
//! Wraps the alpha-beta searcher behind a difficulty setting and answers the
//! two questions a game session asks of its computer opponent: which step to
//! play next, and whether to accept a draw offer.
//!
//! # Example
//!
//! ```
//! use dama::{initial_state, AIEngine, Difficulty, Side};
//!
//! let mut engine = AIEngine::with_difficulty(Difficulty::Easy);
//! let state = initial_state(Side::Black);
//!
//! let result = engine.get_move_with_stats(&state);
//! println!("Best move: {:?}", result.best_move);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Side;
use crate::config::DamaConfig;
use crate::eval::evaluate;
use crate::game::GameState;
use crate::rules::Move;
use crate::search::{SearchResult, Searcher};

/// Engine strength, expressed as search depth.
///
/// | Difficulty | Depth |
/// |------------|-------|
/// | Easy       | 1     |
/// | Medium     | 3     |
/// | Hard       | 5     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Search depth in turns (a capture chain counts as one)
    #[inline]
    pub const fn depth(self) -> i8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// Result of a move search with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Move>,
    /// Evaluation of the move for the side to move
    pub score: i32,
    /// Depth searched
    pub depth: i8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn from_search(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            depth: result.depth,
            nodes: result.nodes,
            time_ms,
        }
    }

    #[inline]
    fn no_move(score: i32) -> Self {
        Self {
            best_move: None,
            score,
            depth: 0,
            nodes: 0,
            time_ms: 0,
        }
    }
}

/// Computer opponent.
pub struct AIEngine {
    searcher: Searcher,
    difficulty: Difficulty,
    draw_accept_margin: i32,
    draw_accept_after_moves: usize,
}

impl AIEngine {
    /// Medium difficulty with default draw policy
    #[must_use]
    pub fn new() -> Self {
        Self::with_difficulty(Difficulty::default())
    }

    #[must_use]
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        let defaults = DamaConfig::default();
        Self {
            searcher: Searcher::new(),
            difficulty,
            draw_accept_margin: defaults.draw_accept_margin,
            draw_accept_after_moves: defaults.draw_accept_after_moves,
        }
    }

    /// Engine configured from user settings
    #[must_use]
    pub fn from_config(config: &DamaConfig) -> Self {
        Self {
            searcher: Searcher::new(),
            difficulty: config.difficulty,
            draw_accept_margin: config.draw_accept_margin,
            draw_accept_after_moves: config.draw_accept_after_moves,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Best step for the side to move, `None` when the game is over or the
    /// side to move is stuck.
    #[must_use]
    pub fn get_move(&mut self, state: &GameState) -> Option<Move> {
        self.get_move_with_stats(state).best_move
    }

    #[must_use]
    pub fn get_move_with_stats(&mut self, state: &GameState) -> MoveResult {
        if state.is_over() {
            return MoveResult::no_move(evaluate(state, state.turn()));
        }

        let start = Instant::now();
        let result = self.searcher.search(&state.position, self.difficulty.depth());
        let time_ms = start.elapsed().as_millis() as u64;

        debug!(
            side = %state.turn(),
            difficulty = %self.difficulty,
            best = ?result.best_move.map(|m| (m.from, m.to)),
            score = result.score,
            nodes = result.nodes,
            chain_plies = result.stats.chain_plies,
            beta_cutoffs = result.stats.beta_cutoffs,
            time_ms,
            "search finished"
        );
        MoveResult::from_search(result, time_ms)
    }

    /// Whether `side`, played by this engine, accepts a draw offer.
    ///
    /// Accepts when the position is roughly level for `side` or the game has
    /// already run long.
    #[must_use]
    pub fn accepts_draw(&self, state: &GameState, side: Side) -> bool {
        accepts_draw(
            state,
            side,
            self.draw_accept_margin,
            self.draw_accept_after_moves,
        )
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Best step for the side to move at the given difficulty
pub fn best_move(state: &GameState, difficulty: Difficulty) -> Option<Move> {
    AIEngine::with_difficulty(difficulty).get_move(state)
}

/// Draw acceptance rule: `|evaluate(state, side)| < margin` or more than
/// `after_moves` steps played. A finished game accepts nothing.
pub fn accepts_draw(state: &GameState, side: Side, margin: i32, after_moves: usize) -> bool {
    if state.is_over() {
        return false;
    }
    evaluate(state, side).abs() < margin || state.history.len() > after_moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Piece, Pos};
    use crate::game::{apply_move, initial_state, MoveRecord};
    use crate::rules::{Outcome, Position};

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

    #[test]
    fn test_difficulty_depths() {
        assert_eq!(Difficulty::Easy.depth(), 1);
        assert_eq!(Difficulty::Medium.depth(), 3);
        assert_eq!(Difficulty::Hard.depth(), 5);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_engine_opening_move_is_legal() {
        let state = initial_state(Side::Black);
        let mut engine = AIEngine::with_difficulty(Difficulty::Medium);

        let mv = engine.get_move(&state).unwrap();
        assert!(state.legal_moves().contains(&mv));
    }

    #[test]
    fn test_easy_takes_winning_capture() {
        let state = state_with(
            &[
                ((2, 4), Piece::regular(Side::Black)),
                ((3, 4), Piece::regular(Side::White)),
                ((0, 0), Piece::regular(Side::Black)),
            ],
            Side::Black,
        );

        let mv = best_move(&state, Difficulty::Easy).unwrap();
        assert_eq!(mv.from, Pos::new(2, 4));
        assert_eq!(mv.to, Pos::new(4, 4));

        let next = apply_move(&state, mv.from, mv.to);
        assert_eq!(next.winner, Some(Outcome::Win(Side::Black)));
    }

    #[test]
    fn test_finished_game_has_no_move() {
        let state = initial_state(Side::Black).with_outcome(Outcome::Draw);
        assert!(best_move(&state, Difficulty::Hard).is_none());

        let mut engine = AIEngine::new();
        let result = engine.get_move_with_stats(&state);
        assert!(result.best_move.is_none());
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_stuck_side_has_no_move() {
        let state = state_with(
            &[
                ((8, 3), Piece::regular(Side::Black)),
                ((0, 0), Piece::regular(Side::White)),
            ],
            Side::Black,
        );
        assert!(best_move(&state, Difficulty::Medium).is_none());
    }

    #[test]
    fn test_draw_acceptance() {
        let level = initial_state(Side::Black);
        assert!(accepts_draw(&level, Side::White, 50, 80));

        // A sultan's worth of imbalance is outside the margin either way
        let lopsided = state_with(
            &[
                ((0, 0), Piece::regular(Side::Black)),
                ((8, 8), Piece::regular(Side::White)),
                ((4, 4), Piece::sultan(Side::White)),
            ],
            Side::Black,
        );
        assert!(!accepts_draw(&lopsided, Side::White, 50, 80));
        assert!(!accepts_draw(&lopsided, Side::Black, 50, 80));

        // ...until the game has run long
        let step = MoveRecord {
            from: Pos::new(0, 0),
            to: Pos::new(1, 0),
            captured: None,
            side: Side::Black,
        };
        let mut long_game = lopsided.clone();
        long_game.history = vec![step; 81];
        assert!(accepts_draw(&long_game, Side::White, 50, 80));
    }

    #[test]
    fn test_finished_game_declines_draw() {
        let state = initial_state(Side::Black).with_outcome(Outcome::Win(Side::Black));
        assert!(!accepts_draw(&state, Side::Black, 50, 80));
    }

    #[test]
    fn test_engine_from_config() {
        let config = DamaConfig {
            difficulty: Difficulty::Hard,
            draw_accept_margin: 0,
            ..DamaConfig::default()
        };
        let engine = AIEngine::from_config(&config);
        assert_eq!(engine.difficulty(), Difficulty::Hard);
        // Zero margin: even a level position is declined early on
        assert!(!engine.accepts_draw(&initial_state(Side::Black), Side::Black));
    }
}
