//! Dama rules engine and AI
//!
//! A rules engine for Dama, a draughts variant played on the 81 points of a
//! 9x9 grid:
//! - Orthogonal moves everywhere, diagonal moves only along the lines that
//!   join corner and center points
//! - Regular pieces step forward and capture in any direction
//! - Sultans (promoted pieces) slide and capture at any distance
//! - Capturing is mandatory and the longest capture sequence must be chosen
//! - A side loses when it has no pieces left
//!
//! # Architecture
//!
//! - [`board`]: Board representation, coordinates and adjacency
//! - [`rules`]: Positions, legal move generation and state transition
//! - [`game`]: Recorded game state, controller and persisted records
//! - [`eval`]: Static evaluation
//! - [`search`]: Alpha-beta search
//! - [`engine`]: AI facade with difficulty levels and draw acceptance
//! - [`config`]: User settings
//!
//! # Quick Start
//!
//! ```
//! use dama::{apply_move, best_move, initial_state, Difficulty, Side};
//!
//! let state = initial_state(Side::Black);
//!
//! // The AI replies as Black
//! if let Some(mv) = best_move(&state, Difficulty::Easy) {
//!     let next = apply_move(&state, mv.from, mv.to);
//!     assert_eq!(next.history.len(), 1);
//! }
//! ```
//!
//! All operations on [`GameState`] are pure: they return a new state and
//! never modify their input. Illegal input to [`apply_move`] hands back the
//! state unchanged.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Piece, Pos, Side, BOARD_SIZE};
pub use config::DamaConfig;
pub use engine::{accepts_draw, best_move, AIEngine, Difficulty, MoveResult};
pub use error::{DamaError, DamaResult};
pub use eval::evaluate;
pub use game::{apply_move, initial_state, legal_moves, replay, Game, GameRecord, GameState, MoveRecord};
pub use rules::{Move, Outcome, Position};
