//! Evaluation module for Dama positions
//!
//! Material first (sultans weigh about five regular pieces), then small
//! positional terms: flank columns and progress toward promotion.

pub mod heuristic;
pub mod weights;

pub use heuristic::{evaluate, evaluate_position, piece_value};
pub use weights::PieceScore;
