//! Game rules for Dama
//!
//! This module implements the rule set:
//! - Position and turn phase (normal turn or forced capture continuation)
//! - Legal move generation with forced maximum capture
//! - State transition with deferred promotion
//! - Outcome by elimination

pub mod movegen;
pub mod position;
pub mod transition;
pub mod win;

// Re-exports for convenient access
pub use movegen::{find_move, has_capture_from, legal_moves, max_captures, Move};
pub use position::{Position, TurnPhase};
pub use win::{check_winner, Outcome};
