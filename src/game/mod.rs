//! Game layer: recorded state, session controller and persisted records
//!
//! - [`GameState`]: position + outcome + history, with the pure
//!   `apply_move` / `replay` contract
//! - [`Game`]: owns one session, validates submitted moves, writes external
//!   outcomes
//! - [`GameRecord`]: JSON persistence verified by replay

pub mod controller;
pub mod record;
pub mod state;

pub use controller::Game;
pub use record::GameRecord;
pub use state::{apply_move, initial_state, legal_moves, replay, GameState, MoveRecord};
