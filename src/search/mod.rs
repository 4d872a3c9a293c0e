//! Search module for the Dama AI
//!
//! Contains:
//! - Fixed-depth negamax alpha-beta search that treats a whole capture
//!   chain as part of one ply of depth

pub mod alphabeta;

pub use alphabeta::{SearchResult, SearchStats, Searcher};
