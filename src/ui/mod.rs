//! GUI module for the Dama game
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod session;
mod theme;

pub use app::DamaApp;
pub use session::{GameMode, Session, TurnTimer};
