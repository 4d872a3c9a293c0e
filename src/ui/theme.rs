//! Theme constants for the Dama GUI

use egui::Color32;

// Board colors - sand tones
pub const BOARD_BG: Color32 = Color32::from_rgb(214, 184, 140);
pub const GRID_LINE: Color32 = Color32::from_rgb(70, 48, 25);
pub const DIAGONAL_LINE: Color32 = Color32::from_rgb(120, 90, 55);

// Piece colors
pub const BLACK_PIECE: Color32 = Color32::from_rgb(25, 25, 30);
pub const BLACK_PIECE_HIGHLIGHT: Color32 = Color32::from_rgb(70, 70, 80);
pub const WHITE_PIECE: Color32 = Color32::from_rgb(250, 250, 252);
pub const WHITE_PIECE_SHADOW: Color32 = Color32::from_rgb(190, 190, 195);
pub const SULTAN_CROWN: Color32 = Color32::from_rgb(230, 180, 40);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);
pub const SELECTED_RING: Color32 = Color32::from_rgb(60, 140, 255);
pub const MOVABLE_RING: Color32 = Color32::from_rgb(80, 200, 120);
pub const CAPTURE_TARGET: Color32 = Color32::from_rgb(255, 90, 70);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

pub fn quiet_target() -> Color32 {
    Color32::from_rgba_unmultiplied(40, 110, 220, 140)
}

pub fn preview_tint() -> Color32 {
    Color32::from_rgba_unmultiplied(40, 60, 120, 40)
}

// Panel colors - dark modern theme
pub const PANEL_FILL: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_FILL: Color32 = Color32::from_rgb(35, 38, 43);
pub const BUTTON_FILL: Color32 = Color32::from_rgb(50, 53, 58);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 36.0;
pub const PIECE_RADIUS_RATIO: f32 = 0.38;
pub const GRID_LINE_WIDTH: f32 = 1.5;
pub const DIAGONAL_LINE_WIDTH: f32 = 1.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
pub const TARGET_RADIUS_RATIO: f32 = 0.16;

/// Seconds left on the turn clock at which the timer turns amber / red
pub const TIMER_WARNING_SECS: u64 = 20;
pub const TIMER_CRITICAL_SECS: u64 = 10;
