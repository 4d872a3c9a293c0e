//! Board rendering for the Dama GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Piece, Pos, Side, BOARD_SIZE};

use super::theme::*;

/// Per-frame highlights drawn over the pieces
#[derive(Debug, Default)]
pub struct BoardMarks<'a> {
    /// Squares whose piece can move right now
    pub movable: &'a [Pos],
    pub selected: Option<Pos>,
    /// Destinations of the selected piece, with whether each one captures
    pub targets: &'a [(Pos, bool)],
    pub last_move: Option<(Pos, Pos)>,
    /// Board is showing an earlier position from the history
    pub previewing: bool,
    pub interactive: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked square, if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, marks: &BoardMarks<'_>) -> Option<Pos> {
        let available_size = ui.available_size();

        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / (BOARD_SIZE as f32 - 1.0);

        let (response, painter) = ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        if marks.previewing {
            painter.rect_filled(self.board_rect, CornerRadius::same(4), preview_tint());
        }

        self.draw_grid(&painter);
        self.draw_coordinates(&painter);

        for &pos in marks.movable {
            self.draw_ring(&painter, pos, MOVABLE_RING, 2.0);
        }

        for (pos, piece) in board.pieces() {
            self.draw_piece(&painter, pos, piece);
        }

        if let Some((from, to)) = marks.last_move {
            let stroke = Stroke::new(2.0, LAST_MOVE_MARKER);
            painter.line_segment([self.board_to_screen(from), self.board_to_screen(to)], stroke);
            painter.circle_filled(self.board_to_screen(to), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }

        if let Some(pos) = marks.selected {
            self.draw_ring(&painter, pos, SELECTED_RING, 3.0);
        }

        for &(pos, captures) in marks.targets {
            let color = if captures { CAPTURE_TARGET } else { quiet_target() };
            painter.circle_filled(
                self.board_to_screen(pos),
                self.cell_size * TARGET_RADIUS_RATIO,
                color,
            );
        }

        if !marks.interactive {
            return None;
        }

        let pointer = response.hover_pos()?;
        let pos = self.screen_to_board(pointer)?;
        if board.get(pos).is_some() || marks.targets.iter().any(|&(t, _)| t == pos) {
            self.draw_ring(&painter, pos, Color32::from_rgba_unmultiplied(255, 255, 255, 90), 1.5);
        }

        if response.clicked() {
            Some(pos)
        } else {
            None
        }
    }

    /// Draw the orthogonal grid and the diagonals that join corner and
    /// center points
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = (BOARD_SIZE as f32 - 1.0) * self.cell_size;

        for i in 0..BOARD_SIZE {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + span);
            painter.line_segment([start, end], stroke);

            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + span, offset);
            painter.line_segment([start, end], stroke);
        }

        // Every diagonal edge has exactly one corner endpoint
        let stroke = Stroke::new(DIAGONAL_LINE_WIDTH, DIAGONAL_LINE);
        for row in (0..BOARD_SIZE as u8).step_by(2) {
            for col in (0..BOARD_SIZE as u8).step_by(2) {
                let corner = Pos::new(row, col);
                for (dr, dc) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
                    if let Some(center) = corner.offset(dr, dc) {
                        painter.line_segment(
                            [self.board_to_screen(corner), self.board_to_screen(center)],
                            stroke,
                        );
                    }
                }
            }
        }
    }

    /// Draw coordinate labels (a-i, 1-9)
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for col in 0..BOARD_SIZE {
            let letter = (b'a' + col as u8) as char;
            let x = self.board_rect.min.x + BOARD_MARGIN + col as f32 * self.cell_size;

            let pos = Pos2::new(x, self.board_rect.min.y + 12.0);
            painter.text(pos, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);

            let pos = Pos2::new(x, self.board_rect.max.y - 12.0);
            painter.text(pos, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);
        }

        for row in 0..BOARD_SIZE {
            let num = row + 1;
            let y = self.board_rect.min.y + BOARD_MARGIN + row as f32 * self.cell_size;

            let pos = Pos2::new(self.board_rect.min.x + 12.0, y);
            painter.text(pos, egui::Align2::CENTER_CENTER, num.to_string(), font.clone(), GRID_LINE);

            let pos = Pos2::new(self.board_rect.max.x - 12.0, y);
            painter.text(pos, egui::Align2::CENTER_CENTER, num.to_string(), font.clone(), GRID_LINE);
        }
    }

    fn draw_piece(&self, painter: &Painter, pos: Pos, piece: Piece) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * PIECE_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        match piece.side {
            Side::Black => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 60),
                );
                painter.circle_filled(center, radius, BLACK_PIECE);
                painter.circle_filled(
                    center + Vec2::new(-radius * 0.3, -radius * 0.3),
                    radius * 0.2,
                    BLACK_PIECE_HIGHLIGHT,
                );
            }
            Side::White => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 40),
                );
                painter.circle_filled(center, radius, WHITE_PIECE);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, WHITE_PIECE_SHADOW));
            }
        }

        if piece.sultan {
            painter.circle_stroke(center, radius * 0.6, Stroke::new(2.5, SULTAN_CROWN));
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                "★",
                egui::FontId::proportional(radius * 0.8),
                SULTAN_CROWN,
            );
        }
    }

    fn draw_ring(&self, painter: &Painter, pos: Pos, color: Color32, width: f32) {
        let radius = self.cell_size * PIECE_RADIUS_RATIO + 3.0;
        painter.circle_stroke(self.board_to_screen(pos), radius, Stroke::new(width, color));
    }

    /// Convert screen coordinates to the nearest board point
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let x = (relative.x - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;
        let y = (relative.y - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;

        Pos::try_new(y.floor() as i32, x.floor() as i32)
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + pos.col as f32 * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + pos.row as f32 * self.cell_size;
        Pos2::new(x, y)
    }
}
