//! Main application for the Dama GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, ScrollArea, SidePanel, TopBottomPanel, Vec2};

use crate::board::Side;
use crate::config::DamaConfig;
use crate::engine::Difficulty;
use crate::rules::Outcome;

use super::board_view::{BoardMarks, BoardView};
use super::session::{GameMode, Session};
use super::theme::*;

/// Main Dama application
pub struct DamaApp {
    session: Session,
    board_view: BoardView,
    show_debug: bool,
}

impl DamaApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DamaConfig) -> Self {
        Self {
            session: Session::new(GameMode::from_config(&config), config),
            board_view: BoardView::default(),
            show_debug: false,
        }
    }

    fn new_game(&mut self, mode: GameMode) {
        self.session = Session::new(mode, self.session.config.clone());
    }

    /// Surface an action's error in the message card
    fn report(&mut self, result: crate::error::DamaResult<()>) {
        if let Err(e) = result {
            self.session.message = Some(e.to_string());
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (vs AI - Black)").clicked() {
                        self.new_game(GameMode::PvE { human_side: Side::Black });
                        ui.close_menu();
                    }
                    if ui.button("New Game (vs AI - White)").clicked() {
                        self.new_game(GameMode::PvE { human_side: Side::White });
                        ui.close_menu();
                    }
                    if ui.button("New Game (Hotseat)").clicked() {
                        self.new_game(GameMode::PvP);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Save Game").clicked() {
                        let result = self.session.save_game();
                        self.report(result);
                        ui.close_menu();
                    }
                    if ui.button("Load Game").clicked() {
                        let result = self.session.load_game();
                        self.report(result);
                        ui.close_menu();
                    }
                });

                ui.menu_button("AI", |ui| {
                    for difficulty in Difficulty::ALL {
                        let selected = self.session.config.difficulty == difficulty;
                        if ui.radio(selected, difficulty.to_string()).clicked() {
                            self.session.set_difficulty(difficulty);
                            ui.close_menu();
                        }
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.session.mode {
                        GameMode::PvE { human_side } => {
                            format!("vs AI ({}) - You: {}", self.session.config.difficulty, human_side)
                        }
                        GameMode::PvP => "Hotseat".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_FILL))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_captures_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);
                ui.add_space(10.0);

                self.render_history_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(outcome) = self.session.game.outcome() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, outcome);
                }

                if let Some(msg) = self.session.message.clone() {
                    ui.add_space(10.0);
                    self.render_message_card(ui, &msg);
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_FILL)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn button_frame() -> Frame {
        Frame::new()
            .fill(BUTTON_FILL)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
    }

    /// Clickable label styled as a button
    fn action_button(ui: &mut egui::Ui, text: &str) -> bool {
        Self::button_frame()
            .show(ui, |ui| {
                ui.add(
                    egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY))
                        .sense(egui::Sense::click()),
                )
                .clicked()
            })
            .inner
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(egui::Color32::from_rgb(180, 180, 185)));
            ui.add_space(4.0);
            ui.label(RichText::new("DAMA").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("9×9 draughts").size(11.0).color(TEXT_MUTED));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        let turn = self.session.game.turn();
        Self::card_frame().show(ui, |ui| {
            let (piece_char, accent, text_color) = match turn {
                Side::Black => ("●", egui::Color32::from_rgb(70, 70, 75), TEXT_PRIMARY),
                Side::White => ("○", egui::Color32::from_rgb(220, 220, 225), egui::Color32::from_rgb(30, 30, 35)),
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    piece_char,
                    egui::FontId::proportional(28.0),
                    text_color,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(turn.to_string().to_uppercase()).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.session.game.is_over() {
                        ("Game over", WIN_HIGHLIGHT)
                    } else if self.session.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.session.game.state().jumping_piece().is_some() {
                        ("Continue capturing", CAPTURE_TARGET)
                    } else if self.session.is_human_turn() {
                        ("Your turn", TIMER_NORMAL)
                    } else {
                        ("Waiting", TEXT_SECONDARY)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TURN CLOCK").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let remaining = self.session.turn_timer.remaining();
            let secs = remaining.as_secs();
            let color = if secs <= TIMER_CRITICAL_SECS {
                TIMER_CRITICAL
            } else if secs <= TIMER_WARNING_SECS {
                TIMER_WARNING
            } else {
                TIMER_NORMAL
            };
            let text = if self.session.game.is_over() {
                "--".to_string()
            } else {
                format!("{:.1}s", remaining.as_secs_f32())
            };
            ui.label(RichText::new(text).size(26.0).strong().color(color));

            if let Some(elapsed) = self.session.ai_thinking_elapsed() {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("AI: {:.2}s", elapsed.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_captures_card(&self, ui: &mut egui::Ui) {
        let state = self.session.game.state();
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("CAPTURES").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            for side in [Side::Black, Side::White] {
                ui.horizontal(|ui| {
                    let symbol = if side == Side::Black { "●" } else { "○" };
                    ui.label(RichText::new(symbol).size(18.0).color(TEXT_SECONDARY));
                    ui.label(RichText::new(side.to_string()).size(12.0).color(TEXT_PRIMARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!(
                                "{} taken · {} left",
                                state.captures(side),
                                state.board().count(side)
                            ))
                            .size(12.0)
                            .color(TEXT_SECONDARY),
                        );
                    });
                });
                ui.add_space(4.0);
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        let over = self.session.game.is_over();
        let pending = self.session.pending_draw_offer;

        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if Self::action_button(ui, "New") {
                    self.session.reset();
                }
                if !over {
                    if Self::action_button(ui, "Offer draw") {
                        let result = self.session.offer_draw();
                        self.report(result);
                    }
                    if Self::action_button(ui, "Resign") {
                        let result = self.session.resign();
                        self.report(result);
                    }
                }
            });

            if let Some(side) = pending {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("{} offers a draw", side))
                        .size(11.0)
                        .color(TIMER_WARNING),
                );
                ui.horizontal(|ui| {
                    if Self::action_button(ui, "Accept") {
                        let result = self.session.accept_draw_offer();
                        self.report(result);
                    }
                    if Self::action_button(ui, "Decline") {
                        self.session.decline_draw_offer();
                    }
                });
            }
        });
    }

    fn render_history_card(&mut self, ui: &mut egui::Ui) {
        let count = self.session.game.move_count();
        Self::card_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("HISTORY").size(10.0).color(TEXT_MUTED));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let shown = self.session.preview_step.unwrap_or(count);
                    ui.label(RichText::new(format!("{}/{}", shown, count)).size(10.0).color(TEXT_SECONDARY));
                });
            });
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                if Self::action_button(ui, "◀") {
                    self.session.preview_back();
                }
                if Self::action_button(ui, "▶") {
                    self.session.preview_forward();
                }
                if self.session.preview_step.is_some() && Self::action_button(ui, "Live") {
                    self.session.preview_live();
                }
            });

            ui.add_space(6.0);
            let lines: Vec<String> = self
                .session
                .game
                .state()
                .history
                .iter()
                .enumerate()
                .map(|(i, rec)| {
                    let marker = if rec.captured.is_some() { "x" } else { "-" };
                    format!("{:>3}. {} {}{}{}", i + 1, rec.side, rec.from, marker, rec.to)
                })
                .collect();

            ScrollArea::vertical().max_height(120.0).stick_to_bottom(true).show(ui, |ui| {
                for (i, text) in lines.into_iter().enumerate() {
                    let step = i + 1;
                    let color = if self.session.preview_step == Some(step) {
                        SELECTED_RING
                    } else {
                        TEXT_SECONDARY
                    };
                    let label = egui::Label::new(RichText::new(text).size(11.0).monospace().color(color))
                        .sense(egui::Sense::click());
                    if ui.add(label).clicked() {
                        self.session.preview_step = Some(step);
                    }
                }
            });
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                if let Some(result) = &self.session.last_ai_result {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(format!("Depth {}", result.depth)).size(11.0).strong().color(TIMER_NORMAL));
                            ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                            ui.vertical(|ui| {
                                ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                                ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                            });
                        });
                    });

                    if let Some(mv) = result.best_move {
                        ui.add_space(4.0);
                        ui.label(
                            RichText::new(format!("→ {} to {} ({} captures)", mv.from, mv.to, mv.total_captures))
                                .size(12.0)
                                .strong()
                                .color(WIN_HIGHLIGHT),
                        );
                    }
                } else {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                }
            });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, outcome: Outcome) {
        let (headline, detail) = match outcome {
            Outcome::Win(side) => (format!("{} WINS!", side.to_string().to_uppercase()), "Game over"),
            Outcome::Draw => ("DRAW".to_string(), "Agreed by both sides"),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(detail).size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(12.0);

                    let clicked = Frame::new()
                        .fill(egui::Color32::from_rgb(60, 100, 70))
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            ui.add(
                                egui::Label::new(RichText::new("New Game").size(14.0).strong().color(TEXT_PRIMARY))
                                    .sense(egui::Sense::click()),
                            )
                            .clicked()
                        })
                        .inner;
                    if clicked {
                        self.session.reset();
                    }
                });
            });
    }

    fn render_message_card(&self, ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(14.0));
                    ui.add_space(4.0);
                    ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                });
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let shown = self.session.displayed_state();
            let movable = self.session.movable_squares();
            let targets = self.session.targets();
            let previewing = self.session.preview_step.is_some();
            let last_move = if previewing {
                shown.history.last().map(|r| (r.from, r.to))
            } else {
                self.session.last_move
            };

            let marks = BoardMarks {
                movable: movable.as_slice(),
                selected: if previewing { None } else { self.session.selected },
                targets: if previewing { &[] } else { targets.as_slice() },
                last_move,
                previewing,
                interactive: !self.session.game.is_over(),
            };

            if let Some(pos) = self.board_view.show(ui, shown.board(), &marks) {
                let result = self.session.click(pos);
                self.report(result);
            }
        });
    }

    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }
            if i.key_pressed(egui::Key::N) {
                self.session.reset();
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                self.session.preview_back();
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                self.session.preview_forward();
            }
            if i.key_pressed(egui::Key::Escape) {
                self.session.selected = self.session.game.state().jumping_piece();
                self.session.preview_live();
            }
        });
    }
}

impl eframe::App for DamaApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.session.check_ai_result();
        self.session.check_timeout();

        if self.session.is_ai_turn() && !self.session.is_ai_thinking() && !self.session.game.is_over() {
            self.session.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // The turn clock needs a steady repaint while a game is running
        if !self.session.game.is_over() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
