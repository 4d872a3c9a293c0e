//! Session state for the Dama GUI
//!
//! Owns the [`Game`] controller and everything around it that only the GUI
//! cares about: who is human, piece selection, the turn clock, the engine
//! running on a worker thread, draw offers and history browsing.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::board::{Pos, Side};
use crate::config::{config_path, DamaConfig};
use crate::engine::{AIEngine, Difficulty, MoveResult};
use crate::error::{DamaError, DamaResult};
use crate::game::{Game, GameRecord, GameState};
use crate::rules::Move;

const RECORD_FILENAME: &str = "last_game.json";

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human_side: Side },
    /// Player vs Player (hotseat)
    PvP,
}

impl GameMode {
    pub fn from_config(config: &DamaConfig) -> Self {
        GameMode::PvE {
            human_side: config.human_side,
        }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
        /// Session generation the search was started for
        generation: u64,
    },
}

/// Per-turn clock; a chain continuation keeps the same clock running
pub struct TurnTimer {
    start_time: Instant,
    limit: Duration,
}

impl TurnTimer {
    pub fn new(limit: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            limit,
        }
    }

    pub fn restart(&mut self) {
        self.start_time = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed())
    }

    pub fn expired(&self) -> bool {
        self.elapsed() >= self.limit
    }
}

/// Main GUI session
pub struct Session {
    pub game: Game,
    pub mode: GameMode,
    pub config: DamaConfig,
    pub selected: Option<Pos>,
    pub last_move: Option<(Pos, Pos)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub turn_timer: TurnTimer,
    /// Side with an open draw offer (hotseat only)
    pub pending_draw_offer: Option<Side>,
    /// History step being previewed; `None` shows the live position
    pub preview_step: Option<usize>,
    pub message: Option<String>,
    /// Bumped whenever the position changes; AI results from an older
    /// generation are discarded
    generation: u64,
}

impl Session {
    pub fn new(mode: GameMode, config: DamaConfig) -> Self {
        let limit = Duration::from_secs(config.turn_time_limit_secs);
        Self {
            game: Game::new(config.starting_side),
            mode,
            config,
            selected: None,
            last_move: None,
            last_ai_result: None,
            ai_state: AiState::Idle,
            turn_timer: TurnTimer::new(limit),
            pending_draw_offer: None,
            preview_step: None,
            message: None,
            generation: 0,
        }
    }

    /// Start over with the same mode and settings
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Session::new(self.mode, self.config.clone());
        self.generation = generation;
    }

    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_side } => self.game.turn() == human_side,
            GameMode::PvP => true,
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// State shown on the board: the previewed step or the live game
    pub fn displayed_state(&self) -> GameState {
        match self.preview_step {
            Some(step) => self.game.replay_to(step),
            None => self.game.state().clone(),
        }
    }

    /// Squares whose piece the human may pick up
    pub fn movable_squares(&self) -> Vec<Pos> {
        if !self.accepts_input() {
            return Vec::new();
        }
        let mut squares: Vec<Pos> = self.game.legal_moves().iter().map(|m| m.from).collect();
        squares.sort();
        squares.dedup();
        squares
    }

    /// Destinations of the selected piece, flagged when they capture
    pub fn targets(&self) -> Vec<(Pos, bool)> {
        let Some(from) = self.selected else {
            return Vec::new();
        };
        self.game
            .legal_moves()
            .iter()
            .filter(|m| m.from == from)
            .map(|m| (m.to, m.is_capture()))
            .collect()
    }

    fn accepts_input(&self) -> bool {
        !self.game.is_over()
            && self.preview_step.is_none()
            && !self.is_ai_thinking()
            && self.is_human_turn()
    }

    /// Handle a click on `pos`: select a piece or move the selected one
    pub fn click(&mut self, pos: Pos) -> DamaResult<()> {
        if self.game.is_over() {
            return Err(DamaError::GameOver);
        }
        if self.preview_step.is_some() {
            self.preview_step = None;
            return Ok(());
        }
        if !self.is_human_turn() || self.is_ai_thinking() {
            return Err(DamaError::NotYourTurn {
                side: self.game.turn(),
            });
        }

        let moves = self.game.legal_moves();
        if let Some(from) = self.selected {
            if moves.iter().any(|m| m.from == from && m.to == pos) {
                return self.submit(from, pos).map(|_| ());
            }
        }

        // A piece in the middle of a chain stays selected
        if self.game.state().jumping_piece().is_some() {
            return Ok(());
        }
        self.selected = if moves.iter().any(|m| m.from == pos) {
            Some(pos)
        } else {
            None
        };
        Ok(())
    }

    /// Submit a step for the side to move
    pub fn submit(&mut self, from: Pos, to: Pos) -> DamaResult<Move> {
        let turn = self.game.turn();
        let mv = self.game.submit_move(from, to)?;

        self.last_move = Some((mv.from, mv.to));
        self.selected = self.game.state().jumping_piece();
        self.pending_draw_offer = None;
        self.message = None;
        self.generation += 1;
        if self.game.turn() != turn {
            self.turn_timer.restart();
        }
        Ok(mv)
    }

    /// Start the engine on a worker thread if it is its turn
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game.is_over() {
            return;
        }

        let state = self.game.state().clone();
        let config = self.config.clone();
        let generation = self.generation;
        let (tx, rx) = channel();

        thread::spawn(move || {
            let mut engine = AIEngine::from_config(&config);
            let result = engine.get_move_with_stats(&state);
            let _ = tx.send(result);
        });

        debug!(generation, side = %self.game.turn(), "engine started");
        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            generation,
        };
    }

    /// Apply the engine's move once it arrives
    pub fn check_ai_result(&mut self) {
        let (result, generation) = match &self.ai_state {
            AiState::Thinking {
                receiver,
                generation,
                ..
            } => match receiver.try_recv() {
                Ok(result) => (result, *generation),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => return,
        };
        self.ai_state = AiState::Idle;

        if generation != self.generation || self.game.is_over() {
            debug!(generation, current = self.generation, "discarding stale engine result");
            return;
        }

        self.last_ai_result = Some(result.clone());
        match result.best_move {
            Some(mv) => {
                if let Err(e) = self.submit(mv.from, mv.to) {
                    warn!(error = %e, "engine produced an unplayable move");
                    self.message = Some(e.to_string());
                }
            }
            None => {
                self.game.settle_if_stuck();
            }
        }
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Forfeit the side to move when its clock has run out.
    ///
    /// Returns whether the game ended here.
    pub fn check_timeout(&mut self) -> bool {
        if self.game.is_over() || !self.turn_timer.expired() {
            return false;
        }
        let side = self.game.turn();
        if self.game.timeout().is_err() {
            return false;
        }
        info!(%side, "turn clock expired");
        self.abandon_search();
        self.message = Some(format!("{side} ran out of time"));
        true
    }

    /// The human (or, in hotseat, the side to move) resigns
    pub fn resign(&mut self) -> DamaResult<()> {
        let side = match self.mode {
            GameMode::PvE { human_side } => human_side,
            GameMode::PvP => self.game.turn(),
        };
        self.game.resign(side)?;
        self.abandon_search();
        Ok(())
    }

    /// Offer a draw. The engine answers at once; a hotseat opponent must
    /// accept with [`Session::accept_draw_offer`].
    pub fn offer_draw(&mut self) -> DamaResult<()> {
        if self.game.is_over() {
            return Err(DamaError::GameOver);
        }
        match self.mode {
            GameMode::PvE { human_side } => {
                let engine = AIEngine::from_config(&self.config);
                let ai_side = human_side.opponent();
                if engine.accepts_draw(self.game.state(), ai_side) {
                    info!(%ai_side, "engine accepted draw offer");
                    self.game.accept_draw()?;
                    self.abandon_search();
                } else {
                    info!(%ai_side, "engine declined draw offer");
                    self.message = Some("AI declined the draw".to_string());
                }
            }
            GameMode::PvP => {
                let side = self.game.turn();
                self.pending_draw_offer = Some(side);
                self.message = Some(format!("{side} offers a draw"));
            }
        }
        Ok(())
    }

    /// Accept an open hotseat draw offer
    pub fn accept_draw_offer(&mut self) -> DamaResult<()> {
        if self.pending_draw_offer.take().is_none() {
            return Ok(());
        }
        self.game.accept_draw()?;
        self.message = None;
        Ok(())
    }

    pub fn decline_draw_offer(&mut self) {
        self.pending_draw_offer = None;
        self.message = None;
    }

    /// Step the history preview backwards
    pub fn preview_back(&mut self) {
        let current = self.preview_step.unwrap_or(self.game.move_count());
        self.preview_step = Some(current.saturating_sub(1));
    }

    /// Step the history preview forwards, returning to live at the end
    pub fn preview_forward(&mut self) {
        if let Some(step) = self.preview_step {
            self.preview_step = if step + 1 >= self.game.move_count() {
                None
            } else {
                Some(step + 1)
            };
        }
    }

    pub fn preview_live(&mut self) {
        self.preview_step = None;
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        if let Err(e) = self.config.save() {
            warn!(error = %e, "failed to save settings");
        }
    }

    /// Where the last game is saved
    pub fn record_path() -> PathBuf {
        config_path().with_file_name(RECORD_FILENAME)
    }

    pub fn save_game(&self) -> DamaResult<()> {
        self.game.record().save(&Self::record_path())
    }

    /// Load and verify the saved game, replacing the current one
    pub fn load_game(&mut self) -> DamaResult<()> {
        let record = GameRecord::load(&Self::record_path())?;
        let game = Game::from_record(&record)?;

        self.abandon_search();
        self.last_move = game.state().history.last().map(|r| (r.from, r.to));
        self.selected = game.state().jumping_piece();
        self.game = game;
        self.preview_step = None;
        self.pending_draw_offer = None;
        self.turn_timer.restart();
        Ok(())
    }

    /// Drop any running search; its result will be discarded
    fn abandon_search(&mut self) {
        self.ai_state = AiState::Idle;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Outcome;

    fn hotseat() -> Session {
        Session::new(GameMode::PvP, DamaConfig::default())
    }

    #[test]
    fn test_click_selects_then_moves() {
        let mut session = hotseat();

        session.click(Pos::new(3, 4)).unwrap();
        assert_eq!(session.selected, Some(Pos::new(3, 4)));
        assert_eq!(session.targets(), vec![(Pos::new(4, 4), false)]);

        session.click(Pos::new(4, 4)).unwrap();
        assert_eq!(session.game.turn(), Side::White);
        assert_eq!(session.last_move, Some((Pos::new(3, 4), Pos::new(4, 4))));
        assert!(session.selected.is_none());
    }

    #[test]
    fn test_click_on_immovable_piece_clears_selection() {
        let mut session = hotseat();
        session.click(Pos::new(3, 4)).unwrap();
        session.click(Pos::new(0, 0)).unwrap();
        assert!(session.selected.is_none());
        assert_eq!(session.movable_squares().len(), 3);
    }

    #[test]
    fn test_click_rejected_on_engine_turn() {
        let config = DamaConfig {
            human_side: Side::White,
            ..DamaConfig::default()
        };
        let mut session = Session::new(GameMode::from_config(&config), config);
        assert!(session.is_ai_turn());
        assert!(matches!(
            session.click(Pos::new(3, 4)),
            Err(DamaError::NotYourTurn { side: Side::Black })
        ));
        assert!(session.movable_squares().is_empty());
    }

    #[test]
    fn test_stale_engine_result_is_discarded() {
        let mut session = hotseat();
        let (tx, rx) = channel();
        session.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            generation: session.generation,
        };

        // Position changes while the engine is still thinking
        session.submit(Pos::new(3, 4), Pos::new(4, 4)).unwrap();
        let before = session.game.state().clone();

        tx.send(MoveResult {
            best_move: Some(Move::quiet(Pos::new(5, 4), Pos::new(4, 4), Side::White)),
            score: 0,
            depth: 1,
            nodes: 1,
            time_ms: 0,
        })
        .unwrap();
        session.check_ai_result();

        assert!(!session.is_ai_thinking());
        assert_eq!(session.game.state(), &before);
        assert!(session.last_ai_result.is_none());
    }

    #[test]
    fn test_engine_plays_its_turn() {
        let config = DamaConfig {
            difficulty: Difficulty::Easy,
            human_side: Side::White,
            ..DamaConfig::default()
        };
        let mut session = Session::new(GameMode::from_config(&config), config);

        session.start_ai_thinking();
        assert!(session.is_ai_thinking());
        while session.is_ai_thinking() {
            session.check_ai_result();
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(session.game.move_count(), 1);
        assert_eq!(session.game.turn(), Side::White);
        assert!(session.last_ai_result.is_some());
    }

    #[test]
    fn test_timeout_forfeits_side_to_move() {
        let config = DamaConfig {
            turn_time_limit_secs: 0,
            ..DamaConfig::default()
        };
        let mut session = Session::new(GameMode::PvP, config);

        assert!(session.check_timeout());
        assert_eq!(session.game.outcome(), Some(Outcome::Win(Side::White)));
        assert!(!session.check_timeout());
    }

    #[test]
    fn test_hotseat_draw_offer() {
        let mut session = hotseat();
        session.offer_draw().unwrap();
        assert_eq!(session.pending_draw_offer, Some(Side::Black));

        session.accept_draw_offer().unwrap();
        assert_eq!(session.game.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_engine_accepts_level_draw() {
        let mut session = Session::new(GameMode::PvE { human_side: Side::Black }, DamaConfig::default());
        session.offer_draw().unwrap();
        assert_eq!(session.game.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_resign_in_pve_loses_for_human() {
        let mut session = Session::new(GameMode::PvE { human_side: Side::White }, DamaConfig::default());
        session.resign().unwrap();
        assert_eq!(session.game.outcome(), Some(Outcome::Win(Side::Black)));
    }

    #[test]
    fn test_history_preview() {
        let mut session = hotseat();
        session.submit(Pos::new(3, 4), Pos::new(4, 4)).unwrap();
        let mv = session.game.legal_moves()[0];
        session.submit(mv.from, mv.to).unwrap();

        session.preview_back();
        assert_eq!(session.preview_step, Some(1));
        assert_eq!(session.displayed_state().history.len(), 1);
        assert!(session.movable_squares().is_empty());

        session.preview_back();
        session.preview_back();
        assert_eq!(session.preview_step, Some(0));

        session.preview_forward();
        session.preview_forward();
        assert!(session.preview_step.is_none());
        assert_eq!(session.displayed_state(), *session.game.state());
    }
}
