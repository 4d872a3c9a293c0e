//! Game controller: owns the authoritative state of one session
//!
//! The controller validates and applies submitted moves, lets callers browse
//! history by replaying from the initial position, and writes externally
//! decided outcomes (timeout, resignation, agreed draw) into the state.

use tracing::{info, warn};

use crate::board::{Pos, Side};
use crate::error::{DamaError, DamaResult};
use crate::rules::{Move, Outcome};

use super::record::GameRecord;
use super::state::{replay, GameState};

/// One game from its initial position to the current one
#[derive(Debug, Clone)]
pub struct Game {
    initial: GameState,
    state: GameState,
}

impl Game {
    /// Start a new game with `starting_side` to move
    pub fn new(starting_side: Side) -> Self {
        let initial = GameState::new(starting_side);
        info!(%starting_side, "new game");
        Self {
            state: initial.clone(),
            initial,
        }
    }

    /// Rebuild a game from a persisted record after verifying it replays
    pub fn from_record(record: &GameRecord) -> DamaResult<Self> {
        let state = record.verify()?;
        Ok(Self {
            initial: GameState::new(record.starting_side),
            state,
        })
    }

    /// Current state
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.state.turn()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.winner
    }

    /// Number of recorded steps
    #[inline]
    pub fn move_count(&self) -> usize {
        self.state.history.len()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.state.legal_moves()
    }

    /// Validate and apply one step.
    ///
    /// On error the state is left exactly as it was. When the step leaves
    /// the next side without any legal move, that side loses.
    pub fn submit_move(&mut self, from: Pos, to: Pos) -> DamaResult<Move> {
        if self.state.is_over() {
            return Err(DamaError::GameOver);
        }
        for square in [from, to] {
            if !square.is_on_board() {
                return Err(DamaError::OffBoard {
                    row: square.row,
                    col: square.col,
                });
            }
        }

        let Some((mv, next)) = self.state.try_apply(from, to) else {
            warn!(%from, %to, turn = %self.state.turn(), "rejected illegal move");
            return Err(DamaError::IllegalMove { from, to });
        };
        self.state = next;
        info!(
            side = %mv.side,
            %from,
            %to,
            captured = ?mv.captured,
            "move applied"
        );

        if let Some(outcome) = self.state.winner {
            info!(%outcome, "game decided by elimination");
        } else {
            self.settle_if_stuck();
        }
        Ok(mv)
    }

    /// Declare a loss for the side to move when it has no legal move.
    ///
    /// Returns whether the game was decided by this call.
    pub fn settle_if_stuck(&mut self) -> bool {
        if self.state.is_over() || !self.state.legal_moves().is_empty() {
            return false;
        }
        let loser = self.state.turn();
        info!(%loser, "no legal moves left");
        self.decide(Outcome::Win(loser.opponent()))
    }

    /// State after the first `step` recorded moves, for history browsing
    pub fn replay_to(&self, step: usize) -> GameState {
        let history = &self.state.history;
        replay(&self.initial, &history[..step.min(history.len())])
    }

    /// `side` gives up; the opponent wins
    pub fn resign(&mut self, side: Side) -> DamaResult<()> {
        self.decide_or_err(Outcome::Win(side.opponent()))
    }

    /// Turn clock ran out for the side to move
    pub fn timeout(&mut self) -> DamaResult<()> {
        let side = self.state.turn();
        self.decide_or_err(Outcome::Win(side.opponent()))
    }

    /// Both sides agreed to a draw
    pub fn accept_draw(&mut self) -> DamaResult<()> {
        self.decide_or_err(Outcome::Draw)
    }

    /// Persistable record of this game
    pub fn record(&self) -> GameRecord {
        GameRecord::from_state(&self.state)
    }

    fn decide_or_err(&mut self, outcome: Outcome) -> DamaResult<()> {
        if self.decide(outcome) {
            Ok(())
        } else {
            Err(DamaError::GameOver)
        }
    }

    fn decide(&mut self, outcome: Outcome) -> bool {
        if self.state.is_over() {
            return false;
        }
        self.state = self.state.with_outcome(outcome);
        info!(%outcome, moves = self.state.history.len(), "game over");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = Game::new(Side::White);
        assert_eq!(game.turn(), Side::White);
        assert!(!game.is_over());
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.legal_moves().len(), 3);
    }

    #[test]
    fn test_submit_legal_move() {
        let mut game = Game::new(Side::Black);
        let mv = game.submit_move(Pos::new(3, 4), Pos::new(4, 4)).unwrap();
        assert_eq!(mv.side, Side::Black);
        assert_eq!(game.turn(), Side::White);
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_submit_rejections_leave_state_unchanged() {
        let mut game = Game::new(Side::Black);
        let before = game.state().clone();

        assert!(matches!(
            game.submit_move(Pos::new(0, 0), Pos::new(1, 0)),
            Err(DamaError::IllegalMove { .. })
        ));
        assert!(matches!(
            game.submit_move(Pos::new(3, 4), Pos { row: 9, col: 4 }),
            Err(DamaError::OffBoard { row: 9, col: 4 })
        ));
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_resign_and_game_over() {
        let mut game = Game::new(Side::Black);
        game.resign(Side::Black).unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Win(Side::White)));

        assert!(matches!(
            game.submit_move(Pos::new(3, 4), Pos::new(4, 4)),
            Err(DamaError::GameOver)
        ));
        assert!(matches!(game.accept_draw(), Err(DamaError::GameOver)));
        assert_eq!(game.outcome(), Some(Outcome::Win(Side::White)));
    }

    #[test]
    fn test_timeout_loses_for_side_to_move() {
        let mut game = Game::new(Side::Black);
        game.submit_move(Pos::new(3, 4), Pos::new(4, 4)).unwrap();
        game.timeout().unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Win(Side::Black)));
    }

    #[test]
    fn test_accept_draw() {
        let mut game = Game::new(Side::Black);
        game.accept_draw().unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_replay_to_steps() {
        let mut game = Game::new(Side::Black);
        game.submit_move(Pos::new(3, 4), Pos::new(4, 4)).unwrap();
        let after_one = game.state().clone();
        let mv = game.legal_moves()[0];
        game.submit_move(mv.from, mv.to).unwrap();

        assert_eq!(game.replay_to(0), GameState::new(Side::Black));
        assert_eq!(game.replay_to(1), after_one);
        assert_eq!(game.replay_to(2).position, game.state().position);
        // Past the end clamps to the current position
        assert_eq!(game.replay_to(50).position, game.state().position);
    }

    #[test]
    fn test_record_round_trip() {
        let mut game = Game::new(Side::White);
        game.submit_move(Pos::new(5, 4), Pos::new(4, 4)).unwrap();
        let record = game.record();

        let restored = Game::from_record(&record).unwrap();
        assert_eq!(restored.state(), game.state());
    }
}
