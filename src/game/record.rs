//! Persisted game records
//!
//! A record stores the starting side, the full step history and the final
//! board plus outcome. Loading never trusts the stored board: the history is
//! replayed from the initial position and must reproduce it exactly.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::{Board, Side};
use crate::error::{DamaError, DamaResult};
use crate::rules::Outcome;

use super::state::{GameState, MoveRecord};

/// Serializable summary of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub starting_side: Side,
    pub history: Vec<MoveRecord>,
    pub final_board: Board,
    pub outcome: Option<Outcome>,
}

impl GameRecord {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            starting_side: state.starting_side,
            history: state.history.clone(),
            final_board: state.position.board,
            outcome: state.winner,
        }
    }

    /// Replay the history and rebuild the final state.
    ///
    /// Fails with `ReplayDiverged` at the first step that is not legal (or
    /// whose capture/side disagree with the replayed move) and with
    /// `BoardMismatch` when the replay ends on a different board. Nothing is
    /// repaired.
    pub fn verify(&self) -> DamaResult<GameState> {
        let mut state = GameState::new(self.starting_side);

        for (step, rec) in self.history.iter().enumerate() {
            let applied = state
                .try_apply(rec.from, rec.to)
                .filter(|(mv, _)| mv.captured == rec.captured && mv.side == rec.side);
            match applied {
                Some((_, next)) => state = next,
                None => {
                    warn!(step, from = %rec.from, to = %rec.to, "recorded history diverges");
                    return Err(DamaError::ReplayDiverged { step });
                }
            }
        }

        if state.position.board != self.final_board {
            warn!(moves = self.history.len(), "replayed board differs from stored board");
            return Err(DamaError::BoardMismatch);
        }

        // Outcomes decided outside the rules (resignation, timeout, draw)
        // are not derivable from the history
        if let Some(outcome) = self.outcome {
            state = state.with_outcome(outcome);
        }
        Ok(state)
    }

    pub fn to_json(&self) -> DamaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> DamaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the record as JSON
    pub fn save(&self, path: &Path) -> DamaResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        info!(path = ?path, moves = self.history.len(), "saved game record");
        Ok(())
    }

    /// Read a record; call [`GameRecord::verify`] before trusting it
    pub fn load(path: &Path) -> DamaResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Pos};
    use crate::game::state::{apply_move, seeded_playout};

    fn played_game() -> GameState {
        let mut state = GameState::new(Side::Black);
        for _ in 0..8 {
            let Some(mv) = state.legal_moves().into_iter().last() else {
                break;
            };
            state = apply_move(&state, mv.from, mv.to);
        }
        state
    }

    #[test]
    fn test_verify_accepts_own_history() {
        let state = played_game();
        let record = GameRecord::from_state(&state);
        assert_eq!(record.verify().unwrap(), state);
    }

    #[test]
    fn test_verify_accepts_finished_game() {
        let finished = seeded_playout(1, 1000);
        assert!(finished.is_over());

        let record = GameRecord::from_state(&finished);
        assert_eq!(record.outcome, finished.winner);
        assert_eq!(record.verify().unwrap(), finished);
    }

    #[test]
    fn test_verify_keeps_external_outcome() {
        let state = played_game().with_outcome(Outcome::Draw);
        let record = GameRecord::from_state(&state);
        assert_eq!(record.verify().unwrap().winner, Some(Outcome::Draw));
    }

    #[test]
    fn test_verify_reports_divergence() {
        let state = played_game();
        let mut record = GameRecord::from_state(&state);
        record.history[1].to = Pos::new(0, 0);

        assert!(matches!(
            record.verify(),
            Err(DamaError::ReplayDiverged { step: 1 })
        ));
    }

    #[test]
    fn test_verify_reports_board_mismatch() {
        let state = played_game();
        let mut record = GameRecord::from_state(&state);
        record.final_board.place(Pos::new(4, 4), Piece::sultan(Side::White));
        record.final_board.remove(Pos::new(0, 0));

        assert!(matches!(record.verify(), Err(DamaError::BoardMismatch)));
    }

    #[test]
    fn test_json_round_trip() {
        let record = GameRecord::from_state(&played_game());
        let json = record.to_json().unwrap();
        assert_eq!(GameRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            GameRecord::from_json("{\"starting_side\":\"Black\"}"),
            Err(DamaError::Serialization(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("dama-record-{}", std::process::id()));
        let path = dir.join("game.json");
        let record = GameRecord::from_state(&played_game());

        record.save(&path).unwrap();
        let loaded = GameRecord::load(&path).unwrap();
        assert_eq!(loaded, record);
        let _ = fs::remove_dir_all(&dir);
    }
}
