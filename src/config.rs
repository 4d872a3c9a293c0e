//! User settings persisted as JSON
//!
//! Settings live in `settings.json` inside the platform configuration
//! directory (falling back to the working directory when none is known).
//! Loading never fails: a missing or unreadable file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::Side;
use crate::engine::Difficulty;
use crate::error::{DamaError, DamaResult};

const SETTINGS_FILENAME: &str = "settings.json";

/// Tunable settings for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamaConfig {
    /// Engine strength
    pub difficulty: Difficulty,
    /// Side that moves first in a new game
    pub starting_side: Side,
    /// Side controlled by the human in single-player mode
    pub human_side: Side,
    /// Seconds per turn before the side to move forfeits
    pub turn_time_limit_secs: u64,
    /// Engine accepts a draw when its evaluation is within this margin
    pub draw_accept_margin: i32,
    /// Engine accepts any draw once this many steps have been played
    pub draw_accept_after_moves: usize,
}

impl Default for DamaConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            starting_side: Side::Black,
            human_side: Side::Black,
            turn_time_limit_secs: 60,
            draw_accept_margin: 50,
            draw_accept_after_moves: 80,
        }
    }
}

/// Location of the settings file
pub fn config_path() -> PathBuf {
    match ProjectDirs::from("com", "dama", "Dama") {
        Some(dirs) => dirs.config_dir().join(SETTINGS_FILENAME),
        None => PathBuf::from(SETTINGS_FILENAME),
    }
}

impl DamaConfig {
    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Self {
        Self::load_from(&config_path())
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!(path = ?path, "no settings file, using defaults");
            return Self::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(DamaError::from)
            .and_then(|contents| Ok(serde_json::from_str::<DamaConfig>(&contents)?));

        match parsed {
            Ok(config) => {
                info!(path = ?path, "loaded settings");
                config
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    /// Save to the default location
    pub fn save(&self) -> DamaResult<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> DamaResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(path = ?path, "saved settings");
        Ok(())
    }
}
