//! Tunable trainer settings.
//!
//! Every field falls back to the value in `constants.rs`, so a config file
//! only needs the keys it wants to override.

use crate::constants::*;
use crate::error::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrainerConfig {
    /// `None` keeps every attempt.
    pub max_attempts_per_id: Option<usize>,
    pub half_life_minutes: f64,
    pub session_gap_ms: i64,
    pub practice_goal_minutes: f64,
    pub fast_response_ms: i64,
    pub fast_streak_threshold: u32,
    pub long_streak_threshold: u32,
    pub speed_table: Vec<f64>,
    pub persist_difficulty: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_attempts_per_id: Some(MAX_ATTEMPTS_PER_ID),
            half_life_minutes: HALF_LIFE_MINUTES,
            session_gap_ms: SESSION_GAP_MS,
            practice_goal_minutes: PRACTICE_GOAL_MINUTES,
            fast_response_ms: FAST_RESPONSE_MS,
            fast_streak_threshold: FAST_STREAK_THRESHOLD,
            long_streak_threshold: LONG_STREAK_THRESHOLD,
            speed_table: SPEED_TABLE.to_vec(),
            persist_difficulty: false,
        }
    }
}

impl TrainerConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: TrainerConfig = serde_json::from_str(&contents)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Highest speed tier the table supports.
    pub fn max_speed_tier(&self) -> u8 {
        self.speed_table.len().saturating_sub(1).min(u8::MAX as usize) as u8
    }

    /// Playback rate for a tier, clamped to the last table entry.
    pub fn playback_rate(&self, tier: u8) -> f64 {
        let idx = (tier as usize).min(self.speed_table.len().saturating_sub(1));
        self.speed_table.get(idx).copied().unwrap_or(1.0)
    }
}
