// src/constants.rs

// --- Storage Keys ---
pub const PROGRESS_KEY: &str = "pairProgress";
pub const SESSION_HISTORY_KEY: &str = "@pairsSessionHistory";
pub const DIFFICULTY_STATE_KEY: &str = "difficultyState";
pub const LANGUAGE_KEY: &str = "@userLanguage";
pub const CATEGORY_INDEX_KEY: &str = "@categoryIndex";

pub const DEFAULT_DB_PATH: &str = "minimal_pairs.sqlite3";

// --- Attempt Log ---
pub const MAX_ATTEMPTS_PER_ID: usize = 100;

// --- Analytics ---
pub const HALF_LIFE_MINUTES: f64 = 60.0;
pub const SESSION_GAP_MS: i64 = 120_000; // 2 minutes
pub const PRACTICE_GOAL_MINUTES: f64 = 60.0;
pub const MS_PER_MINUTE: f64 = 60_000.0;

// --- Adaptive Difficulty ---
pub const FAST_RESPONSE_MS: i64 = 2_000;
pub const FAST_STREAK_THRESHOLD: u32 = 3;
pub const LONG_STREAK_THRESHOLD: u32 = 10;

/// Playback rate per speed tier.
pub const SPEED_TABLE: [f64; 3] = [1.0, 1.1, 1.2];

pub const MIN_LEXICAL_TIER: u8 = 1;
pub const MAX_LEXICAL_TIER: u8 = 4;

// --- Pair Selection ---
pub const VISIBLE_PAIRS_LIMIT: usize = 10;
