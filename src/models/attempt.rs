//! One quiz answer and the per-pair history it is appended to.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Progress for every pair, keyed by pair ID.
pub type ProgressMap = HashMap<String, PairStats>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub is_correct: bool,
    /// Epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub duration_min: f64,
}

impl Attempt {
    pub fn new(is_correct: bool, timestamp: i64, duration_min: f64) -> Self {
        Self {
            is_correct,
            timestamp,
            duration_min,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PairStats {
    #[serde(default)]
    pub attempts: Vec<Attempt>,
}

impl PairStats {
    /// Appends an attempt, dropping the oldest ones beyond `cap`.
    pub fn push_capped(&mut self, attempt: Attempt, cap: Option<usize>) {
        self.attempts.push(attempt);
        self.trim(cap);
    }

    /// Drops the oldest attempts until at most `cap` remain.
    pub fn trim(&mut self, cap: Option<usize>) {
        if let Some(cap) = cap {
            if self.attempts.len() > cap {
                let excess = self.attempts.len() - cap;
                self.attempts.drain(..excess);
            }
        }
    }
}
