//! Adaptive difficulty per contrast group.
//!
//! Each group moves along two axes:
//! - a speed tier selecting the playback rate, raised after a streak of
//!   correct answers and lowered one step on every wrong answer;
//! - a lexical tier selecting which pair of the group is shown, raised when
//!   the group earns a promotion while already at top speed.
//!
//! A promotion is earned either by `fast_streak_threshold` consecutive
//! correct answers given faster than `fast_response_ms`, or by
//! `long_streak_threshold` consecutive correct answers of any speed.

use crate::config::TrainerConfig;
use crate::constants::{MAX_LEXICAL_TIER, MIN_LEXICAL_TIER};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupState {
    pub speed_tier: u8,
    pub fast_streak: u32,
    pub long_streak: u32,
    pub lexical_tier: u8,
}

impl Default for GroupState {
    fn default() -> Self {
        Self {
            speed_tier: 0,
            fast_streak: 0,
            long_streak: 0,
            lexical_tier: MIN_LEXICAL_TIER,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierChange {
    Unchanged,
    SpeedUp { from: u8, to: u8 },
    SpeedDown { from: u8, to: u8 },
    /// Speed tier went back to 0 and the group advanced to `lexical_tier`.
    LexicalPromotion { lexical_tier: u8 },
}

#[derive(Clone, Debug)]
pub struct DifficultyController {
    groups: HashMap<String, GroupState>,
    fast_response_ms: i64,
    fast_streak_threshold: u32,
    long_streak_threshold: u32,
    max_speed_tier: u8,
}

impl DifficultyController {
    pub fn new(config: &TrainerConfig) -> Self {
        Self::with_state(config, HashMap::new())
    }

    /// Resumes from previously saved group states.
    pub fn with_state(config: &TrainerConfig, groups: HashMap<String, GroupState>) -> Self {
        Self {
            groups,
            fast_response_ms: config.fast_response_ms,
            fast_streak_threshold: config.fast_streak_threshold,
            long_streak_threshold: config.long_streak_threshold,
            max_speed_tier: config.max_speed_tier(),
        }
    }

    /// State for a group; unseen groups report the starting state.
    pub fn state(&self, group: &str) -> GroupState {
        self.groups.get(group).cloned().unwrap_or_default()
    }

    pub fn speed_tier(&self, group: &str) -> u8 {
        self.state(group).speed_tier
    }

    pub fn lexical_tier(&self, group: &str) -> u8 {
        self.state(group).lexical_tier
    }

    pub fn groups(&self) -> &HashMap<String, GroupState> {
        &self.groups
    }

    /// Applies one answered attempt to `group` and reports the tier move.
    pub fn record_answer(&mut self, group: &str, correct: bool, response_time_ms: i64) -> TierChange {
        let max_speed = self.max_speed_tier;
        let fast = correct && response_time_ms < self.fast_response_ms;
        let (fast_threshold, long_threshold) = (self.fast_streak_threshold, self.long_streak_threshold);

        let state = self.groups.entry(group.to_string()).or_default();
        state.fast_streak = if fast { state.fast_streak + 1 } else { 0 };
        state.long_streak = if correct { state.long_streak + 1 } else { 0 };

        debug!(
            "[Difficulty Input] Group {}: correct {}, rt {}ms, fast streak {}, long streak {}",
            group, correct, response_time_ms, state.fast_streak, state.long_streak
        );

        let promote = state.fast_streak >= fast_threshold || state.long_streak >= long_threshold;

        let change = if promote && state.speed_tier < max_speed {
            let from = state.speed_tier;
            state.speed_tier += 1;
            TierChange::SpeedUp {
                from,
                to: state.speed_tier,
            }
        } else if promote {
            state.lexical_tier = (state.lexical_tier + 1).min(MAX_LEXICAL_TIER);
            state.speed_tier = 0;
            TierChange::LexicalPromotion {
                lexical_tier: state.lexical_tier,
            }
        } else if !correct && state.speed_tier > 0 {
            let from = state.speed_tier;
            state.speed_tier -= 1;
            TierChange::SpeedDown {
                from,
                to: state.speed_tier,
            }
        } else {
            TierChange::Unchanged
        };

        if promote {
            state.fast_streak = 0;
            state.long_streak = 0;
        }

        if change != TierChange::Unchanged {
            info!("[Difficulty Result] Group {}: {:?}", group, change);
        }
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: &str = "iVsI";

    fn controller() -> DifficultyController {
        DifficultyController::new(&TrainerConfig::default())
    }

    #[test]
    fn test_three_fast_answers_speed_up() {
        let mut c = controller();
        assert_eq!(c.record_answer(G, true, 500), TierChange::Unchanged);
        assert_eq!(c.record_answer(G, true, 500), TierChange::Unchanged);
        assert_eq!(c.record_answer(G, true, 500), TierChange::SpeedUp { from: 0, to: 1 });

        let state = c.state(G);
        assert_eq!(state.speed_tier, 1);
        assert_eq!(state.fast_streak, 0);

        // Streak restarted, so the fourth fast answer does not promote again.
        assert_eq!(c.record_answer(G, true, 500), TierChange::Unchanged);
        assert_eq!(c.speed_tier(G), 1);
        assert_eq!(c.state(G).fast_streak, 1);
    }

    #[test]
    fn test_slow_correct_answer_breaks_fast_streak_only() {
        let mut c = controller();
        c.record_answer(G, true, 500);
        c.record_answer(G, true, 500);
        assert_eq!(c.record_answer(G, true, 2_000), TierChange::Unchanged);

        let state = c.state(G);
        assert_eq!(state.fast_streak, 0);
        assert_eq!(state.long_streak, 3);
        assert_eq!(state.speed_tier, 0);
    }

    #[test]
    fn test_long_streak_promotes_slow_learners() {
        let mut c = controller();
        for _ in 0..9 {
            assert_eq!(c.record_answer(G, true, 5_000), TierChange::Unchanged);
        }
        assert_eq!(c.record_answer(G, true, 5_000), TierChange::SpeedUp { from: 0, to: 1 });
        assert_eq!(c.state(G).long_streak, 0);
    }

    #[test]
    fn test_wrong_answer_demotes_one_step() {
        let mut c = controller();
        for _ in 0..6 {
            c.record_answer(G, true, 100);
        }
        assert_eq!(c.speed_tier(G), 2);

        assert_eq!(c.record_answer(G, false, 100), TierChange::SpeedDown { from: 2, to: 1 });
        assert_eq!(c.state(G).long_streak, 0);
    }

    #[test]
    fn test_demotion_floor() {
        let mut c = controller();
        for _ in 0..5 {
            assert_eq!(c.record_answer(G, false, 100), TierChange::Unchanged);
        }
        assert_eq!(c.speed_tier(G), 0);
    }

    #[test]
    fn test_promotion_at_max_speed_moves_lexical_tier() {
        let mut c = controller();
        for _ in 0..6 {
            c.record_answer(G, true, 100);
        }
        c.record_answer(G, true, 100);
        c.record_answer(G, true, 100);
        assert_eq!(
            c.record_answer(G, true, 100),
            TierChange::LexicalPromotion { lexical_tier: 2 }
        );

        let state = c.state(G);
        assert_eq!(state.speed_tier, 0);
        assert_eq!(state.lexical_tier, 2);
        assert_eq!(state.fast_streak, 0);
        assert_eq!(state.long_streak, 0);
    }

    #[test]
    fn test_lexical_tier_caps_at_four() {
        let mut c = controller();
        for _ in 0..(9 * 6) {
            c.record_answer(G, true, 100);
        }
        assert_eq!(c.lexical_tier(G), MAX_LEXICAL_TIER);
        assert_eq!(c.speed_tier(G), 0);
    }

    #[test]
    fn test_groups_are_independent() {
        let mut c = controller();
        for _ in 0..3 {
            c.record_answer("a", true, 100);
        }
        c.record_answer("b", false, 100);
        assert_eq!(c.speed_tier("a"), 1);
        assert_eq!(c.speed_tier("b"), 0);
        assert_eq!(c.state("unseen"), GroupState::default());
    }

    #[test]
    fn test_custom_thresholds() {
        let config = TrainerConfig {
            fast_streak_threshold: 1,
            speed_table: vec![1.0, 1.5],
            ..TrainerConfig::default()
        };
        let mut c = DifficultyController::new(&config);
        assert_eq!(c.record_answer(G, true, 10), TierChange::SpeedUp { from: 0, to: 1 });
        assert_eq!(
            c.record_answer(G, true, 10),
            TierChange::LexicalPromotion { lexical_tier: 2 }
        );
    }
}
