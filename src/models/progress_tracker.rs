//! In-memory view of practice progress, kept in step with the attempt log.
//!
//! The tracker loads the whole progress map once and afterwards treats its
//! own copy as the truth for the running session. Each recorded attempt is
//! applied in memory first and then written through the log; a failed write
//! is logged by the log and does not undo the in-memory update.

use super::analytics::{self, PairSummary};
use super::{Attempt, DifficultyController, PairStats, ProgressMap, TierChange};
use crate::config::TrainerConfig;
use crate::database::session_history::{self, PairSession};
use crate::database::{AttemptLog, KeyValueStore, preferences};
use crate::models::Pair;
use chrono::Utc;
use log::{debug, info};

pub struct ProgressTracker<S: KeyValueStore> {
    log: AttemptLog<S>,
    progress: ProgressMap,
    controller: DifficultyController,
    config: TrainerConfig,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    /// Loads stored progress (and difficulty state, when it is persisted).
    pub fn load(store: S, config: TrainerConfig) -> Self {
        let log = AttemptLog::new(store, config.max_attempts_per_id);
        let progress = log.get_all_progress();

        let controller = if config.persist_difficulty {
            let groups = preferences::load_difficulty_state(log.store());
            debug!("Restored difficulty state for {} groups", groups.len());
            DifficultyController::with_state(&config, groups)
        } else {
            DifficultyController::new(&config)
        };

        info!("Loaded progress for {} pairs", progress.len());
        Self {
            log,
            progress,
            controller,
            config,
        }
    }

    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    pub fn stats(&self, id: &str) -> Option<&PairStats> {
        self.progress.get(id)
    }

    pub fn controller(&self) -> &DifficultyController {
        &self.controller
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn attempt_log(&self) -> &AttemptLog<S> {
        &self.log
    }

    /// Records an attempt for `id`: in memory immediately, then persisted.
    pub fn record_attempt(&mut self, id: &str, is_correct: bool, duration_min: f64) {
        let attempt = Attempt::new(is_correct, Utc::now().timestamp_millis(), duration_min);
        self.progress
            .entry(id.to_string())
            .or_default()
            .push_capped(attempt.clone(), self.config.max_attempts_per_id);
        self.log.persist_attempt(id, attempt);
    }

    /// Handles one answered question: adjusts the pair's contrast group
    /// within `category`, then records the attempt under the pair's ID.
    pub fn submit_answer(
        &mut self,
        category: &str,
        pair: &Pair,
        correct: bool,
        response_time_ms: i64,
        duration_min: f64,
    ) -> TierChange {
        let change = self
            .controller
            .record_answer(&pair.group_key(category), correct, response_time_ms);
        self.record_attempt(&pair.id(category), correct, duration_min);

        if self.config.persist_difficulty {
            preferences::save_difficulty_state(self.log.store(), self.controller.groups());
        }
        change
    }

    /// Clears stored and in-memory progress.
    pub fn reset_all(&mut self) {
        self.log.reset_all();
        self.progress.clear();
    }

    /// Brings the session history of `id` in line with its attempts: new
    /// sessions are added and a session that has grown since it was last
    /// archived is updated in place. Returns how many records changed.
    pub fn archive_sessions(&self, id: &str) -> usize {
        let Some(stats) = self.progress.get(id) else {
            return 0;
        };
        let store = self.log.store();
        let gap_ms = self.config.session_gap_ms;
        let mut records = session_history::get_pair_sessions(store, id);

        let mut changed = 0;
        for session in analytics::sessions(&stats.attempts, gap_ms) {
            let (Some(first), Some(last)) = (session.first(), session.last()) else {
                continue;
            };
            // The cap may have dropped the start of an archived session, so
            // match on overlap within the session gap rather than start time.
            let existing = records.iter_mut().find(|r| {
                r.start_time <= last.timestamp
                    && r.end_time.unwrap_or(r.start_time) + gap_ms >= first.timestamp
            });
            match existing {
                Some(record) => {
                    let updated = grow_session(record, &session);
                    if *record != updated {
                        *record = updated;
                        changed += 1;
                    }
                }
                None => {
                    records.push(PairSession {
                        session_id: format!("{}@{}", id, first.timestamp),
                        start_time: first.timestamp,
                        end_time: Some(last.timestamp),
                        attempts: session.len() as u32,
                        correct: count_correct(&session),
                    });
                    changed += 1;
                }
            }
        }

        if changed > 0 {
            session_history::set_pair_sessions(store, id, records);
        }
        debug!("Archived {} sessions for '{}'", changed, id);
        changed
    }

    pub fn summary(&self, id: &str) -> PairSummary {
        let attempts = self
            .progress
            .get(id)
            .map(|s| s.attempts.as_slice())
            .unwrap_or_default();
        analytics::summarize(attempts, &self.config)
    }
}

fn count_correct(attempts: &[Attempt]) -> u32 {
    attempts.iter().filter(|a| a.is_correct).count() as u32
}

/// `record` extended with the attempts of `session`, its current view of the
/// same practice session. When the record's first attempts are no longer in
/// `session`, only attempts after the record's end are added to its counts.
fn grow_session(record: &PairSession, session: &[Attempt]) -> PairSession {
    let (Some(first), Some(last)) = (session.first(), session.last()) else {
        return record.clone();
    };
    if record.start_time == first.timestamp {
        return PairSession {
            end_time: Some(last.timestamp),
            attempts: session.len() as u32,
            correct: count_correct(session),
            ..record.clone()
        };
    }

    let seen_until = record.end_time.unwrap_or(record.start_time);
    let newer: Vec<Attempt> = session
        .iter()
        .filter(|a| a.timestamp > seen_until)
        .cloned()
        .collect();
    PairSession {
        end_time: Some(seen_until.max(last.timestamp)),
        attempts: record.attempts + newer.len() as u32,
        correct: record.correct + count_correct(&newer),
        ..record.clone()
    }
}
