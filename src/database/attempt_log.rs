//! Append-only history of quiz attempts, stored as one JSON map under
//! `pairProgress`.
//!
//! Every write is a read-modify-write of the whole map. Two writers sharing
//! a store can interleave and lose an update (last write wins); callers that
//! need stronger guarantees have to serialize access themselves.
//!
//! Storage failures never reach the caller: reads degrade to an empty map
//! and failed writes are logged and dropped.

use super::store::KeyValueStore;
use crate::constants::PROGRESS_KEY;
use crate::error::{Result, StoreError};
use crate::models::{Attempt, ProgressMap};
use chrono::Utc;
use log::{debug, error, info, warn};

pub struct AttemptLog<S: KeyValueStore> {
    store: S,
    max_attempts_per_id: Option<usize>,
}

impl<S: KeyValueStore> AttemptLog<S> {
    pub fn new(store: S, max_attempts_per_id: Option<usize>) -> Self {
        Self {
            store,
            max_attempts_per_id,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Appends an attempt stamped with the current time.
    pub fn record_attempt(&self, id: &str, is_correct: bool, duration_min: f64) {
        let attempt = Attempt::new(is_correct, Utc::now().timestamp_millis(), duration_min);
        self.persist_attempt(id, attempt);
    }

    /// Appends a prepared attempt; failures are logged and swallowed.
    pub fn persist_attempt(&self, id: &str, attempt: Attempt) {
        if let Err(e) = self.append(id, attempt) {
            error!("Error saving attempt for '{}': {}", id, e);
        }
    }

    fn append(&self, id: &str, attempt: Attempt) -> Result<()> {
        // An unparseable record counts as no data and is replaced by this write.
        let mut progress = match self.read() {
            Err(StoreError::Json(e)) => {
                warn!("Discarding unreadable progress: {}", e);
                ProgressMap::new()
            }
            other => other?,
        };
        let stats = progress.entry(id.to_string()).or_default();
        stats.push_capped(attempt, self.max_attempts_per_id);
        debug!("[Log] '{}' now has {} attempts", id, stats.attempts.len());
        self.write(&progress)
    }

    fn read(&self) -> Result<ProgressMap> {
        match self.store.get(PROGRESS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(ProgressMap::new()),
        }
    }

    fn write(&self, progress: &ProgressMap) -> Result<()> {
        let json = serde_json::to_string(progress)?;
        self.store.set(PROGRESS_KEY, &json)
    }

    /// Overwrites the whole log with `progress`, trimmed to the cap.
    /// Returns the number of pairs stored.
    pub fn replace_all(&self, mut progress: ProgressMap) -> Result<usize> {
        for stats in progress.values_mut() {
            stats.trim(self.max_attempts_per_id);
        }
        self.write(&progress)?;
        info!("Progress log replaced with {} pairs", progress.len());
        Ok(progress.len())
    }

    /// Every pair's history; empty when nothing is stored or it cannot be read.
    pub fn get_all_progress(&self) -> ProgressMap {
        self.read().unwrap_or_else(|e| {
            error!("Error reading progress: {}", e);
            ProgressMap::new()
        })
    }

    /// Deletes the whole log.
    pub fn reset_all(&self) {
        match self.store.remove(PROGRESS_KEY) {
            Ok(()) => info!("Progress log cleared"),
            Err(e) => error!("Error clearing progress: {}", e),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::database::MemoryStore;

    /// A store whose writes always fail.
    pub(crate) struct ReadOnlyStore(pub MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_record_then_read_back() {
        let log = AttemptLog::new(MemoryStore::new(), None);
        let before = Utc::now().timestamp_millis();
        log.record_attempt("es__iVsI__sheep_ship", true, 0.5);
        let after = Utc::now().timestamp_millis();

        let progress = log.get_all_progress();
        let attempts = &progress["es__iVsI__sheep_ship"].attempts;
        assert_eq!(attempts.len(), 1);
        assert!(attempts[0].is_correct);
        assert_eq!(attempts[0].duration_min, 0.5);
        assert!(attempts[0].timestamp >= before && attempts[0].timestamp <= after);
    }

    #[test]
    fn test_appends_in_order_per_id() {
        let log = AttemptLog::new(MemoryStore::new(), None);
        log.persist_attempt("a", Attempt::new(true, 1, 0.0));
        log.persist_attempt("b", Attempt::new(false, 2, 0.0));
        log.persist_attempt("a", Attempt::new(false, 3, 0.0));

        let progress = log.get_all_progress();
        assert_eq!(progress.len(), 2);
        let stamps: Vec<i64> = progress["a"].attempts.iter().map(|a| a.timestamp).collect();
        assert_eq!(stamps, vec![1, 3]);
    }

    #[test]
    fn test_cap_applies_at_write_time() {
        let log = AttemptLog::new(MemoryStore::new(), Some(100));
        for t in 0..105 {
            log.persist_attempt("a", Attempt::new(true, t, 0.0));
        }
        let progress = log.get_all_progress();
        assert_eq!(progress["a"].attempts.len(), 100);
        assert_eq!(progress["a"].attempts[0].timestamp, 5);
    }

    #[test]
    fn test_missing_or_corrupt_data_reads_as_empty() {
        let store = MemoryStore::new();
        let log = AttemptLog::new(&store, None);
        assert!(log.get_all_progress().is_empty());

        store.set(PROGRESS_KEY, "{not json").unwrap();
        assert!(log.get_all_progress().is_empty());
    }

    #[test]
    fn test_record_replaces_corrupt_data() {
        let store = MemoryStore::new();
        store.set(PROGRESS_KEY, "{not json").unwrap();
        let log = AttemptLog::new(&store, None);

        log.record_attempt("a", true, 0.5);
        log.record_attempt("a", false, 0.5);

        let progress = log.get_all_progress();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress.get("a").map(|s| s.attempts.len()), Some(2));
    }

    #[test]
    fn test_reads_records_without_duration() {
        let store = MemoryStore::new();
        store
            .set(PROGRESS_KEY, r#"{"x":{"attempts":[{"isCorrect":true,"timestamp":7}]}}"#)
            .unwrap();
        let log = AttemptLog::new(&store, None);
        assert_eq!(log.get_all_progress()["x"].attempts[0].duration_min, 0.0);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let log = AttemptLog::new(ReadOnlyStore(MemoryStore::new()), None);
        log.record_attempt("a", true, 0.0);
        log.reset_all();
        assert!(log.get_all_progress().is_empty());
    }

    #[test]
    fn test_reset_all_removes_everything() {
        let log = AttemptLog::new(MemoryStore::new(), None);
        log.record_attempt("a", true, 0.0);
        log.record_attempt("b", false, 0.0);
        log.reset_all();
        assert!(log.get_all_progress().is_empty());
    }

    #[test]
    fn test_concurrent_writers_last_write_wins() {
        let store = MemoryStore::new();
        let log = AttemptLog::new(&store, None);

        // Two callers read the same snapshot before either writes.
        let mut first = log.read().unwrap();
        let mut second = log.read().unwrap();
        first.entry("a".to_string()).or_default().attempts.push(Attempt::new(true, 1, 0.0));
        second.entry("b".to_string()).or_default().attempts.push(Attempt::new(true, 2, 0.0));
        log.write(&first).unwrap();
        log.write(&second).unwrap();

        let progress = log.get_all_progress();
        assert!(!progress.contains_key("a"));
        assert!(progress.contains_key("b"));
    }
}
