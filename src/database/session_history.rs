//! Per-pair practice session records, kept under `@pairsSessionHistory`.
use super::store::KeyValueStore;
use crate::constants::SESSION_HISTORY_KEY;
use crate::error::{Result, StoreError};
use log::error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSession {
    pub session_id: String,
    pub start_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    pub attempts: u32,
    pub correct: u32,
}

pub type SessionHistory = HashMap<String, Vec<PairSession>>;

fn read(store: &impl KeyValueStore) -> Result<SessionHistory> {
    match store.get(SESSION_HISTORY_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(SessionHistory::new()),
    }
}

pub fn load_session_history(store: &impl KeyValueStore) -> SessionHistory {
    read(store).unwrap_or_else(|e| {
        error!("Error loading session history: {}", e);
        SessionHistory::new()
    })
}

pub fn save_session_history(store: &impl KeyValueStore, history: &SessionHistory) {
    let result = serde_json::to_string(history)
        .map_err(StoreError::from)
        .and_then(|json| store.set(SESSION_HISTORY_KEY, &json));
    if let Err(e) = result {
        error!("Error saving session history: {}", e);
    }
}

pub fn add_pair_session(store: &impl KeyValueStore, pair_id: &str, session: PairSession) {
    let mut history = load_session_history(store);
    history.entry(pair_id.to_string()).or_default().push(session);
    save_session_history(store, &history);
}

/// Replaces every session record of one pair.
pub fn set_pair_sessions(store: &impl KeyValueStore, pair_id: &str, sessions: Vec<PairSession>) {
    let mut history = load_session_history(store);
    history.insert(pair_id.to_string(), sessions);
    save_session_history(store, &history);
}

pub fn get_pair_sessions(store: &impl KeyValueStore, pair_id: &str) -> Vec<PairSession> {
    load_session_history(store)
        .remove(pair_id)
        .unwrap_or_default()
}
