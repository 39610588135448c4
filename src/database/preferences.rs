//! Small persisted user choices: interface language, selected category, and
//! (when enabled) the adaptive difficulty state.
use super::store::KeyValueStore;
use crate::constants::{CATEGORY_INDEX_KEY, DIFFICULTY_STATE_KEY, LANGUAGE_KEY};
use crate::i18n::Locale;
use crate::models::GroupState;
use log::{error, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

fn load<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(Some(json)) => serde_json::from_str(&json)
            .inspect_err(|e| warn!("Ignoring unreadable '{}': {}", key, e))
            .ok(),
        Ok(None) => None,
        Err(e) => {
            error!("Error reading '{}': {}", key, e);
            None
        }
    }
}

fn save<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) {
    let result = match serde_json::to_string(value) {
        Ok(json) => store.set(key, &json),
        Err(e) => Err(e.into()),
    };
    if let Err(e) = result {
        error!("Error saving '{}': {}", key, e);
    }
}

/// Stored interface language; unknown or missing labels give the default.
pub fn load_language(store: &impl KeyValueStore) -> Locale {
    load::<String>(store, LANGUAGE_KEY)
        .and_then(|label| Locale::from_label(&label))
        .unwrap_or_default()
}

pub fn save_language(store: &impl KeyValueStore, locale: Locale) {
    save(store, LANGUAGE_KEY, &locale.label());
}

pub fn load_category_index(store: &impl KeyValueStore) -> usize {
    load(store, CATEGORY_INDEX_KEY).unwrap_or(0)
}

pub fn save_category_index(store: &impl KeyValueStore, index: usize) {
    save(store, CATEGORY_INDEX_KEY, &index);
}

pub fn load_difficulty_state(store: &impl KeyValueStore) -> HashMap<String, GroupState> {
    load(store, DIFFICULTY_STATE_KEY).unwrap_or_default()
}

pub fn save_difficulty_state(store: &impl KeyValueStore, groups: &HashMap<String, GroupState>) {
    save(store, DIFFICULTY_STATE_KEY, groups);
}
