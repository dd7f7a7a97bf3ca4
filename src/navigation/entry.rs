//! Navigation entries: one unit of a host's history stack.

use super::search::SearchParams;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Opaque per-entry payload.
///
/// Shared by everything living on the entry, so writers must merge their
/// own keys into the existing payload rather than replace it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryState(Map<String, Value>);

impl EntryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for EntryState {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A navigation entry: its URL query and its opaque payload.
///
/// `key` identifies the entry. It changes when a new entry is pushed and
/// survives in-place replacement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub key: Uuid,
    pub search: SearchParams,
    pub state: EntryState,
}

impl NavigationEntry {
    pub fn new(search: SearchParams, state: EntryState) -> Self {
        Self {
            key: Uuid::new_v4(),
            search,
            state,
        }
    }

    /// An entry with no query and no payload.
    pub fn blank() -> Self {
        Self::new(SearchParams::new(), EntryState::new())
    }
}

impl Default for NavigationEntry {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_state_insert_and_remove() {
        let mut state = EntryState::new();

        assert!(state.insert("f.context", json!({ "x": 1 })).is_none());
        assert!(state.contains("f.context"));
        assert_eq!(state.get("f.context"), Some(&json!({ "x": 1 })));

        assert_eq!(state.remove("f.context"), Some(json!({ "x": 1 })));
        assert!(state.is_empty());
    }

    #[test]
    fn entry_state_serializes_as_object() {
        let mut state = EntryState::new();
        state.insert("scroll", json!(120));

        assert_eq!(serde_json::to_value(&state).unwrap(), json!({ "scroll": 120 }));
    }

    #[test]
    fn new_entries_get_distinct_keys() {
        let a = NavigationEntry::blank();
        let b = NavigationEntry::blank();

        assert_ne!(a.key, b.key);
        assert!(a.search.is_empty());
        assert!(a.state.is_empty());
    }
}
