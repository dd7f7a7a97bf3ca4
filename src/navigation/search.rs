//! URL query parameters with `URLSearchParams` semantics.

use super::error::HostError;
use serde::{Deserialize, Serialize};

/// Ordered query parameters of a navigation entry's URL.
///
/// Keys may repeat. `get` returns the first value for a key, `set`
/// collapses a key to a single value, `delete` drops every value.
///
/// # Example
///
/// ```rust
/// use funnel::navigation::SearchParams;
///
/// let mut params = SearchParams::parse("?tab=1&signup.step=email").unwrap();
/// params.set("signup.step", "password");
/// assert_eq!(params.get("signup.step"), Some("password"));
/// assert_eq!(params.encode().unwrap(), "tab=1&signup.step=password");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchParams(Vec<(String, String)>);

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query, with or without
    /// the leading `?`.
    pub fn parse(query: &str) -> Result<Self, HostError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        Ok(Self(pairs))
    }

    /// Encode back into a query string, without the leading `?`.
    pub fn encode(&self) -> Result<String, HostError> {
        Ok(serde_urlencoded::to_string(&self.0)?)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Set `key` to `value`: the first occurrence is overwritten and any
    /// others removed, or the pair is appended if the key is new.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.0.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.0[first].1 = value;
                let mut index = 0;
                self.0.retain(|(k, _)| {
                    let keep = index <= first || *k != key;
                    index += 1;
                    keep
                });
            }
            None => self.0.push((key, value)),
        }
    }

    /// Remove every value for `key`.
    pub fn delete(&mut self, key: &str) {
        self.0.retain(|(k, _)| k != key);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
