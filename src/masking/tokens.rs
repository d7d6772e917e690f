//! Token store
//!
//! Deterministic, deduplicated, reversible tokenization of scalar values.
//! Tokens have the form `<KEY>_<N>` where `<KEY>` is the upper-cased field key
//! and `<N>` counts the distinct values seen under that key.

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// One issued token and the value it stands for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenEntry {
    /// Issued token, e.g. `ENTITY_NAME_1`
    pub token: String,
    /// Upper-cased key prefix the token was minted under
    pub key: String,
    /// Original value
    pub value: Value,
}

/// Token map plus per-key counters for one masking session
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    /// Issued tokens in registration order
    entries: Vec<TokenEntry>,
    /// token -> index into `entries`
    by_token: HashMap<String, usize>,
    /// key prefix -> canonical value -> index into `entries`
    by_value: HashMap<String, HashMap<String, usize>>,
    /// key prefix -> distinct values tokenized so far
    counters: BTreeMap<String, u64>,
}

impl TokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with counters seeded at zero for `keys`
    pub fn with_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut store = Self::new();
        for key in keys {
            store.counters.entry(key.to_uppercase()).or_insert(0);
        }
        store
    }

    /// Return the token for `value` under `key`, minting one if needed
    ///
    /// Calling this twice with the same `(key, value)` pair returns the same
    /// token. The key prefix is compared case-insensitively, so `email` and
    /// `EMAIL` share one token namespace.
    pub fn tokenize(&mut self, key: &str, value: &Value) -> String {
        let prefix = key.to_uppercase();
        let canonical = value.to_string();

        if let Some(&idx) = self
            .by_value
            .get(&prefix)
            .and_then(|values| values.get(&canonical))
        {
            return self.entries[idx].token.clone();
        }

        let counter = self.counters.entry(prefix.clone()).or_insert(0);
        *counter += 1;
        let token = format!("{prefix}_{counter}");

        let idx = self.entries.len();
        self.entries.push(TokenEntry {
            token: token.clone(),
            key: prefix.clone(),
            value: value.clone(),
        });
        self.by_token.insert(token.clone(), idx);
        self.by_value
            .entry(prefix)
            .or_default()
            .insert(canonical, idx);

        tracing::trace!(token = %token, "Issued token");
        token
    }

    /// Token previously issued for `value` under `key`, if any
    pub fn lookup(&self, key: &str, value: &Value) -> Option<&str> {
        self.by_value
            .get(&key.to_uppercase())
            .and_then(|values| values.get(&value.to_string()))
            .map(|&idx| self.entries[idx].token.as_str())
    }

    /// Original value for an issued token
    pub fn resolve(&self, token: &str) -> Option<&Value> {
        self.by_token.get(token).map(|&idx| &self.entries[idx].value)
    }

    /// Current counter for `key`; zero if the key was never seen or seeded
    pub fn counter(&self, key: &str) -> u64 {
        self.counters.get(&key.to_uppercase()).copied().unwrap_or(0)
    }

    /// All counters, including seeded keys still at zero
    pub fn counters(&self) -> &BTreeMap<String, u64> {
        &self.counters
    }

    /// Issued tokens in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TokenEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
