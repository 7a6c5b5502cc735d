//! Persisted log of recent queries.
//!
//! The log is stored as a JSON array of strings under a single key. Storage
//! failures and malformed data never surface as errors: the log degrades to
//! an empty, non-persisted list.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use folio_core::SearchConfig;
use tracing::debug;

use crate::{ClientError, Result};

/// Minimal client-side key-value storage.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory store, optionally simulating disabled storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    /// Create an empty, working store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every operation fails.
    pub fn unavailable() -> Self {
        Self {
            entries: RefCell::default(),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(ClientError::Storage("storage disabled".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Most-recent-first list of distinct queries, capped in length.
#[derive(Debug)]
pub struct RecentSearches<S> {
    store: S,
    key: String,
    limit: usize,
    min_len: usize,
    entries: Vec<String>,
}

impl<S: KeyValueStore> RecentSearches<S> {
    /// Load the log from `store`, treating missing or malformed data as empty.
    pub fn load(store: S, key: impl Into<String>, limit: usize, min_len: usize) -> Self {
        let key = key.into();
        let entries = match store.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(stored) => sanitize(stored, limit, min_len),
                Err(e) => {
                    debug!(key = %key, error = %e, "ignoring malformed recent searches");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!(key = %key, error = %e, "recent searches unavailable");
                Vec::new()
            }
        };

        Self {
            store,
            key,
            limit,
            min_len,
            entries,
        }
    }

    /// Load using the configured key and limits.
    pub fn from_config(store: S, config: &SearchConfig) -> Self {
        Self::load(
            store,
            config.storage_key.clone(),
            config.recent_limit,
            config.min_recent_len,
        )
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of remembered queries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remember a query.
    ///
    /// Queries shorter than the minimum length are ignored. A repeated query
    /// moves to the front. Returns whether the log changed.
    pub fn record(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.chars().count() < self.min_len {
            return false;
        }
        if self.entries.first().is_some_and(|first| first == text) {
            return false;
        }

        self.entries.retain(|entry| entry != text);
        self.entries.insert(0, text.to_string());
        self.entries.truncate(self.limit);
        self.persist();
        true
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(&self.key) {
            debug!(key = %self.key, error = %e, "failed to clear recent searches");
        }
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(ClientError::from)
            .and_then(|json| self.store.set(&self.key, &json));
        if let Err(e) = result {
            debug!(key = %self.key, error = %e, "failed to persist recent searches");
        }
    }
}

/// Restore the log invariants on data read back from storage.
fn sanitize(stored: Vec<String>, limit: usize, min_len: usize) -> Vec<String> {
    let mut entries: Vec<String> = Vec::with_capacity(limit);
    for entry in stored {
        let entry = entry.trim();
        if entry.chars().count() >= min_len && !entries.iter().any(|e| e == entry) {
            entries.push(entry.to_string());
        }
        if entries.len() == limit {
            break;
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "folio:recent-searches";

    fn log(store: Rc<MemoryStore>) -> RecentSearches<Rc<MemoryStore>> {
        RecentSearches::load(store, KEY, 5, 2)
    }

    #[test]
    fn test_record_most_recent_first() {
        let mut recent = log(Rc::new(MemoryStore::new()));
        assert!(recent.record("rust"));
        assert!(recent.record("leptos"));
        assert_eq!(recent.entries(), ["leptos", "rust"]);
    }

    #[test]
    fn test_record_moves_duplicate_to_front() {
        let mut recent = log(Rc::new(MemoryStore::new()));
        recent.record("rust");
        recent.record("leptos");
        recent.record("wasm");
        assert!(recent.record("rust"));
        assert_eq!(recent.entries(), ["rust", "wasm", "leptos"]);
        assert!(!recent.record("rust"));
        assert_eq!(recent.len(), 3);
    }

    #[test]
    fn test_record_caps_length() {
        let mut recent = log(Rc::new(MemoryStore::new()));
        for query in ["aa", "bb", "cc", "dd", "ee", "ff", "gg"] {
            recent.record(query);
        }
        assert_eq!(recent.entries(), ["gg", "ff", "ee", "dd", "cc"]);
    }

    #[test]
    fn test_record_ignores_short_queries() {
        let mut recent = log(Rc::new(MemoryStore::new()));
        assert!(!recent.record("a"));
        assert!(!recent.record("  b  "));
        assert!(!recent.record("   "));
        assert!(recent.is_empty());
        assert!(recent.record("  go "));
        assert_eq!(recent.entries(), ["go"]);
    }

    #[test]
    fn test_persisted_across_loads() {
        let store = Rc::new(MemoryStore::new());
        {
            let mut recent = log(store.clone());
            recent.record("rust");
            recent.record("typescript");
        }

        let raw = store.get(KEY).unwrap().unwrap();
        assert_eq!(raw, r#"["typescript","rust"]"#);

        let recent = log(store);
        assert_eq!(recent.entries(), ["typescript", "rust"]);
    }

    #[test]
    fn test_malformed_data_treated_as_empty() {
        let store = Rc::new(MemoryStore::new());
        store.set(KEY, "{not json").unwrap();
        assert!(log(store.clone()).is_empty());

        store.set(KEY, r#"{"recent": ["rust"]}"#).unwrap();
        assert!(log(store.clone()).is_empty());

        store.set(KEY, "[1, 2, 3]").unwrap();
        assert!(log(store).is_empty());
    }

    #[test]
    fn test_stored_data_sanitized() {
        let store = Rc::new(MemoryStore::new());
        store
            .set(KEY, r#"["rust","x","rust","a1","b2","c3","d4","e5"]"#)
            .unwrap();
        let recent = log(store);
        assert_eq!(recent.entries(), ["rust", "a1", "b2", "c3", "d4"]);
    }

    #[test]
    fn test_unavailable_storage_is_silent() {
        let mut recent = RecentSearches::load(MemoryStore::unavailable(), KEY, 5, 2);
        assert!(recent.is_empty());
        assert!(recent.record("rust"));
        assert_eq!(recent.entries(), ["rust"]);
        recent.clear();
        assert!(recent.is_empty());
    }

    #[test]
    fn test_clear_removes_key() {
        let store = Rc::new(MemoryStore::new());
        let mut recent = log(store.clone());
        recent.record("rust");
        recent.clear();
        assert!(store.get(KEY).unwrap().is_none());
    }
}
