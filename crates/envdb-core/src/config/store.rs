//! In-memory configuration store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::parser::Entry;

/// Key/value pairs parsed from one env file.
///
/// Built once by the loader and read-only afterwards: there is no public
/// way to insert or remove keys.
#[derive(Clone, Debug, Default)]
pub struct ConfigStore {
    values: HashMap<String, String>,
    /// File the values were read from, if any.
    source: Option<PathBuf>,
}

impl ConfigStore {
    /// Build a store from parsed entries. Later duplicates overwrite earlier ones.
    pub fn from_entries<I>(entries: I, source: Option<PathBuf>) -> Self
    where
        I: IntoIterator<Item = Entry>,
    {
        let values = entries
            .into_iter()
            .map(|Entry { key, value }| (key, value))
            .collect();
        ConfigStore { values, source }
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a key, falling back to `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: Option<&'a str>) -> Option<&'a str> {
        self.get(key).or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The env file this store was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// All entries sorted by key.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self
            .values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parser::parse_str;

    #[test]
    fn test_last_write_wins() {
        let store = ConfigStore::from_entries(parse_str("A=1\nA=2"), None);
        assert_eq!(store.get("A"), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_or_default() {
        let store = ConfigStore::from_entries(parse_str("SET=yes"), None);
        assert_eq!(store.get_or("SET", Some("no")), Some("yes"));
        assert_eq!(store.get_or("MISSING", Some("fallback")), Some("fallback"));
        assert_eq!(store.get_or("MISSING", None), None);
    }

    #[test]
    fn test_sorted_keys() {
        let store = ConfigStore::from_entries(parse_str("B=2\nC=3\nA=1"), None);
        let keys: Vec<_> = store.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_default_is_empty() {
        let store = ConfigStore::default();
        assert!(store.is_empty());
        assert!(store.source().is_none());
    }
}
