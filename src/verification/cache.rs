//! Insertion-ordered verdict cache.
//!
//! Maps derived cache keys to raw verdict strings. The first write of a key
//! fixes its position; overwrites replace the value in place. Entries are
//! never removed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache statistics for monitoring.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of lookups that found a verdict.
    pub hits: u64,
    /// Number of lookups that found nothing.
    pub misses: u64,
    /// Number of distinct keys inserted.
    pub insertions: u64,
    /// Number of writes that replaced an existing verdict.
    pub overwrites: u64,
}

impl CacheStats {
    /// Calculate hit rate as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Key-addressed verdict cache.
#[derive(Debug, Default)]
pub struct VerificationCache {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
    hits: AtomicU64,
    misses: AtomicU64,
    overwrites: u64,
}

impl VerificationCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cache from ordered entries. Duplicate keys keep the
    /// position of their first occurrence and the value of their last.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut cache = Self::new();
        for (key, value) in entries {
            cache.put(key, value);
        }
        cache
    }

    /// Insert or overwrite the verdict stored under `key`.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 = value;
            self.overwrites += 1;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    /// Look up the verdict stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let found = self
            .index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_str());
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Look up the verdict stored under `key`, falling back to `default`.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Check whether a verdict is stored under `key`. Not counted in stats.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate over every entry in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Every entry in insertion order.
    #[must_use]
    pub fn list_all(&self) -> Vec<(String, String)> {
        self.entries.clone()
    }

    /// Number of distinct keys stored.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get current cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            insertions: self.entries.len() as u64,
            overwrites: self.overwrites,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cache_basic_operations() {
        let mut cache = VerificationCache::new();

        // Initially empty
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);

        cache.put("a", "1");
        cache.put("b", "2");
        assert_eq!(cache.get("a"), Some("1"));
        assert_eq!(cache.get("b"), Some("2"));
        assert_eq!(cache.count(), 2);
    }

    #[test]
    fn test_overwrite_keeps_count_and_position() {
        let mut cache = VerificationCache::new();
        cache.put("first", "v1");
        cache.put("second", "x");
        assert_eq!(cache.count(), 2);

        cache.put("first", "v2");
        assert_eq!(cache.get("first"), Some("v2"));
        assert_eq!(cache.count(), 2);
        assert_eq!(
            cache.list_all(),
            vec![
                ("first".to_string(), "v2".to_string()),
                ("second".to_string(), "x".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_or_default() {
        let cache = VerificationCache::new();
        assert_eq!(
            cache.get_or("missing", r#"{"error": "Not found"}"#),
            r#"{"error": "Not found"}"#
        );
    }

    #[test]
    fn test_cache_stats() {
        let mut cache = VerificationCache::new();

        // Miss
        assert!(cache.get("k").is_none());
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);

        cache.put("k", "v");
        cache.put("k", "w");
        let stats = cache.stats();
        assert_eq!(stats.insertions, 1);
        assert_eq!(stats.overwrites, 1);

        // Hit
        assert!(cache.get("k").is_some());
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert!((stats.hit_rate() - 50.0).abs() < 0.01);

        // contains() does not touch the counters
        assert!(cache.contains("k"));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_from_entries_deduplicates() {
        let cache = VerificationCache::from_entries(vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "3".to_string()),
        ]);
        let keys: Vec<_> = cache.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(cache.get("a"), Some("3"));
    }

    proptest! {
        #[test]
        fn prop_count_equals_distinct_keys(
            writes in proptest::collection::vec(("[a-e]{1,2}", ".{0,8}"), 0..40)
        ) {
            let mut cache = VerificationCache::new();
            let mut distinct = std::collections::HashSet::new();
            for (key, value) in &writes {
                cache.put(key.clone(), value.clone());
                distinct.insert(key.clone());
            }
            prop_assert_eq!(cache.count(), distinct.len());

            // Last write wins for every key.
            for key in &distinct {
                let last = writes.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
                prop_assert_eq!(cache.get(key), last);
            }
        }
    }
}
