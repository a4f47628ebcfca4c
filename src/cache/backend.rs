//! Cache backend interface and an in-memory implementation.

use std::collections::HashMap;

use serde_json::Value;

use super::entry::CacheEntry;

/// A key/value cache a host plugs in.
///
/// Reads take `&mut self` so that backends may evict stale records while
/// looking them up.
pub trait Cache {
    /// Returns the value stored under `key`, or `None` when the record is
    /// missing, expired, empty or undecodable.
    fn get(&mut self, key: &str) -> Option<Value>;

    /// Stores `value` under `key` for `ttl` seconds (`0` = unbounded).
    fn set(&mut self, key: &str, value: Value, ttl: u64);

    /// Removes the record under `key`. Returns whether one existed.
    fn delete(&mut self, key: &str) -> bool;

    /// Removes every record.
    fn clear(&mut self);

    /// Returns true when `key` holds a valid record.
    fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Process-local cache holding serialized [`CacheEntry`] records.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    /// Serialized entries by key.
    records: HashMap<String, String>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, including ones that expired but have not
    /// been read since.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Cache for MemoryCache {
    fn get(&mut self, key: &str) -> Option<Value> {
        let record = self.records.get(key)?;
        match CacheEntry::deserialize(record) {
            Some(entry) if entry.is_valid() => Some(entry.into_value()),
            _ => {
                tracing::debug!(key, "Evicting stale cache record");
                self.records.remove(key);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: Value, ttl: u64) {
        let entry = CacheEntry::new(value, ttl);
        self.records.insert(key.to_string(), entry.serialize());
    }

    fn delete(&mut self, key: &str) -> bool {
        self.records.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn set_then_get() {
        let mut cache = MemoryCache::new();
        cache.set("greeting", json!("Hello"), 0);

        expect_that!(cache.get("greeting"), some(eq(&json!("Hello"))));
        expect_that!(cache.has("greeting"), eq(true));
        expect_that!(cache.get("missing"), none());
    }

    #[googletest::test]
    fn expired_record_is_a_miss_and_evicted() {
        let mut cache = MemoryCache::new();
        let stale = CacheEntry::with_timestamp("old", 1.0, 5);
        cache.records.insert("stale".to_string(), stale.serialize());

        expect_that!(cache.get("stale"), none());
        expect_that!(cache.is_empty(), eq(true));
    }

    #[googletest::test]
    fn corrupt_record_is_a_miss() {
        let mut cache = MemoryCache::new();
        cache.records.insert("broken".to_string(), "[1, 2".to_string());

        expect_that!(cache.has("broken"), eq(false));
        expect_that!(cache.len(), eq(0));
    }

    #[googletest::test]
    fn empty_value_is_a_miss() {
        let mut cache = MemoryCache::new();
        cache.set("blank", json!(""), 0);

        expect_that!(cache.get("blank"), none());
    }

    #[googletest::test]
    fn delete_and_clear() {
        let mut cache = MemoryCache::new();
        cache.set("a", json!(1), 0);
        cache.set("b", json!(2), 0);

        expect_that!(cache.delete("a"), eq(true));
        expect_that!(cache.delete("a"), eq(false));
        expect_that!(cache.len(), eq(1));

        cache.clear();
        expect_that!(cache.is_empty(), eq(true));
    }
}
