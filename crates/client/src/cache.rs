//! In-memory query cache keyed by logical resource.
//!
//! Last write wins. Entries are stored as JSON so one map can hold every
//! resource type, and become stale after `stale_time`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Logical resources the client caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Stock,
    Orders,
}

impl QueryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::Stock => "stock",
            QueryKey::Orders => "orders",
        }
    }
}

#[derive(Debug)]
struct Entry {
    data: serde_json::Value,
    cached_at: Instant,
}

#[derive(Debug)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    stale_time: Duration,
}

impl QueryCache {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            stale_time,
        }
    }

    /// Fresh cached value for `key`, if any.
    ///
    /// Stale entries are dropped on read.
    pub fn get<T: DeserializeOwned>(&self, key: QueryKey) -> Option<T> {
        let mut entries = self.lock();
        let entry = entries.get(&key)?;

        if entry.cached_at.elapsed() >= self.stale_time {
            tracing::debug!(key = key.as_str(), "cache entry stale");
            entries.remove(&key);
            return None;
        }

        match serde_json::from_value(entry.data.clone()) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key = key.as_str(), "discarding undecodable cache entry: {err}");
                entries.remove(&key);
                None
            }
        }
    }

    pub fn put<T: Serialize>(&self, key: QueryKey, value: &T) {
        let data = match serde_json::to_value(value) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(key = key.as_str(), "not caching unserializable value: {err}");
                return;
            }
        };
        self.lock().insert(
            key,
            Entry {
                data,
                cached_at: Instant::now(),
            },
        );
    }

    /// Discard `key` so the next read re-fetches.
    pub fn invalidate(&self, key: QueryKey) {
        if self.lock().remove(&key).is_some() {
            tracing::debug!(key = key.as_str(), "cache invalidated");
        }
    }

    pub fn contains(&self, key: QueryKey) -> bool {
        self.lock().contains_key(&key)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        // Poisoning is ignored: entries are plain data.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips_until_invalidated() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.put(QueryKey::Stock, &vec![1u32, 2, 3]);

        assert_eq!(cache.get::<Vec<u32>>(QueryKey::Stock), Some(vec![1, 2, 3]));
        assert_eq!(cache.get::<Vec<u32>>(QueryKey::Orders), None);

        cache.invalidate(QueryKey::Stock);
        assert!(!cache.contains(QueryKey::Stock));
        assert_eq!(cache.get::<Vec<u32>>(QueryKey::Stock), None);
    }

    #[test]
    fn last_write_wins() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.put(QueryKey::Orders, &vec!["a"]);
        cache.put(QueryKey::Orders, &vec!["b", "c"]);
        assert_eq!(
            cache.get::<Vec<String>>(QueryKey::Orders),
            Some(vec!["b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn zero_stale_time_never_serves_cached_data() {
        let cache = QueryCache::new(Duration::ZERO);
        cache.put(QueryKey::Stock, &vec![1u32]);
        assert_eq!(cache.get::<Vec<u32>>(QueryKey::Stock), None);
        assert!(!cache.contains(QueryKey::Stock));
    }

    #[test]
    fn clear_drops_everything() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.put(QueryKey::Stock, &1u8);
        cache.put(QueryKey::Orders, &2u8);
        cache.clear();
        assert!(!cache.contains(QueryKey::Stock));
        assert!(!cache.contains(QueryKey::Orders));
    }
}
