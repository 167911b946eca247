//! Bounded LRU cache backing re-indexed table views
//!
//! Each shared row set owns one of these, keyed by index field name, so that
//! repeated `with_index` calls for the same field reuse the key index that was
//! validated the first time.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A small LRU (Least Recently Used) cache
///
/// Entries carry the value of a monotonically increasing access counter; when
/// the cache is full the entry with the smallest counter is evicted.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    map: HashMap<K, (V, u64), ahash::RandomState>, // Key -> (Value, last access)
    access_counter: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new cache holding at most `capacity` entries
    ///
    /// A capacity of zero disables caching: `put` becomes a no-op.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: HashMap::with_capacity_and_hasher(capacity, ahash::RandomState::new()),
            access_counter: 0,
        }
    }

    /// Get a clone of the value for `key`, marking it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (value, last_access) = self.map.get_mut(key)?;
        self.access_counter += 1;
        *last_access = self.access_counter;
        Some(value.clone())
    }

    /// Insert a value, evicting the least recently used entry when full
    pub fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        self.access_counter += 1;

        if self.map.len() >= self.capacity && !self.map.contains_key(&key) {
            self.evict_lru();
        }

        self.map.insert(key, (value, self.access_counter));
    }

    /// Snapshot of capacity and occupancy
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            capacity: self.capacity,
            size: self.map.len(),
        }
    }

    fn evict_lru(&mut self) {
        let lru_key = self
            .map
            .iter()
            .min_by_key(|(_, (_, last_access))| *last_access)
            .map(|(key, _)| key.clone());

        if let Some(key) = lru_key {
            self.map.remove(&key);
        }
    }
}

/// Cache statistics for monitoring and debugging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Maximum number of cached key indexes
    pub capacity: usize,
    /// Key indexes currently cached
    pub size: usize,
}

impl CacheStats {
    /// Cache utilization as a percentage
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            (self.size as f64 / self.capacity as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_cache_basic_operations() {
        let mut cache = LruCache::new(3);

        cache.put("name".to_string(), 1);
        cache.put("ref".to_string(), 2);
        cache.put("age".to_string(), 3);

        assert_eq!(cache.stats().size, 3);
        assert_eq!(cache.get("name"), Some(1));
        assert_eq!(cache.get("ref"), Some(2));
        assert_eq!(cache.get("age"), Some(3));
        assert_eq!(cache.get("floof"), None);
    }

    #[test]
    fn test_lru_cache_eviction() {
        let mut cache = LruCache::new(2);

        cache.put("a", 1);
        cache.put("b", 2);

        // Access "a" to make it more recently used
        cache.get(&"a");

        // Should evict "b"
        cache.put("c", 3);
        assert_eq!(cache.stats().size, 2);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn test_lru_cache_update_existing() {
        let mut cache = LruCache::new(2);

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("a", 10);

        assert_eq!(cache.stats().size, 2);
        assert_eq!(cache.get(&"a"), Some(10));
        assert_eq!(cache.get(&"b"), Some(2));
    }

    #[test]
    fn test_put_refreshes_recency() {
        let mut cache = LruCache::new(2);

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("a", 10);

        // "b" is now the oldest entry
        cache.put("c", 3);
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(10));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn test_zero_capacity_cache() {
        let mut cache = LruCache::new(0);

        cache.put("a", 1);
        assert_eq!(cache.stats().size, 0);
        assert_eq!(cache.get(&"a"), None);

        let stats = cache.stats();
        assert_eq!(stats.capacity, 0);
        assert_eq!(stats.utilization(), 0.0);
    }

    #[test]
    fn test_cache_stats() {
        let mut cache = LruCache::new(4);
        assert_eq!(
            cache.stats(),
            CacheStats {
                capacity: 4,
                size: 0
            }
        );

        cache.put(1, "one");
        cache.put(2, "two");
        assert_eq!(cache.stats().utilization(), 50.0);
    }
}
