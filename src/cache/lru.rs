//! LRU cache for processed sequences.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lru::LruCache;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::processor::Dataset;
use crate::types::config::{CacheConfig, CacheKeying};
use crate::{FibprocError, FibprocResult};

/// Key of a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Hex SHA-256 of the sequence contents.
    Value(String),
    /// Address of a shared [`Dataset`] allocation.
    Identity(usize),
}

impl CacheKey {
    /// Builds the key for `data` under the given keying mode.
    pub fn for_dataset(data: &Dataset, keying: CacheKeying) -> Self {
        match keying {
            CacheKeying::Value => Self::Value(Self::value_digest(data.as_slice())),
            CacheKeying::Identity => Self::Identity(data.identity()),
        }
    }

    /// Hashes the length followed by every element in little-endian order.
    pub fn value_digest(values: &[i64]) -> String {
        let mut hasher = Sha256::new();
        hasher.update((values.len() as u64).to_le_bytes());
        for v in values {
            hasher.update(v.to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Cached output.
#[derive(Debug, Clone)]
pub struct CachedSequence {
    /// Transformed sequence.
    pub output: Arc<[i64]>,

    /// When it was cached.
    pub cached_at: DateTime<Utc>,

    /// Input held alive for identity keys, so its address is not reused.
    pub pinned: Option<Dataset>,
}

impl CachedSequence {
    /// Creates a new cached entry.
    pub fn new(output: Arc<[i64]>, pinned: Option<Dataset>) -> Self {
        Self {
            output,
            cached_at: Utc::now(),
            pinned,
        }
    }

    /// Checks whether the entry is older than `ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        elapsed >= ttl
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Current number of entries.
    pub size: usize,

    /// Maximum capacity.
    pub capacity: usize,

    /// Number of hits.
    pub hits: u64,

    /// Number of misses.
    pub misses: u64,

    /// Entries displaced to make room.
    pub evictions: u64,
}

impl CacheStats {
    /// Computes the hit rate.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Bounded LRU cache of transformed sequences.
pub struct ResultCache {
    cache: LruCache<CacheKey, CachedSequence>,
    ttl: Option<Duration>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl ResultCache {
    /// Creates a new cache.
    ///
    /// # Arguments
    /// - `capacity`: Maximum number of entries
    /// - `ttl`: Entry lifetime, `None` to keep entries until evicted
    pub fn new(capacity: NonZeroUsize, ttl: Option<Duration>) -> Self {
        Self {
            cache: LruCache::new(capacity),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> FibprocResult<Self> {
        let capacity = NonZeroUsize::new(config.capacity)
            .ok_or_else(|| FibprocError::config("cache.capacity must be at least 1"))?;
        Ok(Self::new(capacity, config.ttl()))
    }

    /// Looks up an entry.
    ///
    /// Returns `None` if absent or expired; expired entries are dropped.
    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<[i64]>> {
        // peek first so an expired entry is not promoted
        let is_expired = self
            .cache
            .peek(key)
            .map(|c| self.ttl.is_some_and(|ttl| c.is_expired(ttl)));

        match is_expired {
            Some(true) => {
                self.cache.pop(key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(?key, "cache entry expired");
                None
            }
            Some(false) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                self.cache.get(key).map(|c| Arc::clone(&c.output))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Inserts an entry, evicting the least recently used one if full.
    ///
    /// With a TTL, expired entries are purged first so they never displace
    /// live ones.
    pub fn insert(&mut self, key: CacheKey, output: Arc<[i64]>, pinned: Option<Dataset>) {
        if self.cache.len() == self.cache.cap().get() && !self.cache.contains(&key) {
            self.cleanup_expired();
        }

        let entry = CachedSequence::new(output, pinned);
        if let Some((evicted, _)) = self.cache.push(key.clone(), entry) {
            // push also hands back the old value when the key was already present
            if evicted != key {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = ?evicted, "cache entry evicted");
            }
        }
    }

    /// Removes a specific entry, returning whether it was present.
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.cache.pop(key).is_some()
    }

    /// Clears the whole cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Whether `key` is present, without touching recency or counters.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.cache.contains(key)
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Removes expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };

        let expired_keys: Vec<CacheKey> = self
            .cache
            .iter()
            .filter(|(_, v)| v.is_expired(ttl))
            .map(|(k, _)| k.clone())
            .collect();

        for key in &expired_keys {
            self.cache.pop(key);
        }
        expired_keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(values: &[i64]) -> Arc<[i64]> {
        Arc::from(values)
    }

    fn cache(capacity: usize, ttl: Option<Duration>) -> ResultCache {
        ResultCache::new(NonZeroUsize::new(capacity).unwrap(), ttl)
    }

    fn key(name: &str) -> CacheKey {
        CacheKey::Value(name.to_string())
    }

    #[test]
    fn test_value_digest() {
        let d1 = CacheKey::value_digest(&[1, 2, 3]);
        let d2 = CacheKey::value_digest(&[1, 2, 3]);
        let d3 = CacheKey::value_digest(&[3, 2, 1]);

        assert_eq!(d1, d2);
        assert_ne!(d1, d3);
        assert_eq!(d1.len(), 64);
        assert_ne!(CacheKey::value_digest(&[]), CacheKey::value_digest(&[0]));
    }

    #[test]
    fn test_key_for_dataset() {
        let a = Dataset::new(vec![1, 2]);
        let b = Dataset::new(vec![1, 2]);

        assert_eq!(
            CacheKey::for_dataset(&a, CacheKeying::Value),
            CacheKey::for_dataset(&b, CacheKeying::Value)
        );
        assert_ne!(
            CacheKey::for_dataset(&a, CacheKeying::Identity),
            CacheKey::for_dataset(&b, CacheKeying::Identity)
        );
        assert_eq!(
            CacheKey::for_dataset(&a, CacheKeying::Identity),
            CacheKey::for_dataset(&a.clone(), CacheKeying::Identity)
        );
    }

    #[test]
    fn test_cache_hit() {
        let mut cache = cache(10, None);
        cache.insert(key("k"), output(&[12]), None);

        let cached = cache.get(&key("k"));
        assert_eq!(cached.as_deref(), Some(&[12][..]));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_cache_miss() {
        let mut cache = cache(10, None);

        assert!(cache.get(&key("nonexistent")).is_none());

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_cache_expiration() {
        // Zero TTL: every entry is already expired
        let mut cache = cache(10, Some(Duration::ZERO));
        cache.insert(key("k"), output(&[1]), None);

        assert!(cache.get(&key("k")).is_none());
        assert_eq!(cache.stats().size, 0);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_no_ttl_never_expires() {
        let mut cache = cache(10, None);
        cache.insert(key("k"), output(&[1]), None);
        cache.cleanup_expired();
        assert!(cache.get(&key("k")).is_some());
    }

    #[test]
    fn test_cache_lru_eviction() {
        let mut cache = cache(2, None);

        cache.insert(key("key1"), output(&[1]), None);
        cache.insert(key("key2"), output(&[2]), None);
        cache.insert(key("key3"), output(&[3]), None); // evicts key1

        assert!(cache.get(&key("key1")).is_none());
        assert!(cache.get(&key("key2")).is_some());
        assert!(cache.get(&key("key3")).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_reinsert_is_not_eviction() {
        let mut cache = cache(2, None);
        cache.insert(key("k"), output(&[1]), None);
        cache.insert(key("k"), output(&[2]), None);

        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.get(&key("k")).as_deref(), Some(&[2][..]));
    }

    #[test]
    fn test_recently_used_survives() {
        let mut cache = cache(2, None);
        cache.insert(key("a"), output(&[1]), None);
        cache.insert(key("b"), output(&[2]), None);
        cache.get(&key("a"));
        cache.insert(key("c"), output(&[3]), None); // evicts b

        assert!(cache.contains(&key("a")));
        assert!(!cache.contains(&key("b")));
    }

    #[test]
    fn test_cache_invalidate() {
        let mut cache = cache(10, None);
        cache.insert(key("k"), output(&[1]), None);
        assert!(cache.get(&key("k")).is_some());

        assert!(cache.invalidate(&key("k")));
        assert!(!cache.invalidate(&key("k")));
        assert!(cache.get(&key("k")).is_none());
    }

    #[test]
    fn test_cleanup_expired_counts() {
        let mut cache = cache(10, Some(Duration::from_millis(50)));
        cache.insert(key("a"), output(&[1]), None);
        cache.insert(key("b"), output(&[2]), None);

        assert_eq!(cache.cleanup_expired(), 0);
        std::thread::sleep(Duration::from_millis(80));
        assert_eq!(cache.cleanup_expired(), 2);
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn test_full_cache_purges_expired_before_evicting() {
        let mut cache = cache(2, Some(Duration::from_millis(50)));
        cache.insert(key("old"), output(&[1]), None);
        std::thread::sleep(Duration::from_millis(80));
        cache.insert(key("fresh"), output(&[2]), None);
        cache.insert(key("new"), output(&[3]), None); // drops "old", keeps "fresh"

        assert!(cache.contains(&key("fresh")));
        assert!(cache.contains(&key("new")));
        assert!(!cache.contains(&key("old")));
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = cache(10, None);
        cache.insert(key("key1"), output(&[1]), None);
        cache.insert(key("key2"), output(&[2]), None);

        cache.clear();

        assert!(cache.get(&key("key1")).is_none());
        assert!(cache.get(&key("key2")).is_none());
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn test_cache_stats() {
        let mut cache = cache(10, None);
        cache.insert(key("key1"), output(&[1]), None);

        cache.get(&key("key1")); // hit
        cache.get(&key("key2")); // miss
        cache.get(&key("key1")); // hit

        let stats = cache.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.capacity, 10);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.666).abs() < 0.01);
    }

    #[test]
    fn test_from_config() {
        let config = CacheConfig {
            capacity: 3,
            ttl_secs: 60,
            ..CacheConfig::default()
        };
        let cache = ResultCache::from_config(&config).unwrap();
        assert_eq!(cache.stats().capacity, 3);

        let zero = CacheConfig {
            capacity: 0,
            ..CacheConfig::default()
        };
        assert!(ResultCache::from_config(&zero).is_err());
    }

    #[test]
    fn test_cached_sequence_is_expired() {
        let cached = CachedSequence::new(output(&[1]), None);

        assert!(!cached.is_expired(Duration::from_secs(3600)));
        assert!(cached.is_expired(Duration::ZERO));
    }
}
