//! LRU cache for processor results.
//!
//! Bounds the memory of a long-lived [`DataProcessor`](crate::processor::DataProcessor):
//! entries are evicted least-recently-used first and may optionally expire
//! after a TTL.

mod lru;

pub use lru::{CacheKey, CacheStats, CachedSequence, ResultCache};
