//! Memoizing sequence processor.
//!
//! [`DataProcessor::process`] doubles every element of a [`Dataset`] and
//! keeps the doubled values above [`THRESHOLD`]. Results are cached per
//! input, keyed either by contents or by identity depending on
//! [`CacheKeying`](crate::types::config::CacheKeying).

mod dataset;

pub use dataset::Dataset;

use std::sync::Arc;

use crate::cache::{CacheKey, CacheStats, ResultCache};
use crate::types::config::{CacheConfig, CacheKeying, DEFAULT_CACHE_CAPACITY};
use crate::{FibprocError, FibprocResult};

/// Multiplier applied to every element.
pub const SCALE_FACTOR: i64 = 2;

/// Scaled values must be strictly greater than this to be kept.
pub const THRESHOLD: i64 = 10;

/// Options consulted by the processor.
pub type ProcessorConfig = CacheConfig;

/// Scales every element and keeps the results above [`THRESHOLD`], in order.
pub fn transform(data: &[i64]) -> FibprocResult<Vec<i64>> {
    let mut out = Vec::new();
    for &item in data {
        let scaled = item
            .checked_mul(SCALE_FACTOR)
            .ok_or_else(|| FibprocError::overflow("transform", item))?;
        if scaled > THRESHOLD {
            out.push(scaled);
        }
    }
    Ok(out)
}

/// Transforms sequences and remembers the results.
pub struct DataProcessor {
    config: ProcessorConfig,
    cache: Option<ResultCache>,
}

impl DataProcessor {
    /// Creates a processor, validating `config`.
    pub fn new(config: ProcessorConfig) -> FibprocResult<Self> {
        config.validate()?;
        let cache = if config.enabled {
            Some(ResultCache::from_config(&config)?)
        } else {
            None
        };

        tracing::debug!(
            enabled = config.enabled,
            capacity = config.capacity,
            keying = %config.keying,
            "data processor created"
        );

        Ok(Self { config, cache })
    }

    /// Creates a processor with the default configuration.
    pub fn with_defaults() -> Self {
        let config = ProcessorConfig::default();
        let cache = Some(ResultCache::new(DEFAULT_CACHE_CAPACITY, config.ttl()));
        Self { config, cache }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Transforms `data`, serving repeated inputs from the cache.
    ///
    /// A miss computes [`transform`] and stores the result; a hit returns the
    /// stored result without recomputation.
    pub fn process(&mut self, data: &Dataset) -> FibprocResult<Arc<[i64]>> {
        let Some(cache) = self.cache.as_mut() else {
            return Ok(transform(data.as_slice())?.into());
        };

        let key = CacheKey::for_dataset(data, self.config.keying);
        if let Some(hit) = cache.get(&key) {
            tracing::debug!(len = data.len(), "cache hit");
            return Ok(hit);
        }

        tracing::debug!(len = data.len(), "cache miss, computing");
        let output: Arc<[i64]> = transform(data.as_slice())?.into();

        let pinned = match self.config.keying {
            CacheKeying::Identity => Some(data.clone()),
            CacheKeying::Value => None,
        };
        cache.insert(key, Arc::clone(&output), pinned);

        Ok(output)
    }

    /// Returns cache statistics; all zero when caching is disabled.
    pub fn stats(&self) -> CacheStats {
        self.cache.as_ref().map(ResultCache::stats).unwrap_or_default()
    }

    /// Drops every cached result.
    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }

    /// Forgets the cached result for `data`, returning whether one existed.
    ///
    /// Under identity keying this also releases the held input.
    pub fn invalidate(&mut self, data: &Dataset) -> bool {
        let keying = self.config.keying;
        self.cache
            .as_mut()
            .is_some_and(|cache| cache.invalidate(&CacheKey::for_dataset(data, keying)))
    }

    /// Removes entries older than `ttl_secs`, returning how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        let removed = self.cache.as_mut().map_or(0, ResultCache::cleanup_expired);
        if removed > 0 {
            tracing::debug!(removed, "expired cache entries purged");
        }
        removed
    }
}

impl Default for DataProcessor {
    fn default() -> Self {
        Self::with_defaults()
    }
}
