//! Configuration for fibproc.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use crate::{FibprocError, FibprocResult};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "fibproc.toml";

/// Default number of cached results.
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Main configuration for fibproc.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Result cache settings of the data processor.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// How the processor decides that two inputs are the same cache entry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CacheKeying {
    /// Equal contents share an entry (SHA-256 of the elements).
    #[default]
    Value,
    /// Only the same shared allocation hits; equal copies are distinct entries.
    Identity,
}

impl std::fmt::Display for CacheKeying {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKeying::Value => write!(f, "value"),
            CacheKeying::Identity => write!(f, "identity"),
        }
    }
}

/// LRU result cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum cache capacity (number of entries).
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    /// Entry time to live in seconds. 0 keeps entries until evicted.
    #[serde(default)]
    pub ttl_secs: u64,

    /// Key semantics.
    #[serde(default)]
    pub keying: CacheKeying,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_cache_capacity(),
            ttl_secs: 0,
            keying: CacheKeying::default(),
        }
    }
}

impl CacheConfig {
    /// Time to live as a [`Duration`], `None` when entries never expire.
    pub fn ttl(&self) -> Option<Duration> {
        (self.ttl_secs > 0).then(|| Duration::from_secs(self.ttl_secs))
    }

    /// Checks that the settings describe a usable cache.
    pub fn validate(&self) -> FibprocResult<()> {
        if self.enabled && self.capacity == 0 {
            return Err(FibprocError::config(
                "cache.capacity must be at least 1 when the cache is enabled",
            ));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY.get()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> FibprocResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> FibprocResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            cache: CacheConfig::default(),
        }
    }

    /// Validates every section.
    pub fn validate(&self) -> FibprocResult<()> {
        match self.general.log_format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(FibprocError::config(format!(
                    "unknown log_format '{}' (expected text or json)",
                    other
                )))
            }
        }
        self.cache.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
