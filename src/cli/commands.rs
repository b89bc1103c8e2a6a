//! fibproc CLI command implementations.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cache::CacheStats;
use crate::numeric::{FibonacciStrategy, MAX_FIB_INDEX};
use crate::processor::{DataProcessor, Dataset};
use crate::types::config::{Config, CONFIG_FILE_NAME};
use crate::{FibprocError, FibprocResult};

/// Above this index the naive recursion takes noticeably long.
const SLOW_RECURSIVE_N: u32 = 40;

/// Writes the default configuration into `path` (or the current directory).
pub fn init(path: Option<PathBuf>) -> FibprocResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    Config::default_config().save(&config_path)?;

    println!("Configuration created at: {}", config_path.display());
    Ok(())
}

/// Prints F(n).
pub fn fib(n: u32, recursive: bool) -> FibprocResult<()> {
    let strategy = if recursive {
        FibonacciStrategy::Recursive
    } else {
        FibonacciStrategy::Iterative
    };

    if recursive && n > SLOW_RECURSIVE_N && n <= MAX_FIB_INDEX {
        tracing::warn!(n, "naive recursion is exponential; this may take a long time");
    }

    let value = strategy.compute(n)?;
    tracing::debug!(n, %strategy, value, "fibonacci computed");
    println!("{}", value);
    Ok(())
}

#[derive(Serialize)]
struct ProcessReport<'a> {
    input: &'a [i64],
    output: &'a [i64],
    cache: CacheStats,
}

/// Processes `values` `repeat` times with one processor and prints the result.
pub fn process(values: Vec<i64>, repeat: u32, json: bool, config: &Config) -> FibprocResult<()> {
    if repeat == 0 {
        return Err(FibprocError::InvalidInput(
            "--repeat must be at least 1".to_string(),
        ));
    }

    let mut processor = DataProcessor::new(config.cache.clone())?;
    let data = Dataset::new(values);

    let mut output = processor.process(&data)?;
    for _ in 1..repeat {
        output = processor.process(&data)?;
    }

    let stats = processor.stats();
    if json {
        let report = ProcessReport {
            input: data.as_slice(),
            output: &output,
            cache: stats,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{:?}", &*output);
        if config.cache.enabled {
            println!(
                "cache: {} hits, {} misses, {} entries (hit rate {:.2})",
                stats.hits,
                stats.misses,
                stats.size,
                stats.hit_rate()
            );
        }
    }

    Ok(())
}

/// Prints the effective configuration as TOML.
pub fn config_cmd(config_path: &Path, config: &Config) -> FibprocResult<()> {
    if config_path.exists() {
        println!("# {}", config_path.display());
    } else {
        println!("# defaults ({} not found)", config_path.display());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Shows version.
pub fn version() {
    println!("fibproc {}", env!("CARGO_PKG_VERSION"));
}
