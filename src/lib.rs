//! # fibproc
//!
//! Two small utilities with a shared ambient stack:
//!
//! - [`numeric`] - the Fibonacci recurrence, iterative and naive recursive
//! - [`processor`] - a sequence transformer that memoizes its results
//! - [`cache`] - the bounded LRU cache behind the processor
//! - [`types`] - configuration and errors
//! - `cli` - command line interface (feature `cli`)
//!
//! ```
//! use fibproc::{fibonacci, DataProcessor, Dataset};
//!
//! assert_eq!(fibonacci(10).unwrap(), 55);
//!
//! let mut processor = DataProcessor::with_defaults();
//! let data = Dataset::new(vec![1, 2, 3, 4, 5, 6]);
//! assert_eq!(&*processor.process(&data).unwrap(), &[12]);
//! ```

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod numeric;
pub mod processor;
pub mod types;

pub use numeric::{fibonacci, fibonacci_recursive};
pub use processor::{DataProcessor, Dataset, ProcessorConfig};
pub use types::config::Config;
pub use types::errors::{FibprocError, FibprocResult};
