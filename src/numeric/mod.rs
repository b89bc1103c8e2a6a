//! Numeric utilities.
//!
//! Currently just the Fibonacci recurrence, in an iterative and a naive
//! recursive form.

mod fibonacci;

pub use fibonacci::{fibonacci, fibonacci_recursive, FibonacciStrategy, MAX_FIB_INDEX};
