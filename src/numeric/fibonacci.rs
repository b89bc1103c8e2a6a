//! Fibonacci numbers over `u64`.

use crate::{FibprocError, FibprocResult};

/// Largest index whose Fibonacci number fits in a `u64`.
pub const MAX_FIB_INDEX: u32 = 93;

/// Computes F(n): `n` for 0 and 1, otherwise F(n-1) + F(n-2).
///
/// Walks the recurrence with two accumulators, so it runs in O(n) time and
/// constant stack. Fails with [`FibprocError::Overflow`] above
/// [`MAX_FIB_INDEX`].
pub fn fibonacci(n: u32) -> FibprocResult<u64> {
    if n <= 1 {
        return Ok(u64::from(n));
    }

    let (mut prev, mut curr) = (0u64, 1u64);
    for i in 2..=n {
        let next = prev
            .checked_add(curr)
            .ok_or_else(|| FibprocError::overflow("fibonacci", n))?;
        tracing::trace!(index = i, value = next, "fibonacci step");
        prev = curr;
        curr = next;
    }
    Ok(curr)
}

/// Computes F(n) by naive double recursion.
///
/// Exponential in `n`; useful as a reference for [`fibonacci`]. The
/// overflow bound is checked once before recursing.
pub fn fibonacci_recursive(n: u32) -> FibprocResult<u64> {
    if n > MAX_FIB_INDEX {
        return Err(FibprocError::overflow("fibonacci_recursive", n));
    }
    Ok(naive(n))
}

fn naive(n: u32) -> u64 {
    if n <= 1 {
        return u64::from(n);
    }
    naive(n - 1) + naive(n - 2)
}

/// Which algorithm to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FibonacciStrategy {
    /// Accumulator loop.
    #[default]
    Iterative,
    /// Double recursion.
    Recursive,
}

impl FibonacciStrategy {
    /// Computes F(n) with this strategy.
    pub fn compute(self, n: u32) -> FibprocResult<u64> {
        match self {
            FibonacciStrategy::Iterative => fibonacci(n),
            FibonacciStrategy::Recursive => fibonacci_recursive(n),
        }
    }
}

impl std::fmt::Display for FibonacciStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FibonacciStrategy::Iterative => write!(f, "iterative"),
            FibonacciStrategy::Recursive => write!(f, "recursive"),
        }
    }
}
