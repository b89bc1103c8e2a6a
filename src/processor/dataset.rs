//! Immutable shared input sequences.

use std::sync::Arc;

/// An ordered, immutable sequence of numbers.
///
/// Clones share one allocation and therefore one identity; building a new
/// `Dataset` from equal contents yields a distinct identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset(Arc<[i64]>);

impl Dataset {
    /// Wraps `values`.
    pub fn new(values: Vec<i64>) -> Self {
        Self(values.into())
    }

    /// Borrowed view of the elements.
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared allocation, stable while any clone is alive.
    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const i64 as usize
    }
}

impl From<Vec<i64>> for Dataset {
    fn from(values: Vec<i64>) -> Self {
        Self::new(values)
    }
}

impl From<&[i64]> for Dataset {
    fn from(values: &[i64]) -> Self {
        Self(values.into())
    }
}

impl FromIterator<i64> for Dataset {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[i64]> for Dataset {
    fn as_ref(&self) -> &[i64] {
        self.as_slice()
    }
}
