//! The `Run` triple returned by range decomposition.
//!
//! Each `Run` represents an interval [start, end) of indices sharing one value.

use crate::traits::{Arithmetic, Key};

/// A maximal interval [start, end) holding a single value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Run<K, V> {
    /// Inclusive start index.
    pub start: K,
    /// Exclusive end index; the run covers [start, end).
    pub end: K,
    /// Value held by every index of the run.
    pub value: V,
}

impl<K: Key, V> Run<K, V> {
    #[inline]
    pub fn new(start: K, end: K, value: V) -> Self {
        Self { start, end, value }
    }

    /// Length of the run in elements.
    #[inline]
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end.wrapping_sub(self.start).to_len()
        }
    }

    /// Returns true if the run covers no index.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `index` falls inside [start, end).
    #[inline]
    pub fn covers(&self, index: K) -> bool {
        self.start <= index && index < self.end
    }
}

impl<K, V> From<(K, K, V)> for Run<K, V> {
    fn from((start, end, value): (K, K, V)) -> Self {
        Self { start, end, value }
    }
}

impl<K, V> From<Run<K, V>> for (K, K, V) {
    fn from(run: Run<K, V>) -> Self {
        (run.start, run.end, run.value)
    }
}

#[cfg(test)]
mod tests {
    use super::Run;

    #[test]
    fn zero_length_run_is_empty() {
        let r = Run::new(5i64, 5, ());
        assert_eq!(r.len(), 0);
        assert!(r.is_empty());
        assert!(!r.covers(5));
    }

    #[test]
    fn typical_run_len() {
        let r = Run::new(-2i32, 7, "x");
        assert_eq!(r.len(), 9);
        assert!(!r.is_empty());
        assert!(r.covers(-2));
        assert!(r.covers(6));
        assert!(!r.covers(7));
    }

    #[test]
    fn tuple_conversions() {
        let r: Run<u64, i64> = (1, 4, 9).into();
        assert_eq!(r, Run::new(1, 4, 9));
        let t: (u64, u64, i64) = r.into();
        assert_eq!(t, (1, 4, 9));
    }
}
