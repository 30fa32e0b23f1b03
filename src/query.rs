//! Read-only queries: point lookup, range decomposition, extraction and
//! reductions.
//!
//! Every range query clamps its arguments with
//! [`valid_range`](RunArray::valid_range) first; a range that clamps to nothing
//! yields an empty result.

use std::cmp::Ordering;
use std::collections::{btree_map, HashMap, HashSet};
use std::hash::Hash;
use std::ops::Bound::Excluded;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::run::Run;
use crate::store::RunArray;
use crate::traits::{Arithmetic, Key, MaybeSync, OverflowPolicy};

/// Below this many runs, parallel reductions fall back to a sequential scan.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 4096;

/// Lazy decomposition of a clamped range into `(start, end, value)` runs.
///
/// Created by [`RunArray::iter_runs`].
pub struct Runs<'a, K, V> {
    inner: btree_map::Range<'a, K, V>,
    start: K,
    end: K,
    value: &'a V,
    done: bool,
}

impl<'a, K: Key, V> Iterator for Runs<'a, K, V> {
    type Item = (K, K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next() {
            Some((key, value)) => {
                let run = (self.start, *key, self.value);
                self.start = *key;
                self.value = value;
                Some(run)
            }
            None => {
                self.done = true;
                Some((self.start, self.end, self.value))
            }
        }
    }
}

impl<K: Key, V: Clone + PartialEq, P: OverflowPolicy> RunArray<K, V, P> {
    /// Value at `index`. Indices outside the domain read the background.
    #[inline]
    pub fn get(&self, index: K) -> &V {
        self.value_at(index)
    }

    /// Iterate the runs exactly covering the clamped `[from, to)`.
    pub fn iter_runs(&self, from: K, to: K) -> Runs<'_, K, V> {
        match self.clamp(from, to) {
            Some((from, to)) => Runs {
                inner: self.breakpoints.range((Excluded(from), Excluded(to))),
                start: from,
                end: to,
                value: self.value_at(from),
                done: false,
            },
            None => Runs {
                inner: self.breakpoints.range(from..from),
                start: from,
                end: from,
                value: &self.background,
                done: true,
            },
        }
    }

    /// Runs exactly covering the clamped `[from, to)`, in index order.
    pub fn values(&self, from: K, to: K) -> Vec<Run<K, V>> {
        self.iter_runs(from, to)
            .map(|(start, end, value)| Run::new(start, end, value.clone()))
            .collect()
    }

    /// Runs covering the whole domain.
    pub fn runs(&self) -> Vec<Run<K, V>> {
        self.values(self.min_index, self.max_index)
    }

    /// The clamped range as `(value, length)` pairs.
    pub(crate) fn run_lengths(&self, from: K, to: K) -> Vec<(V, usize)> {
        self.iter_runs(from, to)
            .map(|(start, end, value)| (value.clone(), Self::span(start, end)))
            .collect()
    }

    /// Whether `value` occurs anywhere in the clamped `[from, to)`.
    pub fn contains_in(&self, from: K, to: K, value: &V) -> bool {
        self.iter_runs(from, to).any(|(_, _, v)| v == value)
    }

    /// Whether `value` occurs anywhere in the domain.
    pub fn contains(&self, value: &V) -> bool {
        self.contains_in(self.min_index, self.max_index, value)
    }

    /// A new array holding a copy of the clamped `[from, to)`.
    ///
    /// The copy keeps absolute indices: its domain is the clamped range itself,
    /// so its `max_index` equals the clamped `to`. Returns `None` if the range
    /// clamps to nothing.
    pub fn sub_array(&self, from: K, to: K) -> Option<Self> {
        let (from, to) = self.clamp(from, to)?;
        let mut sub = Self::with_bounds(from, to, self.background.clone()).ok()?;
        sub.splice(from, to, self.run_lengths(from, to));
        Some(sub)
    }

    /// Distinct values occurring in the clamped range.
    pub fn set_values(&self, from: K, to: K) -> HashSet<V>
    where
        V: Hash + Eq,
    {
        self.iter_runs(from, to).map(|(_, _, v)| v.clone()).collect()
    }

    /// Total number of indices holding each value in the clamped range.
    pub fn value_frequencies(&self, from: K, to: K) -> HashMap<V, usize>
    where
        V: Hash + Eq,
    {
        let mut frequencies = HashMap::new();
        for (start, end, value) in self.iter_runs(from, to) {
            *frequencies.entry(value.clone()).or_insert(0) += Self::span(start, end);
        }
        frequencies
    }

    /// Intervals `[start, end)` holding `value` in the clamped range.
    pub fn value_ranges(&self, from: K, to: K, value: &V) -> Vec<(K, K)> {
        self.iter_runs(from, to)
            .filter(|(_, _, v)| *v == value)
            .map(|(start, end, _)| (start, end))
            .collect()
    }

    /// Intervals holding each of `values` in the clamped range. Values that do
    /// not occur are absent from the result.
    pub fn values_ranges(&self, from: K, to: K, values: &HashSet<V>) -> HashMap<V, Vec<(K, K)>>
    where
        V: Hash + Eq,
    {
        let mut ranges: HashMap<V, Vec<(K, K)>> = HashMap::new();
        for (start, end, value) in self.iter_runs(from, to) {
            if values.contains(value) {
                ranges.entry(value.clone()).or_default().push((start, end));
            }
        }
        ranges
    }

    #[cfg(feature = "parallel")]
    fn reduce_by<F>(&self, from: K, to: K, compare: F, keep: Ordering) -> Option<&V>
    where
        V: MaybeSync,
        F: Fn(&V, &V) -> Ordering + MaybeSync,
    {
        let values: Vec<&V> = self.iter_runs(from, to).map(|(_, _, v)| v).collect();
        if values.len() < PARALLEL_THRESHOLD {
            return values
                .into_iter()
                .reduce(|a, b| if compare(b, a) == keep { b } else { a });
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(runs = values.len(), "parallel reduction");
        values
            .into_par_iter()
            .reduce_with(|a, b| if compare(b, a) == keep { b } else { a })
    }

    #[cfg(not(feature = "parallel"))]
    fn reduce_by<F>(&self, from: K, to: K, compare: F, keep: Ordering) -> Option<&V>
    where
        V: MaybeSync,
        F: Fn(&V, &V) -> Ordering + MaybeSync,
    {
        self.iter_runs(from, to)
            .map(|(_, _, v)| v)
            .reduce(|a, b| if compare(b, a) == keep { b } else { a })
    }

    /// Smallest value in the clamped range under `compare`; the earliest wins
    /// ties. `None` if the range clamps to nothing.
    pub fn min_value_by<F>(&self, from: K, to: K, compare: F) -> Option<&V>
    where
        V: MaybeSync,
        F: Fn(&V, &V) -> Ordering + MaybeSync,
    {
        self.reduce_by(from, to, compare, Ordering::Less)
    }

    /// Largest value in the clamped range under `compare`; the earliest wins
    /// ties. `None` if the range clamps to nothing.
    pub fn max_value_by<F>(&self, from: K, to: K, compare: F) -> Option<&V>
    where
        V: MaybeSync,
        F: Fn(&V, &V) -> Ordering + MaybeSync,
    {
        self.reduce_by(from, to, compare, Ordering::Greater)
    }

    pub fn min_value(&self, from: K, to: K) -> Option<&V>
    where
        V: Ord + MaybeSync,
    {
        self.min_value_by(from, to, V::cmp)
    }

    pub fn max_value(&self, from: K, to: K) -> Option<&V>
    where
        V: Ord + MaybeSync,
    {
        self.max_value_by(from, to, V::cmp)
    }

    /// `init` plus every element of the clamped range, each run contributing
    /// `value * length` under this array's overflow policy.
    pub fn sum(&self, from: K, to: K, init: V) -> V
    where
        V: Arithmetic,
    {
        self.sum_with::<P>(from, to, init)
    }

    /// [`sum`](Self::sum) under an explicit overflow policy.
    pub fn sum_with<Q: OverflowPolicy>(&self, from: K, to: K, init: V) -> V
    where
        V: Arithmetic,
    {
        self.iter_runs(from, to).fold(init, |acc, (start, end, value)| {
            Q::add(acc, Q::mul(*value, V::from_len(Self::span(start, end))))
        })
    }

    /// `init` times every element of the clamped range, each run contributing
    /// `value ^ length` under this array's overflow policy.
    pub fn product(&self, from: K, to: K, init: V) -> V
    where
        V: Arithmetic,
    {
        self.product_with::<P>(from, to, init)
    }

    /// [`product`](Self::product) under an explicit overflow policy.
    pub fn product_with<Q: OverflowPolicy>(&self, from: K, to: K, init: V) -> V
    where
        V: Arithmetic,
    {
        self.iter_runs(from, to).fold(init, |acc, (start, end, value)| {
            Q::mul(acc, Q::pow(*value, Self::span(start, end)))
        })
    }

    /// Materialize the clamped range element by element.
    ///
    /// Returns an empty vector if the range clamps to nothing or its length
    /// cannot be allocated.
    pub fn to_vec_range(&self, from: K, to: K) -> Vec<V> {
        let Some((from, to)) = self.clamp(from, to) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if out.try_reserve_exact(Self::span(from, to)).is_err() {
            #[cfg(feature = "tracing")]
            tracing::debug!(from = ?from, to = ?to, "range too large to materialize");
            return Vec::new();
        }
        for (start, end, value) in self.iter_runs(from, to) {
            out.extend(std::iter::repeat(value).take(Self::span(start, end)).cloned());
        }
        out
    }

    /// Materialize the whole domain.
    pub fn to_vec(&self) -> Vec<V> {
        self.to_vec_range(self.min_index, self.max_index)
    }
}

impl<K: Key, V: Clone + PartialEq, P: OverflowPolicy> std::ops::Index<K> for RunArray<K, V, P> {
    type Output = V;

    fn index(&self, index: K) -> &V {
        self.value_at(index)
    }
}
