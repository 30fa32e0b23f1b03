//! Run-wise reordering and value rewriting within a range.
//!
//! Each operation reads the clamped range as a run list, transforms the list
//! and splices it back. Work is proportional to the number of runs, never to
//! the number of indices.

use std::cmp::Ordering;

use crate::store::RunArray;
use crate::traits::{Key, OverflowPolicy};
use crate::utils::push_run;

impl<K: Key, V: Clone + PartialEq, P: OverflowPolicy> RunArray<K, V, P> {
    /// Reverse the element order within the clamped `[from, to)`.
    pub fn reverse_values(&mut self, from: K, to: K) {
        let Some((from, to)) = self.clamp(from, to) else {
            return;
        };
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("reverse_values", from = ?from, to = ?to);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut runs = self.run_lengths(from, to);
        runs.reverse();
        self.splice(from, to, runs);
    }

    /// Reverse the whole domain.
    pub fn reverse(&mut self) {
        self.reverse_values(self.min_index, self.max_index);
    }

    /// Stable-sort the elements of the clamped `[from, to)` under `compare`,
    /// descending if `reverse` is set.
    ///
    /// Runs that compare equal end up adjacent and are merged into the first
    /// of them, so only values the comparator distinguishes survive side by
    /// side.
    pub fn sort_values_by<F>(&mut self, from: K, to: K, reverse: bool, mut compare: F)
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        let Some((from, to)) = self.clamp(from, to) else {
            return;
        };
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("sort_values", from = ?from, to = ?to, reverse);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut runs = self.run_lengths(from, to);
        if reverse {
            runs.sort_by(|(a, _), (b, _)| compare(b, a));
        } else {
            runs.sort_by(|(a, _), (b, _)| compare(a, b));
        }

        let mut sorted: Vec<(V, usize)> = Vec::with_capacity(runs.len());
        for (value, len) in runs {
            match sorted.last_mut() {
                Some((last, last_len)) if compare(last, &value) == Ordering::Equal => {
                    *last_len += len
                }
                _ => sorted.push((value, len)),
            }
        }
        self.splice(from, to, sorted);
    }

    /// [`sort_values_by`](Self::sort_values_by) under `V`'s natural order.
    pub fn sort_values(&mut self, from: K, to: K, reverse: bool)
    where
        V: Ord,
    {
        self.sort_values_by(from, to, reverse, V::cmp);
    }

    /// Sort the whole domain.
    pub fn sort(&mut self, reverse: bool)
    where
        V: Ord,
    {
        self.sort_values(self.min_index, self.max_index, reverse);
    }

    /// Replace every occurrence of `old` in the clamped `[from, to)` with `new`.
    pub fn replace_value(&mut self, from: K, to: K, old: &V, new: V) {
        if *old == new {
            return;
        }
        let Some((from, to)) = self.clamp(from, to) else {
            return;
        };
        let runs = self.run_lengths(from, to);
        if !runs.iter().any(|(value, _)| value == old) {
            return;
        }
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("replace_value", from = ?from, to = ?to);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut replaced = Vec::with_capacity(runs.len());
        for (value, len) in runs {
            let value = if value == *old { new.clone() } else { value };
            push_run(&mut replaced, value, len);
        }
        self.splice(from, to, replaced);
    }

    /// Rewrite every element of the clamped `[from, to)` with `f`.
    ///
    /// `f` is called once per run rather than once per index, so it should be
    /// a pure function of its argument.
    pub fn apply<F>(&mut self, from: K, to: K, mut f: F)
    where
        F: FnMut(&V) -> V,
    {
        let Some((from, to)) = self.clamp(from, to) else {
            return;
        };
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("apply", from = ?from, to = ?to);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut mapped = Vec::new();
        for (value, len) in self.run_lengths(from, to) {
            push_run(&mut mapped, f(&value), len);
        }
        self.splice(from, to, mapped);
    }
}
