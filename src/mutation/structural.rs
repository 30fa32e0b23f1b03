//! Structural edits: insertion, append/prepend, erasure and domain shifts.
//!
//! These change the domain length or position. Content that moves is
//! translated in bulk (see the store's `translate_*` helpers) and the cells
//! opened up by the move are then written with the regular splice. Edits
//! whose new bounds cannot be represented in the key type leave the array
//! untouched.

use crate::store::RunArray;
use crate::traits::{Key, OverflowPolicy};
use crate::utils::{coalesce_runs, total_len};

impl<K: Key, V: Clone + PartialEq, P: OverflowPolicy> RunArray<K, V, P> {
    /// Insert `runs` directly after `position`, growing the domain by their
    /// total length.
    ///
    /// By default everything after `position` moves right and `max_index`
    /// grows. With `expand_left`, everything up to and including `position`
    /// moves left and `min_index` shrinks instead; the inserted runs then end
    /// at `position + 1`.
    ///
    /// No-op if `position` lies outside `[min_index, max_index)` or the runs
    /// cover no element.
    pub fn insert_after(&mut self, position: K, runs: &[(V, usize)], expand_left: bool) {
        if position < self.min_index || position >= self.max_index {
            return;
        }
        let runs = coalesce_runs(runs);
        let len = total_len(&runs);
        if len == 0 {
            return;
        }
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("insert_after", position = ?position, len, expand_left);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let next = Self::offset(position, 1);
        if expand_left {
            let Some(min_index) = Self::grown(self.min_index, len, false) else {
                return;
            };
            self.translate_before(next, len, false);
            self.min_index = min_index;
            self.splice(Self::offset_back(next, len), next, runs);
        } else {
            let Some(max_index) = Self::grown(self.max_index, len, true) else {
                return;
            };
            self.translate_after(position, len, true);
            self.max_index = max_index;
            self.splice(next, Self::offset(next, len), runs);
        }
    }

    /// Add `runs` at the right end of the domain.
    ///
    /// By default `max_index` grows. With `expand_left` the existing content
    /// moves left by the appended length and `min_index` shrinks instead.
    pub fn append_values(&mut self, runs: &[(V, usize)], expand_left: bool) {
        let runs = coalesce_runs(runs);
        let len = total_len(&runs);
        if len == 0 {
            return;
        }
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("append_values", len, expand_left);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if expand_left {
            let Some(min_index) = Self::grown(self.min_index, len, false) else {
                return;
            };
            self.translate_all(len, false);
            self.min_index = min_index;
        } else {
            let Some(max_index) = Self::grown(self.max_index, len, true) else {
                return;
            };
            self.max_index = max_index;
        }
        self.splice(Self::offset_back(self.max_index, len), self.max_index, runs);
    }

    /// Add `runs` at the left end of the domain.
    ///
    /// With `expand_left`, `min_index` shrinks. By default the existing
    /// content moves right by the prepended length and `max_index` grows.
    pub fn prepend_values(&mut self, runs: &[(V, usize)], expand_left: bool) {
        let runs = coalesce_runs(runs);
        let len = total_len(&runs);
        if len == 0 {
            return;
        }
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("prepend_values", len, expand_left);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if expand_left {
            let Some(min_index) = Self::grown(self.min_index, len, false) else {
                return;
            };
            self.min_index = min_index;
        } else {
            let Some(max_index) = Self::grown(self.max_index, len, true) else {
                return;
            };
            self.translate_all(len, true);
            self.max_index = max_index;
        }
        self.splice(self.min_index, Self::offset(self.min_index, len), runs);
    }

    /// Remove the clamped `[from, to)` and close the gap.
    ///
    /// By default the content after the gap moves left and `max_index`
    /// shrinks. With `shrink_right` the content before the gap moves right
    /// and `min_index` grows. Erasing the entire domain would leave it empty
    /// and is a no-op.
    pub fn erase(&mut self, from: K, to: K, shrink_right: bool) {
        let Some((from, to)) = self.clamp(from, to) else {
            return;
        };
        if from == self.min_index && to == self.max_index {
            return;
        }
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("erase", from = ?from, to = ?to, shrink_right);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let gap = Self::span(from, to);
        let before = self.value_before(from).clone();
        let after = self.value_at(to).clone();

        let doomed: Vec<K> = self
            .breakpoints
            .range(from..=to)
            .map(|(k, _)| *k)
            .collect();
        for key in doomed {
            self.breakpoints.remove(&key);
        }

        // The seam is where `before` now meets `after`.
        let seam = if shrink_right {
            self.translate_before(from, gap, true);
            self.min_index = Self::offset(self.min_index, gap);
            to
        } else {
            self.translate_after(to, gap, false);
            self.max_index = Self::offset_back(self.max_index, gap);
            from
        };
        if before != after {
            self.breakpoints.insert(seam, after);
        }
    }

    /// Translate the whole array `distance` indices to the left.
    ///
    /// No-op if the moved bounds would leave the key range (under
    /// [`Saturating`](crate::Saturating)) or wrap out of order.
    pub fn shift_left(&mut self, distance: K) {
        self.shift(distance.to_len(), false);
    }

    /// Translate the whole array `distance` indices to the right.
    ///
    /// No-op under the same conditions as [`shift_left`](Self::shift_left).
    pub fn shift_right(&mut self, distance: K) {
        self.shift(distance.to_len(), true);
    }

    fn shift(&mut self, len: usize, forward: bool) {
        let Some((min_index, max_index)) = self.moved_bounds(len, forward) else {
            return;
        };
        if min_index >= max_index {
            return;
        }
        self.translate_all(len, forward);
        self.min_index = min_index;
        self.max_index = max_index;
    }

    /// `bound` moved outward by `len`, or `None` if the policy refuses the
    /// move or the result wrapped past the other end of the key range.
    #[inline]
    fn grown(bound: K, len: usize, forward: bool) -> Option<K> {
        let moved = P::offset(bound, len, forward)?;
        let outward = if forward { moved > bound } else { moved < bound };
        outward.then_some(moved)
    }
}
