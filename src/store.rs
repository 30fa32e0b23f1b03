//! The canonical breakpoint store.
//!
//! A [`RunArray`] represents a piecewise-constant function over the half-open
//! domain `[min_index, max_index)`. Every index takes the value of the greatest
//! breakpoint key at or below it, or the background value if there is none.
//!
//! The breakpoint map is kept *canonical* after every public operation:
//! 1. `min_index < max_index`;
//! 2. every key lies in `[min_index, max_index]`;
//! 3. consecutive breakpoints never carry equal values;
//! 4. the map never holds exactly one breakpoint;
//! 5. when non-empty, the first value differs from the background and the last
//!    value equals it (the last key only marks where the final run ends).
//!
//! All mutations funnel through [`RunArray::splice`], which rewrites a closed
//! span of keys from an explicit run list and restores canonical form at both
//! edges. The query and mutation engines live in sibling modules as further
//! `impl` blocks on the same type.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::mem;
use std::ops::Bound::{Excluded, Unbounded};

use crate::error::{Error, Result};
use crate::traits::{Key, OverflowPolicy, Wrapping};
use crate::utils::total_len;

/// Run-length compressed array over an integer index domain.
///
/// Type parameters:
/// - `K`: index type (see [`Key`]),
/// - `V`: element type,
/// - `P`: overflow policy applied to index offsets and numeric reductions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunArray<K = u64, V = i64, P = Wrapping> {
    pub(crate) min_index: K,
    pub(crate) max_index: K,
    pub(crate) background: V,
    pub(crate) breakpoints: BTreeMap<K, V>,
    pub(crate) policy: PhantomData<P>,
}

impl<K: Key, V: Clone + PartialEq + Default, P: OverflowPolicy> Default for RunArray<K, V, P> {
    /// Domain `[0, 1)` holding `V::default()`.
    fn default() -> Self {
        Self::uniform(V::default())
    }
}

#[allow(clippy::len_without_is_empty)]
impl<K: Key, V: Clone + PartialEq, P: OverflowPolicy> RunArray<K, V, P> {
    /// Domain `[0, 1)` holding `value`.
    pub fn uniform(value: V) -> Self {
        Self {
            min_index: K::ZERO,
            max_index: K::ONE,
            background: value,
            breakpoints: BTreeMap::new(),
            policy: PhantomData,
        }
    }

    /// Domain spanning the two bounds (in either order), uniformly `value`.
    ///
    /// Returns [`Error::EmptyDomain`] if the bounds are equal.
    pub fn with_bounds(a: K, b: K, value: V) -> Result<Self> {
        if a == b {
            return Err(Error::EmptyDomain);
        }
        Ok(Self {
            min_index: a.min(b),
            max_index: a.max(b),
            background: value,
            breakpoints: BTreeMap::new(),
            policy: PhantomData,
        })
    }

    /// Domain `[min_index, min_index + total)` filled from a `(value, length)`
    /// run list, where `total` is the summed length of `runs`.
    ///
    /// Returns [`Error::EmptyDomain`] if the runs cover no element.
    pub fn from_runs(min_index: K, background: V, runs: &[(V, usize)]) -> Result<Self> {
        let total = total_len(runs);
        let max_index = Self::offset(min_index, total);
        if total == 0 || max_index <= min_index {
            return Err(Error::EmptyDomain);
        }
        let mut array = Self::with_bounds(min_index, max_index, background)?;
        array.assign_values(min_index, max_index, runs);
        Ok(array)
    }

    #[inline]
    pub fn min_index(&self) -> K {
        self.min_index
    }

    #[inline]
    pub fn max_index(&self) -> K {
        self.max_index
    }

    /// `(min_index, max_index)`.
    #[inline]
    pub fn bounds(&self) -> (K, K) {
        (self.min_index, self.max_index)
    }

    /// Number of indices in the domain.
    #[inline]
    pub fn len(&self) -> usize {
        Self::span(self.min_index, self.max_index)
    }

    /// Value held by every index not covered by an explicit run.
    #[inline]
    pub fn background(&self) -> &V {
        &self.background
    }

    /// Number of stored breakpoints (zero for a uniform array).
    #[inline]
    pub fn breakpoint_count(&self) -> usize {
        self.breakpoints.len()
    }

    /// The raw breakpoints in key order.
    pub fn breakpoints(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + '_ {
        self.breakpoints.iter()
    }

    /// Estimated memory footprint in bytes.
    pub fn byte_size(&self) -> usize {
        2 * mem::size_of::<K>()
            + mem::size_of::<V>()
            + mem::size_of::<BTreeMap<K, V>>()
            + mem::size_of::<(K, V)>() * self.breakpoints.len()
    }

    /// Check every canonical-form invariant.
    pub fn is_canonical(&self) -> bool {
        if self.min_index >= self.max_index || self.breakpoints.len() == 1 {
            return false;
        }
        if let (Some((first_key, first)), Some((last_key, last))) = (
            self.breakpoints.first_key_value(),
            self.breakpoints.last_key_value(),
        ) {
            if *first_key < self.min_index || *last_key > self.max_index {
                return false;
            }
            if *first == self.background || *last != self.background {
                return false;
            }
        }
        self.breakpoints
            .values()
            .zip(self.breakpoints.values().skip(1))
            .all(|(a, b)| a != b)
    }

    /// Move the lower bound. Breakpoints below the new bound are discarded and
    /// the run covering it is re-anchored there.
    ///
    /// Returns `false` without mutating if `index >= max_index`.
    pub fn set_min_index(&mut self, index: K) -> bool {
        if index >= self.max_index {
            return false;
        }
        if index > self.min_index {
            let anchor = self.value_at(index).clone();
            self.breakpoints = self.breakpoints.split_off(&index);
            self.breakpoints.remove(&index);
            if anchor != self.background {
                self.breakpoints.insert(index, anchor);
            }
        }
        self.min_index = index;
        true
    }

    /// Move the upper bound. Breakpoints at or above the new bound are
    /// discarded and the final run is capped there.
    ///
    /// Returns `false` without mutating if `index <= min_index`.
    pub fn set_max_index(&mut self, index: K) -> bool {
        if index <= self.min_index {
            return false;
        }
        if index < self.max_index {
            let last = self.value_before(index).clone();
            let _ = self.breakpoints.split_off(&index);
            if last != self.background {
                self.breakpoints.insert(index, self.background.clone());
            }
        }
        self.max_index = index;
        true
    }

    /// Set both bounds at once. Returns `false` without mutating if
    /// `min_index >= max_index`.
    pub fn set_bounds(&mut self, min_index: K, max_index: K) -> bool {
        if min_index >= max_index {
            return false;
        }
        if min_index < self.max_index {
            self.set_min_index(min_index) && self.set_max_index(max_index)
        } else {
            self.set_max_index(max_index) && self.set_min_index(min_index)
        }
    }

    /// Change the background value.
    ///
    /// The implicit head (before the first breakpoint) and tail (from the last
    /// breakpoint on) take the new value; explicit runs keep theirs.
    pub fn set_background(&mut self, value: V) {
        self.background = value;
        if let Some(mut cap) = self.breakpoints.last_entry() {
            *cap.get_mut() = self.background.clone();
        }

        let redundant_cap = {
            let mut rev = self.breakpoints.values().rev();
            matches!((rev.next(), rev.next()), (Some(a), Some(b)) if a == b)
        };
        if redundant_cap {
            self.breakpoints.pop_last();
        }

        if self
            .breakpoints
            .first_key_value()
            .is_some_and(|(_, first)| *first == self.background)
        {
            self.breakpoints.pop_first();
        }

        if self.breakpoints.len() == 1 {
            self.breakpoints.clear();
        }
    }

    /// Make the whole domain uniformly `value`.
    pub fn reset(&mut self, value: V) {
        self.background = value;
        self.breakpoints.clear();
    }

    /// Clamp `[from, to)` into the domain.
    ///
    /// Returns the empty range `(from, from)` if `to <= from` or the request
    /// lies entirely outside `[min_index, max_index)`.
    pub fn valid_range(&self, from: K, to: K) -> (K, K) {
        match self.clamp(from, to) {
            Some(range) => range,
            None => (from, from),
        }
    }

    #[inline]
    pub(crate) fn clamp(&self, from: K, to: K) -> Option<(K, K)> {
        if to <= from || to <= self.min_index || from >= self.max_index {
            return None;
        }
        Some((from.max(self.min_index), to.min(self.max_index)))
    }

    #[inline]
    pub(crate) fn offset(index: K, len: usize) -> K {
        P::offset(index, len, true).unwrap_or(K::MAX)
    }

    #[inline]
    pub(crate) fn offset_back(index: K, len: usize) -> K {
        P::offset(index, len, false).unwrap_or(K::MIN)
    }

    /// Both bounds moved by `len`, or `None` if the policy rejects either.
    #[inline]
    pub(crate) fn moved_bounds(&self, len: usize, forward: bool) -> Option<(K, K)> {
        let min = P::offset(self.min_index, len, forward)?;
        let max = P::offset(self.max_index, len, forward)?;
        Some((min, max))
    }

    /// Element count of `[from, to)`; callers guarantee `from <= to`.
    #[inline]
    pub(crate) fn span(from: K, to: K) -> usize {
        to.wrapping_sub(from).to_len()
    }

    /// Value in effect at `index`.
    #[inline]
    pub(crate) fn value_at(&self, index: K) -> &V {
        self.breakpoints
            .range(..=index)
            .next_back()
            .map_or(&self.background, |(_, v)| v)
    }

    /// Value in effect immediately before `index`.
    #[inline]
    pub(crate) fn value_before(&self, index: K) -> &V {
        self.breakpoints
            .range(..index)
            .next_back()
            .map_or(&self.background, |(_, v)| v)
    }

    /// Rewrite `[from, to)` from a run list covering exactly `to - from`
    /// elements, leaving everything outside the span untouched.
    ///
    /// Breakpoints in the closed span `[from, to]` are removed and rebuilt:
    /// a key is emitted only where the value changes, and a key at `to`
    /// restores the value previously in effect there. This keeps the map
    /// canonical provided it was canonical on entry, and costs
    /// O((k + n) log R) for k removed keys and n runs.
    pub(crate) fn splice<I>(&mut self, from: K, to: K, runs: I)
    where
        I: IntoIterator<Item = (V, usize)>,
    {
        debug_assert!(from < to, "splice requires a non-empty span");
        let before = self.value_before(from).clone();
        let after = self.value_at(to).clone();

        let doomed: Vec<K> = self.breakpoints.range(from..=to).map(|(k, _)| *k).collect();
        for key in doomed {
            self.breakpoints.remove(&key);
        }

        let mut current = before;
        let mut position = from;
        for (value, len) in runs {
            if len == 0 {
                continue;
            }
            if value != current {
                self.breakpoints.insert(position, value.clone());
                current = value;
            }
            position = Self::offset(position, len);
        }
        debug_assert!(position == to, "run list must cover the spliced span");

        if current != after {
            self.breakpoints.insert(to, after);
        }
    }

    #[inline]
    fn moved(key: K, len: usize, forward: bool) -> K {
        if forward {
            Self::offset(key, len)
        } else {
            Self::offset_back(key, len)
        }
    }

    /// Translate every breakpoint with key `>= start` by `len`.
    pub(crate) fn translate_from(&mut self, start: K, len: usize, forward: bool) {
        let tail = self.breakpoints.split_off(&start);
        let mut moved: BTreeMap<K, V> = tail
            .into_iter()
            .map(|(k, v)| (Self::moved(k, len, forward), v))
            .collect();
        self.breakpoints.append(&mut moved);
    }

    /// Translate every breakpoint with key `> start` by `len`.
    pub(crate) fn translate_after(&mut self, start: K, len: usize, forward: bool) {
        let first = self
            .breakpoints
            .range((Excluded(start), Unbounded))
            .next()
            .map(|(k, _)| *k);
        if let Some(first) = first {
            self.translate_from(first, len, forward);
        }
    }

    /// Translate every breakpoint with key `< end` by `len`.
    pub(crate) fn translate_before(&mut self, end: K, len: usize, forward: bool) {
        let tail = self.breakpoints.split_off(&end);
        let head = mem::replace(&mut self.breakpoints, tail);
        let mut moved: BTreeMap<K, V> = head
            .into_iter()
            .map(|(k, v)| (Self::moved(k, len, forward), v))
            .collect();
        self.breakpoints.append(&mut moved);
    }

    /// Translate every breakpoint by `len`.
    pub(crate) fn translate_all(&mut self, len: usize, forward: bool) {
        let all = mem::take(&mut self.breakpoints);
        self.breakpoints = all
            .into_iter()
            .map(|(k, v)| (Self::moved(k, len, forward), v))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Saturating;

    type Array = RunArray<i64, i64>;

    fn keys(array: &Array) -> Vec<(i64, i64)> {
        array.breakpoints().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn constructors() {
        let a = Array::default();
        assert_eq!(a.bounds(), (0, 1));
        assert_eq!(*a.background(), 0);
        assert!(a.is_canonical());

        let b = Array::with_bounds(10, -3, 4).unwrap();
        assert_eq!(b.bounds(), (-3, 10));
        assert_eq!(b.len(), 13);
        assert!(matches!(Array::with_bounds(3, 3, 0), Err(Error::EmptyDomain)));

        let c = Array::from_runs(5, 0, &[(1, 2), (1, 1), (0, 2), (3, 1)]).unwrap();
        assert_eq!(c.bounds(), (5, 11));
        assert_eq!(keys(&c), vec![(5, 1), (8, 0), (10, 3), (11, 0)]);
        assert!(c.is_canonical());
        assert!(matches!(Array::from_runs(0, 0, &[(1, 0)]), Err(Error::EmptyDomain)));
    }

    #[test]
    fn valid_range_boundaries() {
        let a = Array::with_bounds(0, 10, 0).unwrap();
        assert_eq!(a.valid_range(5, 5), (5, 5));
        assert_eq!(a.valid_range(6, 2), (6, 6));
        assert_eq!(a.valid_range(-8, -2), (-8, -8));
        assert_eq!(a.valid_range(-8, 0), (-8, -8));
        assert_eq!(a.valid_range(10, 14), (10, 10));
        assert_eq!(a.valid_range(-3, 4), (0, 4));
        assert_eq!(a.valid_range(7, 40), (7, 10));
        assert_eq!(a.valid_range(-3, 40), (0, 10));
        assert_eq!(a.valid_range(2, 3), (2, 3));
    }

    #[test]
    fn set_min_index_reanchors_run() {
        let mut a = Array::from_runs(0, 0, &[(0, 2), (7, 4), (0, 4)]).unwrap();
        assert!(a.set_min_index(4));
        assert_eq!(a.bounds(), (4, 10));
        assert_eq!(keys(&a), vec![(4, 7), (6, 0)]);
        assert!(a.is_canonical());

        assert!(a.set_min_index(6));
        assert!(keys(&a).is_empty());
        assert!(!a.set_min_index(10));
        assert!(!a.set_min_index(12));
        assert_eq!(a.bounds(), (6, 10));

        assert!(a.set_min_index(-2));
        assert_eq!(a.bounds(), (-2, 10));
        assert!(a.is_canonical());
    }

    #[test]
    fn set_max_index_caps_run() {
        let mut a = Array::from_runs(0, 0, &[(0, 2), (7, 4), (0, 4)]).unwrap();
        assert!(a.set_max_index(4));
        assert_eq!(keys(&a), vec![(2, 7), (4, 0)]);
        assert!(a.is_canonical());
        assert!(a.set_max_index(2));
        assert!(keys(&a).is_empty());
        assert!(!a.set_max_index(0));
        assert!(a.set_max_index(20));
        assert_eq!(a.bounds(), (0, 20));
        assert!(a.is_canonical());
    }

    #[test]
    fn set_bounds_both_directions() {
        let mut a = Array::from_runs(0, 0, &[(1, 3), (2, 3), (3, 3)]).unwrap();
        assert!(!a.set_bounds(5, 5));
        assert!(a.set_bounds(20, 30));
        assert_eq!(a.bounds(), (20, 30));
        assert!(keys(&a).is_empty());
        assert!(a.set_bounds(-5, 2));
        assert_eq!(a.bounds(), (-5, 2));
        assert!(a.is_canonical());
    }

    #[test]
    fn set_background_recanonicalizes() {
        let mut a = Array::from_runs(0, 0, &[(0, 2), (7, 3), (0, 5)]).unwrap();
        a.set_background(7);
        assert!(keys(&a).is_empty());
        assert!(a.is_canonical());

        let mut b = Array::from_runs(0, 0, &[(0, 2), (7, 3), (3, 3), (0, 2)]).unwrap();
        b.set_background(3);
        assert_eq!(keys(&b), vec![(2, 7), (5, 3)]);
        assert!(b.is_canonical());

        let mut c = Array::from_runs(0, 0, &[(3, 2), (7, 3), (0, 5)]).unwrap();
        c.set_background(3);
        assert_eq!(keys(&c), vec![(2, 7), (5, 3)]);
        assert!(c.is_canonical());
    }

    #[test]
    fn reset_clears() {
        let mut a = Array::from_runs(0, 0, &[(1, 2), (2, 2)]).unwrap();
        a.reset(9);
        let once = a.clone();
        a.reset(9);
        assert_eq!(a, once);
        assert_eq!(a.breakpoint_count(), 0);
        assert_eq!(*a.background(), 9);
        assert_eq!(a.bounds(), (0, 4));
    }

    #[test]
    fn byte_size_grows_with_breakpoints() {
        let a = Array::with_bounds(0, 100, 0).unwrap();
        let b = Array::from_runs(0, 0, &[(1, 50), (2, 50)]).unwrap();
        assert!(b.byte_size() > a.byte_size());
        assert_eq!(
            b.byte_size() - a.byte_size(),
            3 * std::mem::size_of::<(i64, i64)>()
        );
    }

    #[test]
    fn saturating_offsets() {
        let a: RunArray<u32, i32, Saturating> =
            RunArray::from_runs(u32::MAX - 5, 0, &[(1, 100)]).unwrap();
        assert_eq!(a.bounds(), (u32::MAX - 5, u32::MAX));
        assert!(a.is_canonical());
    }

    #[test]
    fn wide_signed_domain_lengths() {
        let mut a: RunArray<i32, i64> = RunArray::with_bounds(-10, i32::MAX, 0).unwrap();
        assert_eq!(a.len(), 2_147_483_657);
        assert_eq!(a.value_frequencies(i32::MIN, i32::MAX)[&0], 2_147_483_657);
        assert_eq!(a.to_string(), "-10 | (0, 2147483657) | 2147483647");

        a.assign_value(-5, i32::MAX - 1, 3);
        assert!(a.is_canonical());
        assert_eq!(a.runs()[1].len(), 2_147_483_651);
        assert_eq!(a.sum(-10, i32::MAX, 0), 3 * 2_147_483_651);

        let b: RunArray<i32, i64, Saturating> =
            RunArray::with_bounds(i32::MIN, i32::MAX, 0).unwrap();
        assert_eq!(b.len(), u32::MAX as usize);
    }
}
