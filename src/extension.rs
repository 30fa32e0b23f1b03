//! Cross-structure and range-arithmetic operations without a settled contract.
//!
//! Each of these is part of the public surface so callers can program against
//! it, but every call returns [`Error::NotImplemented`] and leaves both arrays
//! untouched.

use crate::error::{Error, Result};
use crate::store::RunArray;
use crate::traits::{Key, OverflowPolicy};

impl<K: Key, V: Clone + PartialEq, P: OverflowPolicy> RunArray<K, V, P> {
    /// Element-wise combination of this array's `[from, to)` with the
    /// equally long `[other_from, other_to)` of `other`.
    pub fn combine_with<F>(
        &mut self,
        _from: K,
        _to: K,
        _other: &Self,
        _other_from: K,
        _other_to: K,
        _combine: F,
    ) -> Result<()>
    where
        F: FnMut(&V, &V) -> V,
    {
        Err(Error::NotImplemented("combine_with"))
    }

    /// Copy `[from, to)` of `source` over `[into_from, into_to)` of this array.
    pub fn copy_range_from(
        &mut self,
        _source: &Self,
        _from: K,
        _to: K,
        _into_from: K,
        _into_to: K,
    ) -> Result<()> {
        Err(Error::NotImplemented("copy_range_from"))
    }

    /// Exchange `[from, to)` of this array with `[other_from, other_to)` of
    /// `other`.
    pub fn swap_ranges_with(
        &mut self,
        _from: K,
        _to: K,
        _other: &mut Self,
        _other_from: K,
        _other_to: K,
    ) -> Result<()> {
        Err(Error::NotImplemented("swap_ranges_with"))
    }

    /// Exchange two ranges of this array.
    pub fn swap_ranges(&mut self, _from_a: K, _to_a: K, _from_b: K, _to_b: K) -> Result<()> {
        Err(Error::NotImplemented("swap_ranges"))
    }

    /// Copy `[from_a, to_a)` over `[from_b, to_b)` within this array.
    pub fn copy_range(&mut self, _from_a: K, _to_a: K, _from_b: K, _to_b: K) -> Result<()> {
        Err(Error::NotImplemented("copy_range"))
    }

    /// Lengthen every run of `value` in `[from, to)` by `amount`.
    pub fn increase_value_range(
        &mut self,
        _from: K,
        _to: K,
        _value: &V,
        _amount: usize,
        _expand_left: bool,
    ) -> Result<()> {
        Err(Error::NotImplemented("increase_value_range"))
    }

    /// Shorten every run of `value` in `[from, to)` by `amount`.
    pub fn decrease_value_range(
        &mut self,
        _from: K,
        _to: K,
        _value: &V,
        _amount: usize,
        _shrink_right: bool,
    ) -> Result<()> {
        Err(Error::NotImplemented("decrease_value_range"))
    }

    /// Resize every run of `value` in `[from, to)` to `new_len`.
    pub fn change_value_range(&mut self, _from: K, _to: K, _value: &V, _new_len: usize) -> Result<()> {
        Err(Error::NotImplemented("change_value_range"))
    }

    /// Move the contents of `[from, to)` left by `distance`, filling the
    /// vacated tail with `fill`.
    pub fn shift_range_left(&mut self, _from: K, _to: K, _distance: K, _fill: V) -> Result<()> {
        Err(Error::NotImplemented("shift_range_left"))
    }

    /// Move the contents of `[from, to)` right by `distance`, filling the
    /// vacated head with `fill`.
    pub fn shift_range_right(&mut self, _from: K, _to: K, _distance: K, _fill: V) -> Result<()> {
        Err(Error::NotImplemented("shift_range_right"))
    }

    /// Element-wise comparison of two equally long ranges, as boolean runs.
    pub fn compare_with<F>(
        &self,
        _from: K,
        _to: K,
        _other: &Self,
        _other_from: K,
        _other_to: K,
        _equal: F,
    ) -> Result<Vec<(K, K, bool)>>
    where
        F: FnMut(&V, &V) -> bool,
    {
        Err(Error::NotImplemented("compare_with"))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, RunArray};

    fn is_stub<T>(result: crate::Result<T>, name: &str) -> bool {
        matches!(result, Err(Error::NotImplemented(n)) if n == name)
    }

    #[test]
    fn every_stub_reports_itself() {
        let mut a = RunArray::<i64, i64>::compress(&[1, 1, 2, 3], 0, 0).unwrap();
        let mut b = a.clone();
        let before = a.clone();

        assert!(is_stub(a.combine_with(0, 2, &before, 0, 2, |x, y| x + y), "combine_with"));
        assert!(is_stub(a.copy_range_from(&before, 0, 2, 2, 4), "copy_range_from"));
        assert!(is_stub(a.swap_ranges_with(0, 2, &mut b, 2, 4), "swap_ranges_with"));
        assert!(is_stub(a.swap_ranges(0, 1, 2, 3), "swap_ranges"));
        assert!(is_stub(a.copy_range(0, 1, 2, 3), "copy_range"));
        assert!(is_stub(a.increase_value_range(0, 4, &1, 2, false), "increase_value_range"));
        assert!(is_stub(a.decrease_value_range(0, 4, &1, 1, true), "decrease_value_range"));
        assert!(is_stub(a.change_value_range(0, 4, &2, 3), "change_value_range"));
        assert!(is_stub(a.shift_range_left(1, 3, 1, 0), "shift_range_left"));
        assert!(is_stub(a.shift_range_right(1, 3, 1, 0), "shift_range_right"));
        assert!(is_stub(a.compare_with(0, 4, &before, 0, 4, |x, y| x == y), "compare_with"));

        assert_eq!(a, before);
        assert_eq!(b, before);
        assert_eq!(
            Error::NotImplemented("swap_ranges").to_string(),
            "swap_ranges is not implemented"
        );
    }
}
