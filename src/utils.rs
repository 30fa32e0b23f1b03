//! Assorted helpers for run lists and index ranges.

/// Append `(value, len)` to a run list, merging with the last run when the
/// values are equal. Zero-length runs are dropped.
#[inline]
pub fn push_run<V: PartialEq>(runs: &mut Vec<(V, usize)>, value: V, len: usize) {
    if len == 0 {
        return;
    }
    match runs.last_mut() {
        Some((last, last_len)) if *last == value => *last_len += len,
        _ => runs.push((value, len)),
    }
}

/// Coalesce a run list: adjacent equal values merge, zero-length runs vanish.
pub fn coalesce_runs<V: Clone + PartialEq>(runs: &[(V, usize)]) -> Vec<(V, usize)> {
    let mut out = Vec::with_capacity(runs.len());
    for (value, len) in runs {
        push_run(&mut out, value.clone(), *len);
    }
    out
}

/// Total number of elements covered by a run list.
#[inline]
pub fn total_len<V>(runs: &[(V, usize)]) -> usize {
    runs.iter().map(|(_, len)| *len).sum()
}

/// Normalize half-open element ranges against a sequence of `total` elements:
/// ends are clamped to `total`, empty ranges dropped, the rest sorted and
/// merged where they overlap or touch.
pub fn normalize_ranges(ranges: &[(usize, usize)], total: usize) -> Vec<(usize, usize)> {
    let mut clamped: Vec<(usize, usize)> = ranges
        .iter()
        .map(|&(start, end)| (start, end.min(total)))
        .filter(|&(start, end)| start < end)
        .collect();
    clamped.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(clamped.len());
    for (start, end) in clamped {
        match merged.last_mut() {
            Some((_, last_end)) if start <= *last_end => *last_end = (*last_end).max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_run_merges_and_skips_empty() {
        let mut runs = Vec::new();
        push_run(&mut runs, 1, 2);
        push_run(&mut runs, 1, 3);
        push_run(&mut runs, 2, 0);
        push_run(&mut runs, 2, 1);
        assert_eq!(runs, vec![(1, 5), (2, 1)]);
    }

    #[test]
    fn coalesce_bridges_zero_length_runs() {
        let runs = vec![(4, 1), (7, 0), (4, 2), (5, 1)];
        assert_eq!(coalesce_runs(&runs), vec![(4, 3), (5, 1)]);
        assert_eq!(total_len(&runs), 4);
    }

    #[test]
    fn normalize_clamps_sorts_and_merges() {
        let ranges = vec![(8, 20), (0, 2), (1, 4), (4, 5), (6, 6), (12, 15), (30, 40)];
        assert_eq!(normalize_ranges(&ranges, 10), vec![(0, 5), (8, 10)]);
    }

    #[test]
    fn normalize_empty_inputs() {
        assert!(normalize_ranges(&[], 10).is_empty());
        assert!(normalize_ranges(&[(3, 1), (5, 9)], 0).is_empty());
    }
}
