//! Range overwrite.

use crate::store::RunArray;
use crate::traits::{Key, OverflowPolicy};
use crate::utils::{push_run, total_len};

impl<K: Key, V: Clone + PartialEq, P: OverflowPolicy> RunArray<K, V, P> {
    /// Overwrite the clamped `[from, to)` with `value`.
    ///
    /// Runs in O((k + 1) log R) where k is the number of breakpoints removed.
    pub fn assign_value(&mut self, from: K, to: K, value: V) {
        let Some((from, to)) = self.clamp(from, to) else {
            return;
        };
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("assign_value", from = ?from, to = ?to);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let len = Self::span(from, to);
        self.splice(from, to, std::iter::once((value, len)));
    }

    /// Overwrite the clamped `[from, to)` from a `(value, length)` run list.
    ///
    /// The list is aligned with the *requested* `from`: when clamping moves
    /// the start right, the leading elements of the list are skipped. The
    /// list is cut at the end of the window, and if it covers fewer elements
    /// than the window only that prefix is written. Zero-length runs are
    /// ignored and adjacent equal runs merge.
    pub fn assign_values(&mut self, from: K, to: K, runs: &[(V, usize)]) {
        let requested = from;
        let Some((from, to)) = self.clamp(from, to) else {
            return;
        };
        let skip = if requested < from {
            Self::span(requested, from)
        } else {
            0
        };
        let fitted = fit_runs(runs, skip, Self::span(from, to));
        let covered = total_len(&fitted);
        if covered == 0 {
            return;
        }
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!(
            "assign_values",
            from = ?from,
            to = ?to,
            runs = fitted.len()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        self.splice(from, Self::offset(from, covered), fitted);
    }

    /// Overwrite the domain from its start with a run list.
    pub fn assign_runs(&mut self, runs: &[(V, usize)]) {
        self.assign_values(self.min_index, self.max_index, runs);
    }
}

/// Elements `[skip, skip + window)` of a run list, coalesced.
fn fit_runs<V: Clone + PartialEq>(
    runs: &[(V, usize)],
    mut skip: usize,
    window: usize,
) -> Vec<(V, usize)> {
    let mut fitted = Vec::new();
    let mut remaining = window;
    for (value, len) in runs {
        if remaining == 0 {
            break;
        }
        let mut len = *len;
        if skip > 0 {
            let dropped = skip.min(len);
            skip -= dropped;
            len -= dropped;
        }
        let len = len.min(remaining);
        push_run(&mut fitted, value.clone(), len);
        remaining -= len;
    }
    fitted
}
