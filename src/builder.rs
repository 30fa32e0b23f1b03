use std::marker::PhantomData;

use crate::error::Result;
use crate::traits::{Key, OverflowPolicy, Wrapping};
use crate::RunArray;

/// Step-by-step configuration of a [`RunArray`].
///
/// With explicit bounds the runs are written from the lower bound and cut to
/// the domain. Without bounds the domain starts at `start` (default zero) and
/// is exactly as long as the runs, or a single element if there are none.
pub struct RunArrayBuilder<K = u64, V = i64, P = Wrapping> {
    background: V,
    start: Option<K>,
    bounds: Option<(K, K)>,
    runs: Vec<(V, usize)>,
    policy: PhantomData<P>,
}

impl<K: Key, V: Clone + PartialEq, P: OverflowPolicy> RunArrayBuilder<K, V, P> {
    pub fn new(background: V) -> Self {
        Self {
            background,
            start: None,
            bounds: None,
            runs: Vec::new(),
            policy: PhantomData,
        }
    }
    pub fn with_bounds(mut self, a: K, b: K) -> Self {
        self.bounds = Some((a, b));
        self
    }
    pub fn with_start(mut self, start: K) -> Self {
        self.start = Some(start);
        self
    }
    pub fn with_runs(mut self, runs: Vec<(V, usize)>) -> Self {
        self.runs = runs;
        self
    }
    pub fn push_run(mut self, value: V, len: usize) -> Self {
        self.runs.push((value, len));
        self
    }
    pub fn build(self) -> Result<RunArray<K, V, P>> {
        match self.bounds {
            Some((a, b)) => {
                let mut array = RunArray::with_bounds(a, b, self.background)?;
                array.assign_runs(&self.runs);
                Ok(array)
            }
            None => {
                let start = self.start.unwrap_or(K::ZERO);
                if self.runs.is_empty() {
                    let end = RunArray::<K, V, P>::offset(start, 1);
                    RunArray::with_bounds(start, end, self.background)
                } else {
                    RunArray::from_runs(start, self.background, &self.runs)
                }
            }
        }
    }
}
