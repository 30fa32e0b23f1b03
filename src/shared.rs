//! A reader/writer-locked wrapper for sharing one array across threads.
//!
//! Queries run under the shared lock for their full duration and mutations
//! under the exclusive lock, so a reader never observes a half-applied edit.
//! Every operation leaves the array canonical even if a closure panics
//! afterwards, so a poisoned lock is recovered rather than propagated.

use std::sync::{PoisonError, RwLock};

use crate::store::RunArray;
use crate::traits::{Key, OverflowPolicy, Wrapping};

#[derive(Debug)]
pub struct SharedRunArray<K = u64, V = i64, P = Wrapping> {
    inner: RwLock<RunArray<K, V, P>>,
}

impl<K: Key, V: Clone + PartialEq, P: OverflowPolicy> SharedRunArray<K, V, P> {
    pub fn new(array: RunArray<K, V, P>) -> Self {
        Self {
            inner: RwLock::new(array),
        }
    }

    /// Run `f` under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&RunArray<K, V, P>) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` under the exclusive lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut RunArray<K, V, P>) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Value at `index`, cloned out of the lock.
    pub fn get(&self, index: K) -> V {
        self.read(|array| array.get(index).clone())
    }

    pub fn assign_value(&self, from: K, to: K, value: V) {
        self.write(|array| array.assign_value(from, to, value));
    }

    /// A consistent copy of the current contents.
    pub fn snapshot(&self) -> RunArray<K, V, P> {
        self.read(RunArray::clone)
    }

    pub fn into_inner(self) -> RunArray<K, V, P> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: Key, V: Clone + PartialEq, P: OverflowPolicy> From<RunArray<K, V, P>>
    for SharedRunArray<K, V, P>
{
    fn from(array: RunArray<K, V, P>) -> Self {
        Self::new(array)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn readers_see_whole_writes() {
        let shared: SharedRunArray<i64, i64> =
            RunArray::with_bounds(0, 1_000, 0).unwrap().into();
        thread::scope(|s| {
            for t in 0..4i64 {
                let shared = &shared;
                s.spawn(move || {
                    for i in 0..50 {
                        let from = (t * 250 + i * 3) % 990;
                        shared.assign_value(from, from + 10, t + 1);
                        assert!(shared.read(|a| a.is_canonical()));
                    }
                });
            }
        });
        let array = shared.into_inner();
        assert!(array.is_canonical());
        assert_eq!(array.bounds(), (0, 1_000));
    }

    #[test]
    fn recovers_from_poison() {
        let shared: SharedRunArray<i64, i64> =
            RunArray::with_bounds(0, 10, 0).unwrap().into();
        let result = thread::scope(|s| {
            s.spawn(|| {
                shared.write(|a| {
                    a.assign_value(2, 4, 9);
                    panic!("writer died");
                })
            })
            .join()
        });
        assert!(result.is_err());
        assert_eq!(shared.get(3), 9);
        shared.assign_value(0, 10, 1);
        assert_eq!(shared.snapshot().to_vec(), vec![1; 10]);
    }
}
