#![cfg(feature = "parallel")]

use rand::{rngs::StdRng, Rng, SeedableRng};
use run_array::RunArray;

fn random_array(rng: &mut StdRng, runs: usize) -> RunArray<i64, i64> {
    let list: Vec<(i64, usize)> = (0..runs)
        .map(|_| (rng.gen_range(-1_000..1_000), rng.gen_range(1..5)))
        .collect();
    RunArray::from_runs(0, 0, &list).unwrap()
}

#[test]
fn parallel_min_max_match_dense_scan() {
    let mut rng = StdRng::seed_from_u64(7);
    for runs in [10, 5_000, 40_000] {
        let a = random_array(&mut rng, runs);
        let dense = a.to_vec();
        let max = a.max_index();
        for (from, to) in [(0, max), (max / 3, max / 2), (max / 4, max - max / 4)] {
            let slice = &dense[from as usize..to as usize];
            assert_eq!(a.min_value(from, to), slice.iter().min());
            assert_eq!(a.max_value(from, to), slice.iter().max());
        }
    }
}

#[test]
fn parallel_ties_keep_earliest() {
    let mut rng = StdRng::seed_from_u64(11);
    let a = random_array(&mut rng, 20_000);
    // Every value is equal under this comparator, so the first run must win.
    let first = a.get(0);
    assert_eq!(a.min_value_by(0, a.max_index(), |_, _| std::cmp::Ordering::Equal), Some(first));
    assert_eq!(a.max_value_by(0, a.max_index(), |_, _| std::cmp::Ordering::Equal), Some(first));
}
