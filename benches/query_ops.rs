use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use run_array::RunArray;

fn random_runs(rng: &mut StdRng, runs: usize) -> Vec<(i64, usize)> {
    (0..runs)
        .map(|_| (rng.gen_range(-50..50), rng.gen_range(1..64)))
        .collect()
}

fn bench_queries(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5155_AA55);
    let list = random_runs(&mut rng, 200_000);
    let array: RunArray<i64, i64> = RunArray::from_runs(0, 0, &list).unwrap();
    let max = array.max_index();

    let mut group = c.benchmark_group("queries");
    group.bench_function("get", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| black_box(*array.get(rng.gen_range(0..max))));
    });
    group.bench_function("values_window", |b| {
        let mut rng = StdRng::seed_from_u64(2);
        b.iter(|| {
            let from = rng.gen_range(0..max - 4_096);
            black_box(array.values(from, from + 4_096).len())
        });
    });
    group.bench_function("sum_whole_domain", |b| {
        b.iter(|| black_box(array.sum(0, max, 0)));
    });
    group.bench_function("max_whole_domain", |b| {
        b.iter(|| black_box(array.max_value(0, max).copied()));
    });
    group.bench_function("value_frequencies", |b| {
        b.iter(|| black_box(array.value_frequencies(0, max).len()));
    });
    group.finish();
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
