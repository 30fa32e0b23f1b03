//! Benchmark: range assignment and structural edits at growing run counts.
//!
//! Run with:
//! `cargo bench --bench assign_ops`
//!
//! Costs should track the number of runs touched, not the domain length, so
//! the domain here is far larger than anything a dense array could hold.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use run_array::RunArray;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const DOMAIN: u64 = 1 << 48;

fn random_array(rng: &mut StdRng, runs: usize) -> RunArray<u64, u32> {
    let stride = DOMAIN / runs as u64;
    let mut array = RunArray::with_bounds(0, DOMAIN, 0).unwrap();
    for i in 0..runs as u64 {
        let len = rng.gen_range(1..stride);
        array.assign_value(i * stride, i * stride + len, rng.gen_range(1..16));
    }
    array
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, |process| process.memory() / 1024)
}

fn bench_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_value");
    for &runs in &[1_000usize, 10_000, 100_000] {
        let before = rss_kib();
        let base = random_array(&mut StdRng::seed_from_u64(42), runs);
        eprintln!(
            "runs={runs}: {} breakpoints, ~{} KiB estimated, rss delta {} KiB",
            base.breakpoint_count(),
            base.byte_size() / 1024,
            rss_kib().saturating_sub(before)
        );
        group.bench_function(format!("runs_{runs}"), |b| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter_batched(
                || base.clone(),
                |mut array| {
                    let from = rng.gen_range(0..DOMAIN - 1);
                    let to = from + rng.gen_range(1..DOMAIN / 1_000);
                    array.assign_value(from, to, 3);
                    black_box(array.breakpoint_count());
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_structural(c: &mut Criterion) {
    let mut group = c.benchmark_group("structural");
    let base = random_array(&mut StdRng::seed_from_u64(43), 50_000);
    group.bench_function("insert_after", |b| {
        let mut rng = StdRng::seed_from_u64(8);
        b.iter_batched(
            || base.clone(),
            |mut array| {
                array.insert_after(rng.gen_range(0..DOMAIN), &[(5, 1_000), (6, 10)], false);
                black_box(array.max_index());
            },
            BatchSize::LargeInput,
        )
    });
    group.bench_function("erase", |b| {
        let mut rng = StdRng::seed_from_u64(9);
        b.iter_batched(
            || base.clone(),
            |mut array| {
                let from = rng.gen_range(0..DOMAIN / 2);
                array.erase(from, from + DOMAIN / 100, false);
                black_box(array.max_index());
            },
            BatchSize::LargeInput,
        )
    });
    group.bench_function("sort_whole_domain", |b| {
        b.iter_batched(
            || base.clone(),
            |mut array| {
                array.sort(false);
                black_box(array.breakpoint_count());
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_assign, bench_structural);
criterion_main!(benches);
