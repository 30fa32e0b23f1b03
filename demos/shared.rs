//! Example: one array shared between writer and reader threads.
//!
//! Run with:
//! `cargo run --example shared`

use std::thread;

use run_array::{RunArray, SharedRunArray};

fn main() {
    let shared: SharedRunArray<u64, u32> = RunArray::with_bounds(0, 1 << 32, 0).unwrap().into();

    thread::scope(|s| {
        for worker in 0..4u64 {
            let shared = &shared;
            s.spawn(move || {
                for i in 0..1_000u64 {
                    let from = (worker << 28) + i * 4_096;
                    shared.assign_value(from, from + 2_048, worker as u32 + 1);
                }
            });
        }
        s.spawn(|| {
            for _ in 0..100 {
                let runs = shared.read(|a| a.breakpoint_count());
                assert_ne!(runs, 1);
            }
        });
    });

    let array = shared.into_inner();
    println!("breakpoints: {}", array.breakpoint_count());
    println!("frequencies: {:?}", array.value_frequencies(0, u64::MAX));
}
