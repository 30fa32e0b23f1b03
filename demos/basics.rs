//! Example: building, editing and querying a sparse array.
//!
//! Run with:
//! `cargo run --example basics`

use run_array::{RunArray, RunArrayBuilder};

fn main() {
    // A billion-element domain that is mostly zero.
    let mut signal: RunArray<u64, u8> = RunArray::with_bounds(0, 1_000_000_000, 0).unwrap();
    signal.assign_value(1_000, 5_000, 3);
    signal.assign_value(4_000, 9_000, 3);
    signal.assign_value(700_000_000, 700_000_010, 9);

    println!("{signal}");
    println!("breakpoints: {}", signal.breakpoint_count());
    println!("estimated size: {} bytes", signal.byte_size());
    println!("value at 4_500: {}", signal[4_500]);
    println!("max over domain: {:?}", signal.max_value(0, u64::MAX));
    println!("cells holding 3: {:?}", signal.value_ranges(0, u64::MAX, &3));

    signal.erase(0, 1_000, false);
    signal.insert_after(10, &[(7, 5)], false);
    println!("after erase + insert: {}", signal.sub_array(0, 20).unwrap());

    let profile: RunArray<i32, f64> = RunArrayBuilder::new(0.0)
        .with_start(-3)
        .push_run(0.25, 2)
        .push_run(1.5, 4)
        .build()
        .unwrap();
    println!("profile: {profile:.2}");
    println!("profile sum: {}", profile.sum(-3, 3, 0.0));
}
