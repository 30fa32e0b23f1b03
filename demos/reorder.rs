//! Example: run-wise reordering.
//!
//! Run with:
//! `cargo run --example reorder`

use run_array::RunArray;

fn main() {
    let mut a: RunArray<i64, char> =
        RunArray::compress(&"aaabbbbccd".chars().collect::<Vec<_>>(), 0, ' ').unwrap();
    println!("start:    {a}");

    a.reverse();
    println!("reversed: {a}");

    a.sort(false);
    println!("sorted:   {a}");

    a.sort_values_by(0, 10, false, |x, y| (*x == 'b').cmp(&(*y == 'b')));
    println!("b last:   {a}");

    a.replace_value(0, 10, &'c', 'a');
    a.apply(0, 3, |c| c.to_ascii_uppercase());
    println!("rewritten: {a}");
}
