//! Example: compressing whitespace-separated numbers and writing them back.
//!
//! Run with:
//! `cargo run --example from_text [path]`
//!
//! Without a path a small sample is compressed from memory.

use std::io::{self, Cursor};

use run_array::{Result, RunArray};

fn main() -> Result<()> {
    let array: RunArray<u64, f64> = match std::env::args().nth(1) {
        Some(path) => RunArray::compress_from_file(path, 0, 0, 0.0)?,
        None => {
            let sample = "0 0 0 0.5 0.5 0.5 0.5\n1.25 1.25 0 0 0 0 0\n";
            RunArray::compress_from_reader(Cursor::new(sample), 0, 0, 0.0)?
        }
    };

    let (min, max) = array.bounds();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    array.write_compact(&mut out, min, max, Some(3))?;
    array.write_expanded(&mut out, min, max.min(min + 32), Some(2))?;

    let path = std::env::temp_dir().join("run_array_from_text.txt");
    array.to_file(&path, min, max, false, true, None)?;
    let reread = RunArray::<u64, f64>::compress_from_file(&path, 0, 0, 0.0)?;
    let tail = RunArray::<u64, f64>::compress_from_file_parts(&path, &[(3, 9)], 0.0)?;
    std::fs::remove_file(&path)?;
    println!("round trip equal: {}", reread == array);
    println!("tokens 3..9: {tail}");
    Ok(())
}
