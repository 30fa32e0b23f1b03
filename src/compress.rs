//! Construction from dense input: slices, text readers and files.
//!
//! Text input is a stream of whitespace-delimited tokens, each parsed with
//! [`FromStr`]. Only the selected tokens are parsed, and they are folded into
//! runs line by line as they are read; skipping from the back buffers just the
//! skipped tail, and range selection stops reading after its last range.

use std::collections::VecDeque;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::mem;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::store::RunArray;
use crate::traits::{Key, OverflowPolicy};
use crate::utils::{normalize_ranges, push_run};

impl<K: Key, V: Clone + PartialEq, P: OverflowPolicy> RunArray<K, V, P> {
    /// Compress a dense slice into runs starting at index `start`.
    ///
    /// Returns [`Error::EmptyInput`] for an empty slice.
    pub fn compress(values: &[V], start: K, background: V) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut runs = Vec::new();
        for value in values {
            push_run(&mut runs, value.clone(), 1);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(elements = values.len(), runs = runs.len(), "compressed slice");
        Self::from_runs(start, background, &runs)
    }

    /// [`compress`](Self::compress), also returning the ratio of the
    /// compressed footprint to the dense slice's.
    pub fn compress_with_ratio(values: &[V], start: K, background: V) -> Result<(Self, f64)> {
        let array = Self::compress(values, start, background)?;
        let ratio = array.ratio_to_dense(values.len());
        Ok((array, ratio))
    }

    /// Compress the tokens of `reader`, dropping `skip_front` tokens from the
    /// start and `skip_back` from the end. The result starts at index zero.
    ///
    /// Returns [`Error::EmptyInput`] if nothing remains after skipping.
    pub fn compress_from_reader<R>(
        reader: R,
        skip_front: usize,
        skip_back: usize,
        background: V,
    ) -> Result<Self>
    where
        R: BufRead,
        V: FromStr,
        V::Err: Display,
    {
        Self::fold_skipping(reader, skip_front, skip_back, background).map(|(array, _)| array)
    }

    /// [`compress_from_reader`](Self::compress_from_reader) over a file.
    pub fn compress_from_file<Q: AsRef<Path>>(
        path: Q,
        skip_front: usize,
        skip_back: usize,
        background: V,
    ) -> Result<Self>
    where
        V: FromStr,
        V::Err: Display,
    {
        Self::compress_from_file_with_ratio(path, skip_front, skip_back, background)
            .map(|(array, _)| array)
    }

    /// [`compress_from_file`](Self::compress_from_file), also returning the
    /// ratio of the compressed footprint to the dense selected tokens.
    pub fn compress_from_file_with_ratio<Q: AsRef<Path>>(
        path: Q,
        skip_front: usize,
        skip_back: usize,
        background: V,
    ) -> Result<(Self, f64)>
    where
        V: FromStr,
        V::Err: Display,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.as_ref().display(), "compressing file");
        let file = File::open(path)?;
        let (array, selected) =
            Self::fold_skipping(BufReader::new(file), skip_front, skip_back, background)?;
        let ratio = array.ratio_to_dense(selected);
        Ok((array, ratio))
    }

    /// Compress the union of the half-open token ranges `ranges`, in token
    /// order. Range ends are clamped to the token count; empty ranges are
    /// dropped and overlapping ones merged.
    ///
    /// Returns [`Error::EmptyInput`] if no token is selected.
    pub fn compress_parts_from_reader<R>(
        reader: R,
        ranges: &[(usize, usize)],
        background: V,
    ) -> Result<Self>
    where
        R: BufRead,
        V: FromStr,
        V::Err: Display,
    {
        Self::fold_parts(reader, ranges, background).map(|(array, _)| array)
    }

    /// [`compress_parts_from_reader`](Self::compress_parts_from_reader) over a
    /// file.
    pub fn compress_from_file_parts<Q: AsRef<Path>>(
        path: Q,
        ranges: &[(usize, usize)],
        background: V,
    ) -> Result<Self>
    where
        V: FromStr,
        V::Err: Display,
    {
        Self::compress_from_file_parts_with_ratio(path, ranges, background).map(|(array, _)| array)
    }

    /// [`compress_from_file_parts`](Self::compress_from_file_parts), also
    /// returning the compression ratio of the selected tokens.
    pub fn compress_from_file_parts_with_ratio<Q: AsRef<Path>>(
        path: Q,
        ranges: &[(usize, usize)],
        background: V,
    ) -> Result<(Self, f64)>
    where
        V: FromStr,
        V::Err: Display,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.as_ref().display(), parts = ranges.len(), "compressing file parts");
        let file = File::open(path)?;
        let (array, selected) = Self::fold_parts(BufReader::new(file), ranges, background)?;
        let ratio = array.ratio_to_dense(selected);
        Ok((array, ratio))
    }

    /// Compressed footprint over the footprint of `elements` dense values.
    fn ratio_to_dense(&self, elements: usize) -> f64 {
        let raw = elements.saturating_mul(mem::size_of::<V>()).max(1);
        self.byte_size() as f64 / raw as f64
    }

    /// Fold all tokens but the first `skip_front` and last `skip_back` into
    /// runs. Only the trailing `skip_back` tokens are buffered.
    fn fold_skipping<R>(
        reader: R,
        skip_front: usize,
        skip_back: usize,
        background: V,
    ) -> Result<(Self, usize)>
    where
        R: BufRead,
        V: FromStr,
        V::Err: Display,
    {
        let mut runs: Vec<(V, usize)> = Vec::new();
        let mut selected = 0usize;
        let mut pending: VecDeque<(usize, String)> = VecDeque::new();
        for_each_token(reader, |index, token| {
            if index < skip_front {
                return Ok(true);
            }
            pending.push_back((index, token.to_owned()));
            if pending.len() > skip_back {
                if let Some((index, token)) = pending.pop_front() {
                    push_run(&mut runs, parse_token::<V>(index, &token)?, 1);
                    selected += 1;
                }
            }
            Ok(true)
        })?;
        #[cfg(feature = "tracing")]
        tracing::debug!(selected, runs = runs.len(), "parsed tokens");
        Self::from_parsed(&runs, background).map(|array| (array, selected))
    }

    /// Fold the tokens inside the normalized `ranges` into runs, stopping
    /// once the last range is passed.
    fn fold_parts<R>(reader: R, ranges: &[(usize, usize)], background: V) -> Result<(Self, usize)>
    where
        R: BufRead,
        V: FromStr,
        V::Err: Display,
    {
        let ranges = normalize_ranges(ranges, usize::MAX);
        let mut current = ranges.iter().peekable();
        let mut runs: Vec<(V, usize)> = Vec::new();
        let mut selected = 0usize;
        for_each_token(reader, |index, token| {
            while current.next_if(|&&(_, end)| end <= index).is_some() {}
            let Some(&&(start, _)) = current.peek() else {
                return Ok(false);
            };
            if index >= start {
                push_run(&mut runs, parse_token::<V>(index, token)?, 1);
                selected += 1;
            }
            Ok(true)
        })?;
        #[cfg(feature = "tracing")]
        tracing::debug!(selected, runs = runs.len(), "parsed token parts");
        Self::from_parsed(&runs, background).map(|array| (array, selected))
    }

    fn from_parsed(runs: &[(V, usize)], background: V) -> Result<Self> {
        if runs.is_empty() {
            return Err(Error::EmptyInput);
        }
        Self::from_runs(K::ZERO, background, runs)
    }
}

/// Feed every whitespace-delimited token of `reader` to `visit` with its
/// position. Reading stops early when `visit` returns `Ok(false)`.
fn for_each_token<R, F>(reader: R, mut visit: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &str) -> Result<bool>,
{
    let mut index = 0;
    for line in reader.lines() {
        for token in line?.split_whitespace() {
            if !visit(index, token)? {
                return Ok(());
            }
            index += 1;
        }
    }
    Ok(())
}

fn parse_token<V>(index: usize, token: &str) -> Result<V>
where
    V: FromStr,
    V::Err: Display,
{
    token.parse::<V>().map_err(|err| Error::Parse {
        index,
        token: token.to_owned(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::{Error, RunArray};

    type Array = RunArray<i64, i64>;

    fn pairs(a: &Array) -> Vec<(i64, usize)> {
        a.runs().iter().map(|r| (r.value, r.len())).collect()
    }

    #[test]
    fn compress_detects_runs() {
        let a = Array::compress(&[1, 1, 1, 2, 2, 3], 0, 0).unwrap();
        assert_eq!(a.bounds(), (0, 6));
        assert_eq!(pairs(&a), vec![(1, 3), (2, 2), (3, 1)]);
        assert!(a.is_canonical());

        let b = Array::compress(&[4, 4], -7, 4).unwrap();
        assert_eq!(b.bounds(), (-7, -5));
        assert_eq!(b.breakpoint_count(), 0);
    }

    #[test]
    fn compress_empty_slice() {
        assert!(matches!(Array::compress(&[], 0, 0), Err(Error::EmptyInput)));
    }

    #[test]
    fn compress_round_trips() {
        let dense = vec![0, 5, 5, 0, 0, 0, 9, 9, 9, 9, 1];
        let a = Array::compress(&dense, 3, 0).unwrap();
        assert_eq!(a.to_vec(), dense);
    }

    #[test]
    fn ratio_reflects_redundancy() {
        let dense = vec![7i64; 10_000];
        let (a, ratio) = Array::compress_with_ratio(&dense, 0, 0).unwrap();
        assert_eq!(a.len(), 10_000);
        assert!(ratio < 0.01, "ratio {ratio}");
    }

    #[test]
    fn reader_skips_front_and_back() {
        let text = "1 1 2\n2 2  3\n\n3 4\n";
        let a = Array::compress_from_reader(Cursor::new(text), 1, 2, 0).unwrap();
        assert_eq!(a.bounds(), (0, 5));
        assert_eq!(a.to_vec(), vec![1, 2, 2, 2, 3]);
        assert!(a.is_canonical());

        let whole = Array::compress_from_reader(Cursor::new(text), 0, 0, 0).unwrap();
        assert_eq!(whole.len(), 8);
    }

    #[test]
    fn reader_rejects_empty_selection() {
        let empty = Array::compress_from_reader(Cursor::new("  \n"), 0, 0, 0);
        assert!(matches!(empty, Err(Error::EmptyInput)));
        let skipped = Array::compress_from_reader(Cursor::new("1 2 3"), 2, 1, 0);
        assert!(matches!(skipped, Err(Error::EmptyInput)));
    }

    #[test]
    fn reader_reports_bad_token() {
        let err = Array::compress_from_reader(Cursor::new("1 2\nx3 4"), 0, 0, 0).unwrap_err();
        match err {
            Error::Parse { index, token, .. } => {
                assert_eq!(index, 2);
                assert_eq!(token, "x3");
            }
            other => panic!("unexpected error {other:?}"),
        }
        // Unselected tokens are never parsed.
        let a = Array::compress_from_reader(Cursor::new("1 2 bad"), 0, 1, 0).unwrap();
        assert_eq!(a.to_vec(), vec![1, 2]);
    }

    #[test]
    fn parts_are_normalized() {
        let text = "0 1 2 3 4 5 6 7 8 9";
        let a = Array::compress_parts_from_reader(
            Cursor::new(text),
            &[(8, 20), (1, 3), (2, 4), (6, 6)],
            0,
        )
        .unwrap();
        assert_eq!(a.to_vec(), vec![1, 2, 3, 8, 9]);
        let none = Array::compress_parts_from_reader(Cursor::new(text), &[(12, 15)], 0);
        assert!(matches!(none, Err(Error::EmptyInput)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Array::compress_from_file("/nonexistent/run-array/input.txt", 0, 0, 0);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("run_array_compress_{}.txt", std::process::id()));
        std::fs::write(&path, "5 5 5 6\n6 7\n").unwrap();
        let a = Array::compress_from_file(&path, 0, 0, 0).unwrap();
        let parts = Array::compress_from_file_parts(&path, &[(2, 4)], 0).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(a.to_vec(), vec![5, 5, 5, 6, 6, 7]);
        assert_eq!(parts.to_vec(), vec![5, 6]);
    }

    struct Broken;

    impl std::io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("unreadable tail"))
        }
    }

    #[test]
    fn parts_stop_reading_after_last_range() {
        use std::io::{BufReader, Read};

        let reader = BufReader::new(Cursor::new("1 2 3\n").chain(Broken));
        let a = Array::compress_parts_from_reader(reader, &[(0, 2)], 0).unwrap();
        assert_eq!(a.to_vec(), vec![1, 2]);

        let reader = BufReader::new(Cursor::new("1 2 3\n").chain(Broken));
        let whole = Array::compress_from_reader(reader, 0, 0, 0);
        assert!(matches!(whole, Err(Error::Io(_))));
    }

    #[test]
    fn file_ratios_count_selected_tokens() {
        let path =
            std::env::temp_dir().join(format!("run_array_ratio_{}.txt", std::process::id()));
        let text = "3 ".repeat(5_000);
        std::fs::write(&path, &text).unwrap();
        let (a, ratio) = Array::compress_from_file_with_ratio(&path, 0, 0, 0).unwrap();
        let (parts, parts_ratio) =
            Array::compress_from_file_parts_with_ratio(&path, &[(0, 10)], 0).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(a.len(), 5_000);
        let expected = a.byte_size() as f64 / (5_000 * std::mem::size_of::<i64>()) as f64;
        assert_eq!(ratio, expected);
        assert!(ratio < 0.01, "ratio {ratio}");

        assert_eq!(parts.len(), 10);
        assert!(parts_ratio > ratio);
    }
}
