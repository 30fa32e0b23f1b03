//! Text rendering.
//!
//! Two layouts are supported. The compact form lists runs as
//! `from | (value, length), ... | to`; the expanded form writes every element,
//! space separated. Both end with a newline when written to a sink. An
//! optional precision is applied to each value as `{:.N}`, which only affects
//! types whose `Display` honours it (floats).

use std::fmt::{self, Display};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::store::RunArray;
use crate::traits::{Key, OverflowPolicy};

fn value_text<V: Display>(value: &V, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{value:.p$}"),
        None => value.to_string(),
    }
}

impl<K: Key, V: Clone + PartialEq + Display, P: OverflowPolicy> RunArray<K, V, P> {
    fn compact_runs(&self, from: K, to: K, precision: Option<usize>) -> String {
        self.iter_runs(from, to)
            .map(|(start, end, value)| {
                format!("({}, {})", value_text(value, precision), Self::span(start, end))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Write the clamped `[from, to)` as `from | (value, length), ... | to`.
    /// Nothing is written if the range clamps to nothing.
    pub fn write_compact<W: Write>(
        &self,
        sink: &mut W,
        from: K,
        to: K,
        precision: Option<usize>,
    ) -> Result<()> {
        let Some((from, to)) = self.clamp(from, to) else {
            return Ok(());
        };
        writeln!(sink, "{from} | {} | {to}", self.compact_runs(from, to, precision))?;
        Ok(())
    }

    /// Write every element of the clamped `[from, to)`, space separated.
    pub fn write_expanded<W: Write>(
        &self,
        sink: &mut W,
        from: K,
        to: K,
        precision: Option<usize>,
    ) -> Result<()> {
        let Some((from, to)) = self.clamp(from, to) else {
            return Ok(());
        };
        let mut first = true;
        for (start, end, value) in self.iter_runs(from, to) {
            let text = value_text(value, precision);
            for _ in 0..Self::span(start, end) {
                if !first {
                    sink.write_all(b" ")?;
                }
                sink.write_all(text.as_bytes())?;
                first = false;
            }
        }
        sink.write_all(b"\n")?;
        Ok(())
    }

    /// Write the clamped `[from, to)` to a file, compact or expanded,
    /// truncating it unless `append` is set.
    pub fn to_file<Q: AsRef<Path>>(
        &self,
        path: Q,
        from: K,
        to: K,
        append: bool,
        expanded: bool,
        precision: Option<usize>,
    ) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.as_ref().display(), append, expanded, "writing array");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)?;
        let mut sink = BufWriter::new(file);
        if expanded {
            self.write_expanded(&mut sink, from, to, precision)?;
        } else {
            self.write_compact(&mut sink, from, to, precision)?;
        }
        sink.flush()?;
        Ok(())
    }
}

/// `min | (value, length), ... | max`. A formatter precision (`{:.2}`) is
/// passed through to the values.
impl<K: Key, V: Clone + PartialEq + Display, P: OverflowPolicy> Display for RunArray<K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            self.min_index,
            self.compact_runs(self.min_index, self.max_index, f.precision()),
            self.max_index
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::RunArray;

    fn sample() -> RunArray<i64, i64> {
        RunArray::compress(&[1, 1, 1, 2, 2, 3], 0, 0).unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>),
    {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn display_lists_runs() {
        assert_eq!(sample().to_string(), "0 | (1, 3), (2, 2), (3, 1) | 6");
        let uniform = RunArray::<i64, i64>::with_bounds(-2, 2, 5).unwrap();
        assert_eq!(uniform.to_string(), "-2 | (5, 4) | 2");
    }

    #[test]
    fn display_precision_for_floats() {
        let a = RunArray::<i64, f64>::compress(&[0.5, 0.5, 1.25], 0, 0.0).unwrap();
        assert_eq!(format!("{a:.2}"), "0 | (0.50, 2), (1.25, 1) | 3");
        assert_eq!(a.to_string(), "0 | (0.5, 2), (1.25, 1) | 3");
    }

    #[test]
    fn compact_clamps_range() {
        let a = sample();
        let out = render(|buf| a.write_compact(buf, 2, 40, None).unwrap());
        assert_eq!(out, "2 | (1, 1), (2, 2), (3, 1) | 6\n");
        let empty = render(|buf| a.write_compact(buf, 7, 9, None).unwrap());
        assert!(empty.is_empty());
    }

    #[test]
    fn expanded_writes_every_element() {
        let a = sample();
        let out = render(|buf| a.write_expanded(buf, 1, 5, None).unwrap());
        assert_eq!(out, "1 1 2 2\n");

        let f = RunArray::<i64, f64>::compress(&[1.0, 2.5], 0, 0.0).unwrap();
        let out = render(|buf| f.write_expanded(buf, 0, 2, Some(1)).unwrap());
        assert_eq!(out, "1.0 2.5\n");
    }

    #[test]
    fn to_file_truncates_or_appends() {
        let a = sample();
        let path = std::env::temp_dir().join(format!("run_array_render_{}.txt", std::process::id()));
        a.to_file(&path, 0, 6, false, false, None).unwrap();
        a.to_file(&path, 0, 3, true, true, None).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        a.to_file(&path, 4, 6, false, true, None).unwrap();
        let rewritten = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(text, "0 | (1, 3), (2, 2), (3, 1) | 6\n1 1 1\n");
        assert_eq!(rewritten, "2 3\n");
    }
}
