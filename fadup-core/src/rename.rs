//! Duplicate header renaming
//!
//! A single pass over the input: every line that starts with `>` is a header,
//! everything else is sequence data. The first occurrence of a header text is
//! written verbatim, the n-th repeat is written as `<header>_<n>`. Sequence
//! lines are copied byte for byte.

use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};

use crate::error::Result;

/// Marker that opens a header line.
pub const HEADER_PREFIX: u8 = b'>';

/// Separator between a repeated header and its occurrence number.
pub const SUFFIX_SEPARATOR: char = '_';

/// A classified input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Header text with the line terminator and trailing whitespace removed.
    Header(&'a [u8]),
    /// The raw line, terminator included if present.
    Sequence(&'a [u8]),
}

/// Classify a raw line (as returned by `read_until(b'\n')`).
pub fn classify(line: &[u8]) -> Line<'_> {
    if line.first() == Some(&HEADER_PREFIX) {
        Line::Header(trim_trailing_whitespace(line))
    } else {
        Line::Sequence(line)
    }
}

/// Strip the line terminator and any trailing ASCII whitespace before it.
/// Internal whitespace is kept.
fn trim_trailing_whitespace(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    &line[..end]
}

/// Per-run occurrence counts keyed by exact header text.
#[derive(Debug, Default, Clone)]
pub struct HeaderCounter {
    counts: HashMap<Vec<u8>, u64>,
}

impl HeaderCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more occurrence of `key` and return its occurrence number
    /// (1 for the first time the key is seen).
    pub fn observe(&mut self, key: &[u8]) -> u64 {
        match self.counts.get_mut(key) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                self.counts.insert(key.to_vec(), 1);
                1
            }
        }
    }

    /// How many times `key` has been observed so far.
    pub fn count(&self, key: &[u8]) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Number of distinct header texts observed.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

/// Summary of a single rename run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenameStats {
    pub lines: u64,
    pub headers: u64,
    pub sequence_lines: u64,
    pub renamed: u64,
    pub distinct_headers: usize,
}

impl fmt::Display for RenameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines: {} headers ({} distinct, {} renamed), {} sequence lines",
            self.lines, self.headers, self.distinct_headers, self.renamed, self.sequence_lines
        )
    }
}

/// Rewrites repeated headers while streaming lines from a reader to a writer.
#[derive(Debug, Default)]
pub struct HeaderRenamer {
    counter: HeaderCounter,
    stats: RenameStats,
}

impl HeaderRenamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform one raw line and write the result.
    pub fn write_line<W: Write>(&mut self, line: &[u8], writer: &mut W) -> Result<()> {
        self.stats.lines += 1;

        match classify(line) {
            Line::Header(key) => {
                self.stats.headers += 1;
                let occurrence = self.counter.observe(key);
                writer.write_all(key)?;
                if occurrence > 1 {
                    write!(writer, "{}{}", SUFFIX_SEPARATOR, occurrence)?;
                    self.stats.renamed += 1;
                    log::trace!(
                        "Renamed {} -> {}{}{}",
                        String::from_utf8_lossy(key),
                        String::from_utf8_lossy(key),
                        SUFFIX_SEPARATOR,
                        occurrence
                    );
                }
                writer.write_all(b"\n")?;
            }
            Line::Sequence(raw) => {
                self.stats.sequence_lines += 1;
                writer.write_all(raw)?;
            }
        }

        Ok(())
    }

    /// Statistics accumulated so far.
    pub fn stats(&self) -> RenameStats {
        RenameStats {
            distinct_headers: self.counter.distinct(),
            ..self.stats
        }
    }

    /// Run the transformation over every line of `reader`, then flush `writer`.
    /// The counter is dropped with the renamer when this returns.
    pub fn process<R: BufRead, W: Write>(mut self, mut reader: R, mut writer: W) -> Result<RenameStats> {
        let mut line = Vec::with_capacity(256);

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            self.write_line(&line, &mut writer)?;
        }
        writer.flush()?;

        let stats = self.stats();
        if stats.lines > 0 && stats.headers == 0 {
            log::warn!("Input has {} lines but no header lines", stats.lines);
        }
        log::debug!("Rename pass finished: {}", stats);

        Ok(stats)
    }
}

/// Rename duplicated headers from `reader` into `writer` with a fresh counter.
pub fn rename<R: BufRead, W: Write>(reader: R, writer: W) -> Result<RenameStats> {
    HeaderRenamer::new().process(reader, writer)
}
