//! Path-based entry points
//!
//! Opens the input and output, runs the renamer, and makes sure the output is
//! fully flushed. `-` stands for stdin/stdout and a `.gz` suffix switches on
//! gzip decoding/encoding.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{RenameError, Result};
use crate::rename::{HeaderRenamer, RenameStats};

/// Path that selects stdin for input and stdout for output.
pub const STDIO_PATH: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoOptions {
    /// Capacity of the read and write buffers, in bytes
    pub buffer_capacity: usize,
    /// Gzip level (0-9) used when the output path ends in `.gz`
    pub compression_level: u32,
}

impl Default for IoOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: 64 * 1024,
            compression_level: 6,
        }
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Open the input for line-by-line reading.
pub fn open_input(path: &Path, options: &IoOptions) -> Result<Box<dyn BufRead>> {
    if is_stdio(path) {
        log::debug!("Reading from stdin");
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(path).map_err(|e| RenameError::open_input(path, e))?;
    log::debug!("Opened input {}", path.display());

    if is_gzip(path) {
        Ok(Box::new(BufReader::with_capacity(
            options.buffer_capacity,
            MultiGzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(options.buffer_capacity, file)))
    }
}

/// Destination for the renamed stream.
pub enum OutputSink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Stdout(BufWriter<io::Stdout>),
}

impl OutputSink {
    /// Flush everything, writing the gzip trailer when compressing.
    pub fn finish(self) -> Result<()> {
        match self {
            Self::Plain(mut w) => w.flush()?,
            Self::Gzip(encoder) => encoder.finish()?.flush()?,
            Self::Stdout(mut w) => w.flush()?,
        }
        Ok(())
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
            Self::Stdout(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.write_all(buf),
            Self::Gzip(w) => w.write_all(buf),
            Self::Stdout(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
            Self::Stdout(w) => w.flush(),
        }
    }
}

/// Create (or truncate) the output.
pub fn create_output(path: &Path, options: &IoOptions) -> Result<OutputSink> {
    if is_stdio(path) {
        log::debug!("Writing to stdout");
        return Ok(OutputSink::Stdout(BufWriter::with_capacity(
            options.buffer_capacity,
            io::stdout(),
        )));
    }

    let file = File::create(path).map_err(|e| RenameError::create_output(path, e))?;
    let writer = BufWriter::with_capacity(options.buffer_capacity, file);
    log::debug!("Created output {}", path.display());

    if is_gzip(path) {
        let level = Compression::new(options.compression_level.min(9));
        Ok(OutputSink::Gzip(GzEncoder::new(writer, level)))
    } else {
        Ok(OutputSink::Plain(writer))
    }
}

/// Whether two existing paths name the same file. Hard links and symlinks
/// are caught by comparing device and inode.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

/// Fail if `input` and `output` are the same existing file, since creating
/// the output would truncate the input before it is read.
fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    if is_stdio(input) || is_stdio(output) {
        return Ok(());
    }
    if same_file(input, output) {
        return Err(RenameError::SameFile { path: output.to_path_buf() });
    }
    Ok(())
}

/// Rename duplicated headers from `input` into `output` with default options.
pub fn rename_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<RenameStats> {
    rename_file_with(input, output, &IoOptions::default())
}

/// Rename duplicated headers from `input` into `output`.
///
/// The output is created or truncated. On error the output may be left
/// incomplete; the input is never modified.
pub fn rename_file_with<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &IoOptions,
) -> Result<RenameStats> {
    let (input, output) = (input.as_ref(), output.as_ref());
    ensure_distinct(input, output)?;

    let reader = open_input(input, options)?;
    let mut sink = create_output(output, options)?;

    let stats = HeaderRenamer::new().process(reader, &mut sink)?;
    sink.finish()?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn test_rename_plain_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.fa");
        let output = dir.path().join("out.fa");
        std::fs::write(&input, ">s\nAC\n>s\nGT\n").unwrap();

        let stats = rename_file(&input, &output).unwrap();
        assert_eq!(stats.renamed, 1);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), ">s\nAC\n>s_2\nGT\n");
        assert_eq!(std::fs::read_to_string(&input).unwrap(), ">s\nAC\n>s\nGT\n");
    }

    #[test]
    fn test_gzip_in_and_out() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.fa.gz");
        let output = dir.path().join("out.fa.gz");

        let mut encoder = GzEncoder::new(File::create(&input).unwrap(), Compression::default());
        encoder.write_all(b">r\nA\n>r\nC\n>r\nG\n").unwrap();
        encoder.finish().unwrap();

        rename_file(&input, &output).unwrap();

        let mut text = String::new();
        GzDecoder::new(File::open(&output).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, ">r\nA\n>r_2\nC\n>r_3\nG\n");
    }

    #[test]
    fn test_missing_input_is_open_error() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.fa");
        let err = rename_file(dir.path().join("nope.fa"), &output).unwrap_err();
        assert!(matches!(err, RenameError::OpenInput { .. }));
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert!(!output.exists());
    }

    #[test]
    fn test_uncreatable_output_is_create_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.fa");
        std::fs::write(&input, ">a\nA\n").unwrap();
        let err = rename_file(&input, dir.path().join("no_dir").join("out.fa")).unwrap_err();
        assert!(matches!(err, RenameError::CreateOutput { .. }));
    }

    #[test]
    fn test_same_file_rejected_and_input_untouched() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.fa");
        std::fs::write(&input, ">a\nA\n>a\nC\n").unwrap();
        let alias = dir.path().join(".").join("in.fa");

        let err = rename_file(&input, &alias).unwrap_err();
        assert!(matches!(err, RenameError::SameFile { .. }));
        assert_eq!(std::fs::read_to_string(&input).unwrap(), ">a\nA\n>a\nC\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_hard_link_output_rejected_and_input_untouched() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.fa");
        let link = dir.path().join("link.fa");
        std::fs::write(&input, ">a\nA\n>a\nC\n").unwrap();
        std::fs::hard_link(&input, &link).unwrap();

        let err = rename_file(&input, &link).unwrap_err();
        assert!(matches!(err, RenameError::SameFile { .. }));
        assert_eq!(std::fs::read_to_string(&input).unwrap(), ">a\nA\n>a\nC\n");
    }

    #[test]
    fn test_distinct_files_are_not_same() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.fa");
        let b = dir.path().join("b.fa");
        std::fs::write(&a, ">a\n").unwrap();
        std::fs::write(&b, ">a\n").unwrap();
        assert!(!same_file(&a, &b));
        assert!(same_file(&a, &a));
        assert!(!same_file(&a, &dir.path().join("missing.fa")));
    }

    #[test]
    fn test_path_helpers() {
        assert!(is_stdio(Path::new("-")));
        assert!(!is_stdio(Path::new("-.fa")));
        assert!(is_gzip(Path::new("reads.fa.GZ")));
        assert!(!is_gzip(Path::new("reads.fa")));
    }
}
