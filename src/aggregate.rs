//! Writes accepted files into the combined output stream.
//!
//! Layout:
//!
//! ```text
//! # Collected files outputs generated on 2026-10-18 09:15:02
//!
//!
//! ----
//! project/src/main.rs
//! fn main() {}
//! ```

use crate::decode::{self, Decoded, DetectedEncoding};
use crate::error::SweepError;
use crate::options::PathStyle;
use crate::types::DiscoveredFile;
use chrono::{DateTime, TimeZone};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

/// Marker line that precedes every collected file's path.
pub const DELIMITER: &str = "----";

/// Renders the path that goes on the delimiter's second line.
pub fn display_path(file: &DiscoveredFile, style: PathStyle) -> String {
    let path: &Path = match style {
        PathStyle::Relative => &file.relative,
        PathStyle::Absolute => &file.path,
    };
    let rendered = path.to_string_lossy();
    match style {
        PathStyle::Relative if std::path::MAIN_SEPARATOR != '/' => {
            rendered.replace(std::path::MAIN_SEPARATOR, "/")
        }
        _ => rendered.into_owned(),
    }
}

/// Counts every byte the inner writer accepts, including partial writes.
struct CountingWriter<W: Write> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

pub struct Aggregator<W: Write> {
    out: CountingWriter<W>,
    style: PathStyle,
}

impl<W: Write> Aggregator<W> {
    pub fn new(out: W, style: PathStyle) -> Self {
        Self {
            out: CountingWriter {
                inner: out,
                count: 0,
            },
            style,
        }
    }

    /// Total bytes that reached the output, banner, delimiters and any
    /// partially written block included.
    pub fn bytes_written(&self) -> u64 {
        self.out.count
    }

    pub fn write_banner<Tz>(&mut self, generated: &DateTime<Tz>) -> Result<(), SweepError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let banner = format!(
            "# Collected files outputs generated on {}\n",
            generated.format("%Y-%m-%d %H:%M:%S")
        );
        self.emit(banner.as_bytes())
    }

    /// Appends one text file: delimiter, path line, decoded content.
    ///
    /// Nothing is written if the file cannot be opened. A read or write
    /// failure after that leaves a truncated block in the output.
    pub fn append(
        &mut self,
        file: &DiscoveredFile,
        encoding: DetectedEncoding,
    ) -> Result<Decoded, SweepError> {
        let source = File::open(&file.path).map_err(|e| SweepError::io(&file.path, e))?;
        let header = format!("\n\n{}\n{}\n", DELIMITER, display_path(file, self.style));
        self.emit(header.as_bytes())?;
        decode::decode_stream(BufReader::new(source), &mut self.out, encoding)
            .map_err(|e| SweepError::io(&file.path, e))
    }

    pub fn flush(&mut self) -> Result<(), SweepError> {
        self.out.flush().map_err(SweepError::Write)
    }

    fn emit(&mut self, bytes: &[u8]) -> Result<(), SweepError> {
        self.out.write_all(bytes).map_err(SweepError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::detect_encoding;
    use crate::types::SeenKey;
    use std::path::PathBuf;

    /// Accepts `cap` bytes, then fails every write.
    struct CappedWriter {
        buf: Vec<u8>,
        cap: usize,
    }

    impl Write for CappedWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            let room = self.cap - self.buf.len();
            if room == 0 {
                return Err(io::Error::other("disk full"));
            }
            let n = room.min(data.len());
            self.buf.extend_from_slice(&data[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn discovered(path: PathBuf) -> DiscoveredFile {
        DiscoveredFile {
            relative: PathBuf::from("dir/a.txt"),
            key: SeenKey::Path(path.clone()),
            path,
        }
    }

    #[test]
    fn counts_every_written_byte() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "hello").unwrap();
        let mut aggregator = Aggregator::new(Vec::new(), PathStyle::Relative);
        aggregator.append(&discovered(path), detect_encoding(b"hello")).unwrap();
        assert_eq!(aggregator.bytes_written(), "\n\n----\ndir/a.txt\nhello".len() as u64);
    }

    #[test]
    fn partial_block_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "x".repeat(100)).unwrap();
        let sink = CappedWriter {
            buf: Vec::new(),
            cap: 20,
        };
        let mut aggregator = Aggregator::new(sink, PathStyle::Relative);
        let result = aggregator.append(&discovered(path), detect_encoding(b"x"));
        assert!(result.is_err());
        assert_eq!(aggregator.bytes_written(), 20);
        assert_eq!(aggregator.out.inner.buf.len(), 20);
    }
}
