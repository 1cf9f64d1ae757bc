//! Output management module
//!
//! Serializes the sorted unique lines as plain text, JSON or CSV and writes
//! them to the output file with buffering.

use crate::error::{Result, SubuniqError};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default buffer size for file writing (8MB)
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Output serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per entry
    #[default]
    Plain,
    /// A single JSON array of strings
    Json,
    /// One single-field record per entry
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SubuniqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(SubuniqError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize `lines` in `format` into any writer
pub fn serialize<W: Write>(lines: &[String], format: OutputFormat, mut writer: W) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            for line in lines {
                writeln!(writer, "{}", line)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut writer, lines)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut csv = csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(&mut writer);
            for line in lines {
                csv.write_record([line])?;
            }
            csv.flush()?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Counts bytes passing through to the inner writer
struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Output file writer with buffering
pub struct OutputWriter {
    writer: CountingWriter<BufWriter<File>>,
    path: PathBuf,
    lines_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) the output file
    pub fn new(path: PathBuf, buffer_size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| SubuniqError::SinkUnavailable {
                path: path.clone(),
                source: e,
            })?;

        let writer = BufWriter::with_capacity(buffer_size, file);

        Ok(Self {
            writer: CountingWriter { inner: writer, bytes: 0 },
            path,
            lines_written: 0,
        })
    }

    /// Write the whole sorted sequence in the given format
    pub fn write_all(&mut self, lines: &[String], format: OutputFormat) -> Result<()> {
        serialize(lines, format, &mut self.writer)?;
        self.lines_written += lines.len() as u64;
        Ok(())
    }

    /// Get the output path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get number of entries written
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Get bytes written
    pub fn bytes_written(&self) -> u64 {
        self.writer.bytes
    }
}
