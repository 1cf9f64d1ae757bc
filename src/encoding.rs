//! Encoding detection and line reading module
//!
//! Detects the encoding of the input file and yields its lines as UTF-8.

use crate::error::{Result, SubuniqError};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs::File;
use std::path::Path;

/// Size of the sample used for encoding detection
const SAMPLE_SIZE: usize = 64 * 1024;

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// Confidence level (0.0 - 1.0)
    pub confidence: f32,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            confidence: 1.0,
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Detect the encoding of a byte sample
pub fn detect_encoding(sample: &[u8]) -> EncodingInfo {
    if sample.is_empty() {
        return EncodingInfo::default();
    }

    // Check for BOM first
    if let Some((encoding, _)) = Encoding::for_bom(sample) {
        return EncodingInfo {
            name: encoding.name(),
            confidence: 1.0,
            encoding,
        };
    }

    // Valid UTF-8 needs no guessing. chardetng may report a legacy
    // encoding for pure ASCII samples, which decodes identically anyway.
    match std::str::from_utf8(sample) {
        Ok(_) => return EncodingInfo::default(),
        // Multi-byte sequence cut off by the end of the sample
        Err(e) if e.error_len().is_none() => return EncodingInfo::default(),
        Err(_) => {}
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    let encoding = detector.guess(None, true);

    let confidence = if encoding == encoding_rs::UTF_8 { 0.5 } else { 0.8 };

    EncodingInfo {
        name: encoding.name(),
        confidence,
        encoding,
    }
}

enum Backing {
    /// Zero-length file, nothing to map
    Empty,
    Mapped(memmap2::Mmap),
    /// Whole-file transcode for encodings where `\n` is not a single byte
    Decoded(String),
}

impl Backing {
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Mapped(mmap) => &mmap[..],
            Self::Decoded(text) => text.as_bytes(),
        }
    }
}

/// Memory-mapped line reader
///
/// Lines are split on `\n`, a trailing `\r` is stripped. Invalid byte
/// sequences are replaced rather than reported.
pub struct MmapLineIterator {
    backing: Backing,
    encoding: &'static Encoding,
    position: usize,
}

impl MmapLineIterator {
    /// Open a file, detecting its encoding
    pub fn new(path: &Path) -> Result<Self> {
        let source_err = |e| SubuniqError::SourceUnavailable {
            path: path.to_path_buf(),
            source: e,
        };

        let file = File::open(path).map_err(source_err)?;
        let len = file.metadata().map_err(source_err)?.len();

        if len == 0 {
            return Ok(Self {
                backing: Backing::Empty,
                encoding: encoding_rs::UTF_8,
                position: 0,
            });
        }

        // SAFETY: the map is read-only and dropped with the iterator; a
        // concurrent truncation of the input by another process is not
        // something this tool guards against.
        let mmap = unsafe { memmap2::Mmap::map(&file).map_err(source_err)? };

        let sample_end = mmap.len().min(SAMPLE_SIZE);
        let info = detect_encoding(&mmap[..sample_end]);
        log::debug!("Detected encoding {} ({:.1})", info.name, info.confidence);

        if info.encoding == encoding_rs::UTF_16LE || info.encoding == encoding_rs::UTF_16BE {
            // decode() strips the BOM itself
            let (text, _, _) = info.encoding.decode(&mmap);
            return Ok(Self {
                backing: Backing::Decoded(text.into_owned()),
                encoding: encoding_rs::UTF_8,
                position: 0,
            });
        }

        // Skip UTF-8 BOM if present
        let position = if mmap.starts_with(&[0xEF, 0xBB, 0xBF]) { 3 } else { 0 };

        Ok(Self {
            backing: Backing::Mapped(mmap),
            encoding: info.encoding,
            position,
        })
    }

    /// Get the total size of the underlying data
    pub fn size(&self) -> usize {
        self.backing.bytes().len()
    }
}

impl Iterator for MmapLineIterator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.backing.bytes();
        if self.position >= data.len() {
            return None;
        }

        // Find end of line
        let remaining = &data[self.position..];
        let line_end = memchr::memchr(b'\n', remaining)
            .map(|i| i + 1)
            .unwrap_or(remaining.len());

        let line_bytes = &remaining[..line_end];
        self.position += line_end;

        // Remove trailing newline/carriage return
        let line_bytes = line_bytes.strip_suffix(b"\n").unwrap_or(line_bytes);
        let line_bytes = line_bytes.strip_suffix(b"\r").unwrap_or(line_bytes);

        // Decode the line
        if self.encoding == encoding_rs::UTF_8 {
            Some(String::from_utf8_lossy(line_bytes).into_owned())
        } else {
            let (decoded, had_errors) = self.encoding.decode_without_bom_handling(line_bytes);
            if had_errors {
                log::warn!("Encoding errors in line, using lossy conversion");
            }
            Some(decoded.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn collect(bytes: &[u8]) -> Vec<String> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        MmapLineIterator::new(file.path()).unwrap().collect()
    }

    #[test]
    fn test_utf8_detection() {
        let info = detect_encoding("www.example.com\nпочта.рф\n".as_bytes());
        assert_eq!(info.name, "UTF-8");
    }

    #[test]
    fn test_bom_detection() {
        let info = detect_encoding(&[0xFF, 0xFE, b'a', 0]);
        assert_eq!(info.encoding, encoding_rs::UTF_16LE);
    }

    #[test]
    fn test_utf8_split_at_sample_boundary() {
        let mut bytes = "пример.рф\n".as_bytes().to_vec();
        bytes.resize(SAMPLE_SIZE - 2, b'a');
        bytes.push(b'\n');
        // "ж" is two bytes, the second one lands past the sample
        bytes.extend_from_slice("ж.com\n".as_bytes());
        assert!(std::str::from_utf8(&bytes).is_ok());
        assert!(std::str::from_utf8(&bytes[..SAMPLE_SIZE]).is_err());

        assert_eq!(detect_encoding(&bytes[..SAMPLE_SIZE]).encoding, encoding_rs::UTF_8);

        let lines = collect(&bytes);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "пример.рф");
        assert_eq!(lines[2], "ж.com");
    }

    #[test]
    fn test_invalid_utf8_still_detected() {
        // Latin-1 "é" followed by more text is not a truncated sequence
        let info = detect_encoding(b"caf\xE9.example.com\nr\xE9sum\xE9.example.com\n");
        assert_ne!(info.encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn test_line_iterator() {
        assert_eq!(collect(b"line1\nline2\nline3\n"), vec!["line1", "line2", "line3"]);
    }

    #[test]
    fn test_no_trailing_newline_and_blank_lines() {
        assert_eq!(collect(b"a.com\n\nb.com"), vec!["a.com", "", "b.com"]);
    }

    #[test]
    fn test_crlf_and_utf8_bom() {
        assert_eq!(collect(b"\xEF\xBB\xBFa.com\r\nb.com\r\n"), vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_utf16le() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "a.com\r\nb.com\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(collect(&bytes), vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_empty_file() {
        assert!(collect(b"").is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = MmapLineIterator::new(&dir.path().join("missing.txt")).err().unwrap();
        assert!(matches!(err, SubuniqError::SourceUnavailable { .. }));
    }
}
