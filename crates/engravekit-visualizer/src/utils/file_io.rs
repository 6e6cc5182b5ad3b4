//! Program file reading
//!
//! Loads engraving programs from disk or any reader, checking size and
//! encoding before handing the text to the parser. A UTF-8 byte order mark
//! is stripped.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use engravekit_core::ProgramError;
use serde::{Deserialize, Serialize};

/// Programs larger than this are refused (64 MB)
pub const DEFAULT_MAX_PROGRAM_BYTES: u64 = 64 * 1024 * 1024;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Supported file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileEncoding {
    /// UTF-8 encoding
    Utf8,
    /// UTF-8 with a leading byte order mark
    Utf8Bom,
    /// ASCII encoding (7-bit)
    Ascii,
}

impl FileEncoding {
    /// Detect encoding from file bytes. `None` if the bytes are not UTF-8.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(&UTF8_BOM) {
            return std::str::from_utf8(&data[UTF8_BOM.len()..])
                .ok()
                .map(|_| FileEncoding::Utf8Bom);
        }
        if data.is_ascii() {
            return Some(FileEncoding::Ascii);
        }
        std::str::from_utf8(data).ok().map(|_| FileEncoding::Utf8)
    }
}

/// File read statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReadStats {
    /// Total bytes read
    pub bytes_read: u64,
    /// Total lines read
    pub lines_read: u64,
    /// Detected encoding
    pub encoding: FileEncoding,
    /// Time taken to read (milliseconds)
    pub read_time_ms: u64,
}

/// Engraving program file reader
#[derive(Debug, Clone)]
pub struct ProgramFileReader {
    path: PathBuf,
    file_size: u64,
    max_size: u64,
}

impl ProgramFileReader {
    /// Create a reader for `path`
    ///
    /// # Errors
    /// Returns error if the path does not exist or is not a regular file
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(ProgramError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        if !path.is_file() {
            return Err(ProgramError::NotAFile {
                path: path.display().to_string(),
            }
            .into());
        }

        let file_size = fs::metadata(&path)
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();

        Ok(Self {
            path,
            file_size,
            max_size: DEFAULT_MAX_PROGRAM_BYTES,
        })
    }

    /// Override the size limit
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole program
    ///
    /// # Errors
    /// Returns error if the file is too large, unreadable or not UTF-8
    pub fn read(&self) -> Result<(String, FileReadStats)> {
        if self.file_size > self.max_size {
            return Err(ProgramError::TooLarge {
                size: self.file_size,
                limit: self.max_size,
            }
            .into());
        }

        let file = fs::File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        read_program_from(file, self.max_size)
            .with_context(|| format!("Failed to read program {}", self.path.display()))
    }
}

/// Read a program from any source, such as stdin
///
/// # Errors
/// Returns error if reading fails, more than `max_size` bytes arrive, or the
/// bytes are not UTF-8
pub fn read_program_from(reader: impl Read, max_size: u64) -> Result<(String, FileReadStats)> {
    let start = Instant::now();
    let mut bytes = Vec::new();
    reader
        .take(max_size.saturating_add(1))
        .read_to_end(&mut bytes)
        .context("Failed to read program bytes")?;

    let bytes_read = bytes.len() as u64;
    if bytes_read > max_size {
        return Err(ProgramError::TooLarge {
            size: bytes_read,
            limit: max_size,
        }
        .into());
    }

    let (text, encoding) = decode(bytes)?;
    let stats = FileReadStats {
        bytes_read,
        lines_read: text.lines().count() as u64,
        encoding,
        read_time_ms: start.elapsed().as_millis() as u64,
    };

    tracing::debug!(
        "Read program: {} bytes, {} lines, {:?}",
        stats.bytes_read,
        stats.lines_read,
        stats.encoding
    );
    Ok((text, stats))
}

fn decode(mut bytes: Vec<u8>) -> std::result::Result<(String, FileEncoding), ProgramError> {
    let encoding = FileEncoding::detect(&bytes);
    if encoding == Some(FileEncoding::Utf8Bom) {
        bytes.drain(..UTF8_BOM.len());
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok((text, encoding.unwrap_or(FileEncoding::Utf8))),
        Err(e) => Err(ProgramError::InvalidEncoding {
            offset: e.utf8_error().valid_up_to(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_encoding_detection() {
        assert_eq!(FileEncoding::detect(b"G1 X1 Y1"), Some(FileEncoding::Ascii));
        assert_eq!(
            FileEncoding::detect("; capa 1 – grabado".as_bytes()),
            Some(FileEncoding::Utf8)
        );
        assert_eq!(
            FileEncoding::detect(&[0xEF, 0xBB, 0xBF, b'M', b'5']),
            Some(FileEncoding::Utf8Bom)
        );
        assert_eq!(FileEncoding::detect(&[0xFF, 0xFE, 0x00]), None);
    }

    #[test]
    fn test_reader_not_found() {
        let err = ProgramFileReader::new("/nonexistent/program.gcode").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProgramError>(),
            Some(ProgramError::NotFound { .. })
        ));
    }

    #[test]
    fn test_reader_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProgramFileReader::new(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProgramError>(),
            Some(ProgramError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_read_strips_bom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        file.write_all(b"M3 S10\nG1 X1 Y1\nM5\n").unwrap();

        let reader = ProgramFileReader::new(file.path()).unwrap();
        assert_eq!(reader.file_size(), 22);
        let (text, stats) = reader.read().unwrap();
        assert!(text.starts_with("M3 S10"));
        assert_eq!(stats.lines_read, 3);
        assert_eq!(stats.encoding, FileEncoding::Utf8Bom);
        assert_eq!(stats.bytes_read, 22);
    }

    #[test]
    fn test_read_too_large() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"G1 X1 Y1\n").unwrap();

        let reader = ProgramFileReader::new(file.path()).unwrap().with_max_size(4);
        let err = reader.read().unwrap_err();
        assert_eq!(
            err.downcast_ref::<ProgramError>(),
            Some(&ProgramError::TooLarge { size: 9, limit: 4 })
        );
    }

    #[test]
    fn test_read_from_reader_invalid_utf8() {
        let bytes: &[u8] = &[b'G', b'1', 0xC3, 0x28];
        let err = read_program_from(bytes, 1024).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ProgramError>(),
            Some(&ProgramError::InvalidEncoding { offset: 2 })
        );
    }

    #[test]
    fn test_read_from_reader_limit() {
        let bytes: &[u8] = b"0123456789";
        let err = read_program_from(bytes, 5).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ProgramError>(),
            Some(&ProgramError::TooLarge { size: 6, limit: 5 })
        );
    }
}
