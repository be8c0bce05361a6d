//! Format detection utilities.
//!
//! Input files are detected by magic bytes first, then by extension.
//! Output names are checked strictly against [`crate::VALID_EXTENSIONS`].

use crate::{IoError, IoResult, VALID_EXTENSIONS};
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from raw bytes, falling back to the path extension.
    pub fn detect<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Self {
        match Self::from_bytes(bytes) {
            Format::Unknown => Self::from_extension(path),
            format => format,
        }
    }

    /// Detects format from file extension only (case-insensitive).
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") => Format::Jpeg,
            _ => Format::Unknown,
        }
    }

    /// Detects format from raw bytes (magic number check).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        // PNG: 0x89 0x50 0x4E 0x47 0x0D 0x0A 0x1A 0x0A
        if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Format::Png;
        }

        // JPEG: 0xFF 0xD8 0xFF
        if bytes.len() >= 3 && bytes[0..3] == [0xFF, 0xD8, 0xFF] {
            return Format::Jpeg;
        }

        Format::Unknown
    }

    /// Resolves the output format from a user-supplied file name.
    ///
    /// The text after the last `.` must be exactly `jpg` or `png`. A name
    /// without a dot is checked as a whole.
    pub fn for_output(name: &str) -> IoResult<Self> {
        let ext = name.rsplit('.').next().unwrap_or(name);
        match ext {
            e if e == VALID_EXTENSIONS[0] => Ok(Format::Jpeg),
            e if e == VALID_EXTENSIONS[1] => Ok(Format::Png),
            _ => Err(IoError::InvalidOutputExtension(name.to_string())),
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Png => "image/png",
            Format::Jpeg => "image/jpeg",
            Format::Unknown => "application/octet-stream",
        }
    }
}
