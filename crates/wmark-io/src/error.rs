//! Error types for I/O operations.
//!
//! User-facing variants render the exact sentence shown to the person
//! running the tool; the front end prints them as-is.

use crate::ImageRole;
use std::fmt;
use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input file does not exist.
    #[error("The file {0} doesn't exist.")]
    MissingFile(String),

    /// Decoded image has the wrong channel count or pixel size.
    #[error("{0}")]
    InvalidImageFormat(FormatViolation),

    /// Watermark is wider or taller than the base.
    #[error("The watermark's dimensions are larger.")]
    SizeMismatch {
        /// Base `(width, height)`
        base: (u32, u32),
        /// Watermark `(width, height)`
        watermark: (u32, u32),
    },

    /// Output name does not end in an accepted extension.
    #[error("The output file extension isn't \"jpg\" or \"png\".")]
    InvalidOutputExtension(String),

    /// Unsupported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Decoded buffer could not be turned into a grid.
    #[error("invalid pixel buffer: {0}")]
    Grid(#[from] wmark_core::Error),
}

/// What is wrong with a decoded image's pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Not exactly 3 color components.
    ColorComponents,
    /// Pixel size is not 24 or 32 bits.
    PixelSize,
}

/// A pixel layout check that failed for one named image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatViolation {
    /// Which input failed
    pub role: ImageRole,
    /// Which check failed
    pub kind: ViolationKind,
}

impl fmt::Display for FormatViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::ColorComponents => {
                write!(f, "The number of {} color components isn't 3.", self.role)
            }
            ViolationKind::PixelSize => write!(f, "The {} isn't 24 or 32-bit.", self.role),
        }
    }
}

impl IoError {
    /// Returns `true` for errors caused by the user's input rather than the
    /// environment or a codec.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFile(_)
                | Self::InvalidImageFormat(_)
                | Self::SizeMismatch { .. }
                | Self::InvalidOutputExtension(_)
        )
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            IoError::MissingFile("a.png".into()).to_string(),
            "The file a.png doesn't exist."
        );
        let v = FormatViolation {
            role: ImageRole::Watermark,
            kind: ViolationKind::ColorComponents,
        };
        assert_eq!(
            IoError::InvalidImageFormat(v).to_string(),
            "The number of watermark color components isn't 3."
        );
        let v = FormatViolation {
            role: ImageRole::Image,
            kind: ViolationKind::PixelSize,
        };
        assert_eq!(v.to_string(), "The image isn't 24 or 32-bit.");
        assert_eq!(
            IoError::InvalidOutputExtension("x.gif".into()).to_string(),
            "The output file extension isn't \"jpg\" or \"png\"."
        );
    }

    #[test]
    fn test_user_error_classification() {
        assert!(IoError::SizeMismatch { base: (1, 1), watermark: (2, 2) }.is_user_error());
        assert!(!IoError::DecodeError("bad".into()).is_user_error());
    }
}
