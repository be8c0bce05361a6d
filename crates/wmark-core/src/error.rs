//! Error types for wmark-core operations.
//!
//! Only grid construction can fail here. The compositing engine itself never
//! produces these; they surface when a loader hands over a malformed buffer.
//!
//! ```rust
//! use wmark_core::{Error, PixelGrid};
//!
//! let err = PixelGrid::from_rgb8(0, 4, Vec::new()).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a [`crate::PixelGrid`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Width or height is zero, or the pixel count overflows `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Raw buffer length does not match `width * height * channels`.
    #[error("buffer length mismatch: expected {expected} bytes, got {got}")]
    BufferLength {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
