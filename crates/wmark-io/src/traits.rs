//! Codec traits.
//!
//! Each supported format implements [`RasterDecoder`] and [`RasterEncoder`];
//! [`crate::read_raw`] and [`crate::write`] dispatch on [`crate::Format`].

use crate::{IoResult, RawImage};
use wmark_core::PixelGrid;

/// Decodes a file's bytes without converting the pixel layout.
pub trait RasterDecoder {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// Decodes an in-memory file.
    fn decode(&self, data: &[u8]) -> IoResult<RawImage>;
}

/// Encodes an opaque grid as RGB.
pub trait RasterEncoder {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// Encodes `grid` into file bytes. Alpha is dropped.
    fn encode(&self, grid: &PixelGrid) -> IoResult<Vec<u8>>;
}
