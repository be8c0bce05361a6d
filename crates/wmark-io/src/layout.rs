//! Decoded pixel layouts.
//!
//! Codecs report what they actually decoded, without conversion, so the
//! loader can reject layouts the compositor does not accept. Only
//! [`PixelLayout::Rgb8`] and [`PixelLayout::Rgba8`] become grids.

use crate::IoResult;
use wmark_core::PixelGrid;

/// Sample layout of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Luma, 1 to 8 bits.
    Gray {
        /// Bits per sample
        bits: u8,
    },
    /// 16-bit luma.
    Gray16,
    /// 8-bit luma with alpha.
    GrayAlpha8,
    /// 16-bit luma with alpha.
    GrayAlpha16,
    /// Palette indices.
    Indexed {
        /// Bits per index
        bits: u8,
    },
    /// 8-bit RGB.
    Rgb8,
    /// 8-bit RGB with alpha.
    Rgba8,
    /// 16-bit RGB.
    Rgb16,
    /// 16-bit RGB with alpha.
    Rgba16,
    /// 8-bit CMYK.
    Cmyk8,
}

impl PixelLayout {
    /// Number of color components, alpha excluded.
    ///
    /// Palette images count as 3: their entries are RGB.
    pub fn color_components(self) -> u8 {
        match self {
            Self::Gray { .. } | Self::Gray16 | Self::GrayAlpha8 | Self::GrayAlpha16 => 1,
            Self::Indexed { .. } | Self::Rgb8 | Self::Rgba8 | Self::Rgb16 | Self::Rgba16 => 3,
            Self::Cmyk8 => 4,
        }
    }

    /// Bits stored per pixel, alpha included.
    pub fn bits_per_pixel(self) -> u16 {
        match self {
            Self::Gray { bits } | Self::Indexed { bits } => bits as u16,
            Self::Gray16 => 16,
            Self::GrayAlpha8 => 16,
            Self::GrayAlpha16 => 32,
            Self::Rgb8 => 24,
            Self::Rgba8 | Self::Cmyk8 => 32,
            Self::Rgb16 => 48,
            Self::Rgba16 => 64,
        }
    }

    /// Whether the layout carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::GrayAlpha8 | Self::GrayAlpha16 | Self::Rgba8 | Self::Rgba16)
    }
}

/// Image as decoded, before validation.
#[derive(Debug, Clone)]
pub struct RawImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Sample layout of `data`.
    pub layout: PixelLayout,
    /// Interleaved samples.
    pub data: Vec<u8>,
}

impl RawImage {
    /// Converts an 8-bit RGB(A) image into a grid.
    ///
    /// Callers validate the layout first; other layouts are reported as
    /// unsupported.
    pub fn into_grid(self) -> IoResult<PixelGrid> {
        match self.layout {
            PixelLayout::Rgb8 => Ok(PixelGrid::from_rgb8(self.width, self.height, self.data)?),
            PixelLayout::Rgba8 => Ok(PixelGrid::from_rgba8(self.width, self.height, self.data)?),
            other => Err(crate::IoError::UnsupportedFormat(format!("{:?}", other))),
        }
    }
}
