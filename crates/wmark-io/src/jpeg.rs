//! JPEG format support.
//!
//! JPEG has no alpha channel, so decoded JPEG grids never qualify for
//! alpha-gated transparency. Grayscale and CMYK files are reported with
//! their real layout and rejected by the loader.

use crate::{DEFAULT_JPEG_QUALITY, IoError, IoResult, PixelLayout, RasterDecoder, RasterEncoder, RawImage};
use std::io::Cursor;
use tracing::trace;
use wmark_core::PixelGrid;

/// JPEG reader and writer.
#[derive(Debug, Clone, Copy)]
pub struct JpegCodec {
    /// Encoder quality, 1-100.
    pub quality: u8,
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl JpegCodec {
    /// Creates a codec with the given encoder quality (clamped to 1-100).
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl RasterDecoder for JpegCodec {
    fn format_name(&self) -> &'static str {
        "JPEG"
    }

    fn decode(&self, data: &[u8]) -> IoResult<RawImage> {
        let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let layout = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => PixelLayout::Rgb8,
            jpeg_decoder::PixelFormat::L8 => PixelLayout::Gray { bits: 8 },
            jpeg_decoder::PixelFormat::L16 => PixelLayout::Gray16,
            jpeg_decoder::PixelFormat::CMYK32 => PixelLayout::Cmyk8,
        };
        trace!(width = info.width, height = info.height, ?layout, "jpeg decoded");

        Ok(RawImage {
            width: info.width as u32,
            height: info.height as u32,
            layout,
            data: pixels,
        })
    }
}

impl RasterEncoder for JpegCodec {
    fn format_name(&self) -> &'static str {
        "JPEG"
    }

    fn encode(&self, grid: &PixelGrid) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType, Encoder};

        let (width, height) = grid.dimensions();
        let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(IoError::EncodeError(format!(
                    "{}x{} exceeds the JPEG size limit of 65535",
                    width, height
                )));
            }
        };

        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, self.quality);
        encoder
            .encode(&grid.to_rgb8(), w, h, ColorType::Rgb)
            .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wmark_core::Rgba8;

    #[test]
    fn test_roundtrip_dimensions() {
        let grid = PixelGrid::from_fn(32, 16, |x, y| Rgba8::rgb_opaque((x * 8) as u8, (y * 16) as u8, 128)).unwrap();
        let bytes = JpegCodec::default().encode(&grid).unwrap();
        assert_eq!(crate::Format::from_bytes(&bytes), crate::Format::Jpeg);

        let raw = JpegCodec::default().decode(&bytes).unwrap();
        assert_eq!((raw.width, raw.height), (32, 16));
        assert_eq!(raw.layout, PixelLayout::Rgb8);
        assert_eq!(raw.data.len(), 32 * 16 * 3);
    }

    #[test]
    fn test_quality_affects_size() {
        let grid = PixelGrid::from_fn(64, 64, |x, y| Rgba8::rgb_opaque((x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8)).unwrap();
        let low = JpegCodec::with_quality(10).encode(&grid).unwrap();
        let high = JpegCodec::with_quality(100).encode(&grid).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_quality_clamped() {
        assert_eq!(JpegCodec::with_quality(0).quality, 1);
        assert_eq!(JpegCodec::with_quality(200).quality, 100);
    }

    #[test]
    fn test_decode_grayscale_layout() {
        let mut buffer = Vec::new();
        jpeg_encoder::Encoder::new(&mut buffer, 90)
            .encode(&[128u8; 8 * 8], 8, 8, jpeg_encoder::ColorType::Luma)
            .unwrap();
        let raw = JpegCodec::default().decode(&buffer).unwrap();
        assert_eq!(raw.layout, PixelLayout::Gray { bits: 8 });
        assert_eq!(raw.layout.color_components(), 1);
    }
}
