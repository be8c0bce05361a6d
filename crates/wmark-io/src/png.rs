//! PNG format support.
//!
//! Decoding keeps the file's own layout (no palette expansion, no bit depth
//! stripping) so that the loader can apply the 3-component / 24-or-32-bit
//! rule to what is really stored. The one exception is an RGB file with a
//! `tRNS` color key, which decodes as RGBA with that color at alpha 0.
//! Encoding always writes 8-bit RGB.
//!
//! # Example
//!
//! ```rust,ignore
//! use wmark_io::png::PngCodec;
//! use wmark_io::{RasterDecoder, RasterEncoder};
//!
//! let bytes = PngCodec.encode(&grid)?;
//! let raw = PngCodec.decode(&bytes)?;
//! ```

use crate::{IoError, IoResult, PixelLayout, RasterDecoder, RasterEncoder, RawImage};
use png::Transformations;
use std::io::Cursor;
use tracing::trace;
use wmark_core::PixelGrid;

/// PNG reader and writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl RasterDecoder for PngCodec {
    fn format_name(&self) -> &'static str {
        "PNG"
    }

    fn decode(&self, data: &[u8]) -> IoResult<RawImage> {
        let reader = open(data, Transformations::IDENTITY)?;
        let keyed_rgb = {
            let info = reader.info();
            info.color_type == png::ColorType::Rgb && info.trns.is_some()
        };
        let mut reader = if keyed_rgb {
            open(data, Transformations::ALPHA)?
        } else {
            reader
        };

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
        buf.truncate(info.buffer_size());

        let layout = match info.color_type {
            png::ColorType::Grayscale => match info.bit_depth {
                png::BitDepth::Sixteen => PixelLayout::Gray16,
                depth => PixelLayout::Gray { bits: depth as u8 },
            },
            png::ColorType::GrayscaleAlpha => match info.bit_depth {
                png::BitDepth::Sixteen => PixelLayout::GrayAlpha16,
                _ => PixelLayout::GrayAlpha8,
            },
            png::ColorType::Indexed => PixelLayout::Indexed {
                bits: info.bit_depth as u8,
            },
            png::ColorType::Rgb => match info.bit_depth {
                png::BitDepth::Sixteen => PixelLayout::Rgb16,
                _ => PixelLayout::Rgb8,
            },
            png::ColorType::Rgba => match info.bit_depth {
                png::BitDepth::Sixteen => PixelLayout::Rgba16,
                _ => PixelLayout::Rgba8,
            },
        };
        trace!(width = info.width, height = info.height, ?layout, "png decoded");

        Ok(RawImage {
            width: info.width,
            height: info.height,
            layout,
            data: buf,
        })
    }
}

fn open(data: &[u8], transformations: Transformations) -> IoResult<png::Reader<Cursor<&[u8]>>> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(transformations);
    decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))
}

impl RasterEncoder for PngCodec {
    fn format_name(&self) -> &'static str {
        "PNG"
    }

    fn encode(&self, grid: &PixelGrid) -> IoResult<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, grid.width(), grid.height());
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(png::Compression::default());
            encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

            let mut writer = encoder
                .write_header()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            writer
                .write_image_data(&grid.to_rgb8())
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
        }
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wmark_core::Rgba8;

    /// Encodes raw samples with an arbitrary color type for decoder tests.
    fn encode_raw(w: u32, h: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, w, h);
            encoder.set_color(color);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    #[test]
    fn test_rgb_roundtrip() {
        let grid = PixelGrid::from_fn(8, 4, |x, y| Rgba8::rgb_opaque((x * 30) as u8, (y * 60) as u8, 128)).unwrap();
        let bytes = PngCodec.encode(&grid).unwrap();
        let raw = PngCodec.decode(&bytes).unwrap();
        assert_eq!(raw.layout, PixelLayout::Rgb8);
        assert_eq!(raw.into_grid().unwrap(), grid);
    }

    #[test]
    fn test_encode_drops_alpha() {
        let grid = PixelGrid::from_rgba8(1, 1, vec![10, 20, 30, 0]).unwrap();
        let raw = PngCodec.decode(&PngCodec.encode(&grid).unwrap()).unwrap();
        assert_eq!(raw.layout, PixelLayout::Rgb8);
        assert_eq!(raw.data, vec![10, 20, 30]);
    }

    #[test]
    fn test_decode_rgba() {
        let bytes = encode_raw(1, 1, png::ColorType::Rgba, png::BitDepth::Eight, &[1, 2, 3, 0]);
        let raw = PngCodec.decode(&bytes).unwrap();
        assert_eq!(raw.layout, PixelLayout::Rgba8);
        assert!(raw.layout.has_alpha());
    }

    #[test]
    fn test_decode_reports_gray_and_16_bit() {
        let gray = encode_raw(2, 1, png::ColorType::Grayscale, png::BitDepth::Eight, &[0, 255]);
        assert_eq!(PngCodec.decode(&gray).unwrap().layout, PixelLayout::Gray { bits: 8 });

        let deep = encode_raw(1, 1, png::ColorType::Rgb, png::BitDepth::Sixteen, &[0, 1, 0, 2, 0, 3]);
        assert_eq!(PngCodec.decode(&deep).unwrap().layout, PixelLayout::Rgb16);
    }

    #[test]
    fn test_rgb_color_key_becomes_alpha() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_trns(vec![0u8, 0, 0, 0, 0, 0]);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 0, 0, 9, 9, 9]).unwrap();
            writer.finish().unwrap();
        }
        let raw = PngCodec.decode(&bytes).unwrap();
        assert_eq!(raw.layout, PixelLayout::Rgba8);
        assert_eq!(raw.data, vec![0, 0, 0, 0, 9, 9, 9, 255]);
    }

    #[test]
    fn test_decode_palette_unexpanded() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(vec![255u8, 0, 0, 0, 0, 255]);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 1]).unwrap();
            writer.finish().unwrap();
        }
        let raw = PngCodec.decode(&bytes).unwrap();
        assert_eq!(raw.layout, PixelLayout::Indexed { bits: 8 });
        assert_eq!(raw.data, vec![0, 1]);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(PngCodec.decode(b"not a png"), Err(IoError::DecodeError(_))));
    }
}
