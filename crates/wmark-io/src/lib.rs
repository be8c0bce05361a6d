//! # wmark-io
//!
//! Image loading, validation and writing for wmark.
//!
//! - **PNG** - read RGB/RGBA 8-bit (other layouts reported and rejected), write RGB
//! - **JPEG** - read RGB (grayscale/CMYK reported and rejected), write RGB
//!
//! # Loader contract
//!
//! [`load`] hands the compositor a grid only if the file exists, decodes,
//! has exactly 3 color components and 24 or 32 bits per pixel. [`check_sizes`]
//! enforces that the watermark is not larger than the base.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use wmark_io::{load, check_sizes, write, ImageRole, WriteOptions};
//!
//! let base = load("photo.png", ImageRole::Image)?;
//! let mark = load("logo.png", ImageRole::Watermark)?;
//! check_sizes(&base, &mark)?;
//! // ... composite ...
//! write("out.jpg", &out, &WriteOptions::default())?;
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
mod layout;
mod traits;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{FormatViolation, IoError, IoResult, ViolationKind};
pub use layout::{PixelLayout, RawImage};
pub use traits::{RasterDecoder, RasterEncoder};

use std::fmt;
use std::path::Path;
use tracing::{debug, info};
use wmark_core::PixelGrid;

/// Output extensions accepted by [`Format::for_output`], in `[jpg, png]` order.
pub const VALID_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// Accepted bits per pixel for input images.
pub const VALID_PIXEL_SIZES: [u16; 2] = [24, 32];

/// Required number of color components for input images.
pub const REQUIRED_COLOR_COMPONENTS: u8 = 3;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Which input an image plays; used in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageRole {
    /// The picture being watermarked.
    Image,
    /// The picture stamped on top.
    Watermark,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Watermark => write!(f, "watermark"),
        }
    }
}

/// Summary of a decoded file, used by inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Detected container format.
    pub format: Format,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Decoded sample layout.
    pub layout: PixelLayout,
}

impl ImageInfo {
    /// Color components, alpha excluded.
    pub fn color_components(&self) -> u8 {
        self.layout.color_components()
    }

    /// Bits per pixel, alpha included.
    pub fn bits_per_pixel(&self) -> u16 {
        self.layout.bits_per_pixel()
    }

    /// Whether the file has an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.layout.has_alpha()
    }

    /// Runs the loader's layout checks for the given role.
    pub fn validate(&self, role: ImageRole) -> IoResult<()> {
        validate_layout(self.layout, role)
    }
}

/// Applies the 3-component and 24/32-bit rules, in that order.
pub fn validate_layout(layout: PixelLayout, role: ImageRole) -> IoResult<()> {
    if layout.color_components() != REQUIRED_COLOR_COMPONENTS {
        return Err(IoError::InvalidImageFormat(FormatViolation {
            role,
            kind: ViolationKind::ColorComponents,
        }));
    }
    if !VALID_PIXEL_SIZES.contains(&layout.bits_per_pixel()) {
        return Err(IoError::InvalidImageFormat(FormatViolation {
            role,
            kind: ViolationKind::PixelSize,
        }));
    }
    Ok(())
}

/// Returns the decoder for a format.
fn decoder_for(format: Format) -> IoResult<Box<dyn RasterDecoder>> {
    match format {
        #[cfg(feature = "png")]
        Format::Png => Ok(Box::new(png::PngCodec)),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => Ok(Box::new(jpeg::JpegCodec::default())),

        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!("{:?}", other))),
    }
}

/// Decodes in-memory file bytes without validating the layout.
fn decode_bytes(name: &Path, data: &[u8]) -> IoResult<(Format, RawImage)> {
    let format = Format::detect(name, data);
    let decoder = decoder_for(format)?;
    let raw = decoder.decode(data)?;
    debug!(
        format = decoder.format_name(),
        width = raw.width,
        height = raw.height,
        layout = ?raw.layout,
        "Decoded image"
    );
    Ok((format, raw))
}

/// Reads and decodes a file without validating the layout.
///
/// # Errors
///
/// [`IoError::MissingFile`] if nothing exists at `path`.
pub fn read_raw<P: AsRef<Path>>(path: P) -> IoResult<(Format, RawImage)> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::MissingFile(path.display().to_string()));
    }
    let data = std::fs::read(path)?;
    decode_bytes(path, &data)
}

/// Reads a file's format, size and layout.
pub fn inspect<P: AsRef<Path>>(path: P) -> IoResult<ImageInfo> {
    let (format, raw) = read_raw(path)?;
    Ok(ImageInfo {
        format,
        width: raw.width,
        height: raw.height,
        layout: raw.layout,
    })
}

/// Loads and validates one input image.
///
/// # Errors
///
/// - [`IoError::MissingFile`] if the file does not exist
/// - [`IoError::InvalidImageFormat`] if the layout is not 3-component 24/32-bit
/// - decode errors for unreadable files
pub fn load<P: AsRef<Path>>(path: P, role: ImageRole) -> IoResult<PixelGrid> {
    let path = path.as_ref();
    let (_, raw) = read_raw(path)?;
    validate_layout(raw.layout, role)?;
    let grid = raw.into_grid()?;
    info!(
        %role,
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        has_alpha = grid.has_alpha(),
        "Loaded"
    );
    Ok(grid)
}

/// Fails if the watermark is wider or taller than the base.
pub fn check_sizes(base: &PixelGrid, watermark: &PixelGrid) -> IoResult<()> {
    if base.width() < watermark.width() || base.height() < watermark.height() {
        return Err(IoError::SizeMismatch {
            base: base.dimensions(),
            watermark: watermark.dimensions(),
        });
    }
    Ok(())
}

/// Options for [`write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// JPEG quality, 1-100. Ignored for PNG.
    pub jpeg_quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Encodes a grid in the given format.
#[cfg_attr(not(feature = "jpeg"), allow(unused_variables))]
pub fn encode(format: Format, grid: &PixelGrid, options: &WriteOptions) -> IoResult<Vec<u8>> {
    let encoder: Box<dyn RasterEncoder> = match format {
        #[cfg(feature = "png")]
        Format::Png => Box::new(png::PngCodec),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => Box::new(jpeg::JpegCodec::with_quality(options.jpeg_quality)),

        #[allow(unreachable_patterns)]
        other => return Err(IoError::UnsupportedFormat(format!("{:?}", other))),
    };
    encoder.encode(grid)
}

/// Writes a grid to `name`, choosing the format from its extension.
///
/// # Errors
///
/// [`IoError::InvalidOutputExtension`] unless the name ends in `.jpg` or `.png`.
pub fn write(name: &str, grid: &PixelGrid, options: &WriteOptions) -> IoResult<Format> {
    let format = Format::for_output(name)?;
    let bytes = encode(format, grid, options)?;
    std::fs::write(name, bytes)?;
    info!(path = name, ?format, "Wrote output");
    Ok(format)
}
