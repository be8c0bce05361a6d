//! Owned row-major pixel grid.
//!
//! [`PixelGrid`] is the only raster type the compositing engine sees. It is
//! always stored as [`Rgba8`]; `has_alpha` records whether the source had a
//! genuine alpha channel, which decides whether alpha-gated transparency is
//! available for it. Only [`PixelGrid::from_rgba8`] and
//! [`PixelGrid::from_pixels`] can set it; the pixel values never do.
//!
//! # Invariants
//!
//! - `width > 0` and `height > 0`
//! - `pixels.len() == width * height`
//! - pixel `(x, y)` lives at index `y * width + x`

use crate::{Error, Rect, Result, Rgba8};

/// Row-major raster of [`Rgba8`] pixels.
///
/// # Example
///
/// ```
/// use wmark_core::{PixelGrid, Rgba8};
///
/// let grid = PixelGrid::from_fn(3, 2, |x, y| Rgba8::rgb_opaque(x as u8, y as u8, 0)).unwrap();
/// assert_eq!(grid.get(2, 1), Rgba8::rgb_opaque(2, 1, 0));
/// assert_eq!(grid.to_rgb8().len(), 3 * 2 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
    has_alpha: bool,
}

/// Checks dimensions and returns the pixel count.
fn pixel_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))
}

impl PixelGrid {
    /// Creates a grid filled with a single pixel value.
    ///
    /// The grid has no alpha channel, whatever `fill.a` is.
    pub fn filled(width: u32, height: u32, fill: Rgba8) -> Result<Self> {
        let count = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![fill; count],
            has_alpha: false,
        })
    }

    /// Creates a grid from already expanded pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>, has_alpha: bool) -> Result<Self> {
        let count = pixel_count(width, height)?;
        if pixels.len() != count {
            return Err(Error::BufferLength {
                expected: count * 4,
                got: pixels.len() * 4,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            has_alpha,
        })
    }

    /// Creates a grid by evaluating `f` at every coordinate in row-major order.
    ///
    /// Like [`Self::filled`], the grid has no alpha channel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgba8,
    {
        let count = pixel_count(width, height)?;
        let mut pixels = Vec::with_capacity(count);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
            has_alpha: false,
        })
    }

    /// Creates an opaque grid from interleaved RGB bytes.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let count = pixel_count(width, height)?;
        if data.len() != count * 3 {
            return Err(Error::BufferLength {
                expected: count * 3,
                got: data.len(),
            });
        }
        let pixels = data
            .chunks_exact(3)
            .map(|c| Rgba8::rgb_opaque(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
            has_alpha: false,
        })
    }

    /// Creates a grid with a genuine alpha channel from interleaved RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let count = pixel_count(width, height)?;
        if data.len() != count * 4 {
            return Err(Error::BufferLength {
                expected: count * 4,
                got: data.len(),
            });
        }
        let pixels = data
            .chunks_exact(4)
            .map(|c| Rgba8::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
            has_alpha: true,
        })
    }

    /// Allocates an opaque grid with the same dimensions as `other`.
    ///
    /// Infallible because `other` already satisfies the dimension invariants.
    pub fn blank_like(other: &PixelGrid) -> Self {
        Self {
            width: other.width,
            height: other.height,
            pixels: vec![Rgba8::BLACK; other.pixels.len()],
            has_alpha: false,
        }
    }

    /// Grid width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the source carried a real alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Full-grid rectangle at the origin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Mutable access to all pixels in row-major order.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// One row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgba8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba8 {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Interleaved RGB bytes, alpha dropped.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.rgb()).collect()
    }
}
