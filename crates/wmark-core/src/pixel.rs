//! 8-bit RGBA pixel type.
//!
//! Every raster handled by wmark is stored as [`Rgba8`], whether the source
//! file carried an alpha channel or not. Sources without alpha are expanded
//! with `a = 255`.
//!
//! # Memory Layout
//!
//! `Rgba8` is `#[repr(C)]` with channels in R, G, B, A order, matching the
//! interleaved byte order used by the PNG and JPEG codecs.

/// An 8-bit per channel RGBA pixel.
///
/// # Example
///
/// ```
/// use wmark_core::Rgba8;
///
/// let px = Rgba8::new(10, 20, 30, 0);
/// assert_eq!(px.rgb(), [10, 20, 30]);
/// assert_eq!(px.opaque().a, 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba8 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (0 = fully transparent)
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Creates a pixel from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque pixel from RGB.
    #[inline]
    pub const fn rgb_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Returns the color channels as `[r, g, b]`.
    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns the same color with alpha forced to 255.
    #[inline]
    pub const fn opaque(self) -> Self {
        Self::new(self.r, self.g, self.b, 255)
    }

    /// Returns `true` if the color channels equal `rgb`, ignoring alpha.
    #[inline]
    pub const fn same_rgb(self, rgb: [u8; 3]) -> bool {
        self.r == rgb[0] && self.g == rgb[1] && self.b == rgb[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_keeps_color() {
        assert_eq!(Rgba8::new(1, 2, 3, 0).opaque(), Rgba8::rgb_opaque(1, 2, 3));
    }

    #[test]
    fn test_same_rgb_ignores_alpha() {
        let px = Rgba8::new(7, 8, 9, 0);
        assert!(px.same_rgb([7, 8, 9]));
        assert!(!px.same_rgb([7, 8, 10]));
    }
}
