//! Watermark compositing.
//!
//! Every output pixel is produced by three steps:
//!
//! 1. **Coverage** - [`PlacementMode`] decides whether the base pixel is
//!    under the watermark and which watermark pixel it samples.
//! 2. **Gate** - [`TransparencyPolicy`] decides whether the sampled
//!    watermark pixel counts as transparent.
//! 3. **Blend** - covered, non-transparent pixels are mixed per channel with
//!    [`blend_channel`]. Everything else is a copy of the base pixel.
//!
//! # Placement
//!
//! - [`PlacementMode::Single`] - one watermark anchored at its top-left
//!   corner. Pixels outside the anchored rectangle are copied untouched.
//! - [`PlacementMode::Grid`] - the watermark tiles the whole base starting
//!   at `(0, 0)`, sampled at `(x mod w, y mod h)`. The last partial tile is
//!   truncated by the wrap.
//!
//! # Blend
//!
//! `out = (weight * wm + (100 - weight) * base) / 100`, integer division,
//! applied to R, G and B. This is a linear mix, not alpha compositing: the
//! watermark alpha only ever acts as a binary gate. The output is always
//! opaque.
//!
//! # Example
//!
//! ```rust
//! use wmark_core::{PixelGrid, Rgba8};
//! use wmark_ops::composite::{composite, BlendWeight, PlacementMode, TransparencyPolicy};
//!
//! let base = PixelGrid::filled(4, 4, Rgba8::WHITE).unwrap();
//! let tile = PixelGrid::filled(2, 2, Rgba8::rgb_opaque(10, 20, 30)).unwrap();
//!
//! let out = composite(&base, &tile, BlendWeight::FULL, PlacementMode::Grid, TransparencyPolicy::None);
//! assert!(out.pixels().iter().all(|&p| p == Rgba8::rgb_opaque(10, 20, 30)));
//! ```

use crate::{OpsError, OpsResult};
use std::fmt;
use tracing::{debug, trace};
use wmark_core::{PixelGrid, Rect, Rgba8};

/// Watermark contribution in percent, `0..=100`.
///
/// The base contributes the remaining `100 - weight` percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlendWeight(u8);

impl BlendWeight {
    /// Largest accepted percentage.
    pub const MAX_PERCENT: u8 = 100;
    /// Base only, watermark has no effect.
    pub const ZERO: Self = Self(0);
    /// Watermark replaces the base wherever it is blended.
    pub const FULL: Self = Self(100);

    /// Creates a weight, rejecting values above 100.
    pub fn new(percent: u8) -> OpsResult<Self> {
        if percent > Self::MAX_PERCENT {
            return Err(OpsError::InvalidParameter(format!(
                "blend weight {} is outside 0-{}",
                percent,
                Self::MAX_PERCENT
            )));
        }
        Ok(Self(percent))
    }

    /// The watermark share in percent.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The base share in percent.
    #[inline]
    pub const fn base_share(self) -> u8 {
        Self::MAX_PERCENT - self.0
    }
}

impl fmt::Display for BlendWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Where the watermark lands on the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementMode {
    /// One watermark with its top-left corner at `(x, y)`.
    Single {
        /// Anchor column
        x: u32,
        /// Anchor row
        y: u32,
    },
    /// Watermark tiled over the whole base, no offset, no gap.
    Grid,
}

impl PlacementMode {
    /// Maps base pixel `(x, y)` to the watermark pixel it samples.
    ///
    /// Returns `None` when the pixel is not covered. `wm_width` and
    /// `wm_height` must be non-zero.
    ///
    /// ```rust
    /// use wmark_ops::PlacementMode;
    ///
    /// assert_eq!(PlacementMode::Grid.sample_coord(5, 2, 2, 3), Some((1, 2)));
    /// let single = PlacementMode::Single { x: 1, y: 1 };
    /// assert_eq!(single.sample_coord(2, 1, 2, 2), Some((1, 0)));
    /// assert_eq!(single.sample_coord(3, 1, 2, 2), None);
    /// ```
    #[inline]
    pub fn sample_coord(self, x: u32, y: u32, wm_width: u32, wm_height: u32) -> Option<(u32, u32)> {
        match self {
            Self::Grid => Some((x % wm_width, y % wm_height)),
            Self::Single { x: ax, y: ay } => Rect::new(ax, ay, wm_width, wm_height).to_local(x, y),
        }
    }

    /// Region of the base that may be blended.
    pub fn footprint(self, base: &PixelGrid, watermark: &PixelGrid) -> Rect {
        match self {
            Self::Grid => base.bounds(),
            Self::Single { x, y } => Rect::new(x, y, watermark.width(), watermark.height()),
        }
    }
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single { x, y } => write!(f, "single at ({}, {})", x, y),
            Self::Grid => write!(f, "grid"),
        }
    }
}

/// How transparent watermark pixels are recognised.
///
/// Exactly one policy applies to a whole composite call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransparencyPolicy {
    /// Every covered pixel is blended.
    #[default]
    None,
    /// Pixels with alpha exactly 0 are skipped. Requires a watermark with a
    /// real alpha channel.
    UseWatermarkAlpha,
    /// Pixels whose RGB equals the key are skipped.
    ColorKey {
        /// Key red
        r: u8,
        /// Key green
        g: u8,
        /// Key blue
        b: u8,
    },
}

impl TransparencyPolicy {
    /// Color key from an `[r, g, b]` triplet.
    #[inline]
    pub const fn color_key(rgb: [u8; 3]) -> Self {
        Self::ColorKey {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        }
    }

    /// Fetches watermark pixel `(sx, sy)` as the gate sees it.
    ///
    /// Alpha is forced to 255 unless the policy is
    /// [`TransparencyPolicy::UseWatermarkAlpha`].
    #[inline]
    pub fn sample(self, watermark: &PixelGrid, sx: u32, sy: u32) -> Rgba8 {
        let px = watermark.get(sx, sy);
        match self {
            Self::UseWatermarkAlpha => px,
            Self::None | Self::ColorKey { .. } => px.opaque(),
        }
    }

    /// Returns `true` if `px` must leave the base pixel unchanged.
    #[inline]
    pub fn is_transparent(self, px: Rgba8) -> bool {
        match self {
            Self::None => false,
            Self::UseWatermarkAlpha => px.a == 0,
            Self::ColorKey { r, g, b } => px.same_rgb([r, g, b]),
        }
    }

    /// Whether the policy is only legal for watermarks with alpha.
    #[inline]
    pub const fn requires_alpha(self) -> bool {
        matches!(self, Self::UseWatermarkAlpha)
    }
}

impl fmt::Display for TransparencyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::UseWatermarkAlpha => write!(f, "watermark alpha"),
            Self::ColorKey { r, g, b } => write!(f, "color key ({}, {}, {})", r, g, b),
        }
    }
}

/// Mixes one channel, rounding down.
///
/// ```rust
/// use wmark_ops::composite::blend_channel;
/// use wmark_ops::BlendWeight;
///
/// // (50 * 0 + 50 * 255) / 100 = 127.5, truncated
/// assert_eq!(blend_channel(BlendWeight::new(50).unwrap(), 0, 255), 127);
/// ```
#[inline]
pub fn blend_channel(weight: BlendWeight, wm: u8, base: u8) -> u8 {
    let w = weight.get() as u32;
    let inv = weight.base_share() as u32;
    // Max numerator is 100 * 255, so the quotient always fits in u8.
    ((w * wm as u32 + inv * base as u32) / 100) as u8
}

/// Mixes R, G and B of `wm` into `base`. The result is opaque.
#[inline]
pub fn blend_pixel(base: Rgba8, wm: Rgba8, weight: BlendWeight) -> Rgba8 {
    Rgba8::rgb_opaque(
        blend_channel(weight, wm.r, base.r),
        blend_channel(weight, wm.g, base.g),
        blend_channel(weight, wm.b, base.b),
    )
}

/// Computes the output pixel for base coordinate `(x, y)`.
#[inline]
pub fn composite_pixel(
    base_px: Rgba8,
    watermark: &PixelGrid,
    x: u32,
    y: u32,
    weight: BlendWeight,
    mode: PlacementMode,
    policy: TransparencyPolicy,
) -> Rgba8 {
    let Some((sx, sy)) = mode.sample_coord(x, y, watermark.width(), watermark.height()) else {
        return base_px.opaque();
    };
    let wm_px = policy.sample(watermark, sx, sy);
    if policy.is_transparent(wm_px) {
        base_px.opaque()
    } else {
        blend_pixel(base_px, wm_px, weight)
    }
}

/// Fills one output row. Shared by the sequential and parallel drivers.
pub(crate) fn composite_row(
    base: &PixelGrid,
    watermark: &PixelGrid,
    y: u32,
    weight: BlendWeight,
    mode: PlacementMode,
    policy: TransparencyPolicy,
    out: &mut [Rgba8],
) {
    let src = base.row(y);

    // Rows above or below a single watermark are plain copies.
    if let PlacementMode::Single { y: ay, .. } = mode {
        if y < ay || y as u64 >= ay as u64 + watermark.height() as u64 {
            for (dst, &b) in out.iter_mut().zip(src) {
                *dst = b.opaque();
            }
            return;
        }
    }

    for (x, (dst, &b)) in out.iter_mut().zip(src).enumerate() {
        *dst = composite_pixel(b, watermark, x as u32, y, weight, mode, policy);
    }
}

/// Stamps `watermark` onto `base`.
///
/// Returns a new grid of the base's size; the inputs are not modified.
///
/// The caller guarantees the preconditions: the watermark is no larger than
/// the base, a `Single` anchor keeps it fully inside, and
/// `UseWatermarkAlpha` is only used with a watermark that has alpha. Use
/// [`try_composite`] to have them checked.
pub fn composite(
    base: &PixelGrid,
    watermark: &PixelGrid,
    weight: BlendWeight,
    mode: PlacementMode,
    policy: TransparencyPolicy,
) -> PixelGrid {
    debug!(
        base_width = base.width(),
        base_height = base.height(),
        wm_width = watermark.width(),
        wm_height = watermark.height(),
        %weight,
        %mode,
        %policy,
        "Compositing watermark"
    );

    let mut out = PixelGrid::blank_like(base);
    let width = base.width() as usize;
    for (y, row) in out.pixels_mut().chunks_exact_mut(width).enumerate() {
        composite_row(base, watermark, y as u32, weight, mode, policy, row);
    }

    trace!("composite::composite done");
    out
}

/// Verifies the caller-side contract of [`composite`].
pub fn check_preconditions(
    base: &PixelGrid,
    watermark: &PixelGrid,
    mode: PlacementMode,
    policy: TransparencyPolicy,
) -> OpsResult<()> {
    if watermark.width() > base.width() || watermark.height() > base.height() {
        return Err(OpsError::PreconditionViolation(format!(
            "watermark {}x{} is larger than base {}x{}",
            watermark.width(),
            watermark.height(),
            base.width(),
            base.height()
        )));
    }

    if let PlacementMode::Single { x, y } = mode {
        let footprint = mode.footprint(base, watermark);
        if !base.bounds().contains_rect(&footprint) {
            return Err(OpsError::PreconditionViolation(format!(
                "anchor ({}, {}) is out of range [x 0-{}] [y 0-{}]",
                x,
                y,
                base.width() - watermark.width(),
                base.height() - watermark.height()
            )));
        }
    }

    if policy.requires_alpha() && !watermark.has_alpha() {
        return Err(OpsError::PreconditionViolation(
            "watermark alpha requested but the watermark has no alpha channel".into(),
        ));
    }

    Ok(())
}

/// [`composite`] with the preconditions checked first.
pub fn try_composite(
    base: &PixelGrid,
    watermark: &PixelGrid,
    weight: BlendWeight,
    mode: PlacementMode,
    policy: TransparencyPolicy,
) -> OpsResult<PixelGrid> {
    check_preconditions(base, watermark, mode, policy)?;
    Ok(composite(base, watermark, weight, mode, policy))
}

/// Weight, placement and policy bundled for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOptions {
    /// Watermark share
    pub weight: BlendWeight,
    /// Placement
    pub mode: PlacementMode,
    /// Transparency gate
    pub policy: TransparencyPolicy,
}

impl CompositeOptions {
    /// Bundles the three parameters.
    pub const fn new(weight: BlendWeight, mode: PlacementMode, policy: TransparencyPolicy) -> Self {
        Self {
            weight,
            mode,
            policy,
        }
    }

    /// Runs the row-parallel engine with these options, preconditions checked.
    #[cfg(feature = "parallel")]
    pub fn try_apply_par(&self, base: &PixelGrid, watermark: &PixelGrid) -> OpsResult<PixelGrid> {
        check_preconditions(base, watermark, self.mode, self.policy)?;
        Ok(crate::parallel::composite(
            base,
            watermark,
            self.weight,
            self.mode,
            self.policy,
        ))
    }
}
