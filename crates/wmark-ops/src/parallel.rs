//! Row-parallel compositing using Rayon.
//!
//! Output rows are independent: each depends only on the two input grids and
//! the fixed parameters, and no two rows share an output pixel. The result
//! is byte-identical to [`crate::composite::composite`].
//!
//! # Example
//!
//! ```rust
//! use wmark_core::{PixelGrid, Rgba8};
//! use wmark_ops::{parallel, BlendWeight, PlacementMode, TransparencyPolicy};
//!
//! let base = PixelGrid::filled(256, 256, Rgba8::WHITE).unwrap();
//! let tile = PixelGrid::filled(16, 16, Rgba8::BLACK).unwrap();
//! let out = parallel::composite(
//!     &base,
//!     &tile,
//!     BlendWeight::new(25).unwrap(),
//!     PlacementMode::Grid,
//!     TransparencyPolicy::None,
//! );
//! assert_eq!(out.get(255, 255), Rgba8::rgb_opaque(191, 191, 191));
//! ```

use crate::composite::{composite_row, BlendWeight, PlacementMode, TransparencyPolicy};
use rayon::prelude::*;
use tracing::debug;
use wmark_core::PixelGrid;

/// Parallel version of [`crate::composite::composite`].
///
/// Same preconditions, same output.
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
        threads = rayon::current_num_threads(),
        "Compositing watermark in parallel"
    );

    let mut out = PixelGrid::blank_like(base);
    let width = base.width() as usize;

    out.pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            composite_row(base, watermark, y as u32, weight, mode, policy, row);
        });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wmark_core::Rgba8;

    fn pattern(w: u32, h: u32, seed: u32) -> PixelGrid {
        PixelGrid::from_fn(w, h, |x, y| {
            let v = x.wrapping_mul(31) ^ y.wrapping_mul(17) ^ seed;
            Rgba8::new(v as u8, (v >> 3) as u8, (v >> 5) as u8, if v % 7 == 0 { 0 } else { 255 })
        })
        .unwrap()
    }

    #[test]
    fn test_matches_sequential_all_modes() {
        let base = pattern(67, 41, 3);
        let mark = pattern(9, 13, 11);
        let weight = BlendWeight::new(37).unwrap();
        let modes = [PlacementMode::Grid, PlacementMode::Single { x: 50, y: 20 }];
        let key = mark.get(2, 2).rgb();
        let policies = [
            TransparencyPolicy::None,
            TransparencyPolicy::UseWatermarkAlpha,
            TransparencyPolicy::color_key(key),
        ];

        for mode in modes {
            for policy in policies {
                let seq = crate::composite::composite(&base, &mark, weight, mode, policy);
                let par = composite(&base, &mark, weight, mode, policy);
                assert_eq!(seq, par, "mode={mode}, policy={policy}");
            }
        }
    }
}
