//! Behavioral properties of the compositing engine.

use wmark_core::{PixelGrid, Rgba8};
use wmark_ops::composite::blend_channel;
use wmark_ops::{composite, BlendWeight, PlacementMode, TransparencyPolicy};

/// Deterministic opaque test pattern.
fn opaque_pattern(width: u32, height: u32, seed: u8) -> PixelGrid {
    PixelGrid::from_fn(width, height, |x, y| {
        Rgba8::rgb_opaque(
            (x as u8).wrapping_mul(37).wrapping_add(seed),
            (y as u8).wrapping_mul(53).wrapping_add(seed),
            ((x + y) as u8).wrapping_mul(11) ^ seed,
        )
    })
    .unwrap()
}

/// Pattern with a real alpha channel; every fourth pixel is fully transparent.
fn alpha_pattern(width: u32, height: u32) -> PixelGrid {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let a = if (x + y) % 4 == 0 { 0 } else { 128 };
            data.extend_from_slice(&[(x * 20) as u8, (y * 20) as u8, 99, a]);
        }
    }
    PixelGrid::from_rgba8(width, height, data).unwrap()
}

fn weight(p: u8) -> BlendWeight {
    BlendWeight::new(p).unwrap()
}

fn all_policies(mark: &PixelGrid) -> Vec<TransparencyPolicy> {
    let mut v = vec![
        TransparencyPolicy::None,
        TransparencyPolicy::color_key(mark.get(0, 0).rgb()),
    ];
    if mark.has_alpha() {
        v.push(TransparencyPolicy::UseWatermarkAlpha);
    }
    v
}

#[test]
fn zero_weight_returns_base() {
    let base = opaque_pattern(12, 9, 5);
    for mark in [opaque_pattern(5, 4, 200), alpha_pattern(5, 4)] {
        for mode in [PlacementMode::Grid, PlacementMode::Single { x: 7, y: 5 }] {
            for policy in all_policies(&mark) {
                let out = composite(&base, &mark, BlendWeight::ZERO, mode, policy);
                assert_eq!(out.pixels(), base.pixels(), "mode={mode} policy={policy}");
            }
        }
    }
}

#[test]
fn full_weight_copies_watermark_in_covered_area() {
    let base = opaque_pattern(10, 8, 1);
    let mark = opaque_pattern(3, 5, 77);
    let out = composite(
        &base,
        &mark,
        BlendWeight::FULL,
        PlacementMode::Single { x: 4, y: 2 },
        TransparencyPolicy::None,
    );
    for y in 2..7 {
        for x in 4..7 {
            assert_eq!(out.get(x, y).rgb(), mark.get(x - 4, y - 2).rgb());
        }
    }
}

#[test]
fn outside_single_rectangle_is_untouched() {
    let base = opaque_pattern(7, 6, 9);
    let mark = opaque_pattern(3, 2, 140);
    let max_x = base.width() - mark.width();
    let max_y = base.height() - mark.height();

    for ay in 0..=max_y {
        for ax in 0..=max_x {
            let out = composite(
                &base,
                &mark,
                weight(63),
                PlacementMode::Single { x: ax, y: ay },
                TransparencyPolicy::None,
            );
            for y in 0..base.height() {
                for x in 0..base.width() {
                    let inside = x >= ax && x < ax + mark.width() && y >= ay && y < ay + mark.height();
                    if !inside {
                        assert_eq!(out.get(x, y), base.get(x, y), "anchor ({ax}, {ay}) pixel ({x}, {y})");
                    }
                }
            }
        }
    }
}

#[test]
fn grid_pattern_repeats_with_watermark_period() {
    // A uniform base isolates the watermark contribution.
    let base = PixelGrid::filled(17, 11, Rgba8::rgb_opaque(100, 150, 200)).unwrap();
    let mark = opaque_pattern(4, 3, 33);
    let out = composite(&base, &mark, weight(45), PlacementMode::Grid, TransparencyPolicy::None);

    for y in 0..base.height() {
        for x in 0..base.width() {
            let ref_px = out.get(x % mark.width(), y % mark.height());
            assert_eq!(out.get(x, y), ref_px, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn grid_truncates_partial_tiles() {
    let base = PixelGrid::filled(5, 3, Rgba8::WHITE).unwrap();
    let mark = PixelGrid::from_fn(2, 2, |x, y| {
        if (x, y) == (0, 0) {
            Rgba8::BLACK
        } else {
            Rgba8::WHITE
        }
    })
    .unwrap();
    let out = composite(&base, &mark, BlendWeight::FULL, PlacementMode::Grid, TransparencyPolicy::None);

    let black: Vec<(u32, u32)> = (0..3)
        .flat_map(|y| (0..5).map(move |x| (x, y)))
        .filter(|&(x, y)| out.get(x, y) == Rgba8::BLACK)
        .collect();
    assert_eq!(black, vec![(0, 0), (2, 0), (4, 0), (0, 2), (2, 2), (4, 2)]);
}

#[test]
fn color_key_skips_exact_match_only() {
    let base = PixelGrid::filled(4, 1, Rgba8::rgb_opaque(200, 200, 200)).unwrap();
    let key = [10, 20, 30];
    let mark = PixelGrid::from_pixels(
        4,
        1,
        vec![
            Rgba8::rgb_opaque(10, 20, 30),
            Rgba8::rgb_opaque(11, 20, 30),
            Rgba8::rgb_opaque(10, 21, 30),
            Rgba8::rgb_opaque(10, 20, 29),
        ],
        false,
    )
    .unwrap();
    let out = composite(
        &base,
        &mark,
        weight(50),
        PlacementMode::Single { x: 0, y: 0 },
        TransparencyPolicy::color_key(key),
    );

    assert_eq!(out.get(0, 0), base.get(0, 0));
    for x in 1..4 {
        let px = mark.get(x, 0);
        let expected = Rgba8::rgb_opaque(
            blend_channel(weight(50), px.r, 200),
            blend_channel(weight(50), px.g, 200),
            blend_channel(weight(50), px.b, 200),
        );
        assert_eq!(out.get(x, 0), expected);
    }
}

#[test]
fn color_key_ignores_watermark_alpha() {
    // Alpha is forced to 255 before the key comparison, so a transparent
    // pixel that does not match the key is still blended.
    let base = PixelGrid::filled(1, 1, Rgba8::WHITE).unwrap();
    let mark = PixelGrid::from_rgba8(1, 1, vec![0, 0, 0, 0]).unwrap();
    let out = composite(
        &base,
        &mark,
        BlendWeight::FULL,
        PlacementMode::Grid,
        TransparencyPolicy::color_key([1, 1, 1]),
    );
    assert_eq!(out.get(0, 0), Rgba8::BLACK);
}

#[test]
fn alpha_gate_is_binary() {
    let base = PixelGrid::filled(3, 1, Rgba8::rgb_opaque(40, 80, 120)).unwrap();
    let mark = PixelGrid::from_rgba8(3, 1, vec![250, 10, 0, 0, 250, 10, 0, 1, 250, 10, 0, 255]).unwrap();
    let out = composite(
        &base,
        &mark,
        weight(70),
        PlacementMode::Single { x: 0, y: 0 },
        TransparencyPolicy::UseWatermarkAlpha,
    );

    assert_eq!(out.get(0, 0), base.get(0, 0));
    assert_eq!(out.get(1, 0), out.get(2, 0));
    assert_ne!(out.get(1, 0), base.get(1, 0));
}

#[test]
fn alpha_pixels_ignored_without_alpha_policy() {
    let base = PixelGrid::filled(6, 6, Rgba8::WHITE).unwrap();
    let mark = alpha_pattern(3, 3);
    let out = composite(&base, &mark, BlendWeight::FULL, PlacementMode::Grid, TransparencyPolicy::None);
    for y in 0..6 {
        for x in 0..6 {
            assert_eq!(out.get(x, y).rgb(), mark.get(x % 3, y % 3).rgb());
        }
    }
}

#[test]
fn half_weight_white_black_scenario() {
    let base = PixelGrid::filled(2, 2, Rgba8::WHITE).unwrap();
    let mark = PixelGrid::filled(1, 1, Rgba8::BLACK).unwrap();
    let out = composite(
        &base,
        &mark,
        weight(50),
        PlacementMode::Single { x: 0, y: 0 },
        TransparencyPolicy::None,
    );
    assert_eq!(out.get(0, 0), Rgba8::rgb_opaque(127, 127, 127));
    for (x, y) in [(1, 0), (0, 1), (1, 1)] {
        assert_eq!(out.get(x, y), Rgba8::WHITE);
    }
}

#[test]
fn watermark_same_size_as_base() {
    let base = opaque_pattern(4, 4, 0);
    let mark = opaque_pattern(4, 4, 128);
    let single = composite(
        &base,
        &mark,
        weight(20),
        PlacementMode::Single { x: 0, y: 0 },
        TransparencyPolicy::None,
    );
    let grid = composite(&base, &mark, weight(20), PlacementMode::Grid, TransparencyPolicy::None);
    assert_eq!(single, grid);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_matches_sequential() {
    let base = opaque_pattern(129, 65, 4);
    let mark = alpha_pattern(10, 7);
    for policy in all_policies(&mark) {
        for mode in [PlacementMode::Grid, PlacementMode::Single { x: 119, y: 58 }] {
            let seq = composite(&base, &mark, weight(81), mode, policy);
            let par = wmark_ops::parallel::composite(&base, &mark, weight(81), mode, policy);
            assert_eq!(seq, par);
        }
    }
}
