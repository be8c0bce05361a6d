//! Turns user answers into compositor parameters.
//!
//! Every parser here accepts the raw line (terminator already stripped) and
//! reports failures with the sentence the user sees.

use std::ops::RangeInclusive;
use thiserror::Error;
use wmark_ops::{BlendWeight, PlacementMode, TransparencyPolicy};

/// Allowed values for each component of a transparency color.
pub const VALID_COLOR_RANGE: RangeInclusive<i32> = 0..=255;

/// Allowed blend percentages.
pub const WEIGHT_RANGE: RangeInclusive<u32> = 0..=100;

/// A user answer that cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("The transparency percentage isn't an integer number.")]
    PercentageNotInteger,

    #[error("The transparency percentage is out of range.")]
    PercentageOutOfRange,

    #[error("The transparency color input is invalid.")]
    InvalidColor,

    #[error("The position method input is invalid.")]
    InvalidPositionMethod,

    #[error("The position input is invalid.")]
    InvalidPosition,

    #[error("The position input is out of range.")]
    PositionOutOfRange,
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// How the watermark is laid out, before a position is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionMethod {
    Single,
    Grid,
}

/// `true` when the answer is `yes`, ignoring case.
pub fn is_yes(answer: &str) -> bool {
    answer.to_lowercase() == "yes"
}

/// Policy from the answer to the alpha channel question.
pub fn alpha_policy(answer: &str) -> TransparencyPolicy {
    if is_yes(answer) {
        TransparencyPolicy::UseWatermarkAlpha
    } else {
        TransparencyPolicy::None
    }
}

/// Parses the blend percentage.
///
/// Only ASCII digits are accepted. A digit string too large for any
/// percentage is out of range.
pub fn parse_percentage(input: &str) -> ResolveResult<BlendWeight> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(ResolveError::PercentageNotInteger);
    }
    let value = input
        .parse::<u32>()
        .map_err(|_| ResolveError::PercentageOutOfRange)?;
    if !WEIGHT_RANGE.contains(&value) {
        return Err(ResolveError::PercentageOutOfRange);
    }
    BlendWeight::new(value as u8).map_err(|_| ResolveError::PercentageOutOfRange)
}

/// Splits on single spaces and parses every token as an integer.
///
/// Consecutive spaces produce an empty token, which fails.
pub fn parse_spaced_ints(input: &str, on_error: ResolveError) -> ResolveResult<Vec<i32>> {
    input
        .split(' ')
        .map(|token| token.parse::<i32>().map_err(|_| on_error))
        .collect()
}

/// Parses `R G B` into a transparency color.
pub fn parse_color(input: &str) -> ResolveResult<[u8; 3]> {
    let rgb = parse_spaced_ints(input, ResolveError::InvalidColor)?;
    match rgb.as_slice() {
        &[r, g, b] if [r, g, b].iter().all(|c| VALID_COLOR_RANGE.contains(c)) => {
            Ok([r as u8, g as u8, b as u8])
        }
        _ => Err(ResolveError::InvalidColor),
    }
}

/// Parses the placement method name. Case-sensitive.
pub fn parse_position_method(input: &str) -> ResolveResult<PositionMethod> {
    match input {
        "single" => Ok(PositionMethod::Single),
        "grid" => Ok(PositionMethod::Grid),
        _ => Err(ResolveError::InvalidPositionMethod),
    }
}

/// Parses `x y` and checks it against the largest valid anchor.
pub fn parse_position(input: &str, max_x: u32, max_y: u32) -> ResolveResult<PlacementMode> {
    let xy = parse_spaced_ints(input, ResolveError::InvalidPosition)?;
    let &[x, y] = xy.as_slice() else {
        return Err(ResolveError::InvalidPosition);
    };
    let in_range = |v: i32, max: u32| v >= 0 && (v as u32) <= max;
    if !in_range(x, max_x) || !in_range(y, max_y) {
        return Err(ResolveError::PositionOutOfRange);
    }
    Ok(PlacementMode::Single {
        x: x as u32,
        y: y as u32,
    })
}
