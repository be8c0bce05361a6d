//! # wmark-core
//!
//! Core pixel types shared by every wmark crate.
//!
//! - [`Rgba8`] - 8-bit RGBA pixel
//! - [`PixelGrid`] - row-major owned raster of [`Rgba8`] pixels
//! - [`Rect`] - axis-aligned placement rectangle
//! - [`Error`] - construction and bounds errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The other crates build on it:
//!
//! ```text
//! wmark-core (this crate)
//!    ^
//!    |
//!    +-- wmark-ops (compositing engine)
//!    +-- wmark-io (PNG/JPEG loading and writing)
//!    +-- wmark-cli (interactive and flag-driven front end)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod grid;
pub mod pixel;
pub mod rect;

pub use error::{Error, Result};
pub use grid::PixelGrid;
pub use pixel::Rgba8;
pub use rect::Rect;

