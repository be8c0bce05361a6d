//! # wmark-ops
//!
//! The watermark compositing engine.
//!
//! Given a base grid, a watermark grid, a [`BlendWeight`], a
//! [`PlacementMode`] and a [`TransparencyPolicy`], [`composite`] produces a
//! new opaque grid of the base's size. The engine is a pure function: it does
//! no I/O and never mutates its inputs.
//!
//! # Modules
//!
//! - [`composite`] - placement geometry, transparency gate, per-channel blend
//! - [`parallel`] - row-parallel variant of the same engine (feature `parallel`)
//!
//! # Example
//!
//! ```rust
//! use wmark_core::{PixelGrid, Rgba8};
//! use wmark_ops::{composite, BlendWeight, PlacementMode, TransparencyPolicy};
//!
//! let base = PixelGrid::filled(2, 2, Rgba8::WHITE).unwrap();
//! let mark = PixelGrid::filled(1, 1, Rgba8::BLACK).unwrap();
//! let weight = BlendWeight::new(50).unwrap();
//!
//! let out = composite(
//!     &base,
//!     &mark,
//!     weight,
//!     PlacementMode::Single { x: 0, y: 0 },
//!     TransparencyPolicy::None,
//! );
//! assert_eq!(out.get(0, 0), Rgba8::rgb_opaque(127, 127, 127));
//! assert_eq!(out.get(1, 1), Rgba8::WHITE);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod composite;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use composite::{
    composite, try_composite, BlendWeight, CompositeOptions, PlacementMode, TransparencyPolicy,
};
pub use error::{OpsError, OpsResult};
