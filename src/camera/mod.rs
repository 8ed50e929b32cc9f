//! Camera system for the carousel scene.
//!
//! A fixed perspective camera on +Z aimed at the origin, nudged in X and Y
//! by pointer parallax.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Pointer sampling and damped camera drift.
pub mod parallax;

pub use self::core::{Camera, CameraUniform};
pub use parallax::{ParallaxDriver, PointerSample};
