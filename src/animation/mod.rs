//! Frame-driven animation primitives.
//!
//! Every animated property in the crate (carousel pivot offset, entrance
//! poses) is a [`Tween`] stepped by the host's frame delta.

/// Scalar tweens and their option-level description.
pub mod tween;

pub use tween::{Tween, TweenSpec};
