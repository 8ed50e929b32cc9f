//! Pointer-driven camera drift.
//!
//! The latest pointer sample sets a target camera offset; every frame the
//! camera eye covers a fixed fraction of the remaining distance to it.
//! The step is per frame, not per second, so the drift speed follows the
//! display refresh rate.

use glam::{Vec2, Vec3};

use super::core::Camera;
use crate::options::ParallaxOptions;

/// Pointer position normalized to the viewport, in `[-0.5, 0.5]` on each
/// axis. +y points down the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Horizontal offset from the viewport center.
    pub x: f32,
    /// Vertical offset from the viewport center.
    pub y: f32,
}

impl PointerSample {
    /// Pointer at the viewport center.
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    /// Normalize client coordinates against a `width` x `height` viewport.
    /// Degenerate viewports yield [`CENTER`](Self::CENTER).
    #[must_use]
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Self {
        if !(width > 0.0 && height > 0.0) {
            return Self::CENTER;
        }
        Self {
            x: (client_x / width - 0.5).clamp(-0.5, 0.5),
            y: (client_y / height - 0.5).clamp(-0.5, 0.5),
        }
    }
}

impl Default for PointerSample {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Damped follower applying the pointer offset to the camera eye.
#[derive(Debug, Clone)]
pub struct ParallaxDriver {
    sample: PointerSample,
    scale: f32,
    damping: f32,
}

impl ParallaxDriver {
    /// Driver starting at the viewport center.
    #[must_use]
    pub fn new(options: &ParallaxOptions) -> Self {
        Self {
            sample: PointerSample::CENTER,
            scale: options.scale,
            damping: options.damping.clamp(0.0, 1.0),
        }
    }

    /// Record the latest pointer sample. Only the newest one matters.
    pub fn set_sample(&mut self, sample: PointerSample) {
        self.sample = sample;
    }

    /// Latest pointer sample.
    #[must_use]
    pub fn sample(&self) -> PointerSample {
        self.sample
    }

    /// Target eye offset in world XY. Screen-down maps to world-down.
    #[must_use]
    pub fn target(&self) -> Vec2 {
        Vec2::new(self.sample.x * self.scale, -self.sample.y * self.scale)
    }

    /// One damping step: move the eye's X and Y toward the target and
    /// re-aim at the origin. Z is left alone.
    pub fn apply(&self, camera: &mut Camera) {
        let target = self.target();
        camera.eye.x += (target.x - camera.eye.x) * self.damping;
        camera.eye.y += (target.y - camera.eye.y) * self.damping;
        camera.target = Vec3::ZERO;
    }
}
