//! Time-based scalar tweens.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// Duration and curve of a tween, as stored in options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TweenSpec {
    /// Duration in seconds.
    #[schemars(range(min = 0.0, max = 10.0))]
    pub duration: f32,
    /// Easing curve.
    pub ease: EasingFunction,
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self {
            duration: 1.0,
            ease: EasingFunction::DEFAULT,
        }
    }
}

impl TweenSpec {
    /// Spec with the given duration and curve.
    #[must_use]
    pub const fn new(duration: f32, ease: EasingFunction) -> Self {
        Self { duration, ease }
    }

    /// Start a tween from `from` to `to` with this duration and curve.
    #[must_use]
    pub fn tween(&self, from: f32, to: f32) -> Tween {
        Tween::new(from, to, self.duration, self.ease)
    }
}

/// Eased interpolation of one scalar over time.
///
/// Tweens are advanced by the host's frame delta, never by wall-clock
/// reads, so they are deterministic under test. Retargeting is done by
/// starting a fresh tween from the property's current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: EasingFunction,
}

impl Tween {
    /// Create a tween. Non-positive durations finish immediately.
    #[must_use]
    pub fn new(
        from: f32,
        to: f32,
        duration: f32,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    /// Linear time fraction in [0, 1].
    #[must_use]
    pub fn time_fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    /// Current interpolated value.
    #[must_use]
    pub fn value(&self) -> f32 {
        let t = self.easing.evaluate(self.time_fraction());
        self.from + (self.to - self.from) * t
    }

    /// Value the tween is heading toward.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Whether the full duration has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
