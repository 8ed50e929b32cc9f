//! Easing functions for tween interpolation.
//!
//! The curve names follow the power-N naming used by page animation
//! libraries: `power1` is quadratic, `power2` cubic, `power3` quartic.
//! Options files may use either the snake_case variant names or those
//! aliases (`"power2.out"`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    #[serde(alias = "none")]
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    #[serde(alias = "power1.in")]
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    #[serde(alias = "power1.out", alias = "power1")]
    QuadraticOut,
    /// Cubic ease-out.
    #[serde(alias = "power2.out", alias = "power2")]
    CubicOut,
    /// Quartic ease-out, the steepest start.
    #[serde(alias = "power3.out", alias = "power3")]
    QuarticOut,
}

impl EasingFunction {
    /// Default ease for tweens that do not name one (`power1.out`).
    pub const DEFAULT: EasingFunction = EasingFunction::QuadraticOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let omt = 1.0 - t;

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => 1.0 - omt * omt,
            EasingFunction::CubicOut => 1.0 - omt * omt * omt,
            EasingFunction::QuarticOut => 1.0 - omt * omt * omt * omt,
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 5] = [
        EasingFunction::Linear,
        EasingFunction::QuadraticIn,
        EasingFunction::QuadraticOut,
        EasingFunction::CubicOut,
        EasingFunction::QuarticOut,
    ];

    #[test]
    fn test_endpoints() {
        for ease in ALL {
            assert_eq!(ease.evaluate(0.0), 0.0, "{ease:?} at 0");
            assert!((ease.evaluate(1.0) - 1.0).abs() < 1e-6, "{ease:?} at 1");
        }
    }

    #[test]
    fn test_input_clamping() {
        for ease in ALL {
            assert_eq!(ease.evaluate(-0.5), 0.0);
            assert!((ease.evaluate(1.5) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_quadratic_out() {
        let quad_out = EasingFunction::QuadraticOut;
        assert_eq!(quad_out.evaluate(0.5), 0.75); // 1 - (1-0.5)² = 0.75
    }

    #[test]
    fn test_out_curves_get_steeper() {
        let t = 0.25;
        let quad = EasingFunction::QuadraticOut.evaluate(t);
        let cubic = EasingFunction::CubicOut.evaluate(t);
        let quartic = EasingFunction::QuarticOut.evaluate(t);
        assert!(t < quad && quad < cubic && cubic < quartic);
    }

    #[test]
    fn test_serde_accepts_aliases() {
        #[derive(Deserialize)]
        struct Holder {
            ease: EasingFunction,
        }
        let h: Holder = toml::from_str(r#"ease = "power3.out""#).unwrap();
        assert_eq!(h.ease, EasingFunction::QuarticOut);
        let h: Holder = toml::from_str(r#"ease = "cubic_out""#).unwrap();
        assert_eq!(h.ease, EasingFunction::CubicOut);
    }

    #[test]
    fn test_default_is_power1_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::QuadraticOut);
    }
}
