use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Parallax", inline)]
#[serde(default)]
/// Pointer-driven camera drift.
pub struct ParallaxOptions {
    /// World units of camera offset per unit of normalized pointer offset.
    #[schemars(title = "Scale", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub scale: f32,
    /// Fraction of the remaining distance covered each frame.
    #[schemars(title = "Damping", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping: f32,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            scale: 0.5,
            damping: 0.05,
        }
    }
}
