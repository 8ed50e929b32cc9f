use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Scene light set: one ambient light and one point light.
pub struct LightingOptions {
    /// Ambient light colour, sRGB-encoded like a CSS hex colour.
    #[schemars(skip)]
    pub ambient_color: [f32; 3],
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub ambient_intensity: f32,
    /// Point light colour, sRGB-encoded (gold `#D4AF37` by default).
    #[schemars(skip)]
    pub point_color: [f32; 3],
    /// Point light intensity.
    #[schemars(title = "Point Light", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub point_intensity: f32,
    /// Point light position in world space.
    #[schemars(skip)]
    pub point_position: [f32; 3],
    /// Point light range; 0 disables distance falloff.
    #[schemars(skip)]
    pub point_range: f32,
    /// How much the lights tint the carousel planes. At 0 the planes show
    /// their images unlit.
    #[schemars(title = "Plane Shading", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub plane_shading: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.6,
            // #D4AF37
            point_color: [0.831, 0.686, 0.216],
            point_intensity: 2.0,
            point_position: [5.0, 5.0, 5.0],
            point_range: 0.0,
            plane_shading: 0.0,
        }
    }
}
