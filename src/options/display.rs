use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Surface presentation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
pub struct DisplayOptions {
    /// Upper bound on the device pixel ratio used for the render surface.
    #[schemars(title = "Max Pixel Ratio", range(min = 1.0, max = 4.0), extend("step" = 0.5))]
    pub max_pixel_ratio: f32,
    /// Clear colour (RGBA). Zero alpha lets page content behind the canvas
    /// show through.
    #[schemars(skip)]
    pub clear_color: [f32; 4],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            clear_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}
