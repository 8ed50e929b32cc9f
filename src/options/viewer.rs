use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Geometry of the simulated page scrolled by the native viewer, in
/// logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct ViewerOptions {
    /// Total page height.
    pub page_height: f32,
    /// Distance from the page top to the tracked region's top edge.
    pub tour_top: f32,
    /// Height of the tracked region.
    pub tour_height: f32,
    /// Pixels scrolled per mouse-wheel line.
    pub line_scroll: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            page_height: 4000.0,
            tour_top: 1600.0,
            tour_height: 1200.0,
            line_scroll: 60.0,
        }
    }
}
