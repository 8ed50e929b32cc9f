use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Carousel", inline)]
#[serde(default)]
/// Carousel image list and ring geometry.
pub struct CarouselOptions {
    /// Image locators in ring order. Index `i` of `N` sits at angle
    /// `2π·i/N` whether or not the others load.
    #[schemars(skip)]
    pub images: Vec<String>,
    /// Ring radius in world units.
    #[schemars(title = "Radius", range(min = 1.0, max = 20.0), extend("step" = 0.5))]
    pub radius: f32,
    /// Plane width and height in world units.
    #[schemars(skip)]
    pub plane_size: [f32; 2],
    /// Pivot vertical offset while hidden.
    #[schemars(skip)]
    pub hidden_offset: f32,
    /// Directory that absolute image paths resolve against when loading
    /// from disk (native viewer only).
    #[schemars(skip)]
    pub asset_root: String,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            images: (1..=5).map(|i| format!("/images/event_{i}.jpg")).collect(),
            radius: 7.0,
            plane_size: [4.0, 2.6],
            hidden_offset: -50.0,
            asset_root: "assets".to_owned(),
        }
    }
}
