//! Centralized page options with TOML preset support.
//!
//! Every tunable constant (camera projection, lights, carousel geometry,
//! scroll reveal timing, parallax, entrance animations, DOM hooks) lives
//! here. Options serialize to/from TOML; all sections use
//! `#[serde(default)]` so a preset only needs the values it overrides.

mod camera;
mod carousel;
mod display;
mod entrance;
mod lighting;
mod page;
mod parallax;
mod reveal;
mod viewer;

use std::path::Path;

pub use camera::CameraOptions;
pub use carousel::CarouselOptions;
pub use display::DisplayOptions;
pub use entrance::{EntranceOptions, EntranceSpec};
pub use lighting::LightingOptions;
pub use page::PageOptions;
pub use parallax::ParallaxOptions;
pub use reveal::RevealOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use viewer::ViewerOptions;

use crate::error::TourviewError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Ambient and point light parameters.
    pub lighting: LightingOptions,
    /// Image list and ring geometry.
    pub carousel: CarouselOptions,
    /// Scroll trigger and reveal/hide timing.
    pub reveal: RevealOptions,
    /// Pointer parallax response.
    pub parallax: ParallaxOptions,
    /// Surface presentation parameters.
    pub display: DisplayOptions,
    /// Staggered entrance animations for page content.
    pub entrance: EntranceOptions,
    /// DOM hooks and navbar behavior.
    #[schemars(skip)]
    pub page: PageOptions,
    /// Simulated page used by the native viewer.
    #[schemars(skip)]
    pub viewer: ViewerOptions,
}

impl Options {
    /// Generate JSON Schema describing the tunable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TourviewError::OptionsParse`] on malformed TOML or invalid
    /// values (e.g. an unparseable trigger anchor).
    pub fn from_toml(content: &str) -> Result<Self, TourviewError> {
        toml::from_str(content)
            .map_err(|e| TourviewError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TourviewError::Io`] if the file cannot be read, or
    /// [`TourviewError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, TourviewError> {
        let content =
            std::fs::read_to_string(path).map_err(TourviewError::Io)?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::{ElementEdge, HidePolicy};
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults_match_page_constants() {
        let opts = Options::default();
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.camera.znear, 0.1);
        assert_eq!(opts.camera.zfar, 1000.0);
        assert_eq!(opts.camera.start_z, 5.0);
        assert_eq!(opts.carousel.radius, 7.0);
        assert_eq!(opts.carousel.plane_size, [4.0, 2.6]);
        assert_eq!(opts.carousel.hidden_offset, -50.0);
        assert_eq!(opts.carousel.images.len(), 5);
        assert_eq!(opts.display.max_pixel_ratio, 2.0);
        assert_eq!(opts.lighting.point_intensity, 2.0);
        assert_eq!(opts.parallax.scale, 0.5);
        assert_eq!(opts.parallax.damping, 0.05);
        assert_eq!(opts.reveal.show.duration, 1.2);
        assert_eq!(opts.reveal.show.ease, EasingFunction::CubicOut);
        assert_eq!(opts.reveal.hide.duration, 1.0);
        assert_eq!(opts.reveal.hide_policy, HidePolicy::LeaveBack);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[reveal]
start = "top 85%"
hide_policy = "either_direction"

[reveal.show]
duration = 1.5
ease = "power3.out"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.reveal.start.edge, ElementEdge::Top);
        assert!((opts.reveal.start.viewport_fraction - 0.85).abs() < 1e-6);
        assert_eq!(opts.reveal.hide_policy, HidePolicy::EitherDirection);
        assert_eq!(opts.reveal.show.duration, 1.5);
        assert_eq!(opts.reveal.show.ease, EasingFunction::QuarticOut);
        // Everything else should be default
        assert_eq!(opts.reveal.hide.duration, 1.0);
        assert_eq!(opts.carousel.radius, 7.0);
    }

    #[test]
    fn invalid_anchor_is_a_parse_error() {
        let err = Options::from_toml("[reveal]\nstart = \"middle 80%\"\n")
            .unwrap_err();
        assert!(matches!(err, TourviewError::OptionsParse(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("carousel"));
        assert!(props.contains_key("reveal"));
        assert!(props.contains_key("parallax"));

        // Host-only sections are not exposed
        assert!(!props.contains_key("page"));
        assert!(!props.contains_key("viewer"));
    }
}
