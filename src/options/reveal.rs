use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::TweenSpec;
use crate::scroll::{ElementEdge, HidePolicy, TriggerAnchor};
use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Reveal", inline)]
#[serde(default)]
/// Scroll trigger lines and reveal/hide tweens for the carousel.
pub struct RevealOptions {
    /// Line where the tracked region starts counting, e.g. `"top 80%"`:
    /// the region's top edge at 80 % of the viewport height.
    #[schemars(with = "String")]
    pub start: TriggerAnchor,
    /// Line where progress reaches 1, e.g. `"bottom 20%"`.
    #[schemars(with = "String")]
    pub end: TriggerAnchor,
    /// Which exits hide the carousel again.
    pub hide_policy: HidePolicy,
    /// Tween that raises the pivot into view.
    pub show: TweenSpec,
    /// Tween that drops the pivot back to its hidden offset.
    pub hide: TweenSpec,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            start: TriggerAnchor::new(ElementEdge::Top, 0.8),
            end: TriggerAnchor::new(ElementEdge::Bottom, 0.2),
            hide_policy: HidePolicy::LeaveBack,
            show: TweenSpec::new(1.2, EasingFunction::CubicOut),
            hide: TweenSpec::new(1.0, EasingFunction::DEFAULT),
        }
    }
}
