use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::page::Pose;
use crate::scroll::{ElementEdge, TriggerAnchor};
use crate::util::easing::EasingFunction;

/// One staggered "from" animation: targets start at `from` and settle at
/// their natural pose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct EntranceSpec {
    /// Per-target duration in seconds.
    pub duration: f32,
    /// Delay between consecutive targets in seconds.
    pub stagger: f32,
    /// Easing curve.
    pub ease: EasingFunction,
    /// Trigger line for scroll-started entrances.
    #[schemars(with = "String")]
    pub start: TriggerAnchor,
    /// Starting pose of every target.
    pub from: Pose,
}

impl Default for EntranceSpec {
    fn default() -> Self {
        Self {
            duration: 1.0,
            stagger: 0.0,
            ease: EasingFunction::QuarticOut,
            start: TriggerAnchor::new(ElementEdge::Top, 0.85),
            from: Pose {
                opacity: 0.0,
                ..Pose::REST
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Entrance", inline)]
#[serde(default)]
/// Entrance animations for page content.
pub struct EntranceOptions {
    /// Hero block children, played once when the window finishes loading.
    pub hero: EntranceSpec,
    /// About-section text children, played when scrolled into view.
    pub about_content: EntranceSpec,
    /// About-section visual, played when scrolled into view.
    pub about_visual: EntranceSpec,
}

impl Default for EntranceOptions {
    fn default() -> Self {
        let base = EntranceSpec::default();
        Self {
            hero: EntranceSpec {
                from: Pose {
                    y: 30.0,
                    ..base.from
                },
                stagger: 0.2,
                ..base.clone()
            },
            about_content: EntranceSpec {
                from: Pose {
                    y: 50.0,
                    ..base.from
                },
                stagger: 0.2,
                ..base.clone()
            },
            about_visual: EntranceSpec {
                from: Pose {
                    x: 50.0,
                    scale: 0.95,
                    ..base.from
                },
                duration: 1.2,
                ..base
            },
        }
    }
}
