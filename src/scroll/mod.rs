//! Scroll observation: trigger lines over a page region and the
//! carousel reveal state machine built on them.

/// Carousel reveal/hide and scroll-linked rotation.
pub mod reveal;
/// Trigger anchors, region rects and line-crossing detection.
pub mod trigger;

pub use reveal::{HidePolicy, RevealState, ScrollReveal};
pub use trigger::{
    ElementEdge, RegionRect, ScrollTrigger, TriggerAnchor, TriggerEvent,
    TriggerUpdate,
};
