//! Scroll-to-carousel state mapping.
//!
//! [`ScrollReveal`] turns tracked-region scroll updates into pivot
//! transform changes: an eased vertical offset that lifts the carousel
//! into view (or drops it out), and a rotation tied 1:1 to scroll
//! progress. It only ever touches the pivot's transform, never the planes
//! attached to it.

use std::f32::consts::TAU;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::trigger::{RegionRect, ScrollTrigger, TriggerEvent};
use crate::animation::{Tween, TweenSpec};
use crate::options::RevealOptions;
use crate::scene::PivotTransform;

/// Visibility state of the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Parked at the hidden offset (or easing toward it).
    Hidden,
    /// At the shown offset (or easing toward it), rotating with scroll.
    Revealed,
}

/// Which exits from the trigger range hide the carousel again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HidePolicy {
    /// Hide only when scrolling back up past the start line. Scrolling
    /// down past the end keeps the carousel up with its rotation frozen.
    #[default]
    LeaveBack,
    /// Hide on either exit and reveal again on re-entry from below.
    EitherDirection,
}

/// Drives the pivot transform from the tracked region's scroll position.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    trigger: ScrollTrigger,
    state: RevealState,
    policy: HidePolicy,
    show: TweenSpec,
    hide: TweenSpec,
    shown_offset: f32,
    hidden_offset: f32,
    offset_tween: Option<Tween>,
    in_view: bool,
}

impl ScrollReveal {
    /// Reveal mapper starting HIDDEN, parking at `hidden_offset`.
    #[must_use]
    pub fn new(options: &RevealOptions, hidden_offset: f32) -> Self {
        Self {
            trigger: ScrollTrigger::new(options.start, options.end),
            state: RevealState::Hidden,
            policy: options.hide_policy,
            show: options.show,
            hide: options.hide,
            shown_offset: 0.0,
            hidden_offset,
            offset_tween: None,
            in_view: false,
        }
    }

    /// Current visibility state.
    #[must_use]
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Scroll progress through the tracked region as of the last update.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.trigger.progress()
    }

    /// Whether an offset tween is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.offset_tween.is_some()
    }

    /// Hidden, settled at the hidden offset and with the region off
    /// screen: the planes cannot be seen, so there is nothing to draw.
    #[must_use]
    pub fn is_parked(&self) -> bool {
        self.state == RevealState::Hidden && !self.is_animating() && !self.in_view
    }

    /// Handle a scroll or resize. `region` is `None` when the tracked
    /// region is not on the page, in which case nothing happens.
    pub fn on_scroll(
        &mut self,
        region: Option<RegionRect>,
        viewport_height: f32,
        pivot: &mut PivotTransform,
    ) {
        let Some(rect) = region else {
            return;
        };
        let update = self.trigger.update(rect, viewport_height);
        if update.in_view != self.in_view {
            log::debug!("tracked region in view: {}", update.in_view);
            self.in_view = update.in_view;
        }

        for event in &update.events {
            if matches!(event, TriggerEvent::Enter | TriggerEvent::EnterBack) {
                self.reveal(pivot);
            }
        }

        if update.progress_changed && self.state == RevealState::Revealed {
            pivot.rotation_angle = update.progress * TAU;
        }

        for event in &update.events {
            let hides = match event {
                TriggerEvent::LeaveBack => true,
                TriggerEvent::Leave => {
                    self.policy == HidePolicy::EitherDirection
                }
                TriggerEvent::Enter | TriggerEvent::EnterBack => false,
            };
            if hides {
                self.conceal(pivot);
            }
        }
    }

    /// Step the offset tween by `dt` seconds.
    pub fn advance(&mut self, dt: f32, pivot: &mut PivotTransform) {
        if let Some(tween) = &mut self.offset_tween {
            pivot.vertical_offset = tween.advance(dt);
            if tween.is_finished() {
                self.offset_tween = None;
            }
        }
    }

    fn reveal(&mut self, pivot: &PivotTransform) {
        if self.state == RevealState::Revealed {
            return;
        }
        log::debug!("carousel reveal");
        self.state = RevealState::Revealed;
        self.offset_tween =
            Some(self.show.tween(pivot.vertical_offset, self.shown_offset));
    }

    fn conceal(&mut self, pivot: &PivotTransform) {
        if self.state == RevealState::Hidden {
            return;
        }
        log::debug!("carousel hide");
        self.state = RevealState::Hidden;
        self.offset_tween =
            Some(self.hide.tween(pivot.vertical_offset, self.hidden_offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::easing::EasingFunction;

    const VH: f32 = 1000.0;
    const HIDDEN: f32 = -50.0;

    fn rect_at(scroll_y: f32) -> Option<RegionRect> {
        Some(RegionRect::from_page(2000.0, 1200.0, scroll_y))
    }

    fn setup(policy: HidePolicy) -> (ScrollReveal, PivotTransform) {
        let options = RevealOptions {
            hide_policy: policy,
            ..RevealOptions::default()
        };
        (
            ScrollReveal::new(&options, HIDDEN),
            PivotTransform::hidden(HIDDEN),
        )
    }

    fn run_for(
        reveal: &mut ScrollReveal,
        pivot: &mut PivotTransform,
        seconds: f32,
    ) {
        let steps = (seconds * 60.0).ceil() as usize + 1;
        for _ in 0..steps {
            reveal.advance(1.0 / 60.0, pivot);
        }
    }

    #[test]
    fn entering_converges_to_shown_within_duration() {
        let (mut reveal, mut pivot) = setup(HidePolicy::LeaveBack);
        reveal.on_scroll(rect_at(1500.0), VH, &mut pivot);
        assert_eq!(reveal.state(), RevealState::Revealed);
        run_for(&mut reveal, &mut pivot, 1.2);
        assert_eq!(pivot.vertical_offset, 0.0);
        assert!(!reveal.is_animating());
    }

    #[test]
    fn offset_is_intermediate_only_mid_transition() {
        let (mut reveal, mut pivot) = setup(HidePolicy::LeaveBack);
        reveal.on_scroll(rect_at(1500.0), VH, &mut pivot);
        reveal.advance(0.3, &mut pivot);
        assert!(pivot.vertical_offset > HIDDEN && pivot.vertical_offset < 0.0);
        assert!(reveal.is_animating());
    }

    #[test]
    fn leaving_back_converges_to_hidden() {
        let (mut reveal, mut pivot) = setup(HidePolicy::LeaveBack);
        reveal.on_scroll(rect_at(1500.0), VH, &mut pivot);
        run_for(&mut reveal, &mut pivot, 1.2);
        reveal.on_scroll(rect_at(0.0), VH, &mut pivot);
        assert_eq!(reveal.state(), RevealState::Hidden);
        run_for(&mut reveal, &mut pivot, 1.0);
        assert_eq!(pivot.vertical_offset, HIDDEN);
    }

    #[test]
    fn hide_retargets_from_current_offset() {
        let (mut reveal, mut pivot) = setup(HidePolicy::LeaveBack);
        reveal.on_scroll(rect_at(1500.0), VH, &mut pivot);
        reveal.advance(0.2, &mut pivot);
        let midway = pivot.vertical_offset;
        reveal.on_scroll(rect_at(0.0), VH, &mut pivot);
        reveal.advance(0.0, &mut pivot);
        assert_eq!(pivot.vertical_offset, midway);
    }

    #[test]
    fn rotation_follows_progress_while_revealed() {
        let (mut reveal, mut pivot) = setup(HidePolicy::LeaveBack);
        for step in 0..=18 {
            let scroll = 1200.0 + step as f32 * 100.0;
            reveal.on_scroll(rect_at(scroll), VH, &mut pivot);
            let expected = reveal.progress() * TAU;
            assert!((pivot.rotation_angle - expected).abs() < 1e-5);
        }
        assert!((reveal.progress() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn leave_forward_keeps_carousel_up_by_default() {
        let (mut reveal, mut pivot) = setup(HidePolicy::LeaveBack);
        reveal.on_scroll(rect_at(2100.0), VH, &mut pivot);
        reveal.on_scroll(rect_at(5000.0), VH, &mut pivot);
        assert_eq!(reveal.state(), RevealState::Revealed);
        // Frozen at full progress once past the end line.
        assert!((pivot.rotation_angle - TAU).abs() < 1e-5);
        reveal.on_scroll(rect_at(6000.0), VH, &mut pivot);
        assert!((pivot.rotation_angle - TAU).abs() < 1e-5);
    }

    #[test]
    fn either_direction_hides_past_the_end_and_returns() {
        let (mut reveal, mut pivot) = setup(HidePolicy::EitherDirection);
        reveal.on_scroll(rect_at(2100.0), VH, &mut pivot);
        run_for(&mut reveal, &mut pivot, 1.2);
        reveal.on_scroll(rect_at(5000.0), VH, &mut pivot);
        assert_eq!(reveal.state(), RevealState::Hidden);
        run_for(&mut reveal, &mut pivot, 1.0);
        assert_eq!(pivot.vertical_offset, HIDDEN);

        reveal.on_scroll(rect_at(2500.0), VH, &mut pivot);
        assert_eq!(reveal.state(), RevealState::Revealed);
    }

    #[test]
    fn parked_only_when_hidden_settled_and_off_screen() {
        let (mut reveal, mut pivot) = setup(HidePolicy::LeaveBack);
        assert!(reveal.is_parked());
        // Region top at 1000px: just below a 1000px viewport.
        reveal.on_scroll(rect_at(1000.0), VH, &mut pivot);
        assert!(reveal.is_parked());
        // On screen but above the start line: still hidden, but visible.
        reveal.on_scroll(rect_at(1100.0), VH, &mut pivot);
        assert_eq!(reveal.state(), RevealState::Hidden);
        assert!(!reveal.is_parked());

        reveal.on_scroll(rect_at(1500.0), VH, &mut pivot);
        run_for(&mut reveal, &mut pivot, 1.2);
        reveal.on_scroll(rect_at(0.0), VH, &mut pivot);
        assert!(!reveal.is_parked(), "hide tween still running");
        run_for(&mut reveal, &mut pivot, 1.0);
        assert!(reveal.is_parked());
    }

    #[test]
    fn missing_region_does_nothing() {
        let (mut reveal, mut pivot) = setup(HidePolicy::LeaveBack);
        let before = pivot;
        for _ in 0..10 {
            reveal.on_scroll(None, VH, &mut pivot);
            reveal.advance(0.5, &mut pivot);
        }
        assert_eq!(pivot, before);
        assert_eq!(reveal.state(), RevealState::Hidden);
    }

    #[test]
    fn linear_hide_uses_configured_curve() {
        let options = RevealOptions {
            hide: TweenSpec::new(1.0, EasingFunction::Linear),
            ..RevealOptions::default()
        };
        let mut reveal = ScrollReveal::new(&options, HIDDEN);
        let mut pivot = PivotTransform::hidden(HIDDEN);
        reveal.on_scroll(rect_at(1500.0), VH, &mut pivot);
        run_for(&mut reveal, &mut pivot, 1.2);
        reveal.on_scroll(rect_at(0.0), VH, &mut pivot);
        reveal.advance(0.5, &mut pivot);
        assert!((pivot.vertical_offset - HIDDEN / 2.0).abs() < 1e-4);
    }
}
