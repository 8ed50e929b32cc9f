//! Staggered entrance animations for page content.
//!
//! Each animation moves a list of targets from a starting [`Pose`] to
//! [`Pose::REST`], the targets offset in time by the stagger. Playing
//! runs the shared timeline forward and reversing runs it backward, so a
//! reversed entrance retraces the same eased path.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::options::EntranceSpec;
use crate::scroll::{
    ElementEdge, RegionRect, ScrollTrigger, TriggerAnchor, TriggerEvent,
};
use crate::util::easing::EasingFunction;

/// Visual state of one animated element: opacity plus a 2D offset (CSS
/// pixels) and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Pose {
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset.
    pub y: f32,
    /// Uniform scale.
    pub scale: f32,
}

impl Pose {
    /// The element's natural, fully shown pose.
    pub const REST: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Component-wise interpolation.
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            opacity: mix(self.opacity, to.opacity),
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            scale: mix(self.scale, to.scale),
        }
    }

    /// Inline CSS `transform` value.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.4})",
            self.x, self.y, self.scale
        )
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::REST
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Idle,
    Forward,
    Backward,
}

/// Timeline animating `targets` elements from a start pose to rest.
#[derive(Debug, Clone)]
pub struct EntranceAnimation {
    from: Pose,
    duration: f32,
    stagger: f32,
    ease: EasingFunction,
    targets: usize,
    time: f32,
    direction: Direction,
    reached_end: bool,
}

impl EntranceAnimation {
    /// Animation over `targets` elements, sitting at its start pose.
    #[must_use]
    pub fn new(spec: &EntranceSpec, targets: usize) -> Self {
        Self {
            from: spec.from,
            duration: spec.duration.max(0.0),
            stagger: spec.stagger.max(0.0),
            ease: spec.ease,
            targets,
            time: 0.0,
            direction: Direction::Idle,
            reached_end: false,
        }
    }

    /// Number of animated elements.
    #[must_use]
    pub fn targets(&self) -> usize {
        self.targets
    }

    /// Length of the whole timeline, last target included.
    #[must_use]
    pub fn total_duration(&self) -> f32 {
        if self.targets == 0 {
            return 0.0;
        }
        self.duration + self.stagger * (self.targets - 1) as f32
    }

    /// Run forward from the current time.
    pub fn play(&mut self) {
        self.direction = Direction::Forward;
    }

    /// Run backward from the current time.
    pub fn reverse(&mut self) {
        self.direction = Direction::Backward;
        self.reached_end = false;
    }

    /// Whether the timeline is still moving.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.direction != Direction::Idle
    }

    /// Whether every target has reached rest.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.reached_end
    }

    /// Step the timeline by `dt` seconds. Returns whether poses changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        if dt <= 0.0 {
            return false;
        }
        let total = self.total_duration();
        match self.direction {
            Direction::Idle => false,
            Direction::Forward => {
                self.time = (self.time + dt).min(total);
                if self.time >= total {
                    self.direction = Direction::Idle;
                    self.reached_end = true;
                }
                true
            }
            Direction::Backward => {
                self.time = (self.time - dt).max(0.0);
                if self.time <= 0.0 {
                    self.direction = Direction::Idle;
                }
                true
            }
        }
    }

    /// Current pose of target `index`.
    #[must_use]
    pub fn sample(&self, index: usize) -> Pose {
        let start = self.stagger * index as f32;
        let local = if self.duration > 0.0 {
            ((self.time - start) / self.duration).clamp(0.0, 1.0)
        } else if self.time > start || self.reached_end {
            1.0
        } else {
            0.0
        };
        self.from.lerp(Pose::REST, self.ease.evaluate(local))
    }

    /// Poses of every target.
    #[must_use]
    pub fn poses(&self) -> Vec<Pose> {
        (0..self.targets).map(|i| self.sample(i)).collect()
    }
}

/// An entrance that plays when its element scrolls in past the trigger
/// line and reverses when scrolled back above it.
#[derive(Debug, Clone)]
pub struct ScrollEntrance {
    trigger: ScrollTrigger,
    animation: EntranceAnimation,
}

impl ScrollEntrance {
    /// Scroll-started entrance over `targets` elements.
    #[must_use]
    pub fn new(spec: &EntranceSpec, targets: usize) -> Self {
        Self {
            // Ends when the element's bottom leaves the top of the viewport.
            trigger: ScrollTrigger::new(
                spec.start,
                TriggerAnchor::new(ElementEdge::Bottom, 0.0),
            ),
            animation: EntranceAnimation::new(spec, targets),
        }
    }

    /// The underlying animation.
    #[must_use]
    pub fn animation(&self) -> &EntranceAnimation {
        &self.animation
    }

    /// Feed the element's rect. Absent elements are ignored.
    pub fn on_scroll(&mut self, region: Option<RegionRect>, viewport_height: f32) {
        let Some(rect) = region else {
            return;
        };
        for event in self.trigger.update(rect, viewport_height).events {
            match event {
                TriggerEvent::Enter => self.animation.play(),
                TriggerEvent::LeaveBack => self.animation.reverse(),
                TriggerEvent::Leave | TriggerEvent::EnterBack => {}
            }
        }
    }

    /// Step the animation. Returns whether poses changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.animation.advance(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EntranceOptions;

    fn hero() -> EntranceAnimation {
        EntranceAnimation::new(&EntranceOptions::default().hero, 3)
    }

    #[test]
    fn idle_animation_holds_the_start_pose() {
        let mut anim = hero();
        assert!(!anim.advance(1.0));
        let pose = anim.sample(0);
        assert_eq!(pose.opacity, 0.0);
        assert_eq!(pose.y, 30.0);
    }

    #[test]
    fn stagger_offsets_targets() {
        let mut anim = hero();
        assert!((anim.total_duration() - 1.4).abs() < 1e-6);
        anim.play();
        let _ = anim.advance(0.5);
        let first = anim.sample(0);
        let second = anim.sample(1);
        let third = anim.sample(2);
        assert!(first.opacity > second.opacity);
        assert!(second.opacity > third.opacity);
        assert!(third.opacity > 0.0);
    }

    #[test]
    fn playing_through_reaches_rest() {
        let mut anim = hero();
        anim.play();
        for _ in 0..100 {
            let _ = anim.advance(1.0 / 60.0);
        }
        assert!(anim.is_complete());
        assert!(!anim.is_running());
        for pose in anim.poses() {
            assert_eq!(pose, Pose::REST);
        }
    }

    #[test]
    fn reverse_returns_to_start() {
        let mut anim = hero();
        anim.play();
        let _ = anim.advance(0.7);
        anim.reverse();
        let _ = anim.advance(5.0);
        assert_eq!(anim.sample(0).opacity, 0.0);
        assert_eq!(anim.sample(2).y, 30.0);
        assert!(!anim.is_complete());
    }

    #[test]
    fn scroll_entrance_plays_on_enter_and_reverses_on_leave_back() {
        let spec = EntranceOptions::default().about_visual;
        let mut entrance = ScrollEntrance::new(&spec, 1);
        // Element 600px tall, top at page y 3000, viewport 1000.
        let rect = |scroll_y: f32| Some(RegionRect::from_page(3000.0, 600.0, scroll_y));

        entrance.on_scroll(rect(0.0), 1000.0);
        assert!(!entrance.animation().is_running());

        entrance.on_scroll(rect(2300.0), 1000.0);
        assert!(entrance.animation().is_running());
        let _ = entrance.advance(2.0);
        assert_eq!(entrance.animation().sample(0), Pose::REST);

        entrance.on_scroll(rect(0.0), 1000.0);
        let _ = entrance.advance(2.0);
        let pose = entrance.animation().sample(0);
        assert_eq!(pose.opacity, 0.0);
        assert_eq!(pose.x, 50.0);
        assert!((pose.scale - 0.95).abs() < 1e-6);
    }

    #[test]
    fn absent_element_is_ignored() {
        let spec = EntranceOptions::default().about_content;
        let mut entrance = ScrollEntrance::new(&spec, 2);
        entrance.on_scroll(None, 1000.0);
        assert!(!entrance.advance(1.0));
    }

    #[test]
    fn css_transform_formats_offsets() {
        let pose = Pose {
            opacity: 0.5,
            x: 50.0,
            y: 0.0,
            scale: 0.95,
        };
        assert_eq!(pose.css_transform(), "translate(50.00px, 0.00px) scale(0.9500)");
    }
}
