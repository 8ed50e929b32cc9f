//! Scroll trigger geometry.
//!
//! A trigger watches one page region through its viewport-relative
//! bounding rectangle. Two anchor lines, `start` and `end`, pair an edge of
//! the region with a height in the viewport: `"top 80%"` is crossed when the
//! region's top edge reaches 80 % of the viewport height. Progress runs
//! from 0 at the start line to 1 at the end line and is linear in the
//! scroll offset, since both lines move with the page.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TourviewError;

/// Edge of the tracked element an anchor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementEdge {
    /// Top edge.
    Top,
    /// Vertical midpoint.
    Center,
    /// Bottom edge.
    Bottom,
}

impl ElementEdge {
    fn keyword(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }

    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// A trigger line: an element edge meeting a viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerAnchor {
    /// Which edge of the region.
    pub edge: ElementEdge,
    /// Viewport height fraction measured from the top (0 = top, 1 = bottom).
    pub viewport_fraction: f32,
}

impl TriggerAnchor {
    /// Anchor at `edge` meeting `viewport_fraction` of the viewport height.
    #[must_use]
    pub const fn new(edge: ElementEdge, viewport_fraction: f32) -> Self {
        Self {
            edge,
            viewport_fraction,
        }
    }

    /// Viewport-relative y of the line, in the units of `viewport_height`.
    #[must_use]
    pub fn viewport_line(&self, viewport_height: f32) -> f32 {
        self.viewport_fraction * viewport_height
    }
}

impl FromStr for TriggerAnchor {
    type Err = TourviewError;

    /// Parse `"<edge> <position>"`, where position is a percentage
    /// (`"80%"`) or one of `top`, `center`, `bottom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            TourviewError::OptionsParse(format!(
                "invalid trigger anchor {s:?}, expected e.g. \"top 80%\""
            ))
        };
        let mut words = s.split_whitespace();
        let (Some(edge), Some(position), None) =
            (words.next(), words.next(), words.next())
        else {
            return Err(invalid());
        };

        let edge = ElementEdge::from_keyword(edge).ok_or_else(invalid)?;
        let viewport_fraction = match position {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            pct => pct
                .strip_suffix('%')
                .and_then(|n| n.parse::<f32>().ok())
                .filter(|n| n.is_finite())
                .map(|n| n / 100.0)
                .ok_or_else(invalid)?,
        };
        Ok(Self::new(edge, viewport_fraction))
    }
}

impl TryFrom<String> for TriggerAnchor {
    type Error = TourviewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TriggerAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = (self.viewport_fraction * 1000.0).round() / 10.0;
        write!(f, "{} {pct}%", self.edge.keyword())
    }
}

impl From<TriggerAnchor> for String {
    fn from(anchor: TriggerAnchor) -> Self {
        anchor.to_string()
    }
}

/// Viewport-relative vertical extent of a region, as reported by
/// `getBoundingClientRect` (CSS pixels, y down, 0 = viewport top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionRect {
    /// Top edge.
    pub top: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl RegionRect {
    /// Rect spanning `top..bottom`.
    #[must_use]
    pub const fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Rect of a region placed `page_top` pixels down the page while the
    /// page is scrolled by `scroll_y`.
    #[must_use]
    pub fn from_page(page_top: f32, height: f32, scroll_y: f32) -> Self {
        let top = page_top - scroll_y;
        Self::new(top, top + height)
    }

    /// Position of the given edge.
    #[must_use]
    pub fn edge(&self, edge: ElementEdge) -> f32 {
        match edge {
            ElementEdge::Top => self.top,
            ElementEdge::Center => (self.top + self.bottom) * 0.5,
            ElementEdge::Bottom => self.bottom,
        }
    }

    /// Whether any part of the region is inside the viewport.
    #[must_use]
    pub fn intersects_viewport(&self, viewport_height: f32) -> bool {
        self.top < viewport_height && self.bottom > 0.0
    }
}

/// Crossing of a trigger line, named from the scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Scrolling down past the start line.
    Enter,
    /// Scrolling down past the end line.
    Leave,
    /// Scrolling up past the end line.
    EnterBack,
    /// Scrolling up past the start line.
    LeaveBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Before,
    Inside,
    After,
}

impl Zone {
    fn of(raw_progress: f32) -> Self {
        if raw_progress < 0.0 {
            Self::Before
        } else if raw_progress > 1.0 {
            Self::After
        } else {
            Self::Inside
        }
    }
}

/// Result of feeding one scroll position to a [`ScrollTrigger`].
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerUpdate {
    /// Progress clamped to [0, 1].
    pub progress: f32,
    /// Whether any part of the region is on screen.
    pub in_view: bool,
    /// Whether `progress` differs from the previous update.
    pub progress_changed: bool,
    /// Lines crossed since the previous update, in crossing order.
    pub events: Vec<TriggerEvent>,
}

/// Tracks one region against a start and end line.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    start: TriggerAnchor,
    end: TriggerAnchor,
    zone: Zone,
    progress: f32,
}

impl ScrollTrigger {
    /// Trigger between `start` and `end`. Before the first update the
    /// region counts as not yet reached.
    #[must_use]
    pub fn new(start: TriggerAnchor, end: TriggerAnchor) -> Self {
        Self {
            start,
            end,
            zone: Zone::Before,
            progress: 0.0,
        }
    }

    /// Unclamped progress for `rect`: negative before the start line,
    /// above 1 past the end line.
    #[must_use]
    pub fn raw_progress(&self, rect: RegionRect, viewport_height: f32) -> f32 {
        // Both distances grow 1:1 with the scroll offset.
        let travelled = self.start.viewport_line(viewport_height)
            - rect.edge(self.start.edge);
        let remaining =
            self.end.viewport_line(viewport_height) - rect.edge(self.end.edge);
        let span = travelled - remaining;

        if span <= f32::EPSILON {
            // Degenerate: the end line is reached no later than the start.
            return if travelled < 0.0 { -1.0 } else { 2.0 };
        }
        travelled / span
    }

    /// Feed the region's current rect and report progress and crossings.
    pub fn update(
        &mut self,
        rect: RegionRect,
        viewport_height: f32,
    ) -> TriggerUpdate {
        let raw = self.raw_progress(rect, viewport_height);
        let zone = Zone::of(raw);
        let progress = raw.clamp(0.0, 1.0);

        let events = match (self.zone, zone) {
            (Zone::Before, Zone::Inside) => vec![TriggerEvent::Enter],
            (Zone::Before, Zone::After) => {
                vec![TriggerEvent::Enter, TriggerEvent::Leave]
            }
            (Zone::Inside, Zone::After) => vec![TriggerEvent::Leave],
            (Zone::After, Zone::Inside) => vec![TriggerEvent::EnterBack],
            (Zone::After, Zone::Before) => {
                vec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack]
            }
            (Zone::Inside, Zone::Before) => vec![TriggerEvent::LeaveBack],
            _ => Vec::new(),
        };

        let progress_changed = progress != self.progress;
        self.zone = zone;
        self.progress = progress;

        TriggerUpdate {
            progress,
            in_view: rect.intersects_viewport(viewport_height),
            progress_changed,
            events,
        }
    }

    /// Progress as of the last update.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VH: f32 = 1000.0;

    fn tour_trigger() -> ScrollTrigger {
        ScrollTrigger::new(
            TriggerAnchor::new(ElementEdge::Top, 0.8),
            TriggerAnchor::new(ElementEdge::Bottom, 0.2),
        )
    }

    // Region 1200px tall, 2000px down the page.
    fn rect_at(scroll_y: f32) -> RegionRect {
        RegionRect::from_page(2000.0, 1200.0, scroll_y)
    }

    #[test]
    fn parses_percent_and_keyword_anchors() {
        let a: TriggerAnchor = "top 80%".parse().unwrap();
        assert_eq!(a.edge, ElementEdge::Top);
        assert!((a.viewport_fraction - 0.8).abs() < 1e-6);

        let b: TriggerAnchor = "bottom top".parse().unwrap();
        assert_eq!(b, TriggerAnchor::new(ElementEdge::Bottom, 0.0));

        let c: TriggerAnchor = "  center   center ".parse().unwrap();
        assert_eq!(c, TriggerAnchor::new(ElementEdge::Center, 0.5));
    }

    #[test]
    fn rejects_malformed_anchors() {
        for bad in ["", "top", "top 80", "left 80%", "top 80% extra", "top x%"]
        {
            assert!(bad.parse::<TriggerAnchor>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn anchor_display_round_trips() {
        let a = TriggerAnchor::new(ElementEdge::Bottom, 0.2);
        assert_eq!(a.to_string(), "bottom 20%");
        assert_eq!(a.to_string().parse::<TriggerAnchor>().unwrap(), a);
    }

    #[test]
    fn progress_is_zero_at_start_line_and_one_at_end_line() {
        let trigger = tour_trigger();
        // Top at 800 => scroll 1200. Bottom at 200 => scroll 3000.
        assert!(trigger.raw_progress(rect_at(1200.0), VH).abs() < 1e-6);
        assert!((trigger.raw_progress(rect_at(3000.0), VH) - 1.0).abs() < 1e-6);
        assert!((trigger.raw_progress(rect_at(2100.0), VH) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn progress_is_monotonic_in_scroll_offset() {
        let trigger = tour_trigger();
        let mut last = f32::NEG_INFINITY;
        for step in 0..=400 {
            let p = trigger.raw_progress(rect_at(step as f32 * 10.0), VH);
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn crossing_events_follow_scroll_direction() {
        let mut trigger = tour_trigger();
        assert!(trigger.update(rect_at(0.0), VH).events.is_empty());
        assert_eq!(
            trigger.update(rect_at(1500.0), VH).events,
            vec![TriggerEvent::Enter]
        );
        assert_eq!(
            trigger.update(rect_at(3500.0), VH).events,
            vec![TriggerEvent::Leave]
        );
        assert_eq!(
            trigger.update(rect_at(2500.0), VH).events,
            vec![TriggerEvent::EnterBack]
        );
        assert_eq!(
            trigger.update(rect_at(100.0), VH).events,
            vec![TriggerEvent::LeaveBack]
        );
    }

    #[test]
    fn jumping_over_the_region_reports_both_crossings() {
        let mut trigger = tour_trigger();
        assert_eq!(
            trigger.update(rect_at(5000.0), VH).events,
            vec![TriggerEvent::Enter, TriggerEvent::Leave]
        );
        let back = trigger.update(rect_at(0.0), VH);
        assert_eq!(
            back.events,
            vec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack]
        );
        assert_eq!(back.progress, 0.0);
        assert!(back.progress_changed);
    }

    #[test]
    fn progress_changes_only_when_it_moves() {
        let mut trigger = tour_trigger();
        let first = trigger.update(rect_at(0.0), VH);
        assert!(!first.progress_changed);
        let inside = trigger.update(rect_at(2100.0), VH);
        assert!(inside.progress_changed);
        assert!(inside.progress > 0.0);
        assert!(!trigger.update(rect_at(2100.0), VH).progress_changed);
    }

    #[test]
    fn in_view_tracks_viewport_intersection() {
        assert!(!RegionRect::new(1000.0, 2000.0).intersects_viewport(VH));
        assert!(RegionRect::new(999.0, 2000.0).intersects_viewport(VH));
        assert!(RegionRect::new(-500.0, 1.0).intersects_viewport(VH));
        assert!(!RegionRect::new(-500.0, 0.0).intersects_viewport(VH));
    }

    #[test]
    fn degenerate_span_still_orders_zones() {
        // Tiny region with start below end: the lines invert.
        let trigger = ScrollTrigger::new(
            TriggerAnchor::new(ElementEdge::Top, 0.0),
            TriggerAnchor::new(ElementEdge::Bottom, 1.0),
        );
        assert!(trigger.raw_progress(RegionRect::new(10.0, 20.0), VH) < 0.0);
        assert!(trigger.raw_progress(RegionRect::new(-10.0, 0.0), VH) > 1.0);
    }
}
