//! Navbar shrink-on-scroll.

/// Tracks whether the page has scrolled past the navbar threshold.
#[derive(Debug, Clone)]
pub struct NavbarState {
    threshold: f32,
    scrolled: bool,
}

impl NavbarState {
    /// Unscrolled navbar flipping at `threshold` pixels.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            scrolled: false,
        }
    }

    /// Whether the navbar is in its scrolled state.
    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feed the scroll offset. Returns the new state when it flips.
    pub fn update(&mut self, scroll_y: f32) -> Option<bool> {
        let scrolled = scroll_y > self.threshold;
        (scrolled != self.scrolled).then(|| {
            self.scrolled = scrolled;
            scrolled
        })
    }
}
