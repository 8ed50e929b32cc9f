//! Per-frame delta time.

use web_time::{Duration, Instant};

/// Longest step fed to animations after a stall (tab switch, debugger).
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Seconds to advance animations for a measured frame duration, clamped
/// so a long stall does not skip whole animations. For hosts with their
/// own clock, e.g. `requestAnimationFrame` timestamps.
#[must_use]
pub fn clamp_step(elapsed: Duration) -> f32 {
    elapsed.min(MAX_FRAME_STEP).as_secs_f32()
}

/// Frame clock for hosts without one of their own.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a new frame timer starting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Mark the start of a frame and return the clamped seconds since the
    /// previous one.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        clamp_step(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_stalls_are_clamped() {
        assert!((clamp_step(Duration::from_secs(3)) - 0.1).abs() < 1e-6);
        assert!((clamp_step(Duration::from_millis(16)) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn tick_never_exceeds_the_clamp() {
        let mut timing = FrameTiming::new();
        let step = timing.tick();
        assert!((0.0..=0.1).contains(&step));
    }
}
