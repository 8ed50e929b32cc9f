//! Canvas size and device pixel ratio bookkeeping.

/// Clamp a reported device pixel ratio to `[0, max]`. NaN, infinite and
/// negative ratios fall back to 1.
#[must_use]
pub fn clamp_pixel_ratio(device_ratio: f32, max: f32) -> f32 {
    let ratio = if device_ratio.is_finite() && device_ratio >= 0.0 {
        device_ratio
    } else {
        1.0
    };
    if max.is_finite() && max > 0.0 {
        ratio.min(max)
    } else {
        ratio
    }
}

/// Logical viewport plus the pixel ratio the surface renders at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    device_ratio: f32,
    max_ratio: f32,
}

impl Viewport {
    /// Viewport of `width` x `height` CSS pixels.
    #[must_use]
    pub fn new(width: f32, height: f32, device_ratio: f32, max_ratio: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            device_ratio,
            max_ratio,
        }
    }

    /// Apply a window resize. The pixel ratio is re-read as well since
    /// moving between monitors changes it.
    pub fn resize(&mut self, width: f32, height: f32, device_ratio: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.device_ratio = device_ratio;
    }

    /// Logical width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Logical height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Effective pixel ratio, capped at the configured maximum.
    #[must_use]
    pub fn pixel_ratio(&self) -> f32 {
        clamp_pixel_ratio(self.device_ratio, self.max_ratio)
    }

    /// Surface size in physical pixels, at least 1x1.
    #[must_use]
    pub fn physical_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        let w = (self.width * ratio).round().max(1.0) as u32;
        let h = (self.height * ratio).round().max(1.0) as u32;
        (w, h)
    }

    /// Width over height. A zero-height viewport reports 1.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 && self.width > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_capped() {
        assert_eq!(clamp_pixel_ratio(3.0, 2.0), 2.0);
        assert_eq!(clamp_pixel_ratio(1.5, 2.0), 1.5);
        assert_eq!(clamp_pixel_ratio(f32::NAN, 2.0), 1.0);
        assert_eq!(clamp_pixel_ratio(-1.0, 2.0), 1.0);
    }

    #[test]
    fn zero_ratio_is_kept_and_surface_floors_at_one_pixel() {
        assert_eq!(clamp_pixel_ratio(0.0, 2.0), 0.0);
        let vp = Viewport::new(1280.0, 720.0, 0.0, 2.0);
        assert_eq!(vp.pixel_ratio(), 0.0);
        assert_eq!(vp.physical_size(), (1, 1));
    }

    #[test]
    fn physical_size_uses_capped_ratio() {
        let vp = Viewport::new(1280.0, 720.0, 3.0, 2.0);
        assert_eq!(vp.physical_size(), (2560, 1440));
        assert!((vp.aspect() - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn resize_updates_aspect_and_ratio() {
        let mut vp = Viewport::new(1280.0, 720.0, 1.0, 2.0);
        vp.resize(600.0, 800.0, 1.5);
        assert!((vp.aspect() - 0.75).abs() < 1e-6);
        assert_eq!(vp.pixel_ratio(), 1.5);
        assert_eq!(vp.physical_size(), (900, 1200));
    }

    #[test]
    fn degenerate_sizes_stay_renderable() {
        let vp = Viewport::new(0.0, 0.0, 1.0, 2.0);
        assert_eq!(vp.physical_size(), (1, 1));
        assert_eq!(vp.aspect(), 1.0);
    }
}
