//! Scene light set and its GPU layout.

use glam::Vec3;

use crate::options::LightingOptions;

/// Decode one sRGB-encoded channel to linear.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_color(srgb: [f32; 3]) -> Vec3 {
    Vec3::from(srgb.map(srgb_to_linear))
}

/// Uniform light filling the scene from every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// Linear RGB colour.
    pub color: Vec3,
    /// Scalar intensity.
    pub intensity: f32,
}

/// Omnidirectional light at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Linear RGB colour.
    pub color: Vec3,
    /// Scalar intensity.
    pub intensity: f32,
    /// World-space position.
    pub position: Vec3,
    /// Falloff distance. Zero means no falloff.
    pub range: f32,
}

/// The two lights the scene carries, plus how strongly they shade planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLights {
    /// Ambient term.
    pub ambient: AmbientLight,
    /// Gold point light.
    pub point: PointLight,
    /// Blend between unlit (0) and fully lit (1) plane colour.
    pub plane_shading: f32,
}

impl SceneLights {
    /// Lights described by `options`, with colours decoded to linear.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            ambient: AmbientLight {
                color: linear_color(options.ambient_color),
                intensity: options.ambient_intensity,
            },
            point: PointLight {
                color: linear_color(options.point_color),
                intensity: options.point_intensity,
                position: Vec3::from(options.point_position),
                range: options.point_range,
            },
            plane_shading: options.plane_shading.clamp(0.0, 1.0),
        }
    }

    /// Pack for upload.
    #[must_use]
    pub fn uniform(&self) -> LightsUniform {
        LightsUniform {
            ambient: (self.ambient.color * self.ambient.intensity).extend(1.0).to_array(),
            point_color: (self.point.color * self.point.intensity)
                .extend(self.point.range)
                .to_array(),
            point_position: self.point.position.extend(self.plane_shading).to_array(),
        }
    }
}

/// GPU layout of [`SceneLights`]. Colours are pre-multiplied by intensity.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    /// Ambient colour; w unused.
    pub ambient: [f32; 4],
    /// Point colour; w = range.
    pub point_color: [f32; 4],
    /// Point position; w = plane shading factor.
    pub point_position: [f32; 4],
}
