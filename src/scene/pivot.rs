//! Carousel pivot node.

use glam::{Mat4, Vec3};

use super::carousel::CarouselItem;

/// Transform of the carousel pivot: a vertical offset and a spin about the
/// Y axis. Written only by the scroll reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotTransform {
    /// World-space Y translation.
    pub vertical_offset: f32,
    /// Rotation about +Y in radians.
    pub rotation_angle: f32,
}

impl PivotTransform {
    /// Unrotated transform parked at `offset`.
    #[must_use]
    pub const fn hidden(offset: f32) -> Self {
        Self {
            vertical_offset: offset,
            rotation_angle: 0.0,
        }
    }

    /// Local-to-world matrix: rotate about the pivot, then translate.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.vertical_offset, 0.0))
            * Mat4::from_rotation_y(self.rotation_angle)
    }
}

/// Parent node carrying every carousel plane as one rigid unit.
///
/// The transform and the child list have separate owners: the scroll
/// reveal mutates [`PivotGroup::transform_mut`], the carousel builder only
/// ever [`attach`](PivotGroup::attach)es.
#[derive(Debug, Clone)]
pub struct PivotGroup {
    transform: PivotTransform,
    items: Vec<CarouselItem>,
}

impl PivotGroup {
    /// Empty pivot parked at `hidden_offset`.
    #[must_use]
    pub fn new(hidden_offset: f32) -> Self {
        Self {
            transform: PivotTransform::hidden(hidden_offset),
            items: Vec::new(),
        }
    }

    /// Current transform.
    #[must_use]
    pub fn transform(&self) -> &PivotTransform {
        &self.transform
    }

    /// Mutable transform, for the scroll reveal.
    pub fn transform_mut(&mut self) -> &mut PivotTransform {
        &mut self.transform
    }

    /// Attached planes in arrival order.
    #[must_use]
    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    /// Whether a plane for ring slot `index` is already attached.
    #[must_use]
    pub fn has_slot(&self, index: usize) -> bool {
        self.items.iter().any(|item| item.index() == index)
    }

    /// Attach a plane. Items are never removed or modified afterwards.
    pub fn attach(&mut self, item: CarouselItem) {
        self.items.push(item);
    }

    /// World matrix of an attached plane, including the pivot transform.
    #[must_use]
    pub fn world_matrix(&self, item: &CarouselItem) -> Mat4 {
        self.transform.matrix() * item.local_matrix()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn matrix_rotates_then_lifts() {
        let t = PivotTransform {
            vertical_offset: -50.0,
            rotation_angle: FRAC_PI_2,
        };
        let p = t.matrix().transform_point3(Vec3::new(7.0, 0.0, 0.0));
        // +X spun a quarter turn about +Y lands on -Z.
        assert!((p - Vec3::new(0.0, -50.0, -7.0)).length() < 1e-4);
    }

    #[test]
    fn new_pivot_is_hidden_and_empty() {
        let group = PivotGroup::new(-50.0);
        assert_eq!(*group.transform(), PivotTransform::hidden(-50.0));
        assert!(group.items().is_empty());
    }
}
