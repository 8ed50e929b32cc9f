//! Carousel ring layout and plane construction.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec2, Vec3};

use super::loader::{LoadOutcome, PlaneImage};
use super::pivot::PivotGroup;
use crate::options::CarouselOptions;

/// Even spacing of `count` slots on a circle in the pivot's XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselLayout {
    count: usize,
    radius: f32,
}

impl CarouselLayout {
    /// Layout for `count` slots at `radius`.
    #[must_use]
    pub const fn new(count: usize, radius: f32) -> Self {
        Self { count, radius }
    }

    /// Number of slots.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Ring radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Angle of slot `index`: `2π·index/count`.
    #[must_use]
    pub fn angle(&self, index: usize) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        index as f32 / self.count as f32 * TAU
    }

    /// Pivot-local position of slot `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Vec3 {
        let angle = self.angle(index);
        Vec3::new(angle.cos() * self.radius, 0.0, angle.sin() * self.radius)
    }

    /// Rotation that turns a plane's +Z face toward the pivot origin.
    #[must_use]
    pub fn orientation(&self, index: usize) -> Quat {
        let angle = self.angle(index);
        // Facing direction is -position; yaw only, so the image stays
        // upright.
        Quat::from_rotation_y(f32::atan2(-angle.cos(), -angle.sin()))
    }
}

/// One image plane on the ring. Immutable once created.
///
/// The item holds geometry only; its pixels travel to the renderer once
/// as a [`PlaneUpload`].
#[derive(Debug, Clone)]
pub struct CarouselItem {
    source_uri: String,
    index: usize,
    angular_position: f32,
    position: Vec3,
    rotation: Quat,
    size: Vec2,
}

impl CarouselItem {
    /// Source locator of the image.
    #[must_use]
    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }

    /// Ring slot (index in the configured image list).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Angle around the ring in radians.
    #[must_use]
    pub fn angular_position(&self) -> f32 {
        self.angular_position
    }

    /// Pivot-local position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Pivot-local rotation.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Plane width and height.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Direction the textured face points, in pivot space.
    #[must_use]
    pub fn facing(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Pivot-local matrix mapping the unit quad onto this plane.
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.size.extend(1.0),
            self.rotation,
            self.position,
        )
    }
}

/// Pixels for a newly attached plane, handed to the renderer once.
#[derive(Debug)]
pub struct PlaneUpload {
    /// Ring slot of the plane.
    pub slot: usize,
    /// Source locator, used as the texture label.
    pub uri: String,
    /// Pixels to upload.
    pub image: PlaneImage,
}

/// Turns finished image loads into planes on the pivot.
///
/// Slots come from the image's index in the configured list, so planes
/// land in the right place whatever order loads finish in, and a failed
/// load leaves a gap rather than shifting its neighbours.
#[derive(Debug, Clone)]
pub struct CarouselBuilder {
    uris: Vec<String>,
    layout: CarouselLayout,
    plane_size: Vec2,
    hidden_offset: f32,
}

impl CarouselBuilder {
    /// Builder for the configured image list and ring.
    #[must_use]
    pub fn new(options: &CarouselOptions) -> Self {
        Self {
            uris: options.images.clone(),
            layout: CarouselLayout::new(options.images.len(), options.radius),
            plane_size: Vec2::from(options.plane_size),
            hidden_offset: options.hidden_offset,
        }
    }

    /// Image locators in slot order.
    #[must_use]
    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    /// Ring layout.
    #[must_use]
    pub fn layout(&self) -> &CarouselLayout {
        &self.layout
    }

    /// Empty pivot parked at the hidden offset, ready for planes.
    #[must_use]
    pub fn build(&self) -> PivotGroup {
        PivotGroup::new(self.hidden_offset)
    }

    /// Attach the plane for a finished load and return its pixels for
    /// upload. Failed loads, unknown slots and repeated slots are logged
    /// and dropped.
    pub fn place(
        &self,
        outcome: LoadOutcome,
        pivot: &mut PivotGroup,
    ) -> Option<PlaneUpload> {
        let LoadOutcome { index, uri, result } = outcome;
        let image = match result {
            Ok(image) => image,
            Err(e) => {
                log::warn!("carousel slot {index} skipped: {e}");
                return None;
            }
        };
        if index >= self.layout.count() || pivot.has_slot(index) {
            log::warn!("ignoring load for unexpected carousel slot {index}");
            return None;
        }

        let (width, height) = image.dimensions();
        log::debug!("carousel slot {index} ready: {uri} ({width}x{height})");
        pivot.attach(CarouselItem {
            source_uri: uri.clone(),
            index,
            angular_position: self.layout.angle(index),
            position: self.layout.position(index),
            rotation: self.layout.orientation(index),
            size: self.plane_size,
        });
        Some(PlaneUpload {
            slot: index,
            uri,
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TourviewError;
    use crate::scene::DecodedImage;

    fn outcome(index: usize) -> LoadOutcome {
        LoadOutcome {
            index,
            uri: format!("/images/event_{}.jpg", index + 1),
            result: Ok(DecodedImage::solid(2, 2, [255, 255, 255, 255]).into()),
        }
    }

    fn failed(index: usize) -> LoadOutcome {
        LoadOutcome {
            index,
            uri: "missing.jpg".to_owned(),
            result: Err(TourviewError::image_load("missing.jpg", "404")),
        }
    }

    fn assert_on_ring(item: &CarouselItem, count: usize, radius: f32) {
        let expected = item.index() as f32 / count as f32 * TAU;
        assert!((item.angular_position() - expected).abs() < 1e-6);
        assert!((item.position().length() - radius).abs() < 1e-4);
        assert!(item.position().y.abs() < 1e-6);
        let toward_origin = -item.position().normalize();
        assert!(
            item.facing().dot(toward_origin) > 0.9999,
            "slot {} faces {:?}",
            item.index(),
            item.facing()
        );
    }

    #[test]
    fn layout_spaces_slots_evenly() {
        let layout = CarouselLayout::new(4, 7.0);
        assert!((layout.position(0) - Vec3::new(7.0, 0.0, 0.0)).length() < 1e-5);
        assert!((layout.position(1) - Vec3::new(0.0, 0.0, 7.0)).length() < 1e-5);
        assert!((layout.position(2) - Vec3::new(-7.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn every_slot_faces_the_pivot_origin() {
        let layout = CarouselLayout::new(5, 7.0);
        for i in 0..5 {
            let facing = layout.orientation(i) * Vec3::Z;
            let toward = -layout.position(i).normalize();
            assert!(facing.dot(toward) > 0.9999, "slot {i}");
            // Upright: local +Y stays world +Y.
            assert!((layout.orientation(i) * Vec3::Y - Vec3::Y).length() < 1e-5);
        }
    }

    #[test]
    fn out_of_order_loads_land_in_their_slots() {
        let options = CarouselOptions::default();
        let builder = CarouselBuilder::new(&options);
        let mut pivot = builder.build();
        for index in [3, 0, 4, 1, 2] {
            let upload = builder.place(outcome(index), &mut pivot).unwrap();
            assert_eq!(upload.slot, index);
            assert_eq!(upload.image.dimensions(), (2, 2));
        }
        assert_eq!(pivot.items().len(), 5);
        for item in pivot.items() {
            assert_on_ring(item, 5, options.radius);
        }
    }

    #[test]
    fn failures_leave_gaps_without_compaction() {
        let options = CarouselOptions::default();
        let builder = CarouselBuilder::new(&options);
        let mut pivot = builder.build();
        assert!(builder.place(outcome(0), &mut pivot).is_some());
        assert!(builder.place(failed(1), &mut pivot).is_none());
        assert!(builder.place(outcome(2), &mut pivot).is_some());
        assert_eq!(pivot.items().len(), 2);
        // Slot 2 keeps its 2/5 angle even though slot 1 never arrived.
        assert_on_ring(&pivot.items()[1], 5, options.radius);
        assert!((pivot.items()[1].angular_position() - 2.0 / 5.0 * TAU).abs() < 1e-6);
    }

    #[test]
    fn duplicate_and_unknown_slots_are_dropped() {
        let builder = CarouselBuilder::new(&CarouselOptions::default());
        let mut pivot = builder.build();
        assert!(builder.place(outcome(1), &mut pivot).is_some());
        assert!(builder.place(outcome(1), &mut pivot).is_none());
        assert!(builder.place(outcome(9), &mut pivot).is_none());
        assert_eq!(pivot.items().len(), 1);
    }

    #[test]
    fn build_starts_hidden() {
        let builder = CarouselBuilder::new(&CarouselOptions::default());
        let pivot = builder.build();
        assert_eq!(pivot.transform().vertical_offset, -50.0);
        assert_eq!(pivot.transform().rotation_angle, 0.0);
    }

    #[test]
    fn world_matrix_applies_plane_size() {
        let builder = CarouselBuilder::new(&CarouselOptions::default());
        let mut pivot = builder.build();
        assert!(builder.place(outcome(0), &mut pivot).is_some());
        let m = pivot.world_matrix(&pivot.items()[0]);
        let corner = m.transform_point3(Vec3::new(0.5, 0.5, 0.0));
        let center = m.transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(7.0, -50.0, 0.0)).length() < 1e-4);
        // Half diagonal of a 4 x 2.6 plane.
        assert!(((corner - center).length() - (2.0f32.hypot(1.3))).abs() < 1e-4);
    }
}
