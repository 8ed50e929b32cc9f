//! Scene contents: the carousel pivot and its planes, lights, and the
//! viewport they are rendered into.

pub mod carousel;
pub mod lights;
pub mod loader;
pub mod pivot;
pub mod viewport;

pub use carousel::{CarouselBuilder, CarouselItem, CarouselLayout, PlaneUpload};
pub use lights::{AmbientLight, LightsUniform, PointLight, SceneLights};
pub use loader::{
    fit_dimensions, DecodedImage, ImageLoader, LoadOutcome, LoadSender, PlaneImage,
};
pub use pivot::{PivotGroup, PivotTransform};
pub use viewport::{clamp_pixel_ratio, Viewport};
