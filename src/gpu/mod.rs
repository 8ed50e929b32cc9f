//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, depth and image textures,
//! and bind group layout helpers.

/// Bind group layout entries, samplers and uniform buffers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth target and sampled image textures.
pub mod texture;

pub use render_context::{RenderContext, RenderContextError};
pub use texture::{DepthTarget, ImageTexture, DEPTH_FORMAT};
