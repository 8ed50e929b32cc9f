//! Depth buffer and sampled image textures.

use crate::error::TourviewError;
use crate::scene::PlaneImage;

/// Depth format shared by the depth target and every pipeline that tests
/// against it.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth attachment sized to the surface.
pub struct DepthTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTarget {
    /// Create a depth texture of the given size.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Texture extent for a `width` x `height` image.
///
/// # Errors
///
/// Returns [`TourviewError::ImageLoad`] when either side is zero or
/// exceeds `max_dim`.
pub fn image_extent(
    label: &str,
    (width, height): (u32, u32),
    max_dim: u32,
) -> Result<wgpu::Extent3d, TourviewError> {
    if width == 0 || height == 0 {
        return Err(TourviewError::image_load(label, "image has no pixels"));
    }
    if width > max_dim || height > max_dim {
        return Err(TourviewError::image_load(
            label,
            format!("{width}x{height} exceeds the {max_dim}px texture limit"),
        ));
    }
    Ok(wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    })
}

/// An uploaded carousel image.
pub struct ImageTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl ImageTexture {
    /// Upload plane pixels as an sRGB texture. Decoded pixels larger than
    /// the device's 2D texture limit are scaled down first.
    ///
    /// # Errors
    ///
    /// Returns [`TourviewError::ImageLoad`] when the image is empty, or is
    /// a browser bitmap larger than the texture limit.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: PlaneImage,
    ) -> Result<Self, TourviewError> {
        let max_dim = device.limits().max_texture_dimension_2d;
        match image {
            PlaneImage::Decoded(decoded) => {
                let decoded = decoded.fit_within(max_dim);
                let size = image_extent(
                    label,
                    (decoded.width(), decoded.height()),
                    max_dim,
                )?;
                let texture = create_image_texture(
                    device,
                    label,
                    size,
                    wgpu::TextureUsages::TEXTURE_BINDING
                        | wgpu::TextureUsages::COPY_DST,
                );
                queue.write_texture(
                    wgpu::TexelCopyTextureInfo {
                        texture: &texture,
                        mip_level: 0,
                        origin: wgpu::Origin3d::ZERO,
                        aspect: wgpu::TextureAspect::All,
                    },
                    decoded.rgba(),
                    wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(size.width * 4),
                        rows_per_image: Some(size.height),
                    },
                    size,
                );
                Ok(Self::from_texture(texture))
            }
            #[cfg(all(feature = "web", target_arch = "wasm32"))]
            PlaneImage::Bitmap(bitmap) => {
                let size =
                    image_extent(label, (bitmap.width(), bitmap.height()), max_dim)?;
                // External copies need the texture to be renderable too.
                let texture = create_image_texture(
                    device,
                    label,
                    size,
                    wgpu::TextureUsages::TEXTURE_BINDING
                        | wgpu::TextureUsages::COPY_DST
                        | wgpu::TextureUsages::RENDER_ATTACHMENT,
                );
                queue.copy_external_image_to_texture(
                    &wgpu::CopyExternalImageSourceInfo {
                        source: wgpu::ExternalImageSource::ImageBitmap(bitmap),
                        origin: wgpu::Origin2d::ZERO,
                        flip_y: false,
                    },
                    wgpu::CopyExternalImageDestInfo {
                        texture: &texture,
                        mip_level: 0,
                        origin: wgpu::Origin3d::ZERO,
                        aspect: wgpu::TextureAspect::All,
                        color_space: wgpu::PredefinedColorSpace::Srgb,
                        premultiplied_alpha: false,
                    },
                    size,
                );
                Ok(Self::from_texture(texture))
            }
        }
    }

    fn from_texture(texture: wgpu::Texture) -> Self {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

fn create_image_texture(
    device: &wgpu::Device,
    label: &str,
    size: wgpu::Extent3d,
    usage: wgpu::TextureUsages,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage,
        view_formats: &[],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{fit_dimensions, DecodedImage};

    #[test]
    fn extent_rejects_oversized_and_empty_images() {
        let ok = image_extent("a.jpg", (8192, 4096), 8192).unwrap();
        assert_eq!((ok.width, ok.height, ok.depth_or_array_layers), (8192, 4096, 1));
        assert!(image_extent("a.jpg", (8193, 10), 8192).is_err());
        assert!(image_extent("a.jpg", (10, 20000), 8192).is_err());
        assert!(image_extent("a.jpg", (0, 10), 8192).is_err());
    }

    #[test]
    fn fitted_images_always_pass_the_extent_check() {
        for (w, h, max) in [(16385, 9000, 16384), (30000, 2, 8192), (2048, 2048, 2048)] {
            let fitted = fit_dimensions(w, h, max);
            assert!(image_extent("a.jpg", fitted, max).is_ok());
        }
        let image = DecodedImage::solid(9000, 3, [1, 2, 3, 255]).fit_within(4096);
        assert!(image_extent("a.jpg", (image.width(), image.height()), 4096).is_ok());
    }
}
