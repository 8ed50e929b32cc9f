//! wgpu host for the carousel scene.
//!
//! [`SceneRenderer`] owns the GPU context and draws whatever state a
//! [`Stage`] holds. The only thing it takes from the stage is the queue of
//! pending plane uploads.

pub mod plane;

use crate::camera::CameraUniform;
use crate::error::TourviewError;
use crate::gpu::{DepthTarget, RenderContext};
use crate::scene::Viewport;
use crate::stage::Stage;
use plane::PlaneRenderer;

/// Renders a [`Stage`] into a window or canvas surface.
pub struct SceneRenderer {
    context: RenderContext,
    depth: DepthTarget,
    planes: PlaneRenderer,
    camera_uniform: CameraUniform,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    /// Initialize the GPU for `target`, sized from the stage's viewport.
    ///
    /// # Errors
    ///
    /// Returns [`TourviewError::Gpu`] if no adapter, device or surface
    /// configuration is available.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        stage: &Stage,
    ) -> Result<Self, TourviewError> {
        let size = stage.viewport().physical_size();
        let context = RenderContext::new(target, size).await?;
        let (width, height) = context.size();
        let depth = DepthTarget::new(&context.device, width, height);
        let planes = PlaneRenderer::new(&context.device, context.format());
        let [r, g, b, a] = stage.options().display.clear_color;

        Ok(Self {
            context,
            depth,
            planes,
            camera_uniform: CameraUniform::new(),
            clear_color: wgpu::Color {
                r: f64::from(r * a),
                g: f64::from(g * a),
                b: f64::from(b * a),
                a: f64::from(a),
            },
        })
    }

    /// Largest 2D texture side the device accepts. Image loads scale down
    /// to this before upload.
    #[must_use]
    pub fn max_texture_dimension(&self) -> u32 {
        self.context.device.limits().max_texture_dimension_2d
    }

    /// Match the surface to the viewport's physical size.
    pub fn resize(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.physical_size();
        if self.context.resize(width, height) {
            self.depth = DepthTarget::new(&self.context.device, width, height);
        }
    }

    /// Draw one frame.
    ///
    /// Lost or outdated surfaces are reconfigured and the frame skipped.
    /// While the carousel is parked below the fold the planes are neither
    /// updated nor drawn; the surface is still cleared.
    ///
    /// # Errors
    ///
    /// Returns the [`wgpu::SurfaceError`] for failures other than a lost or
    /// outdated surface (timeouts, out of memory).
    pub fn render(&mut self, stage: &mut Stage) -> Result<(), wgpu::SurfaceError> {
        let device = &self.context.device;
        let queue = &self.context.queue;
        self.planes.sync(device, queue, stage.take_uploads());
        let parked = stage.reveal().is_parked();
        if !parked {
            self.camera_uniform.update_view_proj(stage.camera());
            self.planes.update(
                queue,
                &self.camera_uniform,
                &stage.lights().uniform(),
                stage.pivot(),
            );
        }

        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated; reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Carousel Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Discard,
                        }),
                        stencil_ops: None,
                    },
                ),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if !parked {
                self.planes.draw(&mut pass);
            }
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }
}
