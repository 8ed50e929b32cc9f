//! Textured, double-sided quads for the carousel images.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::camera::CameraUniform;
use crate::gpu::pipeline_helpers::{
    filtering_sampler, linear_sampler, texture_2d, uniform_buffer,
    uniform_buffer_init,
};
use crate::gpu::texture::{ImageTexture, DEPTH_FORMAT};
use crate::scene::{CarouselItem, LightsUniform, PivotGroup, PlaneUpload};

const SHADER_SOURCE: &str = include_str!("../../assets/shaders/plane.wgsl");

/// Unit quad vertex: position in the XY plane and texture coordinate.
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct PlaneVertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Texture coordinate, v down.
    pub uv: [f32; 2],
}

/// 1x1 quad centered on the origin, facing +Z.
pub const PLANE_VERTICES: &[PlaneVertex] = &[
    PlaneVertex {
        position: [-0.5, 0.5, 0.0],
        uv: [0.0, 0.0],
    }, // top-left
    PlaneVertex {
        position: [0.5, 0.5, 0.0],
        uv: [1.0, 0.0],
    }, // top-right
    PlaneVertex {
        position: [0.5, -0.5, 0.0],
        uv: [1.0, 1.0],
    }, // bottom-right
    PlaneVertex {
        position: [-0.5, -0.5, 0.0],
        uv: [0.0, 1.0],
    }, // bottom-left
];

/// Counter-clockwise from +Z.
pub const PLANE_INDICES: &[u16] = &[0, 3, 2, 0, 2, 1];

/// Per-plane model matrix.
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct ModelUniform {
    /// Unit quad to world.
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Model matrix for `item` under the pivot's current transform.
    #[must_use]
    pub fn for_item(pivot: &PivotGroup, item: &CarouselItem) -> Self {
        Self {
            model: pivot.world_matrix(item).to_cols_array_2d(),
        }
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

struct PlaneGpu {
    slot: usize,
    model_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    _texture: ImageTexture,
}

/// Draws every attached carousel plane with its own texture.
pub struct PlaneRenderer {
    pipeline: wgpu::RenderPipeline,
    plane_layout: wgpu::BindGroupLayout,
    frame_bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    planes: Vec<PlaneGpu>,
}

impl PlaneRenderer {
    /// Create the pipeline for the given surface format.
    #[must_use]
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("plane shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let camera_buffer =
            uniform_buffer_init(device, "camera uniform", &CameraUniform::new());
        let lights_buffer = uniform_buffer_init(
            device,
            "lights uniform",
            &LightsUniform {
                ambient: [0.0; 4],
                point_color: [0.0; 4],
                point_position: [0.0; 4],
            },
        );

        let frame_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("plane frame layout"),
                entries: &[uniform_buffer(0), uniform_buffer(1)],
            });
        let frame_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("plane frame bind group"),
                layout: &frame_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: lights_buffer.as_entire_binding(),
                    },
                ],
            });

        let plane_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("plane layout"),
                entries: &[uniform_buffer(0), texture_2d(1), filtering_sampler(2)],
            });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("plane pipeline layout"),
                bind_group_layouts: &[&frame_layout, &plane_layout],
                push_constant_ranges: &[],
            });

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("plane pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: size_of::<PlaneVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x2
                        ],
                    }],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    front_face: wgpu::FrontFace::Ccw,
                    // Planes are seen from both sides as the ring spins.
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("plane vertices"),
                contents: bytemuck::cast_slice(PLANE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("plane indices"),
                contents: bytemuck::cast_slice(PLANE_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            pipeline,
            plane_layout,
            frame_bind_group,
            camera_buffer,
            lights_buffer,
            sampler: linear_sampler(device, "plane sampler"),
            vertex_buffer,
            index_buffer,
            planes: Vec::new(),
        }
    }

    /// Create GPU resources for newly attached planes. Uploads that fail
    /// are logged and the plane stays undrawn.
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        uploads: Vec<PlaneUpload>,
    ) {
        for upload in uploads {
            let PlaneUpload { slot, uri, image } = upload;
            let texture = match ImageTexture::upload(device, queue, &uri, image) {
                Ok(texture) => texture,
                Err(e) => {
                    log::warn!("carousel slot {slot} not drawn: {e}");
                    continue;
                }
            };
            // Written with the pivot transform on the next update.
            let model_buffer =
                uniform_buffer_init(device, "plane model", &ModelUniform::default());
            let bind_group =
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("plane bind group"),
                    layout: &self.plane_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: model_buffer.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(
                                &texture.view,
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::Sampler(
                                &self.sampler,
                            ),
                        },
                    ],
                });
            log::debug!("uploaded plane texture for slot {slot}");
            self.planes.push(PlaneGpu {
                slot,
                model_buffer,
                bind_group,
                _texture: texture,
            });
        }
    }

    /// Write this frame's camera, lights and plane transforms.
    pub fn update(
        &self,
        queue: &wgpu::Queue,
        camera: &CameraUniform,
        lights: &LightsUniform,
        pivot: &PivotGroup,
    ) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(camera));
        queue.write_buffer(&self.lights_buffer, 0, bytemuck::bytes_of(lights));
        for gpu in &self.planes {
            let Some(item) = pivot.items().iter().find(|i| i.index() == gpu.slot)
            else {
                continue;
            };
            queue.write_buffer(
                &gpu.model_buffer,
                0,
                bytemuck::bytes_of(&ModelUniform::for_item(pivot, item)),
            );
        }
    }

    /// Record draw calls into an open render pass.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.planes.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        for plane in &self.planes {
            pass.set_bind_group(1, &plane.bind_group, &[]);
            pass.draw_indexed(0..PLANE_INDICES.len() as u32, 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;
    use crate::options::CarouselOptions;
    use crate::scene::{CarouselBuilder, DecodedImage, LoadOutcome};

    #[test]
    fn quad_winds_counter_clockwise_toward_z() {
        let p = |i: u16| Vec3::from(PLANE_VERTICES[i as usize].position);
        for tri in PLANE_INDICES.chunks(3) {
            let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            assert!(n.z > 0.0);
        }
    }

    #[test]
    fn model_uniform_follows_pivot() {
        let builder = CarouselBuilder::new(&CarouselOptions::default());
        let mut pivot = builder.build();
        let _ = builder.place(
            LoadOutcome {
                index: 0,
                uri: "a".to_owned(),
                result: Ok(DecodedImage::solid(1, 1, [0; 4]).into()),
            },
            &mut pivot,
        );
        pivot.transform_mut().vertical_offset = 0.0;
        let uniform = ModelUniform::for_item(&pivot, &pivot.items()[0]);
        let m = Mat4::from_cols_array_2d(&uniform.model);
        let center = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((center.truncate() - Vec3::new(7.0, 0.0, 0.0)).length() < 1e-4);
        // Textured face points back at the ring center.
        let normal = (m * Vec4::Z).truncate().normalize();
        assert!(normal.dot(Vec3::NEG_X) > 0.9999);
    }

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(size_of::<CameraUniform>(), 80);
        assert_eq!(size_of::<ModelUniform>(), 64);
        assert_eq!(size_of::<PlaneVertex>(), 20);
    }
}
