use crate::device::GraphicsContext;
use crate::error::SetupError;
use crate::render::QUAD_DRAW;
use crate::transform::TransformUniform;

use super::layout::Vertex;
use super::shader::{self, ShaderStage};
use super::texture::{self, QuadTexture};

/// Bind group slot of the per-frame transform.
pub const TRANSFORM_GROUP: u32 = 0;

/// Bind group slot of the texture + sampler.
pub const TEXTURE_GROUP: u32 = 1;

/// Stage that consumes the per-frame transform.
pub const TRANSFORM_STAGE: ShaderStage = ShaderStage::Geometry;

/// Fixed rendering configuration: programs, input layout, texture, sampler and
/// the render pipeline that ties them together.
///
/// Built once; nothing here is mutated afterwards.
pub struct PipelineResources {
    render_pipeline: wgpu::RenderPipeline,
    transform_layout: wgpu::BindGroupLayout,
    texture_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    texture: QuadTexture,
    topology: wgpu::PrimitiveTopology,
}

impl PipelineResources {
    pub fn build(gpu: &GraphicsContext<'_>) -> Result<Self, SetupError> {
        let device = gpu.device();
        let targets = gpu.targets().ok_or_else(|| {
            SetupError::ResourceCreation("graphics context already shut down".to_string())
        })?;

        let programs = shader::compile_pipeline_programs()?;
        let vertex_module = programs.vertex.create_module(device);
        let pixel_module = programs.pixel.create_module(device);

        let transform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texquad transform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: TRANSFORM_STAGE.visibility(),
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(TransformUniform::min_binding_size()),
                },
                count: None,
            }],
        });

        let pixel_visibility = ShaderStage::Pixel.visibility();
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texquad texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: pixel_visibility,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: pixel_visibility,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let texture = QuadTexture::upload(device, gpu.queue());
        let sampler = device.create_sampler(&texture::sampler_descriptor());

        // Created once; the same texture is bound for the lifetime of the process.
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texquad texture bind group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("texquad pipeline layout"),
            // Indices follow TRANSFORM_GROUP / TEXTURE_GROUP.
            bind_group_layouts: &[&transform_layout, &texture_layout],
            immediate_size: 0,
        });

        let topology = QUAD_DRAW.topology;
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("texquad pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(programs.vertex.entry_point()),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &pixel_module,
                entry_point: Some(programs.pixel.entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Cw,
                // Both faces stay visible while the quad spins.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: targets.depth_format(),
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),

            multisample: wgpu::MultisampleState {
                count: targets.spec().sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },

            multiview_mask: None,
            cache: None,
        });

        log::info!("pipeline ready ({topology:?}, {} byte stride)", Vertex::STRIDE);

        Ok(Self {
            render_pipeline,
            transform_layout,
            texture_bind_group,
            sampler,
            texture,
            topology,
        })
    }

    pub fn render_pipeline(&self) -> &wgpu::RenderPipeline {
        &self.render_pipeline
    }

    /// Layout the per-frame transform bind group must be created against.
    pub fn transform_layout(&self) -> &wgpu::BindGroupLayout {
        &self.transform_layout
    }

    pub fn texture_bind_group(&self) -> &wgpu::BindGroup {
        &self.texture_bind_group
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    pub fn texture(&self) -> &QuadTexture {
        &self.texture
    }

    pub fn topology(&self) -> wgpu::PrimitiveTopology {
        self.topology
    }
}
