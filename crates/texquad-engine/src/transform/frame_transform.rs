use crate::device::GraphicsContext;

use super::state::{TransformState, TransformUniform};

/// Uniform buffer and bind group the transform is uploaded into each frame.
pub struct TransformBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl TransformBinding {
    /// Overwrites the whole buffer; no previous contents are kept.
    pub fn upload(&self, queue: &wgpu::Queue, uniform: &TransformUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniform));
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Transform state plus its GPU binding.
pub struct FrameTransform {
    state: TransformState,
    binding: TransformBinding,
}

impl FrameTransform {
    /// Creates the uniform buffer against `layout` and uploads the frame-zero
    /// transform.
    pub fn initialize(
        gpu: &GraphicsContext<'_>,
        layout: &wgpu::BindGroupLayout,
        aspect_ratio: f32,
    ) -> Self {
        let state = TransformState::new(aspect_ratio);
        let device = gpu.device();

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("texquad transform ubo"),
            size: TransformUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texquad transform bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        let binding = TransformBinding { buffer, bind_group };
        binding.upload(gpu.queue(), &state.uniform());

        Self { state, binding }
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Mutable state alongside the binding, for a frame that advances one and
    /// uploads through the other.
    pub fn split(&mut self) -> (&mut TransformState, &TransformBinding) {
        (&mut self.state, &self.binding)
    }
}
