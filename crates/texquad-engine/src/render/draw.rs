use crate::error::FrameError;
use crate::pipeline::ShaderStage;
use crate::transform::TransformUniform;

/// Non-indexed draw parameters.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub vertex_count: u32,
    pub first_vertex: u32,
    pub topology: wgpu::PrimitiveTopology,
}

impl DrawCall {
    pub fn vertices(&self) -> std::ops::Range<u32> {
        self.first_vertex..self.first_vertex + self.vertex_count
    }
}

/// The only draw issued each frame: the quad as a 4-vertex triangle strip.
pub const QUAD_DRAW: DrawCall = DrawCall {
    vertex_count: 4,
    first_vertex: 0,
    topology: wgpu::PrimitiveTopology::TriangleStrip,
};

/// Opaque black.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Far plane in a 0..1 depth range.
pub const CLEAR_DEPTH: f32 = 1.0;

/// Receiver of the per-frame command stream.
///
/// [`FrameRenderer`](super::FrameRenderer) calls these in protocol order; an
/// implementation only records or executes them.
pub trait FrameSink {
    /// Starts the frame: clears colour and depth. Stencil is untouched.
    fn clear(&mut self, color: wgpu::Color, depth: f32) -> Result<(), FrameError>;

    /// Binds programs, input layout, topology and the vertex buffer.
    fn bind_pipeline(&mut self) -> Result<(), FrameError>;

    /// Overwrites the whole transform uniform buffer.
    fn upload_transform(&mut self, uniform: &TransformUniform) -> Result<(), FrameError>;

    /// Binds the transform uniform to `stage`.
    fn bind_transform(&mut self, stage: ShaderStage) -> Result<(), FrameError>;

    fn draw(&mut self, call: DrawCall) -> Result<(), FrameError>;

    /// Submits and presents the frame.
    fn present(&mut self) -> Result<(), FrameError>;
}
