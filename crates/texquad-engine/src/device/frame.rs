/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly. Holding the surface
/// texture prevents acquisition of subsequent frames.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    /// View over the acquired surface texture (the resolve target when
    /// multisampling).
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
