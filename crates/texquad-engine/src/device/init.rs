/// Initialization parameters for the graphics context.
///
/// The defaults describe the demo's fixed configuration: 8-bit RGBA back
/// buffer, 4x multisampling, 32-bit float depth, vsync'd presentation and a
/// single back buffer.
#[derive(Debug, Clone)]
pub struct GraphicsInit {
    /// Surface formats in order of preference.
    ///
    /// The first one supported by the surface wins; if none is supported the
    /// surface's own first format is used.
    pub preferred_formats: Vec<wgpu::TextureFormat>,

    /// Present mode (swap behavior). FIFO blocks on vertical sync.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Requested multisample count for the colour and depth targets.
    ///
    /// Falls back to 1 when the surface format cannot be multisampled this way.
    pub sample_count: u32,

    /// Depth buffer format.
    pub depth_format: wgpu::TextureFormat,

    pub power_preference: wgpu::PowerPreference,

    /// Required wgpu features.
    ///
    /// Favor an empty set for portability unless a feature is strictly necessary.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// 1 approximates a single back buffer. This value is a hint; support
    /// depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GraphicsInit {
    fn default() -> Self {
        Self {
            preferred_formats: vec![
                wgpu::TextureFormat::Rgba8Unorm,
                wgpu::TextureFormat::Bgra8Unorm,
            ],
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            sample_count: 4,
            depth_format: wgpu::TextureFormat::Depth32Float,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 1,
        }
    }
}
