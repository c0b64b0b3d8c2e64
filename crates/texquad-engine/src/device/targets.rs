use crate::error::SetupError;

/// Size and sample count of a render attachment.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TargetSpec {
    pub width: u32,
    pub height: u32,
    pub sample_count: u32,
}

impl TargetSpec {
    /// Checks that `depth` can be bound together with `self` as colour target.
    pub fn ensure_compatible(self, depth: TargetSpec) -> Result<(), SetupError> {
        if self.width == 0 || self.height == 0 {
            return Err(SetupError::ResourceCreation(format!(
                "render target has zero size ({}x{})",
                self.width, self.height
            )));
        }

        if self != depth {
            return Err(SetupError::ResourceCreation(format!(
                "depth buffer {}x{} x{} does not match render target {}x{} x{}",
                depth.width,
                depth.height,
                depth.sample_count,
                self.width,
                self.height,
                self.sample_count
            )));
        }

        Ok(())
    }

    fn extent(self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

/// Off-screen attachments bound alongside the surface texture.
///
/// With multisampling, `msaa` holds the multisampled colour target that is
/// resolved into the surface texture at the end of the pass. Without it, the
/// pass renders straight into the surface texture.
///
/// Views are declared before the textures they view so they drop first.
pub struct RenderTargets {
    msaa: Option<(wgpu::TextureView, wgpu::Texture)>,
    depth_view: wgpu::TextureView,
    depth_texture: wgpu::Texture,
    spec: TargetSpec,
}

impl RenderTargets {
    pub fn create(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
        depth_format: wgpu::TextureFormat,
    ) -> Result<Self, SetupError> {
        let color_spec = TargetSpec {
            width: config.width,
            height: config.height,
            sample_count,
        };
        let depth_spec = color_spec;
        color_spec.ensure_compatible(depth_spec)?;

        let msaa = if sample_count > 1 {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("texquad msaa colour target"),
                size: color_spec.extent(),
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: config.format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            Some((view, texture))
        } else {
            None
        };

        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("texquad depth buffer"),
            size: depth_spec.extent(),
            mip_level_count: 1,
            sample_count: depth_spec.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: depth_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        log::debug!(
            "render targets {}x{} x{} (depth {depth_format:?})",
            color_spec.width,
            color_spec.height,
            color_spec.sample_count
        );

        Ok(Self {
            msaa,
            depth_view,
            depth_texture,
            spec: color_spec,
        })
    }

    /// Multisampled colour view, if multisampling is enabled.
    pub fn msaa_view(&self) -> Option<&wgpu::TextureView> {
        self.msaa.as_ref().map(|(view, _)| view)
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    pub fn spec(&self) -> TargetSpec {
        self.spec
    }

    pub fn depth_format(&self) -> wgpu::TextureFormat {
        self.depth_texture.format()
    }
}
