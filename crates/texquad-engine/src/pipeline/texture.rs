//! Quad texture and sampler.

use crate::asset;

/// Immutable 2D texture built from the embedded image, plus its view.
pub struct QuadTexture {
    view: wgpu::TextureView,
    texture: wgpu::Texture,
}

impl QuadTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let size = wgpu::Extent3d {
            width: asset::IMAGE_WIDTH,
            height: asset::IMAGE_HEIGHT,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("texquad image"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &asset::IMAGE_DATA,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(asset::bytes_per_row()),
                rows_per_image: Some(asset::IMAGE_HEIGHT),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        log::debug!(
            "uploaded {}x{} RGBA8 texture",
            asset::IMAGE_WIDTH,
            asset::IMAGE_HEIGHT
        );

        Self { view, texture }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }
}

/// Highest LOD the sampler may select; covers any 2D mip chain.
pub const MAX_LOD: f32 = 32.0;

/// Wrap addressing on every axis, nearest filtering, no anisotropy, full mip
/// range.
pub fn sampler_descriptor() -> wgpu::SamplerDescriptor<'static> {
    wgpu::SamplerDescriptor {
        label: Some("texquad sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        lod_min_clamp: 0.0,
        lod_max_clamp: MAX_LOD,
        compare: None,
        anisotropy_clamp: 1,
        border_color: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampler_wraps_and_uses_point_filtering() {
        let desc = sampler_descriptor();
        assert_eq!(desc.address_mode_u, wgpu::AddressMode::Repeat);
        assert_eq!(desc.address_mode_v, wgpu::AddressMode::Repeat);
        assert_eq!(desc.address_mode_w, wgpu::AddressMode::Repeat);
        assert_eq!(desc.mag_filter, wgpu::FilterMode::Nearest);
        assert_eq!(desc.min_filter, wgpu::FilterMode::Nearest);
        assert_eq!(desc.anisotropy_clamp, 1);
        assert_eq!(desc.lod_min_clamp, 0.0);
        assert_eq!(desc.lod_max_clamp, MAX_LOD);
        assert!(desc.compare.is_none());
    }
}
