use super::SurfaceErrorAction;

/// Picks the first preferred format the surface supports.
///
/// Falls back to the surface's first format; `None` only when the surface
/// reports no formats at all.
pub(crate) fn choose_surface_format(
    supported: &[wgpu::TextureFormat],
    preferred: &[wgpu::TextureFormat],
) -> Option<wgpu::TextureFormat> {
    preferred
        .iter()
        .copied()
        .find(|f| supported.contains(f))
        .or_else(|| supported.first().copied())
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Returns `requested` if the format can be multisampled that many times,
/// otherwise 1.
pub(crate) fn choose_sample_count(
    format: wgpu::TextureFormat,
    device_features: wgpu::Features,
    requested: u32,
) -> u32 {
    if requested <= 1 {
        return 1;
    }

    let features = format.guaranteed_format_features(device_features);
    if features.flags.sample_count_supported(requested) {
        requested
    } else {
        log::warn!("{requested}x multisampling unsupported for {format:?}; rendering without MSAA");
        1
    }
}

/// Maps a surface error to the loop's response.
///
/// Resizing is not supported, so `Lost`/`Outdated` reconfigure the surface
/// with its original configuration.
pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            surface.configure(device, config);
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
