use crate::device::error::FrameFault;

pub(super) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| caps.formats.contains(f)) {
            return Some(f);
        }
    }

    caps.formats.first().copied()
}

pub(super) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Whether the surface only needs `configure` again before the next acquire.
pub(super) fn needs_reconfigure(err: &wgpu::SurfaceError) -> bool {
    matches!(err, wgpu::SurfaceError::Outdated)
}

/// Classifies a failed frame acquisition.
///
/// A lost surface or exhausted memory is device loss; the lifecycle manager
/// then rebuilds the whole target. An outdated surface is reconfigured in
/// place by the target, so only the frame is dropped.
pub(super) fn frame_fault(err: wgpu::SurfaceError) -> FrameFault {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::OutOfMemory => FrameFault::DeviceLost,
        wgpu::SurfaceError::Outdated => FrameFault::Other("surface outdated; reconfigured".into()),
        wgpu::SurfaceError::Timeout => FrameFault::Other("surface acquire timed out".into()),
        wgpu::SurfaceError::Other => FrameFault::Other("surface acquire failed".into()),
    }
}
