use crate::platform::Renderer;

use super::{PresentStatus, SurfaceConfig};

/// Backend set to try for a requested renderer.
///
/// wgpu has no D3D9/D3D11 path; both map onto D3D12.
pub(crate) fn backends_for(renderer: Renderer) -> wgpu::Backends {
    match renderer {
        Renderer::Default => wgpu::Backends::PRIMARY,
        Renderer::D3d9 | Renderer::D3d11 => wgpu::Backends::DX12,
        Renderer::OpenGl | Renderer::OpenGles => wgpu::Backends::GL,
        Renderer::Vulkan => wgpu::Backends::VULKAN,
        Renderer::Null => wgpu::Backends::empty(),
    }
}

pub(crate) fn present_mode_for(interval: i32) -> wgpu::PresentMode {
    if interval <= 0 {
        wgpu::PresentMode::AutoNoVsync
    } else {
        wgpu::PresentMode::AutoVsync
    }
}

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    requested: &SurfaceConfig,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    let eight_bit = [requested.red_bits, requested.green_bits, requested.blue_bits]
        .iter()
        .all(|&b| b <= 8);

    if eight_bit {
        let preferred: &[wgpu::TextureFormat] = if prefer_srgb {
            &[wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Rgba8UnormSrgb]
        } else {
            &[wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Rgba8Unorm]
        };
        for f in preferred {
            if caps.formats.contains(f) {
                return Some(*f);
            }
        }
    }

    Some(caps.formats[0])
}

pub(crate) fn choose_alpha_mode(caps: &wgpu::SurfaceCapabilities) -> wgpu::CompositeAlphaMode {
    // Windows stay opaque even with alpha bits requested.
    [wgpu::CompositeAlphaMode::Opaque, wgpu::CompositeAlphaMode::Auto]
        .into_iter()
        .find(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    err: wgpu::SurfaceError,
) -> PresentStatus {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if config.width > 0 && config.height > 0 {
                surface.configure(device, config);
            }
            PresentStatus::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => PresentStatus::Fatal,
        wgpu::SurfaceError::Timeout => PresentStatus::Skipped,
        wgpu::SurfaceError::Other => PresentStatus::Skipped,
    }
}
