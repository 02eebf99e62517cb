use super::params::{DeviceType, PlatformParams, Renderer};

/// Prefix of the backend selection argument.
pub const USE_ANGLE_ARG: &str = "--use-angle=";

const DISPLAY_TYPES: [(&str, Renderer); 7] = [
    ("d3d9", Renderer::D3d9),
    ("d3d11", Renderer::D3d11),
    ("gl", Renderer::OpenGl),
    ("gles", Renderer::OpenGles),
    ("null", Renderer::Null),
    ("vulkan", Renderer::Vulkan),
    ("swiftshader", Renderer::Vulkan),
];

/// Maps a backend token to its renderer.
///
/// Unknown tokens fall back to [`Renderer::Default`]. Either way one line is
/// logged naming the outcome.
pub fn display_type_from_arg(token: &str) -> Renderer {
    match DISPLAY_TYPES.iter().find(|(name, _)| *name == token) {
        Some((name, renderer)) => {
            log::info!("Using ANGLE back-end API: {name}");
            *renderer
        }
        None => {
            log::warn!("Unknown ANGLE back-end API: {token}");
            Renderer::Default
        }
    }
}

/// Only `swiftshader` selects the software device.
pub fn device_type_from_arg(token: &str) -> DeviceType {
    if token == "swiftshader" {
        DeviceType::SwiftShader
    } else {
        DeviceType::Hardware
    }
}

/// Builds platform parameters from raw process arguments.
///
/// Only the first argument after the program name is inspected; everything
/// else is left for the application.
pub fn platform_from_args<S: AsRef<str>>(args: &[S]) -> PlatformParams {
    let mut params = PlatformParams::default();

    let token = args
        .get(1)
        .and_then(|arg| arg.as_ref().strip_prefix(USE_ANGLE_ARG));

    match token {
        Some(token) => {
            params.renderer = display_type_from_arg(token);
            params.device_type = device_type_from_arg(token);
        }
        None => log::debug!("no {USE_ANGLE_ARG} argument; using default back-end"),
    }

    params
}
