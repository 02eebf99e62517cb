use std::fmt;

/// Renderer backend requested from the platform layer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Renderer {
    /// Native default for the current OS.
    #[default]
    Default,
    D3d9,
    D3d11,
    OpenGl,
    OpenGles,
    /// No-op backend; every call succeeds and nothing is drawn.
    Null,
    /// Portable explicit GPU API backend.
    Vulkan,
}

impl Renderer {
    /// `EGL_PLATFORM_ANGLE_TYPE_*_ANGLE` attribute value.
    pub const fn egl_value(self) -> i32 {
        match self {
            Renderer::Default => 0x3206,
            Renderer::D3d9 => 0x3207,
            Renderer::D3d11 => 0x3208,
            Renderer::OpenGl => 0x320D,
            Renderer::OpenGles => 0x320E,
            Renderer::Null => 0x33AE,
            Renderer::Vulkan => 0x3450,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Renderer::Default => "default",
            Renderer::D3d9 => "d3d9",
            Renderer::D3d11 => "d3d11",
            Renderer::OpenGl => "gl",
            Renderer::OpenGles => "gles",
            Renderer::Null => "null",
            Renderer::Vulkan => "vulkan",
        }
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Physical device class behind the renderer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DeviceType {
    #[default]
    Hardware,
    /// CPU reference implementation of the portable backend.
    SwiftShader,
}

impl DeviceType {
    /// `EGL_PLATFORM_ANGLE_DEVICE_TYPE_*_ANGLE` attribute value.
    pub const fn egl_value(self) -> i32 {
        match self {
            DeviceType::Hardware => 0x322A,
            DeviceType::SwiftShader => 0x3487,
        }
    }
}

/// Backend selection plus the client API version to request.
///
/// Built once when the host is constructed and never modified afterwards.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PlatformParams {
    pub renderer: Renderer,
    pub device_type: DeviceType,
    pub major_version: u32,
    pub minor_version: u32,
}

impl Default for PlatformParams {
    fn default() -> Self {
        Self {
            renderer: Renderer::Default,
            device_type: DeviceType::Hardware,
            major_version: 2,
            minor_version: 0,
        }
    }
}

impl PlatformParams {
    pub fn new(renderer: Renderer, device_type: DeviceType) -> Self {
        Self {
            renderer,
            device_type,
            ..Default::default()
        }
    }

    pub fn with_version(mut self, major: u32, minor: u32) -> Self {
        self.major_version = major;
        self.minor_version = minor;
        self
    }

    pub fn is_software(&self) -> bool {
        self.device_type == DeviceType::SwiftShader
    }
}
