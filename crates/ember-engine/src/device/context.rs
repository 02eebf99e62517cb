use std::ffi::c_void;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;

use crate::platform::{EntryPointLibrary, PlatformParams};
use crate::window::OsWindow;

use super::PresentStatus;

/// Address of a resolved GPU entry point.
pub type ProcAddress = NonNull<c_void>;

/// Framebuffer bit depths requested at context creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SurfaceConfig {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
}

impl SurfaceConfig {
    /// RGBA8 color, 24-bit depth, 8-bit stencil.
    pub const SAMPLE: SurfaceConfig = SurfaceConfig {
        red_bits: 8,
        green_bits: 8,
        blue_bits: 8,
        alpha_bits: 8,
        depth_bits: 24,
        stencil_bits: 8,
    };

    pub fn color_bits(&self) -> u32 {
        self.red_bits as u32 + self.green_bits as u32 + self.blue_bits as u32 + self.alpha_bits as u32
    }

    pub fn has_depth_stencil(&self) -> bool {
        self.depth_bits > 0 || self.stencil_bits > 0
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::SAMPLE
    }
}

/// Opaque platform handle. Zero means "not created".
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Handle(u64);

impl Handle {
    pub const NULL: Handle = Handle(0);

    /// Allocates a process-unique non-null handle.
    pub fn next() -> Handle {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Handle(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Config / display / surface / context handles of a live context.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ContextHandles {
    pub config: Handle,
    pub display: Handle,
    pub surface: Handle,
    pub context: Handle,
}

impl ContextHandles {
    pub fn allocate() -> Self {
        Self {
            config: Handle::next(),
            display: Handle::next(),
            surface: Handle::next(),
            context: Handle::next(),
        }
    }
}

/// GPU context and presentation surface bound to one window.
pub trait GraphicsContext {
    /// Creates the context and its surface for `window`.
    fn initialize(
        &mut self,
        window: &dyn OsWindow,
        library: &EntryPointLibrary,
        params: &PlatformParams,
        config: &SurfaceConfig,
    ) -> Result<()>;

    /// Number of refresh periods `swap` waits for; 0 disables vsync.
    fn set_swap_interval(&mut self, interval: i32) -> Result<()>;

    /// Presents the current frame.
    fn swap(&mut self) -> PresentStatus;

    fn handles(&self) -> ContextHandles;

    /// Resolves a GPU entry point by name.
    fn proc_address(&self, name: &str) -> Option<ProcAddress> {
        let _ = name;
        None
    }

    fn set_clear_color(&mut self, rgba: [f32; 4]) {
        let _ = rgba;
    }

    /// Reconfigures the surface after the window changed size.
    fn resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Releases the context and surface. Safe to call more than once.
    fn destroy(&mut self);
}
