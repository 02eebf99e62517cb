//! GPU context + entry points.
//!
//! This module is responsible for:
//! - the `GraphicsContext` contract the host loop drives
//! - concrete contexts (wgpu, null)
//! - resolving GPU entry points once a context exists

mod context;
mod error;
mod loader;
mod null;
mod surface;
mod wgpu_context;

pub use context::{ContextHandles, GraphicsContext, Handle, ProcAddress, SurfaceConfig};
pub use error::PresentStatus;
pub use loader::{EntryPointLoader, GlEntryPoints, LoadReport, GLES2_ENTRY_POINTS};
pub use null::NullContext;
pub use wgpu_context::WgpuContext;

use crate::platform::{PlatformParams, Renderer};

/// Context matching the requested renderer.
pub fn create_context(params: &PlatformParams) -> Box<dyn GraphicsContext> {
    match params.renderer {
        Renderer::Null => Box::new(NullContext::new()),
        _ => Box::new(WgpuContext::new()),
    }
}
