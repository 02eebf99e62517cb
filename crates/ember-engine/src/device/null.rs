use std::ffi::c_void;
use std::ptr::NonNull;

use anyhow::{ensure, Context, Result};

use crate::platform::{EntryPointLibrary, PlatformParams};
use crate::window::OsWindow;

use super::{ContextHandles, GraphicsContext, PresentStatus, ProcAddress, SurfaceConfig, GLES2_ENTRY_POINTS};

/// Shared target of every entry point the null backend hands out.
extern "C" fn null_entry_point() {}

/// Context for the null backend: every call succeeds, nothing is drawn.
///
/// Once initialized, each GLES2 entry point resolves to one shared no-op.
#[derive(Debug, Default)]
pub struct NullContext {
    handles: Option<ContextHandles>,
    config: Option<SurfaceConfig>,
    swap_interval: i32,
    swaps: u64,
    clear: [f32; 4],
}

impl NullContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.handles.is_some()
    }

    pub fn swap_interval(&self) -> i32 {
        self.swap_interval
    }

    pub fn swap_count(&self) -> u64 {
        self.swaps
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear
    }

    pub fn surface_config(&self) -> Option<SurfaceConfig> {
        self.config
    }
}

impl GraphicsContext for NullContext {
    fn initialize(
        &mut self,
        window: &dyn OsWindow,
        library: &EntryPointLibrary,
        params: &PlatformParams,
        config: &SurfaceConfig,
    ) -> Result<()> {
        let (w, h) = window.size();
        ensure!(w > 0 && h > 0, "window has zero size");

        if let Some(path) = library.locate().context("null context")? {
            log::debug!("entry-point library at {}", path.display());
        }

        log::debug!(
            "null context {}.{} on {w}x{h}",
            params.major_version,
            params.minor_version
        );
        self.handles = Some(ContextHandles::allocate());
        self.config = Some(*config);
        Ok(())
    }

    fn set_swap_interval(&mut self, interval: i32) -> Result<()> {
        ensure!(self.is_initialized(), "swap interval set before context creation");
        ensure!(interval >= 0, "negative swap interval {interval}");
        self.swap_interval = interval;
        Ok(())
    }

    fn swap(&mut self) -> PresentStatus {
        if !self.is_initialized() {
            return PresentStatus::Skipped;
        }
        self.swaps += 1;
        PresentStatus::Presented
    }

    fn handles(&self) -> ContextHandles {
        self.handles.unwrap_or_default()
    }

    fn proc_address(&self, name: &str) -> Option<ProcAddress> {
        if !self.is_initialized() || !GLES2_ENTRY_POINTS.contains(&name) {
            return None;
        }
        NonNull::new(null_entry_point as *const () as *mut c_void)
    }

    fn set_clear_color(&mut self, rgba: [f32; 4]) {
        self.clear = rgba;
    }

    fn destroy(&mut self) {
        self.handles = None;
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::HeadlessWindow;

    fn window() -> HeadlessWindow {
        let mut w = HeadlessWindow::new();
        w.initialize("null", 64, 64).unwrap();
        w
    }

    #[test]
    fn lifecycle_round_trip() {
        let mut ctx = NullContext::new();
        assert!(ctx.handles().context.is_null());
        ctx.initialize(&window(), &EntryPointLibrary::none(), &PlatformParams::default(), &SurfaceConfig::SAMPLE)
            .unwrap();
        assert!(!ctx.handles().surface.is_null());
        ctx.set_swap_interval(0).unwrap();
        assert_eq!(ctx.swap(), PresentStatus::Presented);
        assert_eq!(ctx.swap_count(), 1);
        ctx.destroy();
        ctx.destroy();
        assert!(!ctx.is_initialized());
        assert_eq!(ctx.swap(), PresentStatus::Skipped);
    }

    #[test]
    fn gles2_names_resolve_only_while_initialized() {
        let mut ctx = NullContext::new();
        assert!(ctx.proc_address("glClear").is_none());

        ctx.initialize(&window(), &EntryPointLibrary::none(), &PlatformParams::default(), &SurfaceConfig::SAMPLE)
            .unwrap();
        assert!(ctx.proc_address("glClear").is_some());
        assert!(ctx.proc_address("glNotAThing").is_none());

        let mut eps = crate::device::GlEntryPoints::gles2();
        let report = crate::device::EntryPointLoader::load(&mut eps, &|n: &str| ctx.proc_address(n));
        assert_eq!(report.resolved, GLES2_ENTRY_POINTS.len());
        assert_eq!(report.missing, 0);

        ctx.destroy();
        assert!(ctx.proc_address("glClear").is_none());
    }

    #[test]
    fn missing_library_fails_initialization() {
        let mut ctx = NullContext::new();
        let lib = EntryPointLibrary::named(
            Some("ember_missing_egl.so".into()),
            crate::platform::SearchType::ApplicationDir,
        );
        let err = ctx.initialize(&window(), &lib, &PlatformParams::default(), &SurfaceConfig::SAMPLE);
        assert!(err.is_err());
        assert!(!ctx.is_initialized());
    }

    #[test]
    fn swap_interval_requires_context() {
        let mut ctx = NullContext::new();
        assert!(ctx.set_swap_interval(0).is_err());
    }

    #[test]
    fn rejects_uncreated_window() {
        let mut ctx = NullContext::new();
        let err = ctx.initialize(
            &HeadlessWindow::new(),
            &EntryPointLibrary::none(),
            &PlatformParams::default(),
            &SurfaceConfig::SAMPLE,
        );
        assert!(err.is_err());
    }
}
