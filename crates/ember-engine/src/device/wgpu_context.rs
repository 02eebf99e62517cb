use anyhow::{bail, ensure, Context, Result};

use crate::platform::{EntryPointLibrary, PlatformParams};
use crate::window::OsWindow;

use super::surface;
use super::{ContextHandles, GraphicsContext, PresentStatus, ProcAddress, SurfaceConfig};

/// Live wgpu objects, present between `initialize` and `destroy`.
///
/// Fields drop in declaration order: surface first, instance last.
struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    handles: ContextHandles,
    _instance: wgpu::Instance,
}

/// Graphics context backed by wgpu.
///
/// The requested renderer picks the wgpu backend set and the software device
/// type forces the fallback adapter. `swap` clears the surface to the current
/// clear color and presents it.
pub struct WgpuContext {
    gpu: Option<GpuState>,
    clear: wgpu::Color,
    prefer_srgb: bool,
}

impl WgpuContext {
    pub fn new() -> Self {
        Self {
            gpu: None,
            clear: wgpu::Color::BLACK,
            prefer_srgb: true,
        }
    }

    pub fn with_srgb(mut self, prefer_srgb: bool) -> Self {
        self.prefer_srgb = prefer_srgb;
        self
    }

    /// Returns the logical device, once created.
    pub fn device(&self) -> Option<&wgpu::Device> {
        self.gpu.as_ref().map(|g| &g.device)
    }

    pub fn queue(&self) -> Option<&wgpu::Queue> {
        self.gpu.as_ref().map(|g| &g.queue)
    }

    pub fn surface_format(&self) -> Option<wgpu::TextureFormat> {
        self.gpu.as_ref().map(|g| g.config.format)
    }
}

impl Default for WgpuContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsContext for WgpuContext {
    fn initialize(
        &mut self,
        window: &dyn OsWindow,
        library: &EntryPointLibrary,
        params: &PlatformParams,
        config: &SurfaceConfig,
    ) -> Result<()> {
        ensure!(self.gpu.is_none(), "context already initialized");

        let (width, height) = window.size();
        ensure!(width > 0 && height > 0, "window has zero size");

        let native = window
            .native_handle()
            .context("window has no native handle for surface creation")?;

        if let Some(path) = library.locate()? {
            log::debug!("wgpu loads its own drivers; not loading {}", path.display());
        }

        let backends = surface::backends_for(params.renderer);
        if backends.is_empty() {
            bail!("renderer {} has no wgpu backend", params.renderer);
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(native)
            .context("failed to create wgpu surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: params.is_software(),
        }))
        .with_context(|| {
            let kind = if params.is_software() { "software" } else { "hardware" };
            format!("no {kind} adapter for renderer {}", params.renderer)
        })?;

        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);

        let required_limits = match info.backend {
            wgpu::Backend::Gl => wgpu::Limits::downlevel_webgl2_defaults(),
            _ => wgpu::Limits::default(),
        };

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("ember device"),
            required_features: wgpu::Features::empty(),
            required_limits,
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, config, self.prefer_srgb)
            .context("no supported surface formats")?;

        if config.has_depth_stencil() {
            log::debug!(
                "depth {} / stencil {} bits requested; attachments are left to the application",
                config.depth_bits,
                config.stencil_bits
            );
        }

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface::choose_alpha_mode(&caps),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        self.gpu = Some(GpuState {
            surface,
            device,
            queue,
            config: surface_config,
            handles: ContextHandles::allocate(),
            _instance: instance,
        });

        Ok(())
    }

    fn set_swap_interval(&mut self, interval: i32) -> Result<()> {
        let gpu = self.gpu.as_mut().context("swap interval set before context creation")?;
        ensure!(interval >= 0, "negative swap interval {interval}");

        gpu.config.present_mode = surface::present_mode_for(interval);
        gpu.surface.configure(&gpu.device, &gpu.config);
        log::debug!("present mode {:?}", gpu.config.present_mode);
        Ok(())
    }

    fn swap(&mut self) -> PresentStatus {
        let Some(gpu) = self.gpu.as_mut() else {
            return PresentStatus::Skipped;
        };

        let frame = match gpu.surface.get_current_texture() {
            Ok(f) => f,
            Err(err) => {
                let status = surface::map_surface_error(&gpu.surface, &gpu.device, &gpu.config, err);
                if status.is_fatal() {
                    log::error!("surface error is unrecoverable");
                }
                return status;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("ember frame encoder"),
            });

        // Pass is dropped before the encoder is finished.
        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ember clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        PresentStatus::Presented
    }

    fn handles(&self) -> ContextHandles {
        self.gpu.as_ref().map(|g| g.handles).unwrap_or_default()
    }

    /// wgpu drives its backends internally and exposes no GL entry points,
    /// on the GL backend included. Samples on this context draw through
    /// [`WgpuContext::device`] and [`WgpuContext::queue`].
    fn proc_address(&self, _name: &str) -> Option<ProcAddress> {
        None
    }

    fn set_clear_color(&mut self, rgba: [f32; 4]) {
        self.clear = wgpu::Color {
            r: rgba[0] as f64,
            g: rgba[1] as f64,
            b: rgba[2] as f64,
            a: rgba[3] as f64,
        };
    }

    fn resize(&mut self, width: u32, height: u32) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }
        gpu.config.width = width;
        gpu.config.height = height;
        gpu.surface.configure(&gpu.device, &gpu.config);
    }

    fn destroy(&mut self) {
        if self.gpu.take().is_some() {
            log::debug!("wgpu context destroyed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::HeadlessWindow;

    #[test]
    fn exposes_no_gl_entry_points() {
        let ctx = WgpuContext::new();
        assert!(ctx.proc_address("glClear").is_none());
        assert!(ctx.device().is_none());
    }

    #[test]
    fn window_without_native_handle_is_rejected() {
        let mut window = HeadlessWindow::new();
        window.initialize("wgpu", 32, 32).unwrap();

        let mut ctx = WgpuContext::new();
        let err = ctx
            .initialize(&window, &EntryPointLibrary::none(), &PlatformParams::default(), &SurfaceConfig::SAMPLE)
            .unwrap_err();
        assert!(err.to_string().contains("native handle"));
        assert!(ctx.handles().context.is_null());
    }
}
